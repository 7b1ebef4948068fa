//! CLI subcommands — synth, props, list.

use crate::core::error::TemplateError;
use crate::core::loader::{ConfigLoader, Selectors};
use crate::core::props::AppProps;
use crate::core::template::{self, TemplateSpec};
use crate::stacks;
use clap::{Args, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Selector arguments shared by every command that resolves configuration.
///
/// Flags take precedence over the `application`/`dtap`/`vpc`/`dryrun`
/// process environment variables.
#[derive(Args, Debug)]
pub struct SelectorArgs {
    /// Application selector (mandatory, here or via the environment)
    #[arg(short, long)]
    application: Option<String>,

    /// Environment-tier selector
    #[arg(short, long)]
    dtap: Option<String>,

    /// Network selector
    #[arg(long)]
    vpc: Option<String>,

    /// Configuration root directory
    #[arg(long, default_value = "config")]
    config_root: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve configuration, define stacks, and write stack templates
    Synth {
        #[command(flatten)]
        selectors: SelectorArgs,

        /// Define stacks without writing any templates
        #[arg(long)]
        dry_run: bool,

        /// Output directory for synthesized templates
        #[arg(short, long, default_value = "cirrus.out")]
        out: PathBuf,

        /// Define only the named stacks (default: every built-in stack)
        #[arg(short, long)]
        stack: Vec<String>,
    },

    /// Print the resolved property set without defining any stacks
    Props {
        #[command(flatten)]
        selectors: SelectorArgs,
    },

    /// List the built-in stacks
    List,
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` overrides the default `warn` filter. Events go to stderr so
/// synthesized output and property listings stay clean on stdout.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Dispatch a CLI command.
pub fn dispatch(cmd: Commands) -> Result<(), TemplateError> {
    match cmd {
        Commands::Synth {
            selectors,
            dry_run,
            out,
            stack,
        } => cmd_synth(selectors, dry_run, out, &stack),
        Commands::Props { selectors } => cmd_props(selectors),
        Commands::List => {
            for stack in stacks::builtin_stacks() {
                println!("{}", stack.name());
            }
            Ok(())
        }
    }
}

fn cmd_synth(
    args: SelectorArgs,
    dry_run: bool,
    out: PathBuf,
    names: &[String],
) -> Result<(), TemplateError> {
    let selected = select_stacks(names)?;
    let spec = merged_spec(args, dry_run, out);

    let report = template::run(&spec, |app, props| {
        for stack in &selected {
            stacks::define(app, props, stack.as_ref())?;
        }
        Ok(())
    })?;

    println!("Defined {} stack(s) as {}", report.stacks.len(), report.unique_id);
    if report.synthesized {
        for path in &report.templates {
            println!("  wrote {}", path.display());
        }
    } else {
        println!("  dry run: no templates written");
    }
    Ok(())
}

fn cmd_props(args: SelectorArgs) -> Result<(), TemplateError> {
    let spec = merged_spec(args, true, PathBuf::new());

    let mut props = AppProps::new();
    ConfigLoader::new(&spec.config_root).load(&spec.selectors, &mut props)?;

    for (key, value) in props.iter() {
        println!("{key}={value}");
    }
    Ok(())
}

/// Build a run spec from the environment, letting flags win.
fn merged_spec(args: SelectorArgs, dry_run: bool, out: PathBuf) -> TemplateSpec {
    let mut spec = TemplateSpec::from_env(args.config_root, out);
    let flags = Selectors {
        application: args.application,
        dtap: args.dtap,
        vpc: args.vpc,
    };
    if flags.application.is_some() {
        spec.selectors.application = flags.application;
    }
    if flags.dtap.is_some() {
        spec.selectors.dtap = flags.dtap;
    }
    if flags.vpc.is_some() {
        spec.selectors.vpc = flags.vpc;
    }
    spec.dry_run = spec.dry_run || dry_run;
    spec
}

/// Resolve stack names to built-in stacks, defaulting to all of them.
fn select_stacks(names: &[String]) -> Result<Vec<Box<dyn stacks::Stack>>, TemplateError> {
    let all = stacks::builtin_stacks();
    if names.is_empty() {
        return Ok(all);
    }

    for name in names {
        if !all.iter().any(|s| s.name() == name) {
            let known: Vec<&str> = all.iter().map(|s| s.name()).collect();
            return Err(TemplateError::new(format!(
                "unknown stack '{name}' (known: {})",
                known.join(", ")
            )));
        }
    }

    // Preserve the conventional definition order regardless of flag order.
    Ok(all
        .into_iter()
        .filter(|stack| names.iter().any(|n| n == stack.name()))
        .collect())
}
