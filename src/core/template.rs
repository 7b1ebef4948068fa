//! Top-level orchestration: configure, build, then synthesize or stop.
//!
//! One run moves through Initializing → Configuring → Building →
//! (DryRun | Applying) → Done. Selectors come from the process environment
//! during Initializing; every downstream failure unwinds to a single
//! [`TemplateError`] here and nowhere else.

use super::error::{StackError, TemplateError};
use super::identity;
use super::loader::{ConfigLoader, Selectors};
use super::props::AppProps;
use crate::synth::App;
use std::path::PathBuf;
use tracing::info;

/// Environment variable naming follows the external selector contract.
const APPLICATION_VAR: &str = "application";
const DTAP_VAR: &str = "dtap";
const VPC_VAR: &str = "vpc";
const DRY_RUN_VAR: &str = "dryrun";

/// Everything a run needs before configuration is resolved.
#[derive(Debug, Clone)]
pub struct TemplateSpec {
    pub selectors: Selectors,
    /// Any non-empty `dryrun` value enables dry-run.
    pub dry_run: bool,
    pub config_root: PathBuf,
    pub out_dir: PathBuf,
}

impl TemplateSpec {
    /// Read selectors from the process environment.
    pub fn from_env(config_root: PathBuf, out_dir: PathBuf) -> Self {
        Self {
            selectors: Selectors {
                application: env_selector(APPLICATION_VAR),
                dtap: env_selector(DTAP_VAR),
                vpc: env_selector(VPC_VAR),
            },
            dry_run: env_selector(DRY_RUN_VAR).is_some(),
            config_root,
            out_dir,
        }
    }
}

fn env_selector(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunReport {
    pub unique_id: String,
    /// Stack names in definition order.
    pub stacks: Vec<String>,
    /// False exactly when the run was a dry run.
    pub synthesized: bool,
    /// Template documents written during Applying.
    pub templates: Vec<PathBuf>,
}

/// Drive one provisioning run.
///
/// `define_stacks` is the caller-supplied hook that instantiates stacks
/// against the application context, in an order of its choosing. Stack
/// definition is sequential and synchronous; the properties are read-only
/// once the hook starts.
pub fn run<F>(spec: &TemplateSpec, define_stacks: F) -> Result<RunReport, TemplateError>
where
    F: FnOnce(&mut App, &AppProps) -> Result<(), StackError>,
{
    // Configuring
    let mut props = AppProps::new();
    let loader = ConfigLoader::new(&spec.config_root);
    loader.load(&spec.selectors, &mut props)?;
    info!(properties = props.len(), "configuration resolved");

    // Building
    let unique_id = identity::unique_id(&props)?;
    let mut app = App::new(unique_id.clone());
    define_stacks(&mut app, &props)?;
    let stacks: Vec<String> = app.stacks().iter().map(|s| s.name.clone()).collect();
    info!(unique_id = %unique_id, stacks = stacks.len(), "stacks defined");

    // DryRun stops here: no synthesis, no filesystem output.
    if spec.dry_run {
        info!("dry run: skipping synthesis");
        return Ok(RunReport {
            unique_id,
            stacks,
            synthesized: false,
            templates: Vec::new(),
        });
    }

    // Applying
    let templates = app.synth(&spec.out_dir)?;

    Ok(RunReport {
        unique_id,
        stacks,
        synthesized: true,
        templates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::PropError;
    use crate::stacks::{self, Stack, StackContext};
    use serde_json::json;
    use std::path::Path;

    struct Bucket;

    impl Stack for Bucket {
        fn name(&self) -> &str {
            "bucket"
        }

        fn define_resources(&self, ctx: &mut StackContext<'_>) -> Result<(), PropError> {
            let region = ctx.props().get_string("region")?;
            ctx.add_resource(
                "Bucket",
                "AWS::S3::Bucket",
                json!({ "BucketName": ctx.unique_id(), "Region": region }),
            );
            Ok(())
        }
    }

    fn write_doc(root: &Path, layer: &str, selector: &str, body: &str) {
        let dir = root.join(layer);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{selector}.json")), body).unwrap();
    }

    fn spec(root: &Path, out: &Path, dry_run: bool) -> TemplateSpec {
        TemplateSpec {
            selectors: Selectors {
                application: Some("shop".to_string()),
                dtap: Some("staging".to_string()),
                vpc: None,
            },
            dry_run,
            config_root: root.to_path_buf(),
            out_dir: out.to_path_buf(),
        }
    }

    #[test]
    fn full_run_synthesizes_once() {
        let config = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_doc(config.path(), "dtap", "staging", r#"{"region": "eu-west-1"}"#);
        write_doc(config.path(), "application", "shop", "{}");

        let report = run(&spec(config.path(), out.path(), false), |app, props| {
            stacks::define(app, props, &Bucket)
        })
        .unwrap();

        assert_eq!(report.unique_id, "shop-staging");
        assert_eq!(report.stacks, vec!["bucket"]);
        assert!(report.synthesized);
        assert_eq!(report.templates.len(), 1);
        assert!(out.path().join("bucket.template.json").exists());
    }

    #[test]
    fn dry_run_defines_stacks_but_writes_nothing() {
        let config = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_doc(config.path(), "dtap", "staging", r#"{"region": "eu-west-1"}"#);
        write_doc(config.path(), "application", "shop", "{}");

        let report = run(&spec(config.path(), out.path(), true), |app, props| {
            stacks::define(app, props, &Bucket)
        })
        .unwrap();

        assert!(!report.synthesized);
        assert_eq!(report.stacks, vec!["bucket"]);
        assert!(report.templates.is_empty());
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn missing_application_selector_aborts_before_building() {
        let out = tempfile::tempdir().unwrap();
        let mut s = spec(Path::new("/nonexistent"), out.path(), false);
        s.selectors.application = None;

        let err = run(&s, |_, _| panic!("stacks must not be defined")).unwrap_err();
        assert!(err.to_string().contains("missing property: application"));
    }

    #[test]
    fn stack_failure_propagates_with_the_key_name() {
        let config = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        // No "region" key anywhere.
        write_doc(config.path(), "dtap", "staging", "{}");
        write_doc(config.path(), "application", "shop", "{}");

        let err = run(&spec(config.path(), out.path(), false), |app, props| {
            stacks::define(app, props, &Bucket)
        })
        .unwrap_err();

        assert!(err.to_string().contains("stack 'bucket'"));
        assert!(err.to_string().contains("missing property: region"));
        assert_eq!(std::fs::read_dir(out.path()).unwrap().count(), 0);
    }

    #[test]
    fn config_load_failure_names_the_location() {
        let config = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_doc(config.path(), "application", "shop", "{}");

        let mut s = spec(config.path(), out.path(), false);
        s.selectors.vpc = Some("euwest".to_string());

        let err = run(&s, |_, _| Ok(())).unwrap_err();
        assert!(err.to_string().contains("vpc/euwest.json"));
    }

    #[test]
    fn end_to_end_example_resolves_expected_store() {
        let config = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        write_doc(config.path(), "dtap", "staging", r#"{"region": "eu-west-1"}"#);
        write_doc(
            config.path(),
            "vpc",
            "euwest",
            r#"{"region": "eu-west-1", "cidr": "10.0.0.0/16"}"#,
        );
        write_doc(
            config.path(),
            "application",
            "shop",
            r#"{"instance_type": "t3.micro"}"#,
        );

        let mut s = spec(config.path(), out.path(), true);
        s.selectors.vpc = Some("euwest".to_string());

        let report = run(&s, |app, props| {
            assert_eq!(props.get("region"), Some("eu-west-1"));
            assert_eq!(props.get("cidr"), Some("10.0.0.0/16"));
            assert_eq!(props.get("instance_type"), Some("t3.micro"));
            assert_eq!(props.get("app_id"), Some("shop"));
            assert_eq!(app.unique_id(), "shop-staging");
            Ok(())
        })
        .unwrap();

        assert_eq!(report.unique_id, "shop-staging");
    }
}
