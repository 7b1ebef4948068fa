//! Cirrus CLI — declarative cloud stack provisioning.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "cirrus",
    version,
    about = "Declarative cloud stack provisioning — layered configuration, deterministic naming, dry-run synthesis"
)]
struct Cli {
    #[command(subcommand)]
    command: cirrus::cli::Commands,
}

fn main() {
    cirrus::cli::init_tracing();

    let cli = Cli::parse();
    if let Err(e) = cirrus::cli::dispatch(cli.command) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
