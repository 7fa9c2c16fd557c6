mod cli;

use std::error::Error;

use clap::Parser;
use cli::{Cli, Command};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

fn main() -> Result<(), Box<dyn Error>> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.cmd {
        Command::Plan(args) => cli::plan::handle_plan_command(args),
        Command::Check(args) => cli::check::handle_check_command(args),
    }
}
