pub mod check;
pub mod plan;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "ypatch", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Translate a yang-patch message into the data-resource calls it would issue
    Plan(PlanArgs),

    Check(CheckArgs),
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Request path of the target data resource,
    /// e.g., /restconf/data/example-jukebox:jukebox/playlist=Foo-One
    ///
    /// Edit targets from the message body are appended to this path when
    /// building the planned calls.
    #[arg(long, env = "YPATCH_PATH")]
    pub path: String,

    /// Number of leading request-path segments that address the API root
    /// rather than data nodes
    #[arg(long, default_value_t = 2)]
    pub offset: usize,

    /// Path to a JSON schema stand-in mapping list element names to their
    /// key leaf names, e.g. {"song": "index"}
    #[arg(short, long)]
    pub schema: Option<PathBuf>,

    /// Address a datastore resource instead of the data resource
    #[arg(long)]
    pub datastore: bool,

    /// Print the planned calls as a JSON array instead of one line per call
    #[arg(long)]
    pub json: bool,

    /// Path to the yang-patch message body; read from stdin when omitted
    pub file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Path to the yang-patch message body; read from stdin when omitted
    pub file: Option<PathBuf>,
}
