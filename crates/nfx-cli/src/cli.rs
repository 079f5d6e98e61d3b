use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

use nfx_types::NoteId;

#[derive(Parser)]
#[command(
    name = "nfx",
    about = "Note store forensics: rebuild embedded objects and report them",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with defaults for database, format and notes
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Text,
}

#[derive(Subcommand)]
pub enum Command {
    /// Flatten each note's embedded objects into report rows
    Report(ReportArgs),
    /// Show each note's object tree
    Tree(SourceArgs),
    /// Print the embedded markup of each root object
    Markup(SourceArgs),
    /// Print the report column names
    Headers,
}

#[derive(Args)]
pub struct SourceArgs {
    /// Path to the note store database
    #[arg(long)]
    pub db: Option<PathBuf>,
    /// Note to load (repeatable)
    #[arg(short = 'n', long = "note")]
    pub notes: Vec<NoteId>,
}

#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[arg(long)]
    pub format: Option<OutputFormat>,
    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
