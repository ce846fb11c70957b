use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use cs_utf8::FixMode;

#[derive(Parser)]
#[command(
    name = "cscheck",
    about = "Compare text files and validate UTF-8 encoding",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// TOML file with [diff] and [utf8] option tables
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare two text files line by line
    Diff(DiffArgs),
    /// Report every invalid UTF-8 byte in a file
    Validate(ValidateArgs),
    /// Repair invalid UTF-8 bytes in a file
    Fix(FixArgs),
    /// Guess which encoding a file was saved with
    Analyze(AnalyzeArgs),
}

#[derive(Args)]
pub struct DiffArgs {
    pub old: PathBuf,
    pub new: PathBuf,
    /// Lines of context around each change
    #[arg(short = 'U', long)]
    pub context: Option<usize>,
    #[arg(short = 'w', long)]
    pub ignore_whitespace: bool,
    #[arg(short = 'i', long)]
    pub ignore_case: bool,
    /// Print a unified diff patch instead of the report
    #[arg(short, long)]
    pub unified: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    pub file: PathBuf,
    #[arg(long)]
    pub max_issues: Option<usize>,
    /// Number of issues to print
    #[arg(long, default_value = "20")]
    pub show: usize,
}

#[derive(Args)]
pub struct FixArgs {
    pub file: PathBuf,
    #[arg(short, long, value_enum, default_value = "replace")]
    pub mode: ModeArg,
    /// Output path (default: <file>.fixed)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Character written by --mode replace
    #[arg(long)]
    pub replacement: Option<char>,
}

#[derive(Args)]
pub struct AnalyzeArgs {
    pub file: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum ModeArg {
    Replace,
    Remove,
    Escape,
}

impl From<ModeArg> for FixMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Replace => FixMode::Replace,
            ModeArg::Remove => FixMode::Remove,
            ModeArg::Escape => FixMode::Escape,
        }
    }
}
