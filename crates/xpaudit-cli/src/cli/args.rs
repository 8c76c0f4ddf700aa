use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use xpaudit_core::OutputFormat;

#[derive(Parser)]
#[command(
    name = "xpaudit",
    version,
    about = "Audit Crossplane Compositions for status.conditions / status.atProvider propagation"
)]
pub struct Cli {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Audit compositions and write the report tables
    Audit(AuditArgs),
    /// Print per-composition verdicts without writing files
    Explain(ExplainArgs),
    Version,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AuditArgs {
    /// Composition files or directories (YAML or JSON)
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Config file (defaults to ./xpaudit.yaml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for the report tables
    #[arg(long, env = "XPAUDIT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    #[arg(long, value_enum, env = "XPAUDIT_FORMAT")]
    pub format: Option<FormatArg>,

    /// Exit 1 when any composition is flagged
    #[arg(long, overrides_with = "no_fail_on_flagged")]
    pub fail_on_flagged: bool,

    /// Exit 0 even when compositions are flagged (overrides the config file)
    #[arg(long, overrides_with = "fail_on_flagged")]
    pub no_fail_on_flagged: bool,
}

impl AuditArgs {
    /// `None` when neither flag was given.
    pub fn fail_on_flagged_override(&self) -> Option<bool> {
        match (self.fail_on_flagged, self.no_fail_on_flagged) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(clap::Args, Debug, Clone)]
pub struct ExplainArgs {
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}
