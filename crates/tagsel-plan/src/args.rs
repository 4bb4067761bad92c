use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tagsel_observe::{LogFormat, LogLevel};

/// Print which declared test units run in the install and post-install phases.
#[derive(Debug, Parser)]
#[command(name = "tagsel-plan", version)]
pub struct Args {
    /// Unit manifest (JSON). `-` reads from stdin.
    #[arg(long, short, default_value = "-")]
    pub manifest: PathBuf,

    /// Selection expression, e.g. `slow,-at_install,+post_install`.
    ///
    /// May be repeated; later occurrences override earlier ones tag by tag.
    #[arg(long = "test-tags", short = 't', value_name = "EXPR", allow_hyphen_values = true)]
    pub test_tags: Vec<String>,

    /// Plan output format.
    #[arg(long, value_enum, default_value_t = Output::Text)]
    pub output: Output,

    /// Log output format (text|json|journald).
    #[arg(long, default_value = "text")]
    pub log_format: LogFormat,

    /// Log filter directive.
    #[arg(long, env = "TAGSEL_LOG", default_value = "warn")]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Output {
    Text,
    Json,
}
