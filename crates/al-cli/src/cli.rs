//! Command-line arguments.

use std::path::PathBuf;

use al_llm::Provider;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "apilens", version, about = "Explain Spring controller endpoints with an LLM")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze the endpoint method enclosing a caret position.
    Analyze(AnalyzeArgs),
    /// Show or change the project's LLM configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// List the supported LLM providers.
    Providers,
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Java source file containing the endpoint.
    pub file: PathBuf,

    /// 1-based caret line.
    #[arg(long, required_unless_present = "offset", conflicts_with = "offset")]
    pub line: Option<u32>,

    /// 1-based caret column (with --line).
    #[arg(long, requires = "line", conflicts_with = "offset")]
    pub column: Option<u32>,

    /// Caret byte offset.
    #[arg(long)]
    pub offset: Option<usize>,

    /// Project root.
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// Extra source root (dependency sources); may be repeated.
    #[arg(long = "library", value_name = "DIR")]
    pub libraries: Vec<PathBuf>,

    /// List the fields of collection and array element types.
    #[arg(long)]
    pub unwrap_generics: bool,

    /// Print the assembled context instead of sending it.
    #[arg(long)]
    pub dry_run: bool,

    /// Emit JSON on stdout.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration.
    Show {
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },
    /// Update and save the configuration.
    Set(SetArgs),
}

#[derive(Debug, Args)]
pub struct SetArgs {
    #[arg(long, default_value = ".")]
    pub project: PathBuf,

    /// DEEPSEEK, GLM or QWEN. Resets the URL and model to its defaults.
    #[arg(long, value_parser = parse_provider)]
    pub provider: Option<Provider>,

    #[arg(long)]
    pub api_key: Option<String>,

    #[arg(long)]
    pub api_url: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    /// Overall request timeout in seconds.
    #[arg(long)]
    pub timeout_secs: Option<u64>,
}

fn parse_provider(value: &str) -> Result<Provider, String> {
    Provider::from_id_loose(value).ok_or_else(|| {
        let known: Vec<&str> = Provider::ALL.iter().map(|p| p.id()).collect();
        format!("unknown provider `{value}` (expected one of {})", known.join(", "))
    })
}
