//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use lintmux_domain::{Action, OutputFormat};
use std::path::PathBuf;

/// Report format flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormatArg {
    /// One line per issue
    Plain,
    /// Issues grouped per tool
    #[value(alias = "grid")]
    Grouped,
    /// Markdown tables
    #[value(alias = "md")]
    Markdown,
    /// Standalone HTML page
    Html,
    /// JSON report and digest
    Json,
    /// One row per issue
    Csv,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Plain => OutputFormat::Plain,
            OutputFormatArg::Grouped => OutputFormat::Grouped,
            OutputFormatArg::Markdown => OutputFormat::Markdown,
            OutputFormatArg::Html => OutputFormat::Html,
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Csv => OutputFormat::Csv,
        }
    }
}

/// CLI arguments for lintmux
#[derive(Parser, Debug)]
#[command(name = "lintmux")]
#[command(author, version, about = "Run many linters, formatters and scanners as one")]
#[command(long_about = r#"
lintmux runs external analysis tools (ruff, black, mypy, shellcheck, gitleaks,
...) against your code and merges their findings into one report.

Tools that are not installed are skipped. Security scanners live in the
"security" tier and can be selected with --tiers.

Configuration files are loaded from (in priority order):
1. --config <path>                 Explicit config file
2. ./lintmux.toml                  Project-level config
3. ~/.config/lintmux/config.toml   Global config

Example:
  lintmux check src/
  lintmux check --tools ruff,mypy --tool-options ruff:line_length=100
  lintmux fmt
  lintmux check --tiers tools,security --output json
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze files without modifying them
    Check(RunArgs),
    /// Apply formatters and auto-fixes
    Fmt(RunArgs),
    /// List registered tools with their tier and capabilities
    List(ListArgs),
    /// Show configuration file locations and the effective configuration
    Config,
}

impl Command {
    /// The run action and its arguments, for `check` and `fmt`
    pub fn run_args(&self) -> Option<(Action, &RunArgs)> {
        match self {
            Command::Check(args) => Some((Action::Check, args)),
            Command::Fmt(args) => Some((Action::Fmt, args)),
            Command::List(_) | Command::Config => None,
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Files or directories to analyze (default: current directory)
    #[arg(value_name = "PATHS")]
    pub paths: Vec<PathBuf>,

    /// Run only these tools (comma-separated)
    #[arg(long, value_name = "TOOLS", value_delimiter = ',')]
    pub tools: Vec<String>,

    /// Per-tool options: tool:key=value,tool:key=value
    #[arg(long, value_name = "OPTIONS")]
    pub tool_options: Option<String>,

    /// Tiers to auto-select from (comma-separated, e.g. tools,security)
    #[arg(long, value_name = "TIERS", value_delimiter = ',')]
    pub tiers: Vec<String>,

    /// Glob patterns to exclude (comma-separated)
    #[arg(long, value_name = "PATTERNS", value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Report format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormatArg>,

    /// Also write the report to this file (parent directories are created)
    #[arg(long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Attempt tools even when their binary is not found
    #[arg(long)]
    pub auto_install: bool,

    /// Restrict auto-selection to the tools listed in a JSON manifest
    #[arg(long, value_name = "PATH")]
    pub manifest: Option<PathBuf>,

    /// Ask the configured AI provider for a summary of the findings
    #[arg(long)]
    pub ai_summary: bool,

    /// Ask the configured AI provider for fix suggestions (never applied)
    #[arg(long)]
    pub ai_fix: bool,
}

impl RunArgs {
    /// Paths to analyze, defaulting to `.`
    pub fn paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.paths.clone()
        }
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct ListArgs {
    /// Only list tools in these tiers (comma-separated)
    #[arg(long, value_name = "TIERS", value_delimiter = ',')]
    pub tiers: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_with_flags() {
        let cli = Cli::try_parse_from([
            "lintmux",
            "check",
            "src",
            "tests",
            "--tools",
            "ruff,mypy",
            "--tool-options",
            "ruff:line_length=100",
            "--output",
            "json",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        let (action, args) = cli.command.run_args().unwrap();
        assert_eq!(action, Action::Check);
        assert_eq!(args.paths(), [PathBuf::from("src"), PathBuf::from("tests")]);
        assert_eq!(args.tools, ["ruff", "mypy"]);
        assert_eq!(args.tool_options.as_deref(), Some("ruff:line_length=100"));
        assert_eq!(args.output.map(OutputFormat::from), Some(OutputFormat::Json));
    }

    #[test]
    fn test_fmt_defaults_to_current_dir() {
        let cli = Cli::try_parse_from(["lintmux", "fmt", "--quiet"]).unwrap();
        assert!(cli.quiet);
        let (action, args) = cli.command.run_args().unwrap();
        assert_eq!(action, Action::Fmt);
        assert_eq!(args.paths(), [PathBuf::from(".")]);
        assert!(!args.ai_summary);
    }

    #[test]
    fn test_list_and_config() {
        let cli = Cli::try_parse_from(["lintmux", "list", "--tiers", "security"]).unwrap();
        match cli.command {
            Command::List(args) => assert_eq!(args.tiers, ["security"]),
            other => panic!("unexpected command: {other:?}"),
        }
        let cli = Cli::try_parse_from(["lintmux", "--no-config", "config"]).unwrap();
        assert!(cli.no_config);
        assert!(cli.command.run_args().is_none());
    }

    #[test]
    fn test_document_output_to_file() {
        let cli = Cli::try_parse_from([
            "lintmux",
            "check",
            "--output",
            "md",
            "--output-file",
            "reports/lint.md",
        ])
        .unwrap();
        let (_, args) = cli.command.run_args().unwrap();
        assert_eq!(args.output.map(OutputFormat::from), Some(OutputFormat::Markdown));
        assert_eq!(args.output_file, Some(PathBuf::from("reports/lint.md")));

        let cli = Cli::try_parse_from(["lintmux", "check", "-o", "grid"]).unwrap();
        let (_, args) = cli.command.run_args().unwrap();
        assert_eq!(args.output.map(OutputFormat::from), Some(OutputFormat::Grouped));
    }

    #[test]
    fn test_rejects_unknown_output() {
        assert!(Cli::try_parse_from(["lintmux", "check", "--output", "table"]).is_err());
    }
}
