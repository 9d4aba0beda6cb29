//! CLI entrypoint for lintmux
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use lintmux_application::{
    CommandRunner, NoProgress, PluginRegistry, ProposeFixesUseCase, RunProgress, RunRequest,
    RunToolsUseCase, SelectToolsUseCase, SelectionRequest, SummarizeUseCase, ToolAvailability,
    TokioSleeper,
};
use lintmux_domain::tool::options::{OPTION_EXCLUDE_PATTERNS, parse_tool_options};
use lintmux_domain::{Action, AiSummary, FixSuggestion, OutputFormat, Report, ToolOptions};
use lintmux_infrastructure::{
    AvailabilityCache, ConfigLoader, FileConfig, KNOWN_PROVIDERS, PathAvailability, ProcessRunner,
    capture_env, create_provider, load_manifest, register_builtin_tools,
};
use lintmux_presentation::{
    Cli, Command, ConsoleFormatter, ListArgs, OutputFormatter, ProgressReporter, RunArgs,
    write_report_file,
};
use std::collections::BTreeMap;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting lintmux");

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    for warning in config.validate() {
        warn!("{}", warning);
    }
    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let workdir = std::env::current_dir().context("Failed to read the current directory")?;

    // === Dependency Injection ===
    let runner: Arc<dyn CommandRunner> = Arc::new(ProcessRunner::new(capture_env()));
    let mut registry = PluginRegistry::new();
    register_builtin_tools(&mut registry, runner, &workdir)?;
    let registry = Arc::new(registry);
    let availability: Arc<dyn ToolAvailability> = Arc::new(PathAvailability::new());

    match &cli.command {
        Command::List(args) => {
            list_tools(&registry, availability.as_ref(), args);
            Ok(ExitCode::SUCCESS)
        }
        Command::Config => {
            show_config(&cli, &config)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check(args) => run(Action::Check, args, &cli, &config, registry, availability, &workdir).await,
        Command::Fmt(args) => run(Action::Fmt, args, &cli, &config, registry, availability, &workdir).await,
    }
}

async fn run(
    action: Action,
    args: &RunArgs,
    cli: &Cli,
    config: &FileConfig,
    registry: Arc<PluginRegistry>,
    availability: Arc<dyn ToolAvailability>,
    workdir: &Path,
) -> Result<ExitCode> {
    let tiers = if args.tiers.is_empty() {
        config.execution.tiers.clone()
    } else {
        args.tiers.clone()
    };

    // Select; a manifest restricts auto-selection, --tools still wins
    let mut request = SelectionRequest::new(action)
        .with_tools(args.tools.iter().cloned())
        .with_tiers(tiers.iter().cloned())
        .with_auto_install(args.auto_install || config.execution.auto_install)
        .with_disabled(config.disabled_tools());
    if let Some(path) = args.manifest.as_ref().filter(|_| args.tools.is_empty()) {
        let manifest = load_manifest(path)?;
        let tier_refs: Vec<&str> = tiers.iter().map(String::as_str).collect();
        let names = manifest.names_in_tiers(&tier_refs);
        for name in names.iter().filter(|n| !registry.contains(n)) {
            warn!(tool = %name, "Manifest tool is not a built-in tool, ignoring");
        }
        request = request.with_allowed(names);
    }
    let selection = SelectToolsUseCase::new(registry.clone(), availability).execute(&request)?;
    info!(tools = ?selection.names().collect::<Vec<_>>(), "Selected tools");

    // Options: config tables, then --exclude, then --tool-options
    let cli_options = match &args.tool_options {
        Some(raw) => parse_tool_options(raw)?,
        None => BTreeMap::new(),
    };
    for name in cli_options.keys() {
        if !selection.names().any(|n| n == name) {
            warn!(tool = %name, "Options given for a tool that is not running");
        }
    }
    let tool_options = selection
        .names()
        .map(|name| {
            let options = tool_options_for(config, name, &args.exclude, cli_options.get(name));
            (name.to_string(), options)
        })
        .collect();

    // Run
    let run_request = RunRequest::new(action, args.paths()).with_tool_options(tool_options);
    let use_case = RunToolsUseCase::new(registry);
    let progress: Box<dyn RunProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else {
        Box::new(ProgressReporter::new())
    };
    let report = use_case
        .execute_with_progress(&selection, &run_request, progress.as_ref())
        .await?
        .into_report();

    // AI
    let (summary, fixes) = run_ai(args, config, &report, workdir).await;

    // Output
    let format = args
        .output
        .map(OutputFormat::from)
        .or(config.output.format)
        .unwrap_or_default();
    let formatter = ConsoleFormatter::new().with_workspace_root(workdir);
    let mut rendered = if format == OutputFormat::Json {
        formatter.format_json_with_ai(&report, summary.as_ref(), &fixes) + "\n"
    } else {
        formatter.format_report(&report, format)
    };
    if format.is_console() {
        if let Some(summary) = &summary {
            rendered.push_str(&formatter.format_summary(summary));
        }
        if args.ai_fix {
            rendered.push_str(&formatter.format_fixes(&fixes));
        }
    }
    print!("{}", rendered);

    if let Some(path) = args.output_file.as_ref().or(config.output.file.as_ref()) {
        write_report_file(path, &rendered)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        info!(path = %path.display(), format = %format, "Wrote report file");
    }

    Ok(if report.is_passing(action) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn tool_options_for(
    config: &FileConfig,
    tool: &str,
    exclude: &[String],
    cli_options: Option<&ToolOptions>,
) -> ToolOptions {
    let mut options = config.options_for(tool);
    if !exclude.is_empty() {
        let mut patterns = options.exclude_patterns().to_vec();
        patterns.extend(exclude.iter().cloned());
        options.insert(OPTION_EXCLUDE_PATTERNS, patterns);
    }
    match cli_options {
        Some(overrides) => options.merged(overrides),
        None => options,
    }
}

/// AI summary and fix proposals; failures are reported and never fail the run
async fn run_ai(
    args: &RunArgs,
    config: &FileConfig,
    report: &Report,
    workdir: &Path,
) -> (Option<AiSummary>, Vec<FixSuggestion>) {
    let want_summary = args.ai_summary || config.ai.enabled;
    if !want_summary && !args.ai_fix {
        return (None, Vec::new());
    }
    if report.total_issues() == 0 {
        return (None, Vec::new());
    }

    let provider = match create_provider(&config.ai, |var| std::env::var(var).ok()) {
        Ok(provider) => provider,
        Err(e) => {
            warn!("AI features disabled: {}", e);
            return (None, Vec::new());
        }
    };
    let sleeper = Arc::new(TokioSleeper);
    let policy = config.ai.retry_policy();

    let mut summary = None;
    if want_summary {
        let use_case = SummarizeUseCase::new(provider.clone(), sleeper.clone())
            .with_policy(policy)
            .with_max_tokens(config.ai.max_tokens);
        match use_case.execute(&report.digest(Some(workdir))).await {
            Ok(result) => summary = result,
            Err(e) => warn!("AI summary failed: {}", e),
        }
    }

    let mut fixes = Vec::new();
    if args.ai_fix {
        let use_case = ProposeFixesUseCase::new(provider, sleeper, workdir)
            .with_policy(policy)
            .with_max_fix_issues(config.ai.max_fix_issues);
        match use_case.execute(report.issues()).await {
            Ok(result) => fixes = result,
            Err(e) => warn!("AI fix suggestions failed: {}", e),
        }
    }

    (summary, fixes)
}

fn list_tools(registry: &PluginRegistry, availability: &dyn ToolAvailability, args: &ListArgs) {
    let definitions = registry
        .definitions()
        .filter(|d| args.tiers.is_empty() || args.tiers.iter().any(|t| d.in_tier(t)));
    print!(
        "{}",
        ConsoleFormatter::format_tool_list(definitions, |d| availability.is_available(&d.executable))
    );
}

fn show_config(cli: &Cli, config: &FileConfig) -> Result<()> {
    println!("Configuration sources (in priority order):");
    if cli.no_config {
        println!("  [     ] Files disabled by --no-config");
    } else {
        for source in ConfigLoader::sources(cli.config.as_deref()) {
            let mark = if source.found { "FOUND" } else { "     " };
            println!("  [{}] {:<8} {}", mark, format!("{}:", source.label), source.path.display());
        }
    }
    println!("  [     ] Default: built-in defaults");
    println!();
    let providers = AvailabilityCache::from_env();
    println!("AI providers:");
    for name in KNOWN_PROVIDERS {
        let status = if providers.is_available(name) { "key found" } else { "no API key" };
        let active = if config.ai.provider_name() == *name { " (configured)" } else { "" };
        println!("  {:<10} {}{}", name, status, active);
    }
    println!();
    println!("Effective configuration:");
    println!("{}", toml_string(config)?);
    Ok(())
}

fn toml_string(config: &FileConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to render configuration")
}

