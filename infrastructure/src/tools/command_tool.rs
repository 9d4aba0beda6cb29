//! Command-driven tool plugin
//!
//! [`CommandTool`] is the one [`ToolPlugin`] implementation behind every
//! built-in tool. It discovers target files, builds the command from its
//! [`ToolRecipe`], hands it to the [`CommandRunner`] and parses the output.
//!
//! # Check flow
//!
//! ```text
//! paths ──▶ discover files ──▶ (none? success, nothing run)
//!                 │
//!                 ▼
//!        for each check command: run ──▶ parse ──▶ issues
//! ```
//!
//! A fix runs the fix command and then re-runs the checks; the result
//! carries the issues that remain.

use super::discovery::{FileFilter, discover_files};
use super::recipe::{ArgsFn, Invocation, OutputStream, Target, ToolRecipe};
use async_trait::async_trait;
use lintmux_application::{
    Checkable, CommandOutput, CommandRunner, CommandSpec, Configurable, ExecutionError, Fixable,
    ToolPlugin,
};
use lintmux_domain::core::text::truncate;
use lintmux_domain::tool::options::common_option_specs;
use lintmux_domain::{
    ConfigurationError, Issue, OptionSpec, RunResult, ToolDefinition, ToolFailure, ToolOptions,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Longest tool output quoted in a failure message
const MAX_FAILURE_EXCERPT: usize = 500;

pub struct CommandTool {
    recipe: Arc<ToolRecipe>,
    options: ToolOptions,
    runner: Arc<dyn CommandRunner>,
    workdir: PathBuf,
}

impl CommandTool {
    pub fn new(recipe: Arc<ToolRecipe>, runner: Arc<dyn CommandRunner>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            recipe,
            options: ToolOptions::new(),
            runner,
            workdir: workdir.into(),
        }
    }

    fn name(&self) -> &str {
        self.recipe.name()
    }

    /// Files to pass to the tool; `None` when a file-targeted tool has
    /// nothing to look at.
    fn target_files(&self, paths: &[PathBuf], options: &ToolOptions) -> Option<Vec<PathBuf>> {
        match self.recipe.target {
            Target::Project => Some(Vec::new()),
            Target::Files => {
                let filter = FileFilter::new(&self.recipe.definition.file_patterns, options.exclude_patterns());
                let roots = if paths.is_empty() {
                    std::slice::from_ref(&self.workdir)
                } else {
                    paths
                };
                let files = discover_files(roots, &filter);
                (!files.is_empty()).then_some(files)
            }
        }
    }

    async fn invoke(&self, args: Vec<String>, options: &ToolOptions) -> Result<CommandOutput, ToolFailure> {
        let timeout = options.timeout().unwrap_or(self.recipe.definition.default_timeout);
        let spec = CommandSpec::new(self.recipe.program, timeout)
            .args(args)
            .current_dir(&self.workdir)
            .env("NO_COLOR", "1");

        self.runner.run(spec).await.map_err(|e| match e {
            ExecutionError::Timeout { after, .. } => ToolFailure::timeout(after),
            ExecutionError::Spawn { .. } | ExecutionError::Io { .. } => ToolFailure::spawn(e.to_string()),
        })
    }

    fn findings_text(&self, output: &CommandOutput) -> String {
        match self.recipe.stream {
            OutputStream::Stdout => output.stdout.clone(),
            OutputStream::Stderr => output.stderr.clone(),
            OutputStream::Both => output.combined(),
        }
    }

    /// Run every check command and collect the issues.
    async fn run_checks(&self, invocation: &Invocation<'_>) -> Result<(Vec<Issue>, String), ToolFailure> {
        let mut issues = Vec::new();
        let mut raw = String::new();
        for build in self.recipe.check {
            let output = self.invoke(build(invocation), invocation.options).await?;
            let text = self.findings_text(&output);
            let found = (self.recipe.parser)(Some(&text));

            if found.is_empty() && !output.success() {
                let excerpt = truncate(output.combined().trim(), MAX_FAILURE_EXCERPT);
                return Err(ToolFailure::exit_status(output.exit_code, excerpt));
            }

            debug!(tool = %self.name(), issues = found.len(), exit = ?output.exit_code, "Parsed tool output");
            issues.extend(found);
            if !raw.is_empty() && !text.is_empty() {
                raw.push('\n');
            }
            raw.push_str(&text);
        }
        Ok((issues, raw))
    }

    async fn run_fix(&self, build: ArgsFn, paths: &[PathBuf], options: &ToolOptions) -> RunResult {
        let started = Instant::now();
        let Some(files) = self.target_files(paths, options) else {
            return RunResult::completed(self.name(), Vec::new(), "No matching files");
        };
        let invocation = Invocation {
            files: &files,
            paths,
            options,
        };

        let fix_output = match self.invoke(build(&invocation), options).await {
            Ok(output) => output,
            Err(failure) => return RunResult::failed(self.name(), failure).with_duration(started.elapsed()),
        };
        debug!(tool = %self.name(), exit = ?fix_output.exit_code, "Fix command finished");

        let result = match self.run_checks(&invocation).await {
            Ok((remaining, raw)) => {
                let fix_text = fix_output.combined();
                let raw = if fix_text.trim().is_empty() {
                    raw
                } else {
                    format!("{}\n{}", fix_text.trim_end(), raw)
                };
                RunResult::completed(self.name(), remaining, raw)
            }
            Err(failure) => RunResult::failed(self.name(), failure),
        };
        result.with_duration(started.elapsed())
    }
}

impl Configurable for CommandTool {
    fn option_specs(&self) -> Vec<OptionSpec> {
        let mut specs = common_option_specs().to_vec();
        specs.extend(self.recipe.options.iter().cloned());
        specs
    }

    fn options(&self) -> &ToolOptions {
        &self.options
    }

    fn set_options(&mut self, options: ToolOptions) -> Result<(), ConfigurationError> {
        self.options = options.validate(self.name(), &self.option_specs())?;
        Ok(())
    }
}

#[async_trait]
impl Checkable for CommandTool {
    async fn check(&self, paths: &[PathBuf], options: &ToolOptions) -> RunResult {
        let started = Instant::now();
        let Some(files) = self.target_files(paths, options) else {
            debug!(tool = %self.name(), "No matching files");
            return RunResult::completed(self.name(), Vec::new(), "No matching files");
        };
        let invocation = Invocation {
            files: &files,
            paths,
            options,
        };

        let result = match self.run_checks(&invocation).await {
            Ok((issues, raw)) => RunResult::completed(self.name(), issues, raw),
            Err(failure) => RunResult::failed(self.name(), failure),
        };
        result.with_duration(started.elapsed())
    }
}

#[async_trait]
impl Fixable for CommandTool {
    async fn fix(&self, paths: &[PathBuf], options: &ToolOptions) -> RunResult {
        match self.recipe.fix {
            Some(build) => self.run_fix(build, paths, options).await,
            None => RunResult::failed(
                self.name(),
                ToolFailure::unsupported(format!("Tool '{}' does not support fix", self.name())),
            ),
        }
    }
}

impl ToolPlugin for CommandTool {
    fn definition(&self) -> &ToolDefinition {
        &self.recipe.definition
    }

    fn as_fixable(&self) -> Option<&dyn Fixable> {
        self.recipe.fix.is_some().then_some(self as &dyn Fixable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lintmux_domain::parsers::parse_ruff_output;
    use lintmux_domain::{FailureKind, OptionKind, OptionValue};
    use std::sync::Mutex;
    use std::time::Duration;

    /// Returns scripted outputs in order and records every spec
    struct ScriptedRunner {
        outputs: Mutex<Vec<Result<CommandOutput, ExecutionError>>>,
        specs: Mutex<Vec<CommandSpec>>,
    }

    impl ScriptedRunner {
        fn new(outputs: Vec<Result<CommandOutput, ExecutionError>>) -> Arc<Self> {
            Arc::new(Self {
                outputs: Mutex::new(outputs),
                specs: Mutex::new(Vec::new()),
            })
        }

        fn specs(&self) -> Vec<CommandSpec> {
            self.specs.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CommandRunner for ScriptedRunner {
        async fn run(&self, spec: CommandSpec) -> Result<CommandOutput, ExecutionError> {
            self.specs.lock().unwrap().push(spec);
            self.outputs.lock().unwrap().remove(0)
        }
    }

    fn stdout(exit_code: i32, text: &str) -> Result<CommandOutput, ExecutionError> {
        Ok(CommandOutput {
            exit_code: Some(exit_code),
            stdout: text.to_string(),
            ..CommandOutput::default()
        })
    }

    fn check_args(inv: &Invocation<'_>) -> Vec<String> {
        let mut args = vec!["check".to_string(), "--output-format".to_string(), "json".to_string()];
        if let Some(n) = inv.options.get("line_length").and_then(OptionValue::as_int) {
            args.push(format!("--line-length={n}"));
        }
        args.extend(inv.file_args());
        args
    }

    fn fix_args(inv: &Invocation<'_>) -> Vec<String> {
        let mut args = vec!["check".to_string(), "--fix".to_string()];
        args.extend(inv.file_args());
        args
    }

    const OPTIONS: &[OptionSpec] = &[OptionSpec::new("line_length", OptionKind::Int)];
    const CHECKS: &[ArgsFn] = &[check_args];

    fn recipe(fix: bool) -> Arc<ToolRecipe> {
        let mut definition = ToolDefinition::new("ruff", "Python linter").with_patterns(&["*.py"]);
        if fix {
            definition = definition.with_fix();
        }
        Arc::new(ToolRecipe {
            definition,
            program: "ruff",
            check: CHECKS,
            fix: fix.then_some(fix_args as ArgsFn),
            parser: parse_ruff_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: OPTIONS,
        })
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.py"), "import os\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "hi\n").unwrap();
        dir
    }

    const RUFF_JSON: &str = r#"[{
        "code": "F401", "message": "`os` imported but unused", "filename": "app.py",
        "location": {"row": 1, "column": 8}, "end_location": {"row": 1, "column": 10},
        "fix": {"applicability": "safe"}
    }]"#;

    #[tokio::test]
    async fn test_check_parses_issues_and_builds_command() {
        let dir = project();
        let runner = ScriptedRunner::new(vec![stdout(1, RUFF_JSON)]);
        let mut tool = CommandTool::new(recipe(false), runner.clone(), dir.path());
        tool.set_options(ToolOptions::new().with("line_length", 100_i64).with("timeout", 5_i64))
            .unwrap();

        let result = tool.check(&[dir.path().to_path_buf()], tool.options()).await;
        assert!(!result.success);
        assert_eq!(result.issues_count, 1);
        assert_eq!(result.issues[0].code, "F401");
        assert!(result.issues[0].fixable);

        let spec = &runner.specs()[0];
        assert_eq!(spec.program, "ruff");
        assert_eq!(spec.timeout, Duration::from_secs(5));
        assert!(spec.args.contains(&"--line-length=100".to_string()));
        assert!(spec.args.iter().any(|a| a.ends_with("app.py")));
        assert!(!spec.args.iter().any(|a| a.ends_with("notes.txt")));
        assert_eq!(spec.cwd.as_deref(), Some(dir.path()));
    }

    #[tokio::test]
    async fn test_clean_run_is_success() {
        let dir = project();
        let runner = ScriptedRunner::new(vec![stdout(0, "[]")]);
        let tool = CommandTool::new(recipe(false), runner.clone(), dir.path());
        let result = tool.check(&[], &ToolOptions::new()).await;
        assert!(result.success);
        assert!(result.issues.is_empty());
        assert_eq!(runner.specs()[0].timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_spawn_failure_is_failed_result() {
        let dir = project();
        let runner = ScriptedRunner::new(vec![Err(ExecutionError::Spawn {
            program: "ruff".into(),
            message: "No such file or directory".into(),
        })]);
        let tool = CommandTool::new(recipe(false), runner, dir.path());
        let result = tool.check(&[], &ToolOptions::new()).await;

        assert!(!result.success);
        assert!(result.issues.is_empty());
        assert_eq!(result.failure.as_ref().unwrap().kind, FailureKind::Spawn);
        assert!(result.raw_output.contains("No such file or directory"));
    }

    #[tokio::test]
    async fn test_timeout_is_failed_result() {
        let dir = project();
        let runner = ScriptedRunner::new(vec![Err(ExecutionError::Timeout {
            program: "ruff".into(),
            after: Duration::from_secs(30),
        })]);
        let tool = CommandTool::new(recipe(false), runner, dir.path());
        let result = tool.check(&[], &ToolOptions::new()).await;
        assert_eq!(result.failure.unwrap().kind, FailureKind::Timeout);
    }

    #[tokio::test]
    async fn test_error_exit_without_findings_is_failure() {
        let dir = project();
        let runner = ScriptedRunner::new(vec![Ok(CommandOutput {
            exit_code: Some(2),
            stderr: "error: unknown rule selector".into(),
            ..CommandOutput::default()
        })]);
        let tool = CommandTool::new(recipe(false), runner, dir.path());
        let result = tool.check(&[], &ToolOptions::new()).await;

        let failure = result.failure.unwrap();
        assert_eq!(failure.kind, FailureKind::ExitStatus);
        assert_eq!(failure.message, "Exited with status 2: error: unknown rule selector");
    }

    #[tokio::test]
    async fn test_no_matching_files_skips_command() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ScriptedRunner::new(vec![]);
        let tool = CommandTool::new(recipe(false), runner.clone(), dir.path());
        let result = tool.check(&[dir.path().to_path_buf()], &ToolOptions::new()).await;
        assert!(result.success);
        assert!(runner.specs().is_empty());
    }

    #[tokio::test]
    async fn test_fix_then_recheck() {
        let dir = project();
        let runner = ScriptedRunner::new(vec![stdout(0, "Found 1 error (1 fixed)"), stdout(0, "[]")]);
        let tool = CommandTool::new(recipe(true), runner.clone(), dir.path());
        assert!(tool.as_fixable().is_some());

        let result = ToolPlugin::fix(&tool, &[], &ToolOptions::new()).await.unwrap();
        assert!(result.success);
        assert!(result.raw_output.starts_with("Found 1 error"));

        let specs = runner.specs();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].args[..2], ["check", "--fix"]);
        assert_eq!(specs[1].args[1], "--output-format");
    }

    #[test]
    fn test_set_options_rejects_unknown_key() {
        let runner = ScriptedRunner::new(vec![]);
        let mut tool = CommandTool::new(recipe(false), runner, ".");
        tool.set_options(ToolOptions::new().with("line_length", 88_i64)).unwrap();

        let err = tool
            .set_options(ToolOptions::new().with("line_lenght", 100_i64))
            .unwrap_err();
        assert_eq!(err.key(), Some("line_lenght"));
        // Previous options survive a failed update
        assert_eq!(tool.options().get("line_length"), Some(&OptionValue::Int(88)));
        assert!(tool.as_fixable().is_none());
    }
}
