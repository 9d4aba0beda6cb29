//! Built-in tool recipes
//!
//! | Tool | Tier | Fix | Target |
//! |------|------|-----|--------|
//! | black | tools | yes | `*.py` |
//! | ruff | tools | yes | `*.py` |
//! | taplo | tools | yes | `*.toml` |
//! | yamllint | tools | no | `*.yml` |
//! | markdownlint | tools | yes | `*.md` |
//! | hadolint | tools | no | `Dockerfile` |
//! | shellcheck | tools | no | `*.sh` |
//! | mypy | tools | no | `*.py` |
//! | tsc | tools | no | project |
//! | clippy | tools | yes | project |
//! | bandit | security | no | `*.py` |
//! | semgrep | security | no | source files |
//! | gitleaks | security | no | project |
//! | cargo-deny | security | no | project |
//!
//! Lower priority runs first: formatters, then linters, then type checkers,
//! then security scanners.

use super::recipe::{ArgsFn, Invocation, OutputStream, Target, ToolRecipe};
use lintmux_domain::parsers::{
    parse_bandit_output, parse_black_output, parse_cargo_deny_output, parse_clippy_output,
    parse_gitleaks_output, parse_hadolint_output, parse_markdownlint_output, parse_mypy_output,
    parse_ruff_output, parse_semgrep_output, parse_shellcheck_output, parse_taplo_output,
    parse_tsc_output, parse_yamllint_output,
};
use lintmux_domain::{OptionKind, OptionSpec, OptionValue, TIER_SECURITY, ToolDefinition};
use std::time::Duration;

const PYTHON: &[&str] = &["*.py", "*.pyi"];

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// `--flag value` when the option is set
fn push_value(out: &mut Vec<String>, inv: &Invocation<'_>, key: &str, flag: &str) {
    if let Some(value) = inv.options.get(key) {
        out.push(flag.to_string());
        out.push(value.to_arg());
    }
}

/// `--flag a,b,c` when the list option is non-empty
fn push_joined(out: &mut Vec<String>, inv: &Invocation<'_>, key: &str, flag: &str) {
    let items = inv.options.get_list(key);
    if !items.is_empty() {
        out.push(flag.to_string());
        out.push(items.join(","));
    }
}

/// `--flag a --flag b` for each item of a list option
fn push_each(out: &mut Vec<String>, inv: &Invocation<'_>, key: &str, flag: &str) {
    for item in inv.options.get_list(key) {
        out.push(flag.to_string());
        out.push(item.clone());
    }
}

/// `--flag` when the bool option is true
fn push_flag(out: &mut Vec<String>, inv: &Invocation<'_>, key: &str, flag: &str) {
    if inv.options.get_bool(key).unwrap_or(false) {
        out.push(flag.to_string());
    }
}

// ruff

const RUFF_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("select", OptionKind::List),
    OptionSpec::new("ignore", OptionKind::List),
    OptionSpec::new("line_length", OptionKind::Int),
    OptionSpec::new("target_version", OptionKind::Str),
    OptionSpec::new("unsafe_fixes", OptionKind::Bool),
];

fn ruff_common(inv: &Invocation<'_>, out: &mut Vec<String>) {
    push_joined(out, inv, "select", "--select");
    push_joined(out, inv, "ignore", "--ignore");
    push_value(out, inv, "line_length", "--line-length");
    push_value(out, inv, "target_version", "--target-version");
}

fn ruff_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["check", "--output-format", "json", "--no-cache"]);
    ruff_common(inv, &mut out);
    out.extend(inv.file_args());
    out
}

fn ruff_fix(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["check", "--fix", "--no-cache"]);
    push_flag(&mut out, inv, "unsafe_fixes", "--unsafe-fixes");
    ruff_common(inv, &mut out);
    out.extend(inv.file_args());
    out
}

// black

const BLACK_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("line_length", OptionKind::Int),
    OptionSpec::new("target_version", OptionKind::Str),
    OptionSpec::new("fast", OptionKind::Bool),
    OptionSpec::new("preview", OptionKind::Bool),
];

fn black_common(inv: &Invocation<'_>, out: &mut Vec<String>) {
    push_value(out, inv, "line_length", "--line-length");
    push_value(out, inv, "target_version", "--target-version");
    push_flag(out, inv, "fast", "--fast");
    push_flag(out, inv, "preview", "--preview");
}

fn black_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["--check"]);
    black_common(inv, &mut out);
    out.extend(inv.file_args());
    out
}

fn black_fix(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = Vec::new();
    black_common(inv, &mut out);
    out.extend(inv.file_args());
    out
}

// taplo

const TAPLO_OPTIONS: &[OptionSpec] = &[OptionSpec::new("schema", OptionKind::Str)];

fn taplo_lint(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["lint"]);
    push_value(&mut out, inv, "schema", "--schema");
    out.extend(inv.file_args());
    out
}

fn taplo_fmt_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["fmt", "--check"]);
    out.extend(inv.file_args());
    out
}

fn taplo_fmt(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["fmt"]);
    out.extend(inv.file_args());
    out
}

// yamllint

const YAMLLINT_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("config_file", OptionKind::Str),
    OptionSpec::new("strict", OptionKind::Bool),
    OptionSpec::new("no_warnings", OptionKind::Bool),
];

fn yamllint_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["--format", "parsable"]);
    push_value(&mut out, inv, "config_file", "--config-file");
    push_flag(&mut out, inv, "strict", "--strict");
    push_flag(&mut out, inv, "no_warnings", "--no-warnings");
    out.extend(inv.file_args());
    out
}

// markdownlint

const MARKDOWNLINT_OPTIONS: &[OptionSpec] = &[OptionSpec::new("config_file", OptionKind::Str)];

fn markdownlint_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = Vec::new();
    push_value(&mut out, inv, "config_file", "--config");
    out.extend(inv.file_args());
    out
}

fn markdownlint_fix(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["--fix"]);
    push_value(&mut out, inv, "config_file", "--config");
    out.extend(inv.file_args());
    out
}

// hadolint

const HADOLINT_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("ignore", OptionKind::List),
    OptionSpec::new("trusted_registries", OptionKind::List),
    OptionSpec::new("failure_threshold", OptionKind::Str),
];

fn hadolint_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["--format", "json", "--no-color"]);
    push_each(&mut out, inv, "ignore", "--ignore");
    push_each(&mut out, inv, "trusted_registries", "--trusted-registry");
    push_value(&mut out, inv, "failure_threshold", "--failure-threshold");
    out.extend(inv.file_args());
    out
}

// shellcheck

const SHELLCHECK_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("severity", OptionKind::Str),
    OptionSpec::new("exclude", OptionKind::List),
    OptionSpec::new("shell", OptionKind::Str),
];

fn shellcheck_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["--format", "json1"]);
    push_value(&mut out, inv, "severity", "--severity");
    push_joined(&mut out, inv, "exclude", "--exclude");
    push_value(&mut out, inv, "shell", "--shell");
    out.extend(inv.file_args());
    out
}

// mypy

const MYPY_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("strict", OptionKind::Bool),
    OptionSpec::new("ignore_missing_imports", OptionKind::Bool),
    OptionSpec::new("python_version", OptionKind::Str),
    OptionSpec::new("config_file", OptionKind::Str),
];

fn mypy_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&[
        "--output",
        "json",
        "--show-error-codes",
        "--show-column-numbers",
        "--hide-error-context",
        "--no-error-summary",
        "--explicit-package-bases",
    ]);
    push_flag(&mut out, inv, "strict", "--strict");
    push_flag(&mut out, inv, "ignore_missing_imports", "--ignore-missing-imports");
    push_value(&mut out, inv, "python_version", "--python-version");
    push_value(&mut out, inv, "config_file", "--config-file");
    out.extend(inv.file_args());
    out
}

// tsc

const TSC_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("project", OptionKind::Str),
    OptionSpec::new("strict", OptionKind::Bool),
    OptionSpec::new("skip_lib_check", OptionKind::Bool),
];

fn tsc_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["--noEmit", "--pretty", "false"]);
    push_value(&mut out, inv, "project", "--project");
    match inv.options.get_bool("strict") {
        Some(true) => out.push("--strict".to_string()),
        Some(false) => out.push("--noStrict".to_string()),
        None => {}
    }
    push_flag(&mut out, inv, "skip_lib_check", "--skipLibCheck");
    out
}

// clippy

const CLIPPY_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("all_targets", OptionKind::Bool),
    OptionSpec::new("all_features", OptionKind::Bool),
];

fn clippy_common(inv: &Invocation<'_>, out: &mut Vec<String>) {
    push_flag(out, inv, "all_targets", "--all-targets");
    push_flag(out, inv, "all_features", "--all-features");
}

fn clippy_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["clippy", "--message-format=json", "--quiet"]);
    clippy_common(inv, &mut out);
    out
}

fn clippy_fix(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["clippy", "--fix", "--allow-dirty", "--allow-staged", "--quiet"]);
    clippy_common(inv, &mut out);
    out
}

// bandit

const BANDIT_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("severity", OptionKind::Str),
    OptionSpec::new("confidence", OptionKind::Str),
    OptionSpec::new("skip", OptionKind::List),
];

fn bandit_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["--format", "json", "--quiet"]);
    push_value(&mut out, inv, "severity", "--severity-level");
    push_value(&mut out, inv, "confidence", "--confidence-level");
    push_joined(&mut out, inv, "skip", "--skip");
    out.extend(inv.file_args());
    out
}

// semgrep

const SEMGREP_OPTIONS: &[OptionSpec] = &[OptionSpec::new("config", OptionKind::Str)];

fn semgrep_check(inv: &Invocation<'_>) -> Vec<String> {
    let config = inv
        .options
        .get("config")
        .map(OptionValue::to_arg)
        .unwrap_or_else(|| "auto".to_string());
    let mut out = args(&["scan", "--json", "--quiet", "--metrics", "off", "--config"]);
    out.push(config);
    for pattern in inv.options.exclude_patterns() {
        out.push("--exclude".to_string());
        out.push(pattern.clone());
    }
    out.extend(inv.file_args());
    out
}

// gitleaks

const GITLEAKS_OPTIONS: &[OptionSpec] = &[
    OptionSpec::new("config", OptionKind::Str),
    OptionSpec::new("no_git", OptionKind::Bool),
];

fn gitleaks_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&[
        "detect",
        "--no-banner",
        "--report-format",
        "json",
        "--report-path",
        "/dev/stdout",
        "--source",
    ]);
    out.push(inv.source());
    if inv.options.get_bool("no_git").unwrap_or(true) {
        out.push("--no-git".to_string());
    }
    push_value(&mut out, inv, "config", "--config");
    out
}

// cargo-deny

const CARGO_DENY_OPTIONS: &[OptionSpec] = &[OptionSpec::new("checks", OptionKind::List)];

fn cargo_deny_check(inv: &Invocation<'_>) -> Vec<String> {
    let mut out = args(&["deny", "--format", "json", "check"]);
    out.extend(inv.options.get_list("checks").iter().cloned());
    out
}

const RUFF_CHECKS: &[ArgsFn] = &[ruff_check];
const BLACK_CHECKS: &[ArgsFn] = &[black_check];
const TAPLO_CHECKS: &[ArgsFn] = &[taplo_lint, taplo_fmt_check];
const YAMLLINT_CHECKS: &[ArgsFn] = &[yamllint_check];
const MARKDOWNLINT_CHECKS: &[ArgsFn] = &[markdownlint_check];
const HADOLINT_CHECKS: &[ArgsFn] = &[hadolint_check];
const SHELLCHECK_CHECKS: &[ArgsFn] = &[shellcheck_check];
const MYPY_CHECKS: &[ArgsFn] = &[mypy_check];
const TSC_CHECKS: &[ArgsFn] = &[tsc_check];
const CLIPPY_CHECKS: &[ArgsFn] = &[clippy_check];
const BANDIT_CHECKS: &[ArgsFn] = &[bandit_check];
const SEMGREP_CHECKS: &[ArgsFn] = &[semgrep_check];
const GITLEAKS_CHECKS: &[ArgsFn] = &[gitleaks_check];
const CARGO_DENY_CHECKS: &[ArgsFn] = &[cargo_deny_check];

/// Every built-in recipe, in registration order
pub fn builtin_recipes() -> Vec<ToolRecipe> {
    vec![
        ToolRecipe {
            definition: ToolDefinition::new("black", "Python code formatter")
                .with_fix()
                .with_patterns(PYTHON)
                .with_priority(10),
            program: "black",
            check: BLACK_CHECKS,
            fix: Some(black_fix),
            parser: parse_black_output,
            stream: OutputStream::Both,
            target: Target::Files,
            options: BLACK_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("ruff", "Fast Python linter")
                .with_fix()
                .with_patterns(PYTHON)
                .with_priority(15),
            program: "ruff",
            check: RUFF_CHECKS,
            fix: Some(ruff_fix),
            parser: parse_ruff_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: RUFF_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("taplo", "TOML linter and formatter")
                .with_fix()
                .with_patterns(&["*.toml"])
                .with_priority(20),
            program: "taplo",
            check: TAPLO_CHECKS,
            fix: Some(taplo_fmt),
            parser: parse_taplo_output,
            stream: OutputStream::Both,
            target: Target::Files,
            options: TAPLO_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("yamllint", "YAML linter")
                .with_patterns(&["*.yml", "*.yaml", ".yamllint"])
                .with_priority(40),
            program: "yamllint",
            check: YAMLLINT_CHECKS,
            fix: None,
            parser: parse_yamllint_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: YAMLLINT_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("markdownlint", "Markdown linter")
                .with_fix()
                .with_patterns(&["*.md", "*.markdown"])
                .with_priority(40)
                .with_executable("markdownlint-cli2"),
            program: "markdownlint-cli2",
            check: MARKDOWNLINT_CHECKS,
            fix: Some(markdownlint_fix),
            parser: parse_markdownlint_output,
            stream: OutputStream::Both,
            target: Target::Files,
            options: MARKDOWNLINT_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("hadolint", "Dockerfile linter")
                .with_patterns(&["Dockerfile", "Dockerfile.*", "*.Dockerfile", "Containerfile"])
                .with_priority(45),
            program: "hadolint",
            check: HADOLINT_CHECKS,
            fix: None,
            parser: parse_hadolint_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: HADOLINT_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("shellcheck", "Shell script analyzer")
                .with_patterns(&["*.sh", "*.bash", "*.ksh"])
                .with_priority(45),
            program: "shellcheck",
            check: SHELLCHECK_CHECKS,
            fix: None,
            parser: parse_shellcheck_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: SHELLCHECK_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("mypy", "Python static type checker")
                .with_patterns(PYTHON)
                .with_priority(50)
                .with_timeout(Duration::from_secs(60)),
            program: "mypy",
            check: MYPY_CHECKS,
            fix: None,
            parser: parse_mypy_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: MYPY_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("tsc", "TypeScript compiler type check")
                .with_patterns(&["*.ts", "*.tsx", "*.mts", "*.cts"])
                .with_priority(50)
                .with_timeout(Duration::from_secs(60)),
            program: "tsc",
            check: TSC_CHECKS,
            fix: None,
            parser: parse_tsc_output,
            stream: OutputStream::Stdout,
            target: Target::Project,
            options: TSC_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("clippy", "Rust linter")
                .with_fix()
                .with_patterns(&["*.rs", "Cargo.toml"])
                .with_priority(50)
                .with_executable("cargo-clippy")
                .with_timeout(Duration::from_secs(300)),
            program: "cargo",
            check: CLIPPY_CHECKS,
            fix: Some(clippy_fix),
            parser: parse_clippy_output,
            stream: OutputStream::Stdout,
            target: Target::Project,
            options: CLIPPY_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("bandit", "Python security linter")
                .with_patterns(&["*.py"])
                .with_tier(TIER_SECURITY)
                .with_priority(60),
            program: "bandit",
            check: BANDIT_CHECKS,
            fix: None,
            parser: parse_bandit_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: BANDIT_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("semgrep", "Pattern-based security scanner")
                .with_patterns(&["*.py", "*.js", "*.ts", "*.go", "*.java", "*.rb", "*.rs"])
                .with_tier(TIER_SECURITY)
                .with_priority(60)
                .with_timeout(Duration::from_secs(120)),
            program: "semgrep",
            check: SEMGREP_CHECKS,
            fix: None,
            parser: parse_semgrep_output,
            stream: OutputStream::Stdout,
            target: Target::Files,
            options: SEMGREP_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("gitleaks", "Secret scanner")
                .with_tier(TIER_SECURITY)
                .with_priority(70)
                .with_timeout(Duration::from_secs(60)),
            program: "gitleaks",
            check: GITLEAKS_CHECKS,
            fix: None,
            parser: parse_gitleaks_output,
            stream: OutputStream::Stdout,
            target: Target::Project,
            options: GITLEAKS_OPTIONS,
        },
        ToolRecipe {
            definition: ToolDefinition::new("cargo-deny", "Rust dependency auditor")
                .with_patterns(&["Cargo.toml", "deny.toml"])
                .with_tier(TIER_SECURITY)
                .with_priority(70)
                .with_timeout(Duration::from_secs(120)),
            program: "cargo",
            check: CARGO_DENY_CHECKS,
            fix: None,
            parser: parse_cargo_deny_output,
            stream: OutputStream::Stderr,
            target: Target::Project,
            options: CARGO_DENY_OPTIONS,
        },
    ]
}
