//! Propose Fixes use case
//!
//! For a bounded number of issues, reads the surrounding code and asks an
//! AI provider for a targeted fix. Suggestions are returned for review and
//! never written back to disk.

use crate::ports::ai_provider::{AiProvider, AiRequest};
use crate::ports::sleeper::Sleeper;
use crate::retry::with_retry;
use lintmux_domain::ai::fix::{DEFAULT_CONTEXT_RADIUS, extract_context, parse_fix_response};
use lintmux_domain::ai::prompts::{FIX_SYSTEM, FixPromptInput, fix_prompt};
use lintmux_domain::{AiError, FixSuggestion, Issue, RetryPolicy};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_FIX_ISSUES: usize = 5;
pub const DEFAULT_FIX_MAX_TOKENS: u32 = 1024;

pub struct ProposeFixesUseCase {
    provider: Arc<dyn AiProvider>,
    sleeper: Arc<dyn Sleeper>,
    workspace_root: PathBuf,
    policy: RetryPolicy,
    max_fix_issues: usize,
    max_tokens: u32,
    context_radius: usize,
}

impl ProposeFixesUseCase {
    pub fn new(provider: Arc<dyn AiProvider>, sleeper: Arc<dyn Sleeper>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            sleeper,
            workspace_root: workspace_root.into(),
            policy: RetryPolicy::default(),
            max_fix_issues: DEFAULT_MAX_FIX_ISSUES,
            max_tokens: DEFAULT_FIX_MAX_TOKENS,
            context_radius: DEFAULT_CONTEXT_RADIUS,
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_max_fix_issues(mut self, max_fix_issues: usize) -> Self {
        self.max_fix_issues = max_fix_issues;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_context_radius(mut self, context_radius: usize) -> Self {
        self.context_radius = context_radius;
        self
    }

    /// Propose fixes for the first `max_fix_issues` issues with a location.
    ///
    /// Per-issue failures are logged and skipped; an authentication
    /// failure aborts, since every later call would fail the same way.
    pub async fn execute<'a, I>(&self, issues: I) -> Result<Vec<FixSuggestion>, AiError>
    where
        I: IntoIterator<Item = &'a Issue>,
    {
        let candidates: Vec<&Issue> = issues
            .into_iter()
            .filter(|issue| issue.line > 0 && !issue.file.is_empty())
            .take(self.max_fix_issues)
            .collect();

        let mut suggestions = Vec::new();
        for issue in candidates {
            match self.propose(issue).await {
                Ok(Some(suggestion)) => suggestions.push(suggestion),
                Ok(None) => {}
                Err(e) if e.is_authentication() => return Err(e),
                Err(e) => {
                    warn!(file = %issue.file, line = issue.line, error = %e, "Fix proposal failed");
                }
            }
        }

        info!(count = suggestions.len(), "AI fix suggestions generated");
        Ok(suggestions)
    }

    async fn propose(&self, issue: &Issue) -> Result<Option<FixSuggestion>, AiError> {
        let Some(path) = self.resolve(&issue.file) else {
            debug!(file = %issue.file, "File outside workspace root, skipping fix");
            return Ok(None);
        };
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) => {
                debug!(file = %path.display(), error = %e, "Cannot read file for fix context");
                return Ok(None);
            }
        };

        let (context, context_start, context_end) = extract_context(&content, issue.line, self.context_radius);
        let prompt = fix_prompt(&FixPromptInput {
            tool_name: &issue.tool,
            code: &issue.code,
            file: &issue.file,
            line: issue.line,
            message: &issue.message,
            context: &context,
            context_start,
            context_end,
        });
        let request = AiRequest::new(prompt, self.max_tokens).with_system(FIX_SYSTEM);

        let provider = self.provider.as_ref();
        let response = with_retry(&self.policy, self.sleeper.as_ref(), || provider.complete(&request)).await?;

        Ok(
            parse_fix_response(&response.content, &issue.file, issue.line, &issue.code).map(|mut suggestion| {
                suggestion.tool = issue.tool.clone();
                suggestion
            }),
        )
    }

    /// Resolve `file` against the workspace root; `None` when it escapes it.
    fn resolve(&self, file: &str) -> Option<PathBuf> {
        let path = Path::new(file);
        let joined = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        };
        let root = std::fs::canonicalize(&self.workspace_root).ok()?;
        let resolved = std::fs::canonicalize(&joined).ok()?;
        resolved.starts_with(&root).then_some(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::ai_provider::AiResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    const FIX_JSON: &str = r#"{
        "original_code": "import os",
        "suggested_code": "",
        "explanation": "Remove unused import",
        "confidence": "HIGH"
    }"#;

    struct Scripted {
        replies: Mutex<Vec<Result<String, AiError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl Scripted {
        fn new(replies: Vec<Result<String, AiError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl AiProvider for Scripted {
        fn name(&self) -> &str {
            "scripted"
        }
        fn model(&self) -> &str {
            "gpt-4o-mini"
        }
        fn is_available(&self) -> bool {
            true
        }
        async fn complete(&self, request: &AiRequest) -> Result<AiResponse, AiError> {
            self.prompts.lock().unwrap().push(request.prompt.clone());
            let content = self.replies.lock().unwrap().remove(0)?;
            Ok(AiResponse {
                content,
                model: "gpt-4o-mini".into(),
                input_tokens: 10,
                output_tokens: 10,
                cost_estimate: 0.0,
                provider: "scripted".into(),
            })
        }
    }

    struct NoSleep;

    #[async_trait]
    impl Sleeper for NoSleep {
        async fn sleep(&self, _duration: Duration) {}
    }

    fn workspace() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("app.py"), "import os\n\nprint('hi')\n").unwrap();
        dir
    }

    fn issue(file: &str, line: u32) -> Issue {
        Issue::new(file, "unused import")
            .at_line(line)
            .with_code("F401")
            .with_tool("ruff")
    }

    #[tokio::test]
    async fn test_proposes_fix_with_context() {
        let dir = workspace();
        let provider = Scripted::new(vec![Ok(FIX_JSON.into())]);
        let use_case = ProposeFixesUseCase::new(provider.clone(), Arc::new(NoSleep), dir.path());

        let issues = [issue("app.py", 1)];
        let fixes = use_case.execute(&issues).await.unwrap();

        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].tool, "ruff");
        assert_eq!(fixes[0].confidence, "high");
        assert!(fixes[0].diff.contains("-import os"));
        assert!(provider.prompts.lock().unwrap()[0].contains("print('hi')"));
    }

    #[tokio::test]
    async fn test_limits_and_filters_issues() {
        let dir = workspace();
        let provider = Scripted::new(vec![Ok(FIX_JSON.into()), Ok(FIX_JSON.into())]);
        let use_case = ProposeFixesUseCase::new(provider.clone(), Arc::new(NoSleep), dir.path())
            .with_max_fix_issues(2);

        let issues = [
            issue("app.py", 0), // file-level, no line to fix
            issue("app.py", 1),
            issue("app.py", 3),
            issue("app.py", 1),
        ];
        let fixes = use_case.execute(&issues).await.unwrap();
        assert_eq!(fixes.len(), 2);
        assert_eq!(provider.calls(), 2);
    }

    #[tokio::test]
    async fn test_skips_files_outside_workspace() {
        let dir = workspace();
        let outside = tempfile::NamedTempFile::new().unwrap();
        let provider = Scripted::new(vec![]);
        let use_case = ProposeFixesUseCase::new(provider.clone(), Arc::new(NoSleep), dir.path());

        let issues = [
            issue(&outside.path().to_string_lossy(), 1),
            issue("../escape.py", 1),
            issue("missing.py", 1),
        ];
        let fixes = use_case.execute(&issues).await.unwrap();
        assert!(fixes.is_empty());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_provider_error_skipped_but_auth_aborts() {
        let dir = workspace();
        let provider = Scripted::new(vec![
            Err(AiError::InvalidResponse("empty".into())),
            Ok(FIX_JSON.into()),
        ]);
        let use_case = ProposeFixesUseCase::new(provider.clone(), Arc::new(NoSleep), dir.path());
        let issues = [issue("app.py", 1), issue("app.py", 3)];
        let fixes = use_case.execute(&issues).await.unwrap();
        assert_eq!(fixes.len(), 1);

        let provider = Scripted::new(vec![Err(AiError::authentication("scripted", "401"))]);
        let use_case = ProposeFixesUseCase::new(provider.clone(), Arc::new(NoSleep), dir.path());
        let err = use_case.execute(&issues).await.unwrap_err();
        assert!(err.is_authentication());
        assert_eq!(provider.calls(), 1);
    }
}
