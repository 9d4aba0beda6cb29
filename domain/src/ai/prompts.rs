//! Prompt templates for summaries and fixes

use crate::report::IssueDigest;

pub const SUMMARY_SYSTEM: &str = "You are a senior software engineer reviewing a codebase's quality report. \
Provide concise, actionable insights, not restated counts. \
Focus on patterns, root causes and prioritized recommendations. \
Respond ONLY with the requested JSON format, no markdown fences.";

pub const FIX_SYSTEM: &str = "You are a senior software engineer fixing code quality issues. \
Provide minimal, targeted fixes that resolve the reported issue without changing unrelated code. \
Respond ONLY with the requested JSON format, no markdown fences.";

const SUMMARY_TEMPLATE: &str = r#"A linting analysis found {total_issues} issues across {tool_count} tool(s).

Here is a digest of all issues grouped by tool and error code:
{issues_digest}

Analyze these results and provide a structured summary.

Respond in this exact JSON format:
{
  "overview": "2-3 sentence high-level assessment of code quality",
  "key_patterns": ["Pattern description with scope"],
  "priority_actions": ["Most impactful action to take first (explain why)"],
  "triage_suggestions": ["Code + context where suppression is appropriate"],
  "estimated_effort": "Rough time estimate to address all issues"
}

Guidelines:
- Identify systemic patterns, not individual issues
- Order priority actions by impact
- Be specific about file areas or patterns
- Limit to 3-5 key patterns and 3-5 priority actions
- Only include triage_suggestions for issues that are likely intentional in context
"#;

const FIX_TEMPLATE: &str = r#"Tool: {tool_name}
Error code: {code}
File: {file}
Line: {line}
Issue: {message}

Here is the relevant section of the file (lines {context_start}-{context_end}):
```
{code_context}
```

Provide a fix for this issue. Only change what is necessary.

Respond in this exact JSON format:
{
  "original_code": "the exact lines that need to change (copy from above)",
  "suggested_code": "the corrected version of those lines",
  "explanation": "Imperative fix description",
  "confidence": "high|medium|low"
}
"#;

pub fn summary_prompt(digest: &IssueDigest) -> String {
    SUMMARY_TEMPLATE
        .replace("{total_issues}", &digest.total_issues.to_string())
        .replace("{tool_count}", &digest.tool_count.to_string())
        .replace("{issues_digest}", digest.render().trim_end())
}

/// Inputs of a fix prompt
#[derive(Debug, Clone)]
pub struct FixPromptInput<'a> {
    pub tool_name: &'a str,
    pub code: &'a str,
    pub file: &'a str,
    pub line: u32,
    pub message: &'a str,
    pub context: &'a str,
    pub context_start: usize,
    pub context_end: usize,
}

pub fn fix_prompt(input: &FixPromptInput<'_>) -> String {
    // Substitute the file contents last so placeholders inside the
    // user's code are left alone.
    FIX_TEMPLATE
        .replace("{tool_name}", input.tool_name)
        .replace("{code}", input.code)
        .replace("{file}", input.file)
        .replace("{line}", &input.line.to_string())
        .replace("{message}", input.message)
        .replace("{context_start}", &input.context_start.to_string())
        .replace("{context_end}", &input.context_end.to_string())
        .replace("{code_context}", input.context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::DigestGroup;

    #[test]
    fn test_summary_prompt_fields() {
        let digest = IssueDigest {
            total_issues: 5,
            tool_count: 2,
            groups: vec![DigestGroup {
                tool: "ruff".into(),
                code: "E501".into(),
                count: 5,
                message: "Line too long".into(),
                samples: vec!["a.py:1".into()],
            }],
        };
        let prompt = summary_prompt(&digest);
        assert!(prompt.contains("found 5 issues across 2 tool(s)"));
        assert!(prompt.contains("[E501] Line too long (x5)"));
        assert!(prompt.contains("\"overview\""));
        assert!(!prompt.contains("{issues_digest}"));
    }

    #[test]
    fn test_fix_prompt_keeps_code_braces() {
        let prompt = fix_prompt(&FixPromptInput {
            tool_name: "ruff",
            code: "B101",
            file: "src/a.py",
            line: 3,
            message: "Use of assert",
            context: "x = {line}\nassert x",
            context_start: 1,
            context_end: 2,
        });
        assert!(prompt.contains("File: src/a.py"));
        assert!(prompt.contains("Line: 3"));
        assert!(prompt.contains("(lines 1-2)"));
        assert!(prompt.contains("x = {line}"));
    }
}
