//! Subprocess execution
//!
//! [`ProcessRunner`] implements [`CommandRunner`] on top of `tokio::process`.
//! Every child gets the run's [`SubprocessEnv`] (plus per-command
//! overrides), piped stdout/stderr, and `kill_on_drop` so a timeout kills
//! only that child.

use async_trait::async_trait;
use lintmux_application::{CommandOutput, CommandRunner, CommandSpec, ExecutionError, SubprocessEnv};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::{debug, trace};

/// Maximum captured size per stream (4 MB)
const MAX_OUTPUT_SIZE: usize = 4 * 1024 * 1024;

pub struct ProcessRunner {
    env: SubprocessEnv,
}

impl ProcessRunner {
    pub fn new(env: SubprocessEnv) -> Self {
        Self { env }
    }

    pub fn env(&self) -> &SubprocessEnv {
        &self.env
    }

    fn command(&self, spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .env_clear()
            .envs(self.env.iter())
            .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(cwd) = &spec.cwd {
            cmd.current_dir(cwd);
        }

        // Linux: request kernel to send SIGTERM to child when parent dies.
        #[cfg(target_os = "linux")]
        unsafe {
            cmd.pre_exec(|| {
                libc::prctl(libc::PR_SET_PDEATHSIG, libc::SIGTERM);
                Ok(())
            });
        }

        cmd
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: CommandSpec) -> Result<CommandOutput, ExecutionError> {
        debug!(command = %spec.display(), cwd = ?spec.cwd, "Running tool command");
        let start = Instant::now();

        let child = self.command(&spec).spawn().map_err(|e| ExecutionError::Spawn {
            program: spec.program.clone(),
            message: e.to_string(),
        })?;

        // Dropping the future on timeout drops the child, which kills it
        let output = match tokio::time::timeout(spec.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(ExecutionError::Io {
                    program: spec.program.clone(),
                    message: e.to_string(),
                });
            }
            Err(_) => {
                return Err(ExecutionError::Timeout {
                    program: spec.program.clone(),
                    after: spec.timeout,
                });
            }
        };

        let duration = start.elapsed();
        trace!(
            program = %spec.program,
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "Tool command finished"
        );

        Ok(CommandOutput {
            exit_code: output.status.code(),
            stdout: capture(&output.stdout),
            stderr: capture(&output.stderr),
            duration,
        })
    }
}

/// Lossy UTF-8 decode, truncated to [`MAX_OUTPUT_SIZE`]
fn capture(bytes: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(bytes).into_owned();
    if text.len() > MAX_OUTPUT_SIZE {
        let mut cut = MAX_OUTPUT_SIZE;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("\n... (output truncated)");
    }
    text
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::env::capture_env;
    use std::time::Duration;

    fn runner() -> ProcessRunner {
        ProcessRunner::new(capture_env())
    }

    #[tokio::test]
    async fn test_captures_stdout_and_exit_code() {
        let spec = CommandSpec::new("sh", Duration::from_secs(10))
            .args(["-c", "echo out; echo err >&2; exit 3"]);
        let output = runner().run(spec).await.unwrap();
        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_env_override_and_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let spec = CommandSpec::new("sh", Duration::from_secs(10))
            .args(["-c", "echo $LINTMUX_TEST; pwd"])
            .env("LINTMUX_TEST", "hello")
            .current_dir(dir.path());
        let output = runner().run(spec).await.unwrap();
        let mut lines = output.stdout.lines();
        assert_eq!(lines.next(), Some("hello"));
        let pwd = std::fs::canonicalize(lines.next().unwrap()).unwrap();
        assert_eq!(pwd, std::fs::canonicalize(dir.path()).unwrap());
    }

    #[tokio::test]
    async fn test_non_unicode_env_reaches_child() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let mut env = capture_env();
        env.set("LINTMUX_RAW", OsStr::from_bytes(b"caf\xe9"));
        let spec = CommandSpec::new("sh", Duration::from_secs(10))
            .args(["-c", "printf %s \"$LINTMUX_RAW\" | wc -c"]);
        let output = ProcessRunner::new(env).run(spec).await.unwrap();
        assert_eq!(output.stdout.trim(), "4");

        let empty = ProcessRunner::new(SubprocessEnv::default());
        assert!(empty.env().is_empty());
    }

    #[tokio::test]
    async fn test_missing_binary_is_spawn_error() {
        let spec = CommandSpec::new("lintmux-definitely-not-installed", Duration::from_secs(5));
        let err = runner().run(spec).await.unwrap_err();
        assert!(matches!(err, ExecutionError::Spawn { .. }));
    }

    #[tokio::test]
    async fn test_timeout() {
        let spec = CommandSpec::new("sleep", Duration::from_millis(100)).arg("5");
        let err = runner().run(spec).await.unwrap_err();
        assert_eq!(
            err,
            ExecutionError::Timeout {
                program: "sleep".into(),
                after: Duration::from_millis(100),
            }
        );
    }

    #[test]
    fn test_capture_truncates() {
        let big = vec![b'a'; MAX_OUTPUT_SIZE + 10];
        let text = capture(&big);
        assert!(text.ends_with("(output truncated)"));
        assert!(text.len() < MAX_OUTPUT_SIZE + 40);
    }
}
