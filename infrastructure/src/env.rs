//! Subprocess environment preparation
//!
//! One [`SubprocessEnv`] is captured per run. Many tools write caches under
//! `$HOME`, so a missing or read-only home is redirected to the system
//! temporary directory before any tool starts.

use lintmux_application::SubprocessEnv;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Capture the host environment and repair `HOME` if needed
pub fn capture_env() -> SubprocessEnv {
    let mut env = SubprocessEnv::new(std::env::vars_os());
    repair_home(&mut env, &std::env::temp_dir());
    env
}

/// Redirect `HOME` to `fallback` when it is unset, not a directory, or not
/// writable. Returns the new home when a redirect happened.
pub fn repair_home(env: &mut SubprocessEnv, fallback: &Path) -> Option<PathBuf> {
    let reason = match env.get("HOME") {
        None => "unset",
        Some(home) if home.is_empty() => "unset",
        Some(home) if !Path::new(home).is_dir() => "not a directory",
        Some(home) if !is_writable(Path::new(home)) => "not writable",
        Some(_) => return None,
    };

    debug!(
        reason,
        previous = %env.get("HOME").unwrap_or_default().to_string_lossy(),
        home = %fallback.display(),
        "Redirecting HOME for tool subprocesses"
    );
    env.set("HOME", fallback.as_os_str());
    Some(fallback.to_path_buf())
}

#[cfg(target_os = "linux")]
fn is_writable(dir: &Path) -> bool {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let Ok(c_path) = CString::new(dir.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call
    unsafe { libc::access(c_path.as_ptr(), libc::W_OK) == 0 }
}

#[cfg(not(target_os = "linux"))]
fn is_writable(dir: &Path) -> bool {
    std::fs::metadata(dir).is_ok_and(|m| !m.permissions().readonly())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    fn env_with_home(home: Option<&Path>) -> SubprocessEnv {
        let mut env = SubprocessEnv::new([("PATH", "/usr/bin")]);
        if let Some(home) = home {
            env.set("HOME", home.as_os_str());
        }
        env
    }

    #[test]
    fn test_writable_home_is_kept() {
        let home = tempfile::tempdir().unwrap();
        let fallback = tempfile::tempdir().unwrap();
        let mut env = env_with_home(Some(home.path()));

        assert!(repair_home(&mut env, fallback.path()).is_none());
        assert_eq!(env.get("HOME"), Some(home.path().as_os_str()));
    }

    #[test]
    fn test_unset_home_is_redirected() {
        let fallback = tempfile::tempdir().unwrap();
        let mut env = env_with_home(None);

        let redirected = repair_home(&mut env, fallback.path());
        assert_eq!(redirected.as_deref(), Some(fallback.path()));
        assert_eq!(env.get("HOME"), Some(fallback.path().as_os_str()));
        assert_eq!(env.get("PATH"), Some(OsStr::new("/usr/bin")));
    }

    #[test]
    fn test_missing_directory_is_redirected() {
        let fallback = tempfile::tempdir().unwrap();
        let mut env = env_with_home(Some(Path::new("/nonexistent/lintmux-home")));
        assert!(repair_home(&mut env, fallback.path()).is_some());
    }

    #[test]
    fn test_file_as_home_is_redirected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let fallback = tempfile::tempdir().unwrap();
        let mut env = env_with_home(Some(file.path()));
        assert!(repair_home(&mut env, fallback.path()).is_some());
    }

    #[test]
    fn test_capture_env_includes_host_path() {
        let env = capture_env();
        assert_eq!(env.get("PATH"), std::env::var_os("PATH").as_deref());
        assert!(env.get("HOME").is_some());
    }
}
