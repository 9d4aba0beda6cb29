//! File discovery for tool targets
//!
//! Expands the user's paths into the files a tool applies to: directories
//! are walked (skipping VCS, dependency and build directories), and every
//! file is matched against the tool's patterns and the exclude patterns.

use glob::Pattern;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Directory names never descended into
const IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "target",
    ".venv",
    "venv",
    "__pycache__",
    ".mypy_cache",
    ".ruff_cache",
    ".tox",
    "dist",
    "build",
];

/// Compiled include/exclude patterns
#[derive(Debug, Clone, Default)]
pub struct FileFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

impl FileFilter {
    /// Invalid patterns are dropped with a debug diagnostic.
    pub fn new(include: &[String], exclude: &[String]) -> Self {
        Self {
            include: compile(include),
            exclude: compile(exclude),
        }
    }

    /// Whether `path` (relative to the walk root) is selected
    pub fn matches(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let full = path.to_string_lossy().replace('\\', "/");
        let hit = |p: &Pattern| p.matches(&name) || p.matches(&full);

        if self.exclude.iter().any(hit) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(hit)
    }

    /// Whether a directory should be pruned from the walk
    fn prunes(&self, dir: &Path) -> bool {
        let name = dir.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        IGNORED_DIRS.contains(&name.as_ref())
            || self.exclude.iter().any(|p| p.matches(&name) || p.matches_path(dir))
    }
}

fn compile(patterns: &[String]) -> Vec<Pattern> {
    patterns
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                debug!(pattern = %p, error = %e, "Ignoring invalid glob pattern");
                None
            }
        })
        .collect()
}

/// Expand `paths` into sorted, de-duplicated files selected by `filter`.
///
/// Explicit file arguments are still subject to the filter. Returned paths
/// keep the form the caller passed (relative stays relative).
pub fn discover_files(paths: &[PathBuf], filter: &FileFilter) -> Vec<PathBuf> {
    let mut files = BTreeSet::new();
    for root in paths {
        if root.is_file() {
            if filter.matches(root) {
                files.insert(root.clone());
            }
            continue;
        }
        if !root.is_dir() {
            debug!(path = %root.display(), "Path does not exist, skipping");
            continue;
        }

        let walker = WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !e.file_type().is_dir() || !filter.prunes(e.path()));
        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
            if filter.matches(relative) {
                files.insert(entry.into_path());
            }
        }
    }
    files.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn tree() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("src/pkg")).unwrap();
        fs::create_dir_all(root.join("node_modules/dep")).unwrap();
        fs::create_dir_all(root.join("tests")).unwrap();
        for file in [
            "src/main.py",
            "src/pkg/util.py",
            "src/pkg/data.json",
            "node_modules/dep/index.py",
            "tests/test_main.py",
            "README.md",
        ] {
            fs::write(root.join(file), "x").unwrap();
        }
        dir
    }

    fn names(files: &[PathBuf], root: &Path) -> Vec<String> {
        files
            .iter()
            .map(|f| f.strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
            .collect()
    }

    #[test]
    fn test_walks_and_filters_by_pattern() {
        let dir = tree();
        let filter = FileFilter::new(&["*.py".to_string()], &[]);
        let files = discover_files(&[dir.path().to_path_buf()], &filter);
        assert_eq!(
            names(&files, dir.path()),
            ["src/main.py", "src/pkg/util.py", "tests/test_main.py"]
        );
    }

    #[test]
    fn test_exclude_patterns() {
        let dir = tree();
        let filter = FileFilter::new(&["*.py".to_string()], &["tests".to_string(), "util.py".to_string()]);
        let files = discover_files(&[dir.path().to_path_buf()], &filter);
        assert_eq!(names(&files, dir.path()), ["src/main.py"]);
    }

    #[test]
    fn test_explicit_file_and_dedup() {
        let dir = tree();
        let main = dir.path().join("src/main.py");
        let filter = FileFilter::new(&["*.py".to_string()], &[]);
        let files = discover_files(&[main.clone(), main.clone(), dir.path().join("README.md")], &filter);
        assert_eq!(files, vec![main]);
    }

    #[test]
    fn test_missing_path_is_ignored() {
        let filter = FileFilter::new(&["*".to_string()], &[]);
        assert!(discover_files(&[PathBuf::from("/nonexistent/lintmux")], &filter).is_empty());
    }
}
