//! Script discovery
//!
//! Finds JMeter scripts under a directory tree and applies the skip filter.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::RunnerError;

/// Extension of JMeter test plans
pub const SCRIPT_EXTENSION: &str = ".jmx";

/// Marker in a file name that keeps a script out of the batch
pub const SKIP_MARKER: &str = "skip";

/// Discover, filter, and validate the batch for `root`
pub fn collect_batch(root: &Path) -> Result<Vec<PathBuf>, RunnerError> {
    if root.as_os_str().is_empty() {
        return Err(RunnerError::EmptyDirectoryArgument);
    }

    let scripts = discover_scripts(root)?;
    let discovered = scripts.len();
    let batch = filter_skipped(scripts);

    debug!(
        "Discovered {} scripts under {}, {} after skip filter",
        discovered,
        root.display(),
        batch.len()
    );

    if batch.is_empty() {
        return Err(RunnerError::EmptyBatch(root.to_path_buf()));
    }

    Ok(batch)
}

/// All `.jmx` files under `root`, descending into sub-directories
///
/// Files of a directory come before the contents of its sub-directories, and
/// entries are ordered by name within each directory. Symlinked scripts are
/// included, symlinked directories are not descended into.
pub fn discover_scripts(root: &Path) -> Result<Vec<PathBuf>, RunnerError> {
    if !root.exists() {
        return Err(RunnerError::NotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(RunnerError::NotADirectory(root.to_path_buf()));
    }

    let entries = fs::read_dir(root).map_err(|source| RunnerError::Unreadable {
        path: root.to_path_buf(),
        source,
    })?;

    let mut scripts = Vec::new();
    walk_entries(entries, &mut scripts);
    Ok(scripts)
}

fn walk(dir: &Path, scripts: &mut Vec<PathBuf>) {
    match fs::read_dir(dir) {
        Ok(entries) => walk_entries(entries, scripts),
        Err(e) => debug!("Skipping unreadable directory {}: {}", dir.display(), e),
    }
}

fn walk_entries(entries: fs::ReadDir, scripts: &mut Vec<PathBuf>) {
    let mut entries: Vec<fs::DirEntry> = entries.flatten().collect();
    entries.sort_by_key(|e| e.file_name());

    let mut subdirs = Vec::new();
    for entry in entries {
        let path = entry.path();
        // file_type() does not follow symlinks
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            subdirs.push(path);
        } else if file_type.is_symlink() && path.is_dir() {
            debug!("Not following directory symlink {}", path.display());
        } else if is_script(&path) {
            scripts.push(path);
        }
    }

    for subdir in subdirs {
        walk(&subdir, scripts);
    }
}

fn is_script(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.ends_with(SCRIPT_EXTENSION))
        .unwrap_or(false)
}

/// Drop scripts whose file name contains the skip marker
pub fn filter_skipped(scripts: Vec<PathBuf>) -> Vec<PathBuf> {
    scripts
        .into_iter()
        .filter(|path| {
            let skipped = path
                .file_name()
                .map(|n| n.to_string_lossy().contains(SKIP_MARKER))
                .unwrap_or(false);
            if skipped {
                debug!("Skipping {}", path.display());
            }
            !skipped
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "<jmeterTestPlan/>").unwrap();
    }

    fn names(paths: &[PathBuf]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_discover_recursive() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("b.jmx"));
        touch(&dir.path().join("a.jmx"));
        touch(&dir.path().join("notes.txt"));
        touch(&dir.path().join("nested/deeper/c.jmx"));
        touch(&dir.path().join("nested/d.jmx.bak"));

        let scripts = discover_scripts(dir.path()).unwrap();
        assert_eq!(names(&scripts), vec!["a.jmx", "b.jmx", "c.jmx"]);
    }

    #[test]
    fn test_discover_order_is_stable() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("z/one.jmx"));
        touch(&dir.path().join("top.jmx"));
        touch(&dir.path().join("a/two.jmx"));

        let first = discover_scripts(dir.path()).unwrap();
        let second = discover_scripts(dir.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(names(&first), vec!["top.jmx", "two.jmx", "one.jmx"]);
    }

    #[test]
    fn test_discover_not_found() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("missing");
        assert!(matches!(
            discover_scripts(&missing),
            Err(RunnerError::NotFound(p)) if p == missing
        ));
    }

    #[test]
    fn test_discover_rejects_file() {
        let dir = tempdir().unwrap();
        let script = dir.path().join("single.jmx");
        touch(&script);
        assert!(matches!(
            discover_scripts(&script),
            Err(RunnerError::NotADirectory(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_does_not_follow_directory_symlinks() {
        use std::os::unix::fs::symlink;

        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.jmx"));
        touch(&dir.path().join("shared/b.jmx"));
        fs::create_dir_all(dir.path().join("nested")).unwrap();
        symlink(dir.path(), dir.path().join("loop")).unwrap();
        symlink(dir.path().join("shared"), dir.path().join("nested/alias")).unwrap();
        symlink(dir.path().join("a.jmx"), dir.path().join("linked.jmx")).unwrap();

        let scripts = discover_scripts(dir.path()).unwrap();
        assert_eq!(names(&scripts), vec!["a.jmx", "linked.jmx", "b.jmx"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_unreadable_root_is_an_error() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let root = dir.path().join("locked");
        touch(&root.join("a.jmx"));
        fs::set_permissions(&root, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can still list the directory
        let readable = fs::read_dir(&root).is_ok();
        let result = collect_batch(&root);
        fs::set_permissions(&root, fs::Permissions::from_mode(0o755)).unwrap();
        if readable {
            return;
        }

        assert!(matches!(
            result,
            Err(RunnerError::Unreadable { path, .. }) if path == root
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_discover_skips_unreadable_subdirectory() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.jmx"));
        touch(&dir.path().join("locked/b.jmx"));
        let locked = dir.path().join("locked");
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        let readable = fs::read_dir(&locked).is_ok();
        let result = discover_scripts(dir.path());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let expected = if readable {
            vec!["a.jmx", "b.jmx"]
        } else {
            vec!["a.jmx"]
        };
        assert_eq!(names(&result.unwrap()), expected);
    }

    #[test]
    fn test_filter_skipped_by_file_name_only() {
        let scripts = vec![
            PathBuf::from("/plans/skip/login.jmx"),
            PathBuf::from("/plans/order_skip.jmx"),
            PathBuf::from("/plans/deep/er/skipped-cart.jmx"),
            PathBuf::from("/plans/SKIP_upper.jmx"),
            PathBuf::from("/plans/search.jmx"),
        ];

        let kept = filter_skipped(scripts);
        assert_eq!(names(&kept), vec!["login.jmx", "SKIP_upper.jmx", "search.jmx"]);
    }

    #[test]
    fn test_collect_batch_all_skipped() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("skip_a.jmx"));
        touch(&dir.path().join("sub/b_skip.jmx"));

        assert!(matches!(
            collect_batch(dir.path()),
            Err(RunnerError::EmptyBatch(_))
        ));
    }

    #[test]
    fn test_collect_batch_empty_directory() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            collect_batch(dir.path()),
            Err(RunnerError::EmptyBatch(_))
        ));
    }

    #[test]
    fn test_collect_batch_empty_argument() {
        assert!(matches!(
            collect_batch(Path::new("")),
            Err(RunnerError::EmptyDirectoryArgument)
        ));
    }

    #[test]
    fn test_collect_batch() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("login.jmx"));
        touch(&dir.path().join("skip_me.jmx"));
        touch(&dir.path().join("cart/checkout.jmx"));

        let batch = collect_batch(dir.path()).unwrap();
        assert_eq!(names(&batch), vec!["login.jmx", "checkout.jmx"]);
    }
}
