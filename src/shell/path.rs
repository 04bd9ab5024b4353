//! Executable lookup on PATH.

use std::path::{Path, PathBuf};

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

/// Resolve a tool's binary path by iterating over PATH entries.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, path_entries: &[PathBuf]) -> Option<PathBuf> {
    let file_name = format!("{}{}", tool, std::env::consts::EXE_SUFFIX);
    for dir in path_entries {
        for candidate in [dir.join(tool), dir.join(&file_name)] {
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Locate an executable the way `Command::new` would.
///
/// Names containing a path separator are checked as-is; bare names are
/// searched on the system PATH.
pub fn find_executable(name: &str) -> Option<PathBuf> {
    let as_path = Path::new(name);
    if as_path.components().count() > 1 || as_path.is_absolute() {
        return (as_path.is_file() && is_executable(as_path)).then(|| as_path.to_path_buf());
    }
    resolve_tool_path(name, &parse_system_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Create a fake binary at a path (creates parent dirs as needed).
    fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    #[cfg(unix)]
    fn create_non_executable_file(path: &Path) {
        use std::os::unix::fs::PermissionsExt;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "not executable").unwrap();
        fs::set_permissions(path, fs::Permissions::from_mode(0o644)).unwrap();
    }

    #[test]
    fn resolve_tool_path_finds_first_match() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        create_fake_binary(&dir_a.join("nvcc"));
        create_fake_binary(&dir_b.join("nvcc"));

        let result = resolve_tool_path("nvcc", &[dir_a.clone(), dir_b]);
        assert_eq!(result, Some(dir_a.join("nvcc")));
    }

    #[test]
    fn resolve_tool_path_returns_none_when_not_found() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("empty");
        fs::create_dir_all(&dir).unwrap();

        assert!(resolve_tool_path("nvcc", &[dir]).is_none());
    }

    #[cfg(unix)]
    #[test]
    fn resolve_tool_path_skips_non_executable() {
        let temp = TempDir::new().unwrap();
        let dir_a = temp.path().join("a");
        let dir_b = temp.path().join("b");
        create_non_executable_file(&dir_a.join("nvidia-smi"));
        create_fake_binary(&dir_b.join("nvidia-smi"));

        let result = resolve_tool_path("nvidia-smi", &[dir_a, dir_b.clone()]);
        assert_eq!(result, Some(dir_b.join("nvidia-smi")));
    }

    #[test]
    fn is_executable_returns_false_for_nonexistent_file() {
        assert!(!is_executable(Path::new("/nonexistent/path/to/file")));
    }

    #[test]
    fn find_executable_checks_explicit_paths_directly() {
        let temp = TempDir::new().unwrap();
        let tool = temp.path().join("bin/nvcc");
        create_fake_binary(&tool);

        assert_eq!(find_executable(tool.to_str().unwrap()), Some(tool));
        assert!(find_executable("/nonexistent/bin/nvcc").is_none());
    }

    #[test]
    fn find_executable_misses_unknown_bare_name() {
        assert!(find_executable("gpu-doctor-surely-not-installed").is_none());
    }
}
