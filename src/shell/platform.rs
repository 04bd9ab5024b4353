//! Platform-specific shell detection.
//!
//! Remediation blocks that persist environment changes need to know which
//! startup file to append to and which syntax that shell understands.

use std::path::Path;

/// Known shell types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellType {
    Bash,
    Zsh,
    Fish,
    Unknown,
}

impl ShellType {
    /// Parse shell type from executable name.
    pub fn from_executable(exe: &str) -> Self {
        let name = Path::new(exe)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match name.as_str() {
            "bash" => ShellType::Bash,
            "zsh" => ShellType::Zsh,
            "fish" => ShellType::Fish,
            _ => ShellType::Unknown,
        }
    }

    /// Detect the user's login shell from `$SHELL`.
    pub fn current() -> Self {
        std::env::var("SHELL")
            .map(|s| Self::from_executable(&s))
            .unwrap_or(ShellType::Unknown)
    }

    /// Startup file, written with a leading `~` for display in commands.
    pub fn rc_file(&self) -> &'static str {
        match self {
            ShellType::Zsh => "~/.zshrc",
            ShellType::Fish => "~/.config/fish/config.fish",
            ShellType::Bash | ShellType::Unknown => "~/.bashrc",
        }
    }

    /// Statement prepending `dir` to the environment variable `var`.
    pub fn prepend_path(&self, var: &str, dir: &str) -> String {
        match self {
            ShellType::Fish => format!("set -gx {var} {dir} ${var}"),
            _ => format!("export {var}={dir}:${var}"),
        }
    }
}

/// Check if running in a CI environment.
///
/// Used to force non-interactive output in `main()`.
/// Checks common CI environment variables: `CI`, `GITHUB_ACTIONS`,
/// `GITLAB_CI`, `CIRCLECI`, `TRAVIS`, `JENKINS_URL`.
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
        || std::env::var("TRAVIS").is_ok()
        || std::env::var("JENKINS_URL").is_ok()
}
