//! Output verbosity.

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show probe details next to each marker.
    Verbose,
    /// Show progress, summary and recommendations.
    #[default]
    Normal,
    /// Show only the summary and recommendations.
    Quiet,
}

impl OutputMode {
    /// Pick the mode from the global `--quiet` / `--verbose` flags.
    /// `--quiet` wins when both are given.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Self::Quiet
        } else if verbose {
            Self::Verbose
        } else {
            Self::Normal
        }
    }

    /// Check if this mode shows probe details.
    pub fn shows_details(&self) -> bool {
        matches!(self, Self::Verbose)
    }

    /// Check if this mode shows per-probe progress and headers.
    pub fn shows_progress(&self) -> bool {
        !matches!(self, Self::Quiet)
    }
}
