//! Visual theme and styling.

use console::Style;

use crate::diagnosis::Marker;

/// gpu-doctor's visual theme.
#[derive(Debug, Clone)]
pub struct DoctorTheme {
    /// Style for success messages and `OK` markers (green).
    pub success: Style,
    /// Style for warnings and `NOT-TESTED` markers (orange).
    pub warning: Style,
    /// Style for errors and `NOT-OK` markers (red bold).
    pub error: Style,
    /// Style for dim/secondary text.
    pub dim: Style,
    /// Style for highlighted/important text (bold).
    pub highlight: Style,
    /// Style for headers (green bold).
    pub header: Style,
    /// Style for commands in remediation blocks.
    pub command: Style,
}

impl Default for DoctorTheme {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctorTheme {
    /// Create the default theme.
    pub fn new() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().color256(208),
            error: Style::new().red().bold(),
            dim: Style::new().dim(),
            highlight: Style::new().bold(),
            header: Style::new().bold().green(),
            command: Style::new().cyan(),
        }
    }

    /// Create a theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            success: Style::new(),
            warning: Style::new(),
            error: Style::new(),
            dim: Style::new(),
            highlight: Style::new(),
            header: Style::new(),
            command: Style::new(),
        }
    }

    /// The theme matching the current color setting.
    pub fn detect() -> Self {
        if should_use_colors() {
            Self::new()
        } else {
            Self::plain()
        }
    }

    pub fn format_success(&self, msg: &str) -> String {
        format!("{}", self.success.apply_to(format!("✓ {}", msg)))
    }

    pub fn format_error(&self, msg: &str) -> String {
        format!("{}", self.error.apply_to(format!("✗ {}", msg)))
    }

    pub fn format_skipped(&self, msg: &str) -> String {
        format!("{}", self.dim.apply_to(format!("○ {}", msg)))
    }

    pub fn format_header(&self, title: &str) -> String {
        format!("{}", self.header.apply_to(title))
    }

    /// Style a status marker by what it means.
    pub fn format_marker(&self, marker: Marker) -> String {
        let style = match marker {
            Marker::Ok => &self.success,
            Marker::NotOk => &self.error,
            Marker::NotTested => &self.warning,
        };
        format!("{}", style.apply_to(marker.as_str()))
    }

    /// Format a remediation command line.
    pub fn format_command(&self, command: &str) -> String {
        format!(
            "{} {}",
            self.dim.apply_to("$"),
            self.command.apply_to(command)
        )
    }
}

/// Check if colors should be enabled.
pub fn should_use_colors() -> bool {
    // https://no-color.org/
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    console::Term::stdout().is_term()
}
