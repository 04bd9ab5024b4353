//! Non-interactive UI for CI, pipes and headless environments.

use crate::diagnosis::{DiagnosticReport, RemediationBlock};

use super::report::{plain_recommendations, plain_summary};
use super::theme::DoctorTheme;
use super::{OutputMode, SpinnerHandle, UserInterface};

/// UI implementation for non-interactive mode.
///
/// Spinners are replaced by plain progress lines so logs stay readable.
pub struct NonInteractiveUI {
    mode: OutputMode,
    theme: DoctorTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            theme: DoctorTheme::plain(),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        let show = self.mode.shows_progress();
        if show {
            println!("  {}", message);
        }
        Box::new(LineSpinner {
            show,
            theme: self.theme.clone(),
        })
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            println!("\n{}\n", title);
        }
    }

    fn show_summary(&mut self, report: &DiagnosticReport) {
        println!("\nSummary");
        for line in plain_summary(report, self.mode) {
            println!("{}", line);
        }
    }

    fn show_recommendations(&mut self, blocks: &[RemediationBlock]) {
        println!("\nRecommendations");
        for line in plain_recommendations(blocks) {
            println!("{}", line);
        }
    }
}

/// Spinner stand-in that prints the final status as a plain line.
struct LineSpinner {
    show: bool,
    theme: DoctorTheme,
}

impl LineSpinner {
    fn finish(&self, line: String) {
        if self.show {
            println!("    {}", line);
        }
    }
}

impl SpinnerHandle for LineSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.finish(self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finish(self.theme.format_error(msg));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finish(self.theme.format_skipped(msg));
    }
}
