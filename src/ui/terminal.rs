//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::diagnosis::{DiagnosticReport, RemediationBlock};

use super::report::{format_recommendations, format_summary};
use super::{
    DoctorTheme, NonInteractiveUI, OutputMode, ProgressSpinner, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: DoctorTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: DoctorTheme::detect(),
            mode,
        }
    }

    fn write_lines(&mut self, lines: &[String]) {
        for line in lines {
            writeln!(self.term, "{}", line).ok();
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_progress() {
            Box::new(ProgressSpinner::new(message, self.theme.clone()))
        } else {
            Box::new(ProgressSpinner::hidden())
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_progress() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_summary(&mut self, report: &DiagnosticReport) {
        writeln!(self.term, "\n{}", self.theme.format_header("Summary")).ok();
        let lines = format_summary(report, &self.theme, self.mode);
        self.write_lines(&lines);
    }

    fn show_recommendations(&mut self, blocks: &[RemediationBlock]) {
        writeln!(self.term, "\n{}", self.theme.format_header("Recommendations")).ok();
        let lines = format_recommendations(blocks, &self.theme);
        self.write_lines(&lines);
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::new(mode))
    }
}
