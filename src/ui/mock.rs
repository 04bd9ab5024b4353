//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion.
//!
//! # Example
//!
//! ```
//! use gpu_doctor::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.message("Loaded configuration");
//! ui.error("Configuration not found");
//!
//! assert!(ui.has_message("Loaded configuration"));
//! assert!(ui.has_error("not found"));
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use crate::diagnosis::{DiagnosticReport, RemediationBlock};

use super::{OutputMode, SpinnerHandle, UserInterface};

/// How a mock spinner was finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpinnerFinish {
    Success(String),
    Error(String),
    Skipped(String),
}

/// Mock UI implementation for testing.
#[derive(Debug, Default)]
pub struct MockUI {
    mode: OutputMode,
    messages: Vec<String>,
    errors: Vec<String>,
    headers: Vec<String>,
    spinners: Vec<String>,
    finishes: Rc<RefCell<Vec<SpinnerFinish>>>,
    summaries: Vec<DiagnosticReport>,
    recommendations: Vec<Vec<RemediationBlock>>,
}

impl MockUI {
    /// Create a new MockUI with Normal output mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new MockUI with a specific output mode.
    pub fn with_mode(mode: OutputMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// Get how each spinner was finished, in order.
    pub fn spinner_finishes(&self) -> Vec<SpinnerFinish> {
        self.finishes.borrow().clone()
    }

    /// Reports passed to `show_summary`.
    pub fn summaries(&self) -> &[DiagnosticReport] {
        &self.summaries
    }

    /// Block lists passed to `show_recommendations`.
    pub fn recommendations(&self) -> &[Vec<RemediationBlock>] {
        &self.recommendations
    }

    /// Check if a message containing `msg` was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if an error containing `msg` was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }
}

impl UserInterface for MockUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        self.messages.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.errors.push(msg.to_string());
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner {
            finishes: Rc::clone(&self.finishes),
        })
    }

    fn show_header(&mut self, title: &str) {
        self.headers.push(title.to_string());
    }

    fn show_summary(&mut self, report: &DiagnosticReport) {
        self.summaries.push(report.clone());
    }

    fn show_recommendations(&mut self, blocks: &[RemediationBlock]) {
        self.recommendations.push(blocks.to_vec());
    }
}

/// Spinner that records how it was finished into its `MockUI`.
pub struct MockSpinner {
    finishes: Rc<RefCell<Vec<SpinnerFinish>>>,
}

impl SpinnerHandle for MockSpinner {
    fn set_message(&mut self, _msg: &str) {}

    fn finish_success(&mut self, msg: &str) {
        self.finishes
            .borrow_mut()
            .push(SpinnerFinish::Success(msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.finishes
            .borrow_mut()
            .push(SpinnerFinish::Error(msg.to_string()));
    }

    fn finish_skipped(&mut self, msg: &str) {
        self.finishes
            .borrow_mut()
            .push(SpinnerFinish::Skipped(msg.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn captures_messages() {
        let mut ui = MockUI::new();
        ui.message("hello");
        ui.error("broken");
        ui.show_header("gpu-doctor");

        assert!(ui.has_message("hell"));
        assert!(ui.has_error("broken"));
        assert_eq!(ui.headers(), &["gpu-doctor".to_string()]);
    }

    #[test]
    fn spinners_record_finish() {
        let mut ui = MockUI::new();
        let mut spinner = ui.start_spinner("Checking driver");
        spinner.finish_error("driver_present NOT-OK");

        assert_eq!(ui.spinners(), &["Checking driver".to_string()]);
        assert_eq!(
            ui.spinner_finishes(),
            vec![SpinnerFinish::Error("driver_present NOT-OK".to_string())]
        );
    }

    #[test]
    fn captures_report_and_blocks() {
        let mut ui = MockUI::with_mode(OutputMode::Quiet);
        ui.show_summary(&DiagnosticReport::default());
        ui.show_recommendations(&[RemediationBlock::all_clear()]);

        assert_eq!(ui.output_mode(), OutputMode::Quiet);
        assert_eq!(ui.summaries().len(), 1);
        assert!(ui.recommendations()[0][0].is_all_clear());
    }
}
