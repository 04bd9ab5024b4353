//! Line formatting shared by the terminal and non-interactive UIs.

use crate::diagnosis::{
    name_width, render_recommendations, render_summary, summary_lines, DiagnosticReport,
    Marker, RemediationBlock,
};
use crate::probe::ProbeResult;

use super::{DoctorTheme, OutputMode};

/// Summary lines: one per probe, names aligned, then a totals footer.
pub fn format_summary(
    report: &DiagnosticReport,
    theme: &DoctorTheme,
    mode: OutputMode,
) -> Vec<String> {
    let width = name_width(report);
    let mut lines: Vec<String> = summary_lines(report)
        .into_iter()
        .zip(report.iter())
        .map(|((id, marker), outcome)| {
            let line = format!(
                "  {:<width$}  {}",
                id.as_str(),
                theme.format_marker(marker),
                width = width
            );
            with_detail(line, &outcome.detail, theme, mode)
        })
        .collect();

    lines.push(String::new());
    lines.push(format_totals(report, theme));
    lines
}

/// Uncolored summary built from [`render_summary`], for pipes and CI logs.
pub fn plain_summary(report: &DiagnosticReport, mode: OutputMode) -> Vec<String> {
    let theme = DoctorTheme::plain();
    let mut lines: Vec<String> = render_summary(report)
        .lines()
        .zip(report.iter())
        .map(|(line, outcome)| with_detail(format!("  {}", line), &outcome.detail, &theme, mode))
        .collect();

    lines.push(String::new());
    lines.push(format_totals(report, &theme));
    lines
}

/// `N OK · N NOT-OK · N NOT-TESTED`
pub fn format_totals(report: &DiagnosticReport, theme: &DoctorTheme) -> String {
    let sep = theme.dim.apply_to("·");
    format!(
        "  {} {} {} {} {} {} {} {}",
        report.count(ProbeResult::Present),
        Marker::Ok,
        sep,
        report.count(ProbeResult::Absent),
        Marker::NotOk,
        sep,
        report.count(ProbeResult::Unknown),
        Marker::NotTested,
    )
}

fn with_detail(mut line: String, detail: &str, theme: &DoctorTheme, mode: OutputMode) -> String {
    if mode.shows_details() && !detail.is_empty() {
        line.push_str(&format!("  {}", theme.dim.apply_to(detail)));
    }
    line
}

/// Uncolored recommendations built from [`render_recommendations`].
pub fn plain_recommendations(blocks: &[RemediationBlock]) -> Vec<String> {
    render_recommendations(blocks)
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("  {}", line)
            }
        })
        .collect()
}

/// Recommendation lines: a title per block followed by its commands.
pub fn format_recommendations(blocks: &[RemediationBlock], theme: &DoctorTheme) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        if block.is_all_clear() {
            lines.push(format!("  {}", theme.format_success(&block.title)));
            continue;
        }
        lines.push(format!("  {}", theme.highlight.apply_to(&block.title)));
        for command in &block.commands {
            lines.push(format!("    {}", theme.format_command(command)));
        }
    }
    lines
}
