//! Recommendation engine.
//!
//! A fixed table of rules maps report patterns to remediation blocks.
//! Rules are grouped by category; categories are evaluated independently
//! in table order, and within a category only the first matching rule
//! fires. If nothing fires the result is a single all-clear block.

use crate::probe::{Framework, ProbeId, ProbeResult};

use super::{DiagnosticReport, RemediationBlock, RemedyContext};

/// Problem area a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Driver,
    Toolkit,
    Framework(Framework),
}

/// One entry of the rule table.
#[derive(Clone, Copy)]
pub struct RemediationRule {
    pub category: Category,
    pub name: &'static str,
    pub condition: fn(&DiagnosticReport) -> bool,
    pub action: fn(&RemedyContext) -> RemediationBlock,
}

impl std::fmt::Debug for RemediationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemediationRule")
            .field("category", &self.category)
            .field("name", &self.name)
            .finish()
    }
}

static RULES: [RemediationRule; 5] = [
    RemediationRule {
        category: Category::Driver,
        name: "driver_missing",
        condition: driver_missing,
        action: driver_repair,
    },
    RemediationRule {
        category: Category::Toolkit,
        name: "toolkit_missing",
        condition: toolkit_missing,
        action: RemediationBlock::toolkit_install,
    },
    RemediationRule {
        category: Category::Toolkit,
        name: "toolkit_not_on_path",
        condition: toolkit_not_on_path,
        action: RemediationBlock::toolkit_path,
    },
    RemediationRule {
        category: Category::Framework(Framework::Torch),
        name: "torch_not_installed",
        condition: torch_not_installed,
        action: torch_install,
    },
    RemediationRule {
        category: Category::Framework(Framework::Tensorflow),
        name: "tensorflow_not_installed",
        condition: tensorflow_not_installed,
        action: tensorflow_install,
    },
];

/// The rule table in evaluation order.
pub fn rules() -> &'static [RemediationRule] {
    &RULES
}

/// Blocks for every problem the report shows, in precedence order.
pub fn recommend(report: &DiagnosticReport, ctx: &RemedyContext) -> Vec<RemediationBlock> {
    let mut fired: Vec<Category> = Vec::new();
    let mut blocks = Vec::new();

    for rule in rules() {
        if fired.contains(&rule.category) || !(rule.condition)(report) {
            continue;
        }
        tracing::debug!(rule = rule.name, "remediation rule fired");
        fired.push(rule.category);
        blocks.push((rule.action)(ctx));
    }

    if blocks.is_empty() {
        blocks.push(RemediationBlock::all_clear());
    }
    blocks
}

/// Render blocks as a title line followed by indented `$ command` lines.
pub fn render_recommendations(blocks: &[RemediationBlock]) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&block.title);
        out.push('\n');
        for command in &block.commands {
            out.push_str("  $ ");
            out.push_str(command);
            out.push('\n');
        }
    }
    out
}

fn driver_missing(report: &DiagnosticReport) -> bool {
    report.result(ProbeId::DriverPresent) == ProbeResult::Absent
}

fn toolkit_missing(report: &DiagnosticReport) -> bool {
    report.result(ProbeId::ToolkitDirPresent) == ProbeResult::Absent
        && report.result(ProbeId::LibrariesPresent) == ProbeResult::Absent
}

fn toolkit_not_on_path(report: &DiagnosticReport) -> bool {
    report.result(ProbeId::CompilerPresent) == ProbeResult::Absent
        && (report.result(ProbeId::ToolkitDirPresent) == ProbeResult::Present
            || report.result(ProbeId::LibrariesPresent) == ProbeResult::Present)
}

fn torch_not_installed(report: &DiagnosticReport) -> bool {
    report.result(ProbeId::TorchCuda) == ProbeResult::Unknown
}

fn tensorflow_not_installed(report: &DiagnosticReport) -> bool {
    report.result(ProbeId::TensorflowCuda) == ProbeResult::Unknown
}

fn driver_repair(_ctx: &RemedyContext) -> RemediationBlock {
    RemediationBlock::driver_repair()
}

fn torch_install(ctx: &RemedyContext) -> RemediationBlock {
    RemediationBlock::framework_install(ctx, Framework::Torch)
}

fn tensorflow_install(ctx: &RemedyContext) -> RemediationBlock {
    RemediationBlock::framework_install(ctx, Framework::Tensorflow)
}
