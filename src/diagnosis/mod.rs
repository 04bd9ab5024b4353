//! Diagnosis: running probes, summarizing results, and recommending fixes.
//!
//! ```text
//! ProbeRegistry --Aggregator--> DiagnosticReport --+--> render_summary
//!                                                  +--> recommend --> Vec<RemediationBlock>
//! ```

pub mod aggregator;
pub mod recommend;
pub mod remedy;
pub mod report;
pub mod summary;

pub use aggregator::{diagnose, Aggregator, NoopObserver, ProbeObserver};
pub use recommend::{recommend, render_recommendations, rules, Category, RemediationRule};
pub use remedy::{RemediationBlock, RemedyContext, RemedyKind};
pub use report::DiagnosticReport;
pub use summary::{name_width, render_summary, summary_lines, Marker};
