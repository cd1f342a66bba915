//! Aggregation and rendering of extracted abbreviations.
//!
//! Documents can be reported one section per source ([`ReportMode::Grouped`])
//! or merged into a single alphabetical list ([`ReportMode::Unified`]), as
//! Markdown or JSON.

pub mod export;
pub mod types;

pub use export::{ReportError, render_report, unify, write_report};
pub use types::{ExportFormat, ReportMode, UnifiedEntry};
