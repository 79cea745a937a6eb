//! Comparison report: everything a document renderer needs to lay out the
//! borrower's results, as plain data.

pub mod document;

pub use document::{build_report, ComparisonReport, ReportInput};
