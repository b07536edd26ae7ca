mod batch;
mod export;
mod report;

pub use batch::{BatchChecker, ProgressReporter, SilentProgress};
pub use export::{export_results, write_csv, write_json, ExportPaths};
pub use report::{render_report, write_report, ReportSummary};
