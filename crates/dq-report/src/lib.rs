//! Profiling and reporting for data-quality runs.
//!
//! - **profile**: per-column statistics for raw and clean tables
//! - **report**: report assembly and failed-row sampling
//! - **markdown** / **html** / **json**: renderers and persistence

pub mod html;
pub mod json;
pub mod markdown;
pub mod profile;
pub mod report;

pub use html::render_html;
pub use json::{
    REPORT_SCHEMA, REPORT_SCHEMA_VERSION, ReportPaths, write_report_json, write_report_outputs,
};
pub use markdown::render_markdown;
pub use profile::{profile_table, sorted_for_display};
pub use report::{
    FAILED_SAMPLE_LIMIT, FailedSample, Report, ReportInput, ReportMetadata, RunSummary, SampleRow,
    build_report,
};
