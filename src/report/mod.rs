//! Report derivation and rendering
//!
//! [`ReportBuilder`] derives sorted views from a [`ScanResult`](crate::model::ScanResult)
//! without any I/O. [`build_report`] lays those views out as the five named
//! sheets, and a [`ReportSink`] renders them somewhere (the XLSX workbook).
//! The console summary is rendered separately by [`render_summary`].

mod builder;
mod console;
mod sheets;
mod table;
mod xlsx;

pub use builder::{ExtensionStats, ReportBuilder};
pub use console::render_summary;
pub use sheets::{
    build_report, ReportContext, EXTENSIONS_SHEET, FILES_SHEET, PROJECTS_SHEET, REPOSITORIES_SHEET,
    SUMMARY_SHEET, SUMMARY_TOP_N,
};
pub use table::{Cell, Report, Row, Severity, Sheet, Table, TitleLine, TitleStyle};
pub use xlsx::XlsxSink;

/// Destination for a rendered report.
pub trait ReportSink {
    fn render(&mut self, report: &Report) -> anyhow::Result<()>;
}
