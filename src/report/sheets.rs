//! Five-sheet workbook layout
//!
//! `Summary`, `Large Files`, `Repository Stats`, `Project Stats`,
//! `By Extension`; column sets are fixed.

use time::OffsetDateTime;

use crate::model::{ScanResult, ScanStatus};
use crate::util::{format_thousands, format_timestamp, BYTES_PER_GB};

use super::builder::ReportBuilder;
use super::table::{Cell, Report, Row, Sheet, Table, TitleLine, TitleStyle};

/// Files listed in the summary sheet's top table
pub const SUMMARY_TOP_N: usize = 5;

pub const SUMMARY_SHEET: &str = "Summary";
pub const FILES_SHEET: &str = "Large Files";
pub const REPOSITORIES_SHEET: &str = "Repository Stats";
pub const PROJECTS_SHEET: &str = "Project Stats";
pub const EXTENSIONS_SHEET: &str = "By Extension";

/// Facts about the run that are not part of the scan itself.
#[derive(Debug, Clone)]
pub struct ReportContext {
    pub organization: String,
    pub generated_at: OffsetDateTime,
}

impl ReportContext {
    pub fn new(organization: &str, generated_at: OffsetDateTime) -> Self {
        Self {
            organization: organization.to_string(),
            generated_at,
        }
    }
}

pub fn build_report(result: &ScanResult, ctx: &ReportContext) -> Report {
    let builder = ReportBuilder::new(result);
    Report {
        sheets: vec![
            summary_sheet(&builder, ctx),
            files_sheet(&builder),
            repositories_sheet(&builder),
            projects_sheet(&builder),
            extensions_sheet(&builder),
        ],
    }
}

fn summary_sheet(builder: &ReportBuilder<'_>, ctx: &ReportContext) -> Sheet {
    let result = builder.result();
    let totals = result.totals();

    let mut stats = Table::new(&[("Metric", 30.0), ("Value", 30.0)]).with_heading("Scan Statistics");
    let mut stat = |label: &str, value: String| {
        stats.push(Row::new(vec![Cell::text(label), Cell::Text(value)]));
    };
    stat("Minimum File Size", result.threshold().to_string());
    stat("Total Projects Scanned", format_thousands(totals.project_count));
    stat("Total Repositories Scanned", format_thousands(totals.repository_count));
    stat("Total Files Scanned", format_thousands(totals.files_scanned_total));
    stat("Large Files Found", format_thousands(totals.large_file_count));
    stat(
        "Total Size of Large Files",
        format!("{:.2} GB", totals.large_total_bytes as f64 / BYTES_PER_GB as f64),
    );
    stat(
        "Scan Status",
        match result.status() {
            ScanStatus::Complete => "Complete".to_string(),
            ScanStatus::Partial => "Partial (cancelled)".to_string(),
        },
    );
    stat("Failed Units", format_thousands(result.failed_units().len() as u64));

    let mut top = Table::new(&[
        ("File Name", 30.0),
        ("Size (GB)", 30.0),
        ("Project", 25.0),
        ("Repository", 25.0),
    ])
    .with_heading(&format!("Top {} Largest Files", SUMMARY_TOP_N));
    for file in builder.top_files(SUMMARY_TOP_N) {
        top.push(Row::new(vec![
            Cell::text(&file.name),
            Cell::Gigabytes(file.size_bytes),
            Cell::text(&file.project),
            Cell::text(&file.repository),
        ]));
    }

    Sheet {
        name: SUMMARY_SHEET.to_string(),
        title: vec![
            TitleLine::new("Azure DevOps Large Files Report", TitleStyle::Title),
            TitleLine::new(format!("Organization: {}", ctx.organization), TitleStyle::Subtitle),
            TitleLine::new(
                format!("Generated: {}", format_timestamp(ctx.generated_at)),
                TitleStyle::Caption,
            ),
        ],
        tables: vec![stats, top],
        data_sheet: false,
    }
}

fn files_sheet(builder: &ReportBuilder<'_>) -> Sheet {
    let mut table = Table::new(&[
        ("Project", 20.0),
        ("Repository", 25.0),
        ("File Name", 40.0),
        ("File Path", 50.0),
        ("Size (MB)", 15.0),
        ("Size (GB)", 15.0),
        ("Extension", 15.0),
        ("Repository URL", 50.0),
    ]);
    for file in builder.files_by_size() {
        table.push(
            Row::new(vec![
                Cell::text(&file.project),
                Cell::text(&file.repository),
                Cell::text(&file.name),
                Cell::text(&file.path),
                Cell::Megabytes(file.size_bytes),
                Cell::Gigabytes(file.size_bytes),
                Cell::text(&file.extension),
                Cell::Url(file.repository_url.clone()),
            ])
            .with_severity(ReportBuilder::severity(file)),
        );
    }
    Sheet::data(FILES_SHEET, table)
}

fn repositories_sheet(builder: &ReportBuilder<'_>) -> Sheet {
    let mut table = Table::new(&[
        ("Project", 20.0),
        ("Repository", 20.0),
        ("Files Scanned", 20.0),
        ("Large Files Count", 20.0),
        ("Total Size (MB)", 20.0),
        ("Total Size (GB)", 20.0),
        ("Largest File (MB)", 20.0),
        ("Repository URL", 50.0),
    ]);
    for repo in builder.repositories_by_size() {
        table.push(Row::new(vec![
            Cell::text(&repo.project),
            Cell::text(&repo.repository),
            Cell::Integer(repo.files_scanned_total),
            Cell::Integer(repo.large_file_count),
            Cell::Megabytes(repo.large_total_bytes),
            Cell::Gigabytes(repo.large_total_bytes),
            Cell::Megabytes(repo.largest_file_bytes),
            Cell::Url(repo.repository_url.clone()),
        ]));
    }
    Sheet::data(REPOSITORIES_SHEET, table)
}

fn projects_sheet(builder: &ReportBuilder<'_>) -> Sheet {
    let mut table = Table::new(&[
        ("Project", 30.0),
        ("Repositories", 15.0),
        ("Large Files Count", 20.0),
        ("Total Size (MB)", 20.0),
        ("Total Size (GB)", 20.0),
    ]);
    for project in builder.projects_by_size() {
        table.push(Row::new(vec![
            Cell::text(&project.project),
            Cell::Integer(project.repository_count),
            Cell::Integer(project.large_file_count),
            Cell::Megabytes(project.large_total_bytes),
            Cell::Gigabytes(project.large_total_bytes),
        ]));
    }
    Sheet::data(PROJECTS_SHEET, table)
}

fn extensions_sheet(builder: &ReportBuilder<'_>) -> Sheet {
    let mut table = Table::new(&[
        ("Extension", 20.0),
        ("File Count", 20.0),
        ("Total Size (MB)", 20.0),
        ("Total Size (GB)", 20.0),
        ("Average Size (MB)", 20.0),
    ]);
    for group in builder.extension_breakdown() {
        table.push(Row::new(vec![
            Cell::text(&group.extension),
            Cell::Integer(group.count),
            Cell::Megabytes(group.total_bytes),
            Cell::Gigabytes(group.total_bytes),
            Cell::MegabytesF(group.average_bytes()),
        ]));
    }
    Sheet::data(EXTENSIONS_SHEET, table)
}
