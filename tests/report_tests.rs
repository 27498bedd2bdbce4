// Report integration tests
// From a walked organization to derived views and the five-sheet layout

mod common;

use adoscan::report::{
    build_report, render_summary, Cell, ReportBuilder, ReportContext, Severity, EXTENSIONS_SHEET,
    FILES_SHEET, PROJECTS_SHEET, REPOSITORIES_SHEET, SUMMARY_SHEET,
};
use adoscan::util::NO_EXTENSION;
use common::MB;
use time::macros::datetime;

fn context() -> ReportContext {
    ReportContext::new("contoso", datetime!(2024-03-04 05:06:07 UTC))
}

#[tokio::test]
async fn test_top_files_are_largest_first() {
    let result = common::walk(common::mixed_org(), 100).await;
    let builder = ReportBuilder::new(&result);

    let top: Vec<_> = builder.top_files(5).iter().map(|f| f.name.as_str()).collect();
    assert_eq!(top, vec!["prod.bak", "intro.mp4", "setup.exe", "seed.zip", "Makefile"]);

    // Asking for more than exist returns them all
    assert_eq!(builder.top_files(50).len(), 7);
}

#[tokio::test]
async fn test_equal_sizes_keep_discovery_order() {
    let provider = adoscan::provider::InMemoryProvider::new()
        .project("Apps")
        .repository(
            "web",
            vec![
                common::blob_mb("/b.bin", 200),
                common::blob_mb("/a.bin", 200),
                common::blob_mb("/c.bin", 300),
            ],
        );
    let result = common::walk(provider, 100).await;

    let names: Vec<_> = ReportBuilder::new(&result)
        .files_by_size()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["c.bin", "b.bin", "a.bin"]);
}

#[tokio::test]
async fn test_extension_breakdown() {
    let result = common::walk(common::mixed_org(), 100).await;
    let groups = ReportBuilder::new(&result).extension_breakdown();

    let labels: Vec<_> = groups.iter().map(|g| g.extension.as_str()).collect();
    assert_eq!(labels, vec![".bak", ".mp4", ".exe", ".zip", NO_EXTENSION, ".PSD"]);

    let exe = &groups[2];
    assert_eq!(exe.count, 2);
    assert_eq!(exe.total_bytes, 710 * MB);
    assert_eq!(exe.average_bytes(), 355.0 * MB as f64);

    let total: u64 = groups.iter().map(|g| g.total_bytes).sum();
    assert_eq!(total, result.totals().large_total_bytes);
}

#[tokio::test]
async fn test_rollups_sorted_by_size() {
    let result = common::walk(common::mixed_org(), 100).await;
    let builder = ReportBuilder::new(&result);

    let repos: Vec<_> = builder
        .repositories_by_size()
        .iter()
        .map(|r| r.repository.as_str())
        .collect();
    assert_eq!(repos, vec!["warehouse", "web", "tools"]);

    let projects: Vec<_> = builder
        .projects_by_size()
        .iter()
        .map(|p| p.project.as_str())
        .collect();
    assert_eq!(projects, vec!["Data", "Apps"]);
}

#[tokio::test]
async fn test_report_has_five_sheets() {
    let result = common::walk(common::mixed_org(), 100).await;
    let report = build_report(&result, &context());

    assert_eq!(
        report.sheet_names(),
        vec![SUMMARY_SHEET, FILES_SHEET, REPOSITORIES_SHEET, PROJECTS_SHEET, EXTENSIONS_SHEET]
    );

    let files = &report.sheet(FILES_SHEET).unwrap().tables[0];
    assert_eq!(
        files.columns,
        vec![
            "Project",
            "Repository",
            "File Name",
            "File Path",
            "Size (MB)",
            "Size (GB)",
            "Extension",
            "Repository URL",
        ]
    );
    assert_eq!(files.len(), 7);

    let repos = &report.sheet(REPOSITORIES_SHEET).unwrap().tables[0];
    assert_eq!(repos.len(), 3);
    assert_eq!(repos.cell(0, "Files Scanned"), Some(&Cell::Integer(3)));
    assert_eq!(
        repos.cell(0, "Repository URL"),
        Some(&Cell::Url("https://dev.azure.com/fixture/Data/_git/warehouse".into()))
    );

    let projects = &report.sheet(PROJECTS_SHEET).unwrap().tables[0];
    assert_eq!(projects.cell(0, "Project"), Some(&Cell::text("Data")));
    assert_eq!(projects.cell(0, "Repositories"), Some(&Cell::Integer(2)));

    let extensions = &report.sheet(EXTENSIONS_SHEET).unwrap().tables[0];
    assert_eq!(extensions.len(), 6);
}

#[tokio::test]
async fn test_large_files_sheet_values_and_severity() {
    let result = common::walk(common::mixed_org(), 100).await;
    let report = build_report(&result, &context());
    let files = &report.sheet(FILES_SHEET).unwrap().tables[0];

    assert_eq!(files.cell(0, "File Name"), Some(&Cell::text("prod.bak")));
    assert_eq!(files.cell(0, "Size (MB)").map(Cell::display), Some("2048.00".into()));
    assert_eq!(files.cell(0, "Size (GB)").map(Cell::display), Some("2.000".into()));
    assert_eq!(files.cell(0, "Extension"), Some(&Cell::text(".bak")));

    let severities: Vec<_> = files.rows.iter().map(|r| r.severity).collect();
    assert_eq!(
        severities,
        vec![
            Severity::Critical,
            Severity::Critical,
            Severity::Warning,
            Severity::Warning,
            Severity::Normal,
            Severity::Normal,
            Severity::Normal,
        ]
    );
}

#[tokio::test]
async fn test_summary_sheet() {
    let result = common::walk(common::mixed_org(), 100).await;
    let report = build_report(&result, &context());
    let summary = report.sheet(SUMMARY_SHEET).unwrap();

    assert_eq!(summary.title[0].text, "Azure DevOps Large Files Report");
    assert_eq!(summary.title[1].text, "Organization: contoso");
    assert_eq!(summary.title[2].text, "Generated: 2024-03-04 05:06:07");
    assert!(!summary.data_sheet);

    let stats = summary.table("Scan Statistics").unwrap();
    let value = |metric: &str| {
        stats
            .rows
            .iter()
            .find(|r| r.cells[0] == Cell::text(metric))
            .map(|r| r.cells[1].display())
    };
    assert_eq!(value("Minimum File Size"), Some("100 MB".into()));
    assert_eq!(value("Total Projects Scanned"), Some("2".into()));
    assert_eq!(value("Total Repositories Scanned"), Some("4".into()));
    assert_eq!(value("Total Files Scanned"), Some("9".into()));
    assert_eq!(value("Large Files Found"), Some("7".into()));
    assert_eq!(value("Scan Status"), Some("Complete".into()));
    assert_eq!(value("Failed Units"), Some("0".into()));

    let top = summary.table("Top 5 Largest Files").unwrap();
    assert_eq!(top.len(), 5);
    assert_eq!(top.cell(4, "File Name"), Some(&Cell::text("Makefile")));
}

#[tokio::test]
async fn test_empty_result_yields_empty_tables() {
    let result = common::walk(adoscan::provider::InMemoryProvider::new(), 100).await;
    let report = build_report(&result, &context());

    assert_eq!(report.sheets.len(), 5);
    for name in [FILES_SHEET, REPOSITORIES_SHEET, PROJECTS_SHEET, EXTENSIONS_SHEET] {
        assert!(report.sheet(name).unwrap().tables[0].is_empty());
    }
}

#[tokio::test]
async fn test_console_summary_reports_skipped_units() {
    let provider = common::small_org()
        .repository("broken", vec![])
        .failing_items(adoscan::provider::InjectedFailure::Status(503));
    let result = common::walk(provider, 100).await;

    let mut out = Vec::new();
    render_summary(&mut out, &result, &context(), 10).unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Total Repositories: 3"));
    assert!(text.contains("TOP 10 LARGEST FILES:"));
    assert!(text.contains("video.mp4"));
    assert!(text.contains("SKIPPED (1 listings failed):"));
    assert!(text.contains("Apps/broken"));
}

#[tokio::test]
async fn test_total_gigabytes_rounded_once() {
    // 0.13496 GB: two decimals from the exact value, not from a 3 dp rounding
    let provider = adoscan::provider::InMemoryProvider::new().project("Apps").repository(
        "web",
        vec![adoscan::provider::ItemEntry::blob("/dump.bak", 144_912_197)],
    );
    let result = common::walk(provider, 100).await;

    let report = build_report(&result, &context());
    let stats = report.sheet(SUMMARY_SHEET).unwrap().table("Scan Statistics").unwrap();
    let total = stats
        .rows
        .iter()
        .find(|r| r.cells[0] == Cell::text("Total Size of Large Files"))
        .map(|r| r.cells[1].display());
    assert_eq!(total, Some("0.13 GB".into()));

    let mut out = Vec::new();
    render_summary(&mut out, &result, &context(), 10).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Total Size of Large Files: 0.13 GB"));
}
