use std::io::{self, Write};

use crate::model::ScanResult;
use crate::util::{format_thousands, format_timestamp, BYTES_PER_GB, BYTES_PER_MB};

use super::builder::ReportBuilder;
use super::sheets::ReportContext;

const RULE_WIDTH: usize = 80;
const NAME_WIDTH: usize = 50;

/// Write the end-of-scan summary block: totals, the `top_n` largest files
/// and the extension breakdown.
pub fn render_summary(
    out: &mut impl Write,
    result: &ScanResult,
    ctx: &ReportContext,
    top_n: usize,
) -> io::Result<()> {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let totals = result.totals();

    writeln!(out, "{}", heavy)?;
    writeln!(out, "SCAN SUMMARY")?;
    writeln!(out, "{}", heavy)?;
    writeln!(out)?;
    writeln!(out, "Organization: {}", ctx.organization)?;
    writeln!(out, "Scan completed: {}", format_timestamp(ctx.generated_at))?;
    if result.is_partial() {
        writeln!(out, "Scan status: PARTIAL (cancelled before all repositories were visited)")?;
    }
    writeln!(out)?;
    writeln!(out, "Total Projects: {}", format_thousands(totals.project_count))?;
    writeln!(out, "Total Repositories: {}", format_thousands(totals.repository_count))?;
    writeln!(out, "Total Files Scanned: {}", format_thousands(totals.files_scanned_total))?;
    writeln!(out)?;
    writeln!(
        out,
        "Large Files Found (>= {}): {}",
        result.threshold(),
        format_thousands(totals.large_file_count)
    )?;
    writeln!(
        out,
        "Total Size of Large Files: {:.2} GB",
        totals.large_total_bytes as f64 / BYTES_PER_GB as f64
    )?;
    writeln!(out)?;

    let builder = ReportBuilder::new(result);
    if !result.is_empty() {
        writeln!(out, "TOP {} LARGEST FILES:", top_n)?;
        writeln!(out, "{}", light)?;
        for (i, file) in builder.top_files(top_n).iter().enumerate() {
            writeln!(
                out,
                "{:2}. {:<width$} {:>10.2} MB",
                i + 1,
                truncate_chars(&file.name, NAME_WIDTH),
                file.size_bytes as f64 / BYTES_PER_MB as f64,
                width = NAME_WIDTH
            )?;
            writeln!(out, "    Project: {}, Repo: {}", file.project, file.repository)?;
        }
        writeln!(out)?;

        writeln!(out, "LARGE FILES BY EXTENSION:")?;
        writeln!(out, "{}", light)?;
        for group in builder.extension_breakdown() {
            writeln!(
                out,
                "{:<20} {:>5} files    {:>10.2} GB",
                group.extension,
                group.count,
                group.total_bytes as f64 / BYTES_PER_GB as f64
            )?;
        }
        writeln!(out)?;
    }

    let failed = result.failed_units();
    if !failed.is_empty() {
        writeln!(out, "SKIPPED ({} listings failed):", failed.len())?;
        writeln!(out, "{}", light)?;
        for unit in failed {
            writeln!(out, "  {}: {}", unit.label(), unit.reason)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
