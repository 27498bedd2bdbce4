//! XLSX workbook sink (rust_xlsxwriter)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use tracing::info;

use super::table::{Cell, Report, Severity, Sheet, Table, TitleStyle};
use super::ReportSink;

const HEADER_FILL: u32 = 0x366092;
const WARNING_FILL: u32 = 0xFFC7CE;
const MB_FORMAT: &str = "#,##0.00";
const GB_FORMAT: &str = "#,##0.000";

/// Writes the report as a formatted `.xlsx` workbook, one worksheet per sheet.
pub struct XlsxSink {
    path: PathBuf,
}

impl XlsxSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ReportSink for XlsxSink {
    fn render(&mut self, report: &Report) -> Result<()> {
        let mut workbook = Workbook::new();
        for sheet in &report.sheets {
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, sheet)
                .with_context(|| format!("Failed to write sheet '{}'", sheet.name))?;
        }
        workbook
            .save(&self.path)
            .with_context(|| format!("Failed to save workbook: {}", self.path.display()))?;
        info!(path = %self.path.display(), "Excel report written");
        Ok(())
    }
}

fn write_sheet(ws: &mut Worksheet, sheet: &Sheet) -> Result<(), XlsxError> {
    ws.set_name(&sheet.name)?;

    let mut row: u32 = 0;
    for line in &sheet.title {
        ws.write_string_with_format(row, 0, &line.text, &title_format(line.style))?;
        row += 1;
    }
    if !sheet.title.is_empty() {
        row += 1;
    }

    let mut widths: Vec<f64> = Vec::new();
    for (i, table) in sheet.tables.iter().enumerate() {
        if i > 0 {
            row += 2;
        }
        if let Some(heading) = &table.heading {
            let format = Format::new().set_bold().set_font_size(14);
            ws.write_string_with_format(row, 0, heading, &format)?;
            row += 1;
        }
        let header_row = row;
        row = write_table(ws, table, row)?;

        if sheet.data_sheet && !table.columns.is_empty() {
            ws.set_freeze_panes(header_row + 1, 0)?;
            ws.autofilter(header_row, 0, row.saturating_sub(1).max(header_row), last_col(table))?;
        }

        for (col, width) in table.widths.iter().enumerate() {
            match widths.get_mut(col) {
                Some(w) => *w = w.max(*width),
                None => widths.push(*width),
            }
        }
    }

    for (col, width) in widths.iter().enumerate() {
        ws.set_column_width(col as u16, *width)?;
    }
    Ok(())
}

/// Writes header + rows starting at `row`; returns the next free row.
fn write_table(ws: &mut Worksheet, table: &Table, mut row: u32) -> Result<u32, XlsxError> {
    let header = Format::new()
        .set_bold()
        .set_font_color(Color::White)
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin);
    for (col, name) in table.columns.iter().enumerate() {
        ws.write_string_with_format(row, col as u16, *name, &header)?;
    }
    row += 1;

    for data in &table.rows {
        for (col, cell) in data.cells.iter().enumerate() {
            write_cell(ws, row, col as u16, cell, data.severity)?;
        }
        row += 1;
    }
    Ok(row)
}

fn write_cell(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
    severity: Severity,
) -> Result<(), XlsxError> {
    let base = row_format(severity);
    match cell {
        Cell::Text(s) => {
            ws.write_string_with_format(row, col, s, &base)?;
        }
        Cell::Integer(n) => {
            ws.write_number_with_format(row, col, *n as f64, &base)?;
        }
        Cell::Megabytes(_) | Cell::MegabytesF(_) => {
            let value = cell.number().unwrap_or_default();
            ws.write_number_with_format(row, col, value, &base.set_num_format(MB_FORMAT))?;
        }
        Cell::Gigabytes(_) => {
            let value = cell.number().unwrap_or_default();
            ws.write_number_with_format(row, col, value, &base.set_num_format(GB_FORMAT))?;
        }
        Cell::Url(url) if url.is_empty() => {
            ws.write_blank(row, col, &base)?;
        }
        Cell::Url(url) => {
            let link = match severity {
                Severity::Normal => base.clone().set_font_color(Color::Blue).set_underline(
                    rust_xlsxwriter::FormatUnderline::Single,
                ),
                _ => base.clone(),
            };
            // Malformed links degrade to plain text
            if ws.write_url_with_format(row, col, url.as_str(), &link).is_err() {
                ws.write_string_with_format(row, col, url, &base)?;
            }
        }
    }
    Ok(())
}

fn row_format(severity: Severity) -> Format {
    let format = Format::new().set_border(FormatBorder::Thin);
    match severity {
        Severity::Critical => format
            .set_background_color(Color::Red)
            .set_font_color(Color::White)
            .set_bold(),
        Severity::Warning => format.set_background_color(Color::RGB(WARNING_FILL)),
        Severity::Normal => format,
    }
}

fn title_format(style: TitleStyle) -> Format {
    match style {
        TitleStyle::Title => Format::new().set_bold().set_font_size(16),
        TitleStyle::Subtitle => Format::new().set_font_size(12),
        TitleStyle::Caption => Format::new().set_font_size(10).set_italic(),
    }
}

fn last_col(table: &Table) -> u16 {
    table.columns.len().saturating_sub(1) as u16
}
