//! Sheet-ready table model
//!
//! Sizes are carried as exact bytes inside [`Cell::Megabytes`] /
//! [`Cell::Gigabytes`]; rounding happens only when a cell is rendered.

use crate::util::{self, BYTES_PER_MB};

/// Styling hint for a file row, judged on the size as displayed (MB, 2 dp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Severity {
    #[default]
    Normal,
    /// 500 MB up to (not including) 1000 MB
    Warning,
    /// 1000 MB and above
    Critical,
}

impl Severity {
    pub fn for_size(size_bytes: u64) -> Self {
        let mb = util::megabytes(size_bytes);
        if mb >= 1000.0 {
            Severity::Critical
        } else if mb >= 500.0 {
            Severity::Warning
        } else {
            Severity::Normal
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Normal => "normal",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(u64),
    /// Bytes shown as MB with 2 decimals
    Megabytes(u64),
    /// Bytes shown as GB with 3 decimals
    Gigabytes(u64),
    /// Fractional bytes shown as MB with 2 decimals (averages)
    MegabytesF(f64),
    Url(String),
}

impl Cell {
    pub fn text(s: impl Into<String>) -> Self {
        Cell::Text(s.into())
    }

    /// Rounded numeric value, for numeric cells
    pub fn number(&self) -> Option<f64> {
        match self {
            Cell::Integer(n) => Some(*n as f64),
            Cell::Megabytes(bytes) => Some(util::megabytes(*bytes)),
            Cell::Gigabytes(bytes) => Some(util::gigabytes(*bytes)),
            Cell::MegabytesF(bytes) => {
                Some((bytes / BYTES_PER_MB as f64 * 100.0).round() / 100.0)
            }
            _ => None,
        }
    }

    /// Plain-text rendering with the fixed decimal places
    pub fn display(&self) -> String {
        match self {
            Cell::Text(s) | Cell::Url(s) => s.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Megabytes(_) | Cell::MegabytesF(_) => format!("{:.2}", self.number().unwrap_or(0.0)),
            Cell::Gigabytes(_) => format!("{:.3}", self.number().unwrap_or(0.0)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
    pub severity: Severity,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self {
            cells,
            severity: Severity::Normal,
        }
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

/// A header row plus data rows with a fixed column set.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub heading: Option<String>,
    pub columns: Vec<&'static str>,
    /// Column widths in characters, same length as `columns`
    pub widths: Vec<f64>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(columns: &[(&'static str, f64)]) -> Self {
        Self {
            heading: None,
            columns: columns.iter().map(|(name, _)| *name).collect(),
            widths: columns.iter().map(|(_, width)| *width).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_heading(mut self, heading: &str) -> Self {
        self.heading = Some(heading.to_string());
        self
    }

    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(row.cells.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.columns.iter().position(|c| *c == column)
    }

    /// Cell by row index and column name
    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let col = self.column_index(column)?;
        self.rows.get(row)?.cells.get(col)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleStyle {
    Title,
    Subtitle,
    Caption,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TitleLine {
    pub text: String,
    pub style: TitleStyle,
}

impl TitleLine {
    pub fn new(text: impl Into<String>, style: TitleStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// A named sheet: optional title block, then tables stacked vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub title: Vec<TitleLine>,
    pub tables: Vec<Table>,
    /// Data sheets get a frozen header row and an autofilter
    pub data_sheet: bool,
}

impl Sheet {
    /// Single-table sheet with header row at the top
    pub fn data(name: &str, table: Table) -> Self {
        Self {
            name: name.to_string(),
            title: Vec::new(),
            tables: vec![table],
            data_sheet: true,
        }
    }

    pub fn table(&self, heading: &str) -> Option<&Table> {
        self.tables
            .iter()
            .find(|t| t.heading.as_deref() == Some(heading))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Report {
    pub sheets: Vec<Sheet>,
}

impl Report {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
