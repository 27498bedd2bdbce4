use rustc_hash::FxHashMap;

use crate::model::{FileRecord, ProjectAggregate, RepositoryAggregate, ScanResult};

use super::table::Severity;

/// Large files grouped by extension label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionStats {
    pub extension: String,
    pub count: u64,
    pub total_bytes: u64,
}

impl ExtensionStats {
    pub fn average_bytes(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.total_bytes as f64 / self.count as f64
        }
    }
}

/// Derives presentation views from a scan result.
///
/// All orderings are by size descending. Ties keep discovery order (files,
/// extension groups) or accumulation order (rollups), so equal inputs always
/// yield equal reports.
pub struct ReportBuilder<'a> {
    result: &'a ScanResult,
}

impl<'a> ReportBuilder<'a> {
    pub fn new(result: &'a ScanResult) -> Self {
        Self { result }
    }

    pub fn result(&self) -> &'a ScanResult {
        self.result
    }

    /// Every large file, largest first. Canonical order for the detailed listing.
    pub fn files_by_size(&self) -> Vec<&'a FileRecord> {
        let mut files: Vec<&FileRecord> = self.result.files().iter().collect();
        // sort_by is stable: equal sizes stay in discovery order
        files.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes));
        files
    }

    /// The `n` largest files
    pub fn top_files(&self, n: usize) -> Vec<&'a FileRecord> {
        let mut files = self.files_by_size();
        files.truncate(n);
        files
    }

    pub fn extension_breakdown(&self) -> Vec<ExtensionStats> {
        let mut groups: Vec<ExtensionStats> = Vec::new();
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();

        for file in self.result.files() {
            let idx = *index.entry(file.extension.as_str()).or_insert_with(|| {
                groups.push(ExtensionStats {
                    extension: file.extension.clone(),
                    count: 0,
                    total_bytes: 0,
                });
                groups.len() - 1
            });
            let group = &mut groups[idx];
            group.count += 1;
            group.total_bytes += file.size_bytes;
        }

        groups.sort_by(|a, b| b.total_bytes.cmp(&a.total_bytes));
        groups
    }

    pub fn repositories_by_size(&self) -> Vec<&'a RepositoryAggregate> {
        let mut repos: Vec<&RepositoryAggregate> = self.result.repositories().iter().collect();
        repos.sort_by(|a, b| b.large_total_bytes.cmp(&a.large_total_bytes));
        repos
    }

    pub fn projects_by_size(&self) -> Vec<&'a ProjectAggregate> {
        let mut projects: Vec<&ProjectAggregate> = self.result.projects().iter().collect();
        projects.sort_by(|a, b| b.large_total_bytes.cmp(&a.large_total_bytes));
        projects
    }

    /// Styling band for a file row
    pub fn severity(file: &FileRecord) -> Severity {
        Severity::for_size(file.size_bytes)
    }
}
