use super::{FileRecord, ProjectAggregate, RepositoryAggregate, SizeThreshold};

/// Whether the walk visited every repository or was cut short.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanStatus {
    #[default]
    Complete,
    /// Cancelled between repositories; counters cover only what was visited
    Partial,
}

/// A project or repository whose listing failed and contributed nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedUnit {
    pub project: String,
    /// `None` when the repository listing of the whole project failed
    pub repository: Option<String>,
    pub reason: String,
}

impl FailedUnit {
    pub fn project(project: &str, reason: impl ToString) -> Self {
        Self {
            project: project.to_string(),
            repository: None,
            reason: reason.to_string(),
        }
    }

    pub fn repository(project: &str, repository: &str, reason: impl ToString) -> Self {
        Self {
            project: project.to_string(),
            repository: Some(repository.to_string()),
            reason: reason.to_string(),
        }
    }

    /// `project` or `project/repository`
    pub fn label(&self) -> String {
        match &self.repository {
            Some(repo) => format!("{}/{}", self.project, repo),
            None => self.project.clone(),
        }
    }
}

/// Organization-wide counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanTotals {
    pub project_count: u64,
    pub repository_count: u64,
    pub files_scanned_total: u64,
    pub large_file_count: u64,
    pub large_total_bytes: u64,
}

/// Snapshot produced by one walk over the organization.
///
/// Built once by the scan accumulator and read-only afterwards; a new walk
/// always yields a fresh value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    threshold: SizeThreshold,
    files: Vec<FileRecord>,
    repositories: Vec<RepositoryAggregate>,
    projects: Vec<ProjectAggregate>,
    totals: ScanTotals,
    failed_units: Vec<FailedUnit>,
    status: ScanStatus,
}

impl ScanResult {
    pub(crate) fn new(
        threshold: SizeThreshold,
        files: Vec<FileRecord>,
        repositories: Vec<RepositoryAggregate>,
        projects: Vec<ProjectAggregate>,
        totals: ScanTotals,
        failed_units: Vec<FailedUnit>,
        status: ScanStatus,
    ) -> Self {
        Self {
            threshold,
            files,
            repositories,
            projects,
            totals,
            failed_units,
            status,
        }
    }

    pub fn threshold(&self) -> SizeThreshold {
        self.threshold
    }

    /// Large files in discovery order
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Repository rollups; order carries no meaning
    pub fn repositories(&self) -> &[RepositoryAggregate] {
        &self.repositories
    }

    /// Project rollups; order carries no meaning
    pub fn projects(&self) -> &[ProjectAggregate] {
        &self.projects
    }

    pub fn totals(&self) -> &ScanTotals {
        &self.totals
    }

    pub fn failed_units(&self) -> &[FailedUnit] {
        &self.failed_units
    }

    pub fn status(&self) -> ScanStatus {
        self.status
    }

    pub fn is_partial(&self) -> bool {
        self.status == ScanStatus::Partial
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
