//! Running scan state
//!
//! Counters and rollups live here while the walk is in progress; the walker
//! threads one accumulator through every step and converts it into an
//! immutable [`ScanResult`] at the end.

use rustc_hash::FxHashMap;

use crate::model::{
    FailedUnit, FileRecord, ProjectAggregate, RepositoryAggregate, ScanResult, ScanStatus,
    ScanTotals, SizeThreshold,
};

pub struct ScanAccumulator {
    threshold: SizeThreshold,
    files: Vec<FileRecord>,
    repositories: Vec<RepositoryAggregate>,
    /// (project, repository) -> index into `repositories`
    repository_index: FxHashMap<(String, String), usize>,
    projects: Vec<ProjectAggregate>,
    /// project -> index into `projects`
    project_index: FxHashMap<String, usize>,
    totals: ScanTotals,
    failed_units: Vec<FailedUnit>,
}

impl ScanAccumulator {
    pub fn new(threshold: SizeThreshold) -> Self {
        Self {
            threshold,
            files: Vec::new(),
            repositories: Vec::new(),
            repository_index: FxHashMap::default(),
            projects: Vec::new(),
            project_index: FxHashMap::default(),
            totals: ScanTotals::default(),
            failed_units: Vec::new(),
        }
    }

    pub fn totals(&self) -> &ScanTotals {
        &self.totals
    }

    pub fn set_project_count(&mut self, count: u64) {
        self.totals.project_count = count;
    }

    /// Count a repository as visited, whatever its listing yields.
    pub fn observe_repository(&mut self) {
        self.totals.repository_count += 1;
    }

    /// Count one blob; if it qualifies, record it and fold it into the
    /// repository and project rollups. Returns the new record, if any.
    pub fn observe_blob(
        &mut self,
        project: &str,
        repository: &str,
        repository_url: &str,
        path: &str,
        size_bytes: u64,
    ) -> Option<&FileRecord> {
        self.totals.files_scanned_total += 1;
        if !self.threshold.admits(size_bytes) {
            return None;
        }

        self.totals.large_file_count += 1;
        self.totals.large_total_bytes += size_bytes;

        self.repository_entry(project, repository, repository_url)
            .add_large_file(size_bytes);
        self.project_entry(project).add_large_file(size_bytes);

        self.files.push(FileRecord::new(
            project,
            repository,
            path,
            size_bytes,
            repository_url,
        ));
        self.files.last()
    }

    /// Close a repository: store its blob count on the rollup, if one exists.
    pub fn finish_repository(
        &mut self,
        project: &str,
        repository: &str,
        files_scanned: u64,
    ) -> Option<&RepositoryAggregate> {
        let key = (project.to_string(), repository.to_string());
        let idx = *self.repository_index.get(&key)?;
        let agg = &mut self.repositories[idx];
        agg.files_scanned_total = files_scanned;
        Some(&*agg)
    }

    /// Close a project: store how many repositories it listed, if it has a rollup.
    pub fn finish_project(&mut self, project: &str, repository_count: u64) -> Option<&ProjectAggregate> {
        let idx = *self.project_index.get(project)?;
        let agg = &mut self.projects[idx];
        agg.repository_count = repository_count;
        Some(&*agg)
    }

    pub fn record_failure(&mut self, unit: FailedUnit) {
        self.failed_units.push(unit);
    }

    pub fn finish(self, status: ScanStatus) -> ScanResult {
        ScanResult::new(
            self.threshold,
            self.files,
            self.repositories,
            self.projects,
            self.totals,
            self.failed_units,
            status,
        )
    }

    /// Lookup-or-insert of the rollup for (project, repository)
    fn repository_entry(
        &mut self,
        project: &str,
        repository: &str,
        repository_url: &str,
    ) -> &mut RepositoryAggregate {
        let key = (project.to_string(), repository.to_string());
        let idx = match self.repository_index.get(&key) {
            Some(&idx) => idx,
            None => {
                self.repositories
                    .push(RepositoryAggregate::new(project, repository, repository_url));
                let idx = self.repositories.len() - 1;
                self.repository_index.insert(key, idx);
                idx
            }
        };
        &mut self.repositories[idx]
    }

    /// Lookup-or-insert of the rollup for a project
    fn project_entry(&mut self, project: &str) -> &mut ProjectAggregate {
        let idx = match self.project_index.get(project) {
            Some(&idx) => idx,
            None => {
                self.projects.push(ProjectAggregate::new(project));
                let idx = self.projects.len() - 1;
                self.project_index.insert(project.to_string(), idx);
                idx
            }
        };
        &mut self.projects[idx]
    }
}
