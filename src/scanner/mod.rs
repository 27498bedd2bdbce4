//! Organization scanner
//!
//! Walks projects -> repositories -> items and folds every blob into a
//! [`ScanResult`].
//!
//! # Architecture
//!
//! - **accumulator**: running counters and lazily created rollups
//! - **progress**: progress reporting abstraction
//! - **HierarchyWalker**: traversal and failure policy
//!
//! Only the initial project listing is fatal. A project whose repositories
//! cannot be listed, or a repository whose items cannot be listed, is
//! logged, recorded as a [`FailedUnit`] and contributes nothing. A missing
//! item listing (unborn repository) is simply empty.

mod accumulator;
mod progress;

pub use accumulator::ScanAccumulator;
pub use progress::{for_terminal, IndicatifProgress, NoopProgress, ProgressHandle, ProgressReporter};

use std::time::Instant;

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::model::{FailedUnit, ScanResult, ScanStatus, SizeThreshold};
use crate::provider::{ProjectRef, ProviderClient, ProviderError, RepositoryRef};
use crate::util::{format_size, format_thousands};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to list projects: {0}")]
    ListProjects(#[source] ProviderError),
}

/// Drives a full, sequential scan of one organization.
pub struct HierarchyWalker<P> {
    provider: P,
    progress: Box<dyn ProgressReporter>,
    cancel: CancellationToken,
}

impl<P: ProviderClient> HierarchyWalker<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            progress: Box::new(NoopProgress),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Checked before every project and repository; once cancelled the walk stops and
    /// returns what it has, marked [`ScanStatus::Partial`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub async fn walk(&self, threshold: SizeThreshold) -> Result<ScanResult, ScanError> {
        let start = Instant::now();
        info!(threshold = %threshold, "Scanning organization for large files");

        let projects = self
            .provider
            .list_projects()
            .await
            .map_err(ScanError::ListProjects)?;
        info!("Found {} projects in organization", projects.len());

        let mut acc = ScanAccumulator::new(threshold);
        acc.set_project_count(projects.len() as u64);

        let pb = self.progress.start("Projects", projects.len() as u64);
        let mut status = ScanStatus::Complete;

        for (idx, project) in projects.iter().enumerate() {
            if self.cancel.is_cancelled() {
                status = ScanStatus::Partial;
                break;
            }
            info!("[{}/{}] Project: {}", idx + 1, projects.len(), project.name);
            pb.set_message(&project.name);

            let cancelled = self.scan_project(&mut acc, project).await;
            pb.inc(1);
            if cancelled {
                status = ScanStatus::Partial;
                break;
            }
        }
        pb.finish();

        let totals = acc.totals();
        if status == ScanStatus::Partial {
            warn!(
                repositories = totals.repository_count,
                "Scan cancelled; returning partial results"
            );
        }
        info!(
            "Scanned {} repositories and {} files in {:.1?}; {} large files ({})",
            format_thousands(totals.repository_count),
            format_thousands(totals.files_scanned_total),
            start.elapsed(),
            format_thousands(totals.large_file_count),
            format_size(totals.large_total_bytes),
        );

        Ok(acc.finish(status))
    }

    /// Scan every repository of a project. Returns `true` if cancellation
    /// interrupted it.
    async fn scan_project(&self, acc: &mut ScanAccumulator, project: &ProjectRef) -> bool {
        let repositories = match self.provider.list_repositories(&project.name).await {
            Ok(repositories) => repositories,
            Err(err) => {
                warn!(project = %project.name, error = %err, "Error fetching repositories");
                acc.record_failure(FailedUnit::project(&project.name, &err));
                Vec::new()
            }
        };

        if repositories.is_empty() {
            info!("  No repositories found");
            return false;
        }
        info!("  Found {} repositories", repositories.len());

        let mut cancelled = false;
        for (idx, repository) in repositories.iter().enumerate() {
            if self.cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            debug!(
                "  [{}/{}] {}",
                idx + 1,
                repositories.len(),
                repository.name
            );
            self.scan_repository(acc, project, repository).await;
        }

        // Total listed, not just the ones holding large files
        acc.finish_project(&project.name, repositories.len() as u64);
        cancelled
    }

    async fn scan_repository(
        &self,
        acc: &mut ScanAccumulator,
        project: &ProjectRef,
        repository: &RepositoryRef,
    ) {
        acc.observe_repository();

        let items = match self
            .provider
            .list_items(&project.name, &repository.id)
            .await
        {
            Ok(items) => items,
            Err(err) if err.is_not_found() => {
                debug!(project = %project.name, repository = %repository.name, "Repository is empty");
                Vec::new()
            }
            Err(err) => {
                warn!(
                    project = %project.name,
                    repository = %repository.name,
                    disabled = repository.is_disabled,
                    error = %err,
                    "Error fetching items"
                );
                acc.record_failure(FailedUnit::repository(&project.name, &repository.name, &err));
                Vec::new()
            }
        };

        let mut files_scanned = 0u64;
        for item in items.iter().filter(|item| item.is_blob()) {
            files_scanned += 1;
            acc.observe_blob(
                &project.name,
                &repository.name,
                &repository.web_url,
                &item.path,
                item.size,
            );
        }

        match acc.finish_repository(&project.name, &repository.name, files_scanned) {
            Some(agg) => info!(
                "  {}: {} large files ({})",
                repository.name,
                agg.large_file_count,
                format_size(agg.large_total_bytes)
            ),
            None => info!("  {}: no large files", repository.name),
        }
    }
}
