//! Scripted in-memory provider
//!
//! Serves a fixed organization layout and can be told to fail specific
//! listings. Used by integration tests and benches; every call is recorded
//! so traversal order can be asserted.

use std::collections::HashMap;
use std::sync::Mutex;

use super::error::ProviderError;
use super::types::{ItemEntry, ProjectRef, RepositoryRef};
use super::ProviderClient;

/// Failure to inject into a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectedFailure {
    NotFound,
    Unauthorized,
    Timeout,
    Status(u16),
}

impl InjectedFailure {
    fn to_error(self, what: &str) -> ProviderError {
        match self {
            InjectedFailure::NotFound => ProviderError::NotFound(what.to_string()),
            InjectedFailure::Unauthorized => ProviderError::Unauthorized { status: 401 },
            InjectedFailure::Timeout => ProviderError::Timeout {
                url: what.to_string(),
            },
            InjectedFailure::Status(status) => ProviderError::Status {
                url: what.to_string(),
                status,
                body: String::new(),
            },
        }
    }
}

#[derive(Debug)]
struct RepositoryFixture {
    repository: RepositoryRef,
    items: Vec<ItemEntry>,
    failure: Option<InjectedFailure>,
}

#[derive(Debug)]
struct ProjectFixture {
    project: ProjectRef,
    repositories: Vec<RepositoryFixture>,
    failure: Option<InjectedFailure>,
}

impl ProjectFixture {
    fn new(id: &str, name: &str) -> Self {
        Self {
            project: ProjectRef::new(id, name),
            repositories: Vec::new(),
            failure: None,
        }
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProvider {
    projects: Vec<ProjectFixture>,
    projects_failure: Option<InjectedFailure>,
    calls: Mutex<Vec<String>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a project; repositories added afterwards belong to it.
    pub fn project(mut self, name: &str) -> Self {
        let id = format!("p{}", self.projects.len() + 1);
        self.projects.push(ProjectFixture::new(&id, name));
        self
    }

    /// Add a repository with its items to the most recently added project.
    pub fn repository(mut self, name: &str, items: Vec<ItemEntry>) -> Self {
        let project = self.last_project();
        let project_name = project.project.name.clone();
        let id = format!("{}-r{}", project_name, project.repositories.len() + 1);
        let url = format!("https://dev.azure.com/fixture/{}/_git/{}", project_name, name);
        project.repositories.push(RepositoryFixture {
            repository: RepositoryRef::new(&id, name, &url),
            items,
            failure: None,
        });
        self
    }

    /// Make the item listing of the most recently added repository fail.
    pub fn failing_items(mut self, failure: InjectedFailure) -> Self {
        if let Some(repo) = self.last_project().repositories.last_mut() {
            repo.failure = Some(failure);
        }
        self
    }

    /// Make the repository listing of the most recently added project fail.
    pub fn failing_repositories(mut self, failure: InjectedFailure) -> Self {
        self.last_project().failure = Some(failure);
        self
    }

    /// Make the initial project listing fail.
    pub fn failing_projects(mut self, failure: InjectedFailure) -> Self {
        self.projects_failure = Some(failure);
        self
    }

    /// Calls received so far, e.g. `list_items(Apps/Apps-r1)`
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn last_project(&mut self) -> &mut ProjectFixture {
        if self.projects.is_empty() {
            self.projects.push(ProjectFixture::new("p1", "Default"));
        }
        let last = self.projects.len() - 1;
        &mut self.projects[last]
    }

    fn record(&self, call: String) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn find_project(&self, name: &str) -> Option<&ProjectFixture> {
        self.projects
            .iter()
            .find(|p| p.project.name == name)
    }
}

impl ProviderClient for InMemoryProvider {
    async fn list_projects(&self) -> Result<Vec<ProjectRef>, ProviderError> {
        self.record("list_projects".to_string());
        if let Some(failure) = self.projects_failure {
            return Err(failure.to_error("/_apis/projects"));
        }
        Ok(self.projects.iter().map(|p| p.project.clone()).collect())
    }

    async fn list_repositories(&self, project: &str) -> Result<Vec<RepositoryRef>, ProviderError> {
        self.record(format!("list_repositories({})", project));
        let fixture = self
            .find_project(project)
            .ok_or_else(|| ProviderError::NotFound(project.to_string()))?;
        if let Some(failure) = fixture.failure {
            return Err(failure.to_error(project));
        }
        Ok(fixture
            .repositories
            .iter()
            .map(|r| r.repository.clone())
            .collect())
    }

    async fn list_items(
        &self,
        project: &str,
        repository_id: &str,
    ) -> Result<Vec<ItemEntry>, ProviderError> {
        self.record(format!("list_items({}/{})", project, repository_id));
        let repo = self
            .find_project(project)
            .and_then(|p| {
                p.repositories
                    .iter()
                    .find(|r| r.repository.id == repository_id)
            })
            .ok_or_else(|| ProviderError::NotFound(repository_id.to_string()))?;
        if let Some(failure) = repo.failure {
            return Err(failure.to_error(repository_id));
        }
        Ok(repo.items.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_layout() {
        let provider = InMemoryProvider::new()
            .project("Apps")
            .repository("web", vec![ItemEntry::blob("/a.bin", 10)])
            .repository("api", vec![]);

        let projects = provider.list_projects().await.unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].name, "Apps");

        let repos = provider.list_repositories("Apps").await.unwrap();
        assert_eq!(repos.len(), 2);
        assert_eq!(repos[0].id, "Apps-r1");
        assert_eq!(repos[0].web_url, "https://dev.azure.com/fixture/Apps/_git/web");

        let items = provider.list_items("Apps", "Apps-r1").await.unwrap();
        assert_eq!(items, vec![ItemEntry::blob("/a.bin", 10)]);
    }

    #[tokio::test]
    async fn test_injected_failures() {
        let provider = InMemoryProvider::new()
            .project("Apps")
            .repository("web", vec![])
            .failing_items(InjectedFailure::NotFound)
            .project("Data")
            .failing_repositories(InjectedFailure::Status(500));

        assert!(provider.list_items("Apps", "Apps-r1").await.unwrap_err().is_not_found());
        assert!(provider.list_repositories("Data").await.unwrap_err().is_transient());

        let calls = provider.calls();
        assert_eq!(calls, vec!["list_items(Apps/Apps-r1)", "list_repositories(Data)"]);
    }
}
