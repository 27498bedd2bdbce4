//! Source-control hosting provider
//!
//! The scanner only needs three read-only listings from the provider.
//! They sit behind the [`ProviderClient`] trait so traversal can be tested
//! without a network:
//!
//! - **azure**: Azure DevOps REST client (pagination, auth, retry)
//! - **memory**: scripted in-memory provider with failure injection
//! - **types**: wire types shared by both
//! - **error**: provider error taxonomy

mod azure;
mod error;
mod memory;
mod types;

pub use azure::{AzureDevOpsClient, ClientOptions, Credential};
pub use error::ProviderError;
pub use memory::{InMemoryProvider, InjectedFailure};
pub use types::{GitObjectType, ItemEntry, ProjectRef, RepositoryRef};

/// Read-only view of an organization's projects, repositories and files.
#[allow(async_fn_in_trait)]
pub trait ProviderClient {
    /// List every project in the organization.
    async fn list_projects(&self) -> Result<Vec<ProjectRef>, ProviderError>;

    /// List the Git repositories of one project.
    async fn list_repositories(&self, project: &str) -> Result<Vec<RepositoryRef>, ProviderError>;

    /// Full recursive listing of a repository's default branch.
    ///
    /// Unborn repositories answer with [`ProviderError::NotFound`].
    async fn list_items(
        &self,
        project: &str,
        repository_id: &str,
    ) -> Result<Vec<ItemEntry>, ProviderError>;
}
