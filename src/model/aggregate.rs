/// Rollup for a repository holding at least one large file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryAggregate {
    pub project: String,
    pub repository: String,
    /// Every blob seen in the repository, large or not
    pub files_scanned_total: u64,
    pub large_file_count: u64,
    pub large_total_bytes: u64,
    pub largest_file_bytes: u64,
    pub repository_url: String,
}

impl RepositoryAggregate {
    pub fn new(project: &str, repository: &str, repository_url: &str) -> Self {
        Self {
            project: project.to_string(),
            repository: repository.to_string(),
            files_scanned_total: 0,
            large_file_count: 0,
            large_total_bytes: 0,
            largest_file_bytes: 0,
            repository_url: repository_url.to_string(),
        }
    }

    pub fn add_large_file(&mut self, size_bytes: u64) {
        self.large_file_count += 1;
        self.large_total_bytes += size_bytes;
        self.largest_file_bytes = self.largest_file_bytes.max(size_bytes);
    }
}

/// Rollup for a project holding at least one large file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectAggregate {
    pub project: String,
    /// All repositories listed for the project, including ones without large files
    pub repository_count: u64,
    pub large_file_count: u64,
    pub large_total_bytes: u64,
}

impl ProjectAggregate {
    pub fn new(project: &str) -> Self {
        Self {
            project: project.to_string(),
            repository_count: 0,
            large_file_count: 0,
            large_total_bytes: 0,
        }
    }

    pub fn add_large_file(&mut self, size_bytes: u64) {
        self.large_file_count += 1;
        self.large_total_bytes += size_bytes;
    }
}
