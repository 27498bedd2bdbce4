use crate::util::{self, BYTES_PER_MB};

/// One blob at or above the scan threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub project: String,
    pub repository: String,
    /// Full path inside the repository, as reported by the provider
    pub path: String,
    /// Final path segment
    pub name: String,
    pub size_bytes: u64,
    /// `.ext` of `name`, or `"no extension"`
    pub extension: String,
    pub repository_url: String,
}

impl FileRecord {
    pub fn new(
        project: &str,
        repository: &str,
        path: &str,
        size_bytes: u64,
        repository_url: &str,
    ) -> Self {
        let name = util::file_name(path);
        Self {
            project: project.to_string(),
            repository: repository.to_string(),
            path: path.to_string(),
            name: name.to_string(),
            size_bytes,
            extension: util::extension_label(name).into_owned(),
            repository_url: repository_url.to_string(),
        }
    }

    /// Unrounded size in MB, for thresholds and display math
    pub fn size_mb(&self) -> f64 {
        self.size_bytes as f64 / BYTES_PER_MB as f64
    }
}
