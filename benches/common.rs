// Shared benchmark helpers
// Functions here are used across different benchmark files
#![allow(dead_code)]

use adoscan::model::{ScanResult, ScanStatus, SizeThreshold};
use adoscan::provider::{InMemoryProvider, ItemEntry};
use adoscan::scanner::ScanAccumulator;
use adoscan::util::BYTES_PER_MB;

const EXTENSIONS: [&str; 6] = ["mp4", "zip", "bak", "psd", "iso", "dll"];

/// Deterministic size in `[1 MB, 2 GB)` for the i-th file
fn size_for(i: usize) -> u64 {
    let spread = (i as u64).wrapping_mul(2_654_435_761) % 2048;
    (spread + 1) * BYTES_PER_MB
}

fn path_for(i: usize) -> String {
    format!("/dir_{}/file_{}.{}", i % 50, i, EXTENSIONS[i % EXTENSIONS.len()])
}

/// Generate a scan result with `num_files` blobs spread over projects and
/// repositories, roughly half of them above the 1 GB threshold
pub fn generate_result(num_files: usize) -> ScanResult {
    let mut acc = ScanAccumulator::new(SizeThreshold::from_megabytes(1024));
    acc.set_project_count(10);
    for i in 0..num_files {
        let project = format!("project_{}", i % 10);
        let repository = format!("repo_{}", i % 100);
        let url = format!("https://dev.azure.com/bench/{}/_git/{}", project, repository);
        acc.observe_blob(&project, &repository, &url, &path_for(i), size_for(i));
    }
    acc.finish(ScanStatus::Complete)
}

/// Generate an organization of `projects` x `repos_per_project` repositories
/// holding `files_per_repo` blobs each
pub fn generate_provider(
    projects: usize,
    repos_per_project: usize,
    files_per_repo: usize,
) -> InMemoryProvider {
    let mut provider = InMemoryProvider::new();
    let mut i = 0;
    for p in 0..projects {
        provider = provider.project(&format!("project_{}", p));
        for r in 0..repos_per_project {
            let items: Vec<ItemEntry> = (0..files_per_repo)
                .map(|_| {
                    i += 1;
                    ItemEntry::blob(&path_for(i), size_for(i))
                })
                .collect();
            provider = provider.repository(&format!("repo_{}", r), items);
        }
    }
    provider
}
