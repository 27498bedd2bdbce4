// Shared test fixtures for integration tests
// Functions here are used across different test files
#![allow(dead_code)]

use adoscan::model::{ScanResult, SizeThreshold};
use adoscan::provider::{InMemoryProvider, ItemEntry};
use adoscan::scanner::HierarchyWalker;
use adoscan::util::BYTES_PER_MB;

pub const MB: u64 = BYTES_PER_MB;

/// Blob of `mb` whole megabytes
pub fn blob_mb(path: &str, mb: u64) -> ItemEntry {
    ItemEntry::blob(path, mb * MB)
}

/// One project, two repositories: 150 MB + 50 MB in `web`, `api` has no items
pub fn small_org() -> InMemoryProvider {
    InMemoryProvider::new()
        .project("Apps")
        .repository(
            "web",
            vec![
                ItemEntry::tree("/assets"),
                blob_mb("/assets/video.mp4", 150),
                blob_mb("/assets/logo.png", 50),
            ],
        )
        .repository("api", vec![])
}

/// Two projects with a spread of sizes across both severity bands
pub fn mixed_org() -> InMemoryProvider {
    InMemoryProvider::new()
        .project("Apps")
        .repository(
            "web",
            vec![
                ItemEntry::tree("/media"),
                blob_mb("/media/intro.mp4", 1200),
                blob_mb("/media/poster.PSD", 120),
                blob_mb("/media/thumb.png", 3),
            ],
        )
        .repository(
            "tools",
            vec![
                blob_mb("/bin/setup.exe", 600),
                blob_mb("/bin/Makefile", 200),
                blob_mb("/bin/helper.exe", 110),
            ],
        )
        .project("Data")
        .repository(
            "warehouse",
            vec![
                blob_mb("/dumps/prod.bak", 2048),
                blob_mb("/dumps/seed.zip", 500),
                blob_mb("/dumps/readme.md", 1),
            ],
        )
        .repository("empty", vec![])
}

/// Walk `provider` with a threshold of `threshold_mb`
pub async fn walk(provider: InMemoryProvider, threshold_mb: u64) -> ScanResult {
    HierarchyWalker::new(provider)
        .walk(SizeThreshold::from_megabytes(threshold_mb))
        .await
        .unwrap()
}
