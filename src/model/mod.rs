mod aggregate;
mod file;
mod scan_result;
mod threshold;

pub use aggregate::{ProjectAggregate, RepositoryAggregate};
pub use file::FileRecord;
pub use scan_result::{FailedUnit, ScanResult, ScanStatus, ScanTotals};
pub use threshold::SizeThreshold;
