use std::fmt;

use crate::util::BYTES_PER_MB;

/// Minimum size, in bytes, for a blob to count as a large file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SizeThreshold(u64);

impl SizeThreshold {
    pub const DEFAULT_MB: u64 = 100;

    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn from_megabytes(mb: u64) -> Self {
        Self(mb.saturating_mul(BYTES_PER_MB))
    }

    pub const fn bytes(self) -> u64 {
        self.0
    }

    /// Inclusive: a blob of exactly the threshold size qualifies.
    #[inline]
    pub const fn admits(self, size_bytes: u64) -> bool {
        size_bytes >= self.0
    }
}

impl Default for SizeThreshold {
    fn default() -> Self {
        Self::from_megabytes(Self::DEFAULT_MB)
    }
}

impl fmt::Display for SizeThreshold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 % BYTES_PER_MB == 0 {
            write!(f, "{} MB", self.0 / BYTES_PER_MB)
        } else {
            write!(f, "{} bytes", self.0)
        }
    }
}
