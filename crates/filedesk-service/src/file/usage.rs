//! Storage usage against the configured quota.

use serde::{Deserialize, Serialize};

use filedesk_entity::file::format_size;

/// Bytes used by all files compared with the quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Sum of file sizes.
    pub used_bytes: u64,
    /// Configured quota.
    pub quota_bytes: u64,
}

impl StorageUsage {
    /// Share of the quota in use, 0 to 100. A zero quota reads as full.
    pub fn percent(&self) -> f64 {
        if self.quota_bytes == 0 {
            return 100.0;
        }
        (self.used_bytes as f64 / self.quota_bytes as f64 * 100.0).min(100.0)
    }

    /// Bytes still available.
    pub fn remaining_bytes(&self) -> u64 {
        self.quota_bytes.saturating_sub(self.used_bytes)
    }

    /// Whether adding `bytes` would exceed the quota.
    pub fn would_exceed(&self, bytes: u64) -> bool {
        self.used_bytes.saturating_add(bytes) > self.quota_bytes
    }
}

impl std::fmt::Display for StorageUsage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} of {} used ({:.1}%)",
            format_size(self.used_bytes),
            format_size(self.quota_bytes),
            self.percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        let usage = StorageUsage {
            used_bytes: 256,
            quota_bytes: 1024,
        };
        assert_eq!(usage.percent(), 25.0);
        assert_eq!(usage.remaining_bytes(), 768);
        assert!(!usage.would_exceed(768));
        assert!(usage.would_exceed(769));
    }

    #[test]
    fn test_zero_quota() {
        let usage = StorageUsage {
            used_bytes: 0,
            quota_bytes: 0,
        };
        assert_eq!(usage.percent(), 100.0);
    }

    #[test]
    fn test_display() {
        let usage = StorageUsage {
            used_bytes: 1536,
            quota_bytes: 1024 * 1024,
        };
        assert_eq!(usage.to_string(), "1.5 KB of 1 MB used (0.1%)");
    }
}
