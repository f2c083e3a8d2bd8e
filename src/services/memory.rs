//! Memory usage from `/proc/meminfo`.
//!
//! Reports both of the common "used" figures: the modern one (total minus
//! available, what btop shows) and the traditional one that does not count
//! buffers and page cache as free. The displayed percentage follows the
//! traditional figure.

use std::fs;

use super::ServiceError;

const MEMINFO: &str = "/proc/meminfo";

/// Snapshot of the interesting `/proc/meminfo` fields, all in kB.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MemoryStatus {
    pub total: u64,
    pub available: u64,
    pub free: u64,
    pub buffers: u64,
    pub cached: u64,
}

impl MemoryStatus {
    pub fn read() -> Result<Self, ServiceError> {
        let text = fs::read_to_string(MEMINFO).map_err(|source| ServiceError::Read {
            path: MEMINFO.into(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ServiceError> {
        let status = Self {
            total: find_field(text, "MemTotal").unwrap_or(0),
            available: find_field(text, "MemAvailable").unwrap_or(0),
            free: find_field(text, "MemFree").unwrap_or(0),
            buffers: find_field(text, "Buffers").unwrap_or(0),
            cached: find_field(text, "Cached").unwrap_or(0),
        };
        if status.total == 0 {
            return Err(ServiceError::Malformed(format!(
                "{MEMINFO}: MemTotal missing or zero"
            )));
        }
        Ok(status)
    }

    /// Used memory as modern tools report it.
    #[inline]
    pub fn used(&self) -> u64 {
        self.total.saturating_sub(self.available)
    }

    /// Used memory with buffers and page cache counted as free.
    #[inline]
    pub fn used_traditional(&self) -> u64 {
        self.total
            .saturating_sub(self.free)
            .saturating_sub(self.buffers)
            .saturating_sub(self.cached)
    }

    #[inline]
    pub fn used_percentage(&self) -> f64 {
        (self.used_traditional() as f64 / self.total as f64) * 100.0
    }
}

fn find_field(text: &str, key: &str) -> Option<u64> {
    for line in text.lines() {
        if let Some(rest) = line.strip_prefix(key).and_then(|r| r.strip_prefix(':')) {
            return rest.trim().split(' ').next()?.parse().ok();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
MemTotal:       16384000 kB
MemFree:         4096000 kB
MemAvailable:    8192000 kB
Buffers:          512000 kB
Cached:          2048000 kB
SwapCached:            0 kB
";

    #[test]
    fn parses_the_interesting_fields() {
        let status = MemoryStatus::parse(SAMPLE).unwrap();
        assert_eq!(status.total, 16_384_000);
        assert_eq!(status.available, 8_192_000);
        assert_eq!(status.free, 4_096_000);
        assert_eq!(status.buffers, 512_000);
        assert_eq!(status.cached, 2_048_000);
    }

    #[test]
    fn used_figures() {
        let status = MemoryStatus::parse(SAMPLE).unwrap();
        assert_eq!(status.used(), 8_192_000);
        assert_eq!(status.used_traditional(), 9_728_000);
        let percent = status.used_percentage();
        assert!((percent - 59.375).abs() < 1e-9);
    }

    #[test]
    fn swap_cached_does_not_shadow_cached() {
        let status = MemoryStatus::parse("MemTotal: 100 kB\nSwapCached: 7 kB\nCached: 3 kB\n");
        assert_eq!(status.unwrap().cached, 3);
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let status = MemoryStatus::parse("MemTotal: 1000 kB\n").unwrap();
        assert_eq!(status.available, 0);
        assert_eq!(status.used(), 1000);
    }

    #[test]
    fn traditional_used_saturates() {
        let status = MemoryStatus::parse(
            "MemTotal: 100 kB\nMemFree: 80 kB\nBuffers: 30 kB\nCached: 30 kB\n",
        )
        .unwrap();
        assert_eq!(status.used_traditional(), 0);
    }

    #[test]
    fn zero_total_is_an_error() {
        assert!(MemoryStatus::parse("MemFree: 12 kB\n").is_err());
        assert!(MemoryStatus::parse("MemTotal: 0 kB\n").is_err());
    }
}
