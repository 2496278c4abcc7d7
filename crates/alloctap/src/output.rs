use std::alloc::Layout;
use std::fmt;

#[cfg(feature = "json")]
use serde::{Deserialize, Serialize};

/// A single allocation request observed by a tap.
///
/// Records describe the request, not the outcome: a record is emitted before
/// the delegate runs, so a failed allocation still leaves its request in the
/// stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize, Deserialize))]
pub struct AllocRecord {
    /// Requested size in bytes.
    pub bytes: usize,
    /// Requested alignment in bytes, a power of two.
    pub align: usize,
}

impl AllocRecord {
    pub fn new(layout: Layout) -> Self {
        Self {
            bytes: layout.size(),
            align: layout.align(),
        }
    }
}

impl fmt::Display for AllocRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alloc {} B (align {})", self.bytes, self.align)?;
        if self.bytes >= 1024 {
            write!(f, " [{}]", format_bytes(self.bytes as u64))?;
        }
        Ok(())
    }
}

/// Formats a byte count into a human-readable string with binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f = bytes as f64;
    let unit_index = (bytes_f.log(THRESHOLD).floor() as usize).min(UNITS.len() - 1);

    if unit_index == 0 {
        return format!("{} B", bytes);
    }

    let unit_value = bytes_f / THRESHOLD.powi(unit_index as i32);
    format!("{:.1} {}", unit_value, UNITS[unit_index])
}
