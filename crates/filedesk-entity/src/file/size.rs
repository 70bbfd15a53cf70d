//! Human-readable byte sizes.

const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Format a byte count with base-1024 units and at most two decimals.
///
/// Trailing zeros are trimmed: `1536` becomes `1.5 KB`, `1048576` becomes
/// `1 MB`. Zero is `0 Bytes`.
pub fn format_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let rounded = format!("{scaled:.2}");
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
