//! Sample line codec.
//!
//! Firmware emits one reading per line in either of two encodings:
//! `ax,ay,az,gx,gy,gz` or `timestamp,ax,ay,az,gx,gy,gz`. Headers, labels,
//! and stray non-numeric cells appear in real captures, so the codec keeps
//! every cell that parses as a float and takes the last six as the axes.

use spineguard_core::RawSample;

/// Decode one sample line.
///
/// Splits on commas, parses each cell as a float where possible, and takes
/// the **last six** numeric values as `ax..gz` in that order. When a
/// seventh numeric value precedes them it is kept as the upstream
/// timestamp. Lines yielding fewer than six numeric values (blank lines,
/// CSV headers, truncated readings) are discarded by returning `None`.
#[must_use]
pub fn parse_sample_line(line: &str) -> Option<RawSample> {
    let nums: Vec<f64> = line
        .split(',')
        .filter_map(|cell| cell.trim().parse::<f64>().ok())
        .collect();

    if nums.len() < 6 {
        return None;
    }

    let axes = &nums[nums.len() - 6..];
    let timestamp = if nums.len() >= 7 {
        Some(nums[nums.len() - 7])
    } else {
        None
    };

    Some(RawSample {
        timestamp,
        ax: axes[0],
        ay: axes[1],
        az: axes[2],
        gx: axes[3],
        gy: axes[4],
        gz: axes[5],
    })
}
