//! Font smoothing preference
//!
//! Reads and writes the global `AppleFontSmoothing` level through `defaults
//! -currentHost`. Unprivileged; takes effect after the user logs out and
//! back in.

use std::process::Command;

use tracing::debug;

use crate::constants::prefs;
use crate::error::HiDpiResult;

/// Smoothing levels the system understands, `-1` meaning system default.
pub const LEVEL_RANGE: std::ops::RangeInclusive<i32> = -1..=3;

/// Read the current font smoothing level.
///
/// Returns `None` when the key is not set (a fresh system never has it).
pub fn read_level() -> HiDpiResult<Option<i32>> {
    let output = Command::new(prefs::DEFAULTS_BIN).args(read_args()).output()?;
    let text = String::from_utf8_lossy(&output.stdout);
    let level = text.trim().parse::<i32>().ok();
    debug!(level = ?level, "read font smoothing");
    Ok(level)
}

/// Set the font smoothing level.
///
/// The value is written verbatim, including `-1`; interpretation is left to
/// the system.
pub fn write_level(level: i32) -> HiDpiResult<bool> {
    let output = Command::new(prefs::DEFAULTS_BIN)
        .args(write_args(level))
        .output()?;
    debug!(level = level, success = output.status.success(), "wrote font smoothing");
    Ok(output.status.success())
}

fn read_args() -> [String; 4] {
    [
        "-currentHost".to_string(),
        "read".to_string(),
        "-g".to_string(),
        prefs::FONT_SMOOTHING_KEY.to_string(),
    ]
}

fn write_args(level: i32) -> [String; 6] {
    [
        "-currentHost".to_string(),
        "write".to_string(),
        "-g".to_string(),
        prefs::FONT_SMOOTHING_KEY.to_string(),
        "-int".to_string(),
        level.to_string(),
    ]
}
