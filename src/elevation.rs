//! Elevated script execution
//!
//! The single privilege boundary of the application: a script is written to a
//! temporary file and run through `osascript` with an administrator prompt.
//! No other module touches privileged paths directly.

use std::path::Path;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};
use std::{env, fs};

use tracing::{debug, warn};

use crate::constants::elevation;
use crate::error::{HiDpiError, HiDpiResult};

/// Runs a shell script with administrator authorization.
///
/// Implementations return the combined stdout/stderr on success and map any
/// non-zero exit (including a dismissed prompt) to a transaction failure.
pub trait Elevator {
    fn run_elevated(&self, script: &str) -> HiDpiResult<String>;
}

/// Production channel: one interactive administrator prompt per script via
/// `osascript`'s `do shell script ... with administrator privileges`.
pub struct OsascriptElevator;

impl Elevator for OsascriptElevator {
    fn run_elevated(&self, script: &str) -> HiDpiResult<String> {
        let script_path = env::temp_dir().join(format!(
            "{}{}.sh",
            elevation::SCRIPT_PREFIX,
            unique_suffix()
        ));
        fs::write(&script_path, format!("#!/bin/bash\nset -e\n{script}\n"))?;
        debug!(path = %script_path.display(), "staged elevation script");

        let result = run_osascript(&script_path);

        // Launch script removal is logged and swallowed.
        if let Err(err) = fs::remove_file(&script_path) {
            warn!(path = %script_path.display(), error = %err, "could not remove elevation script");
        }

        result
    }
}

fn run_osascript(script_path: &Path) -> HiDpiResult<String> {
    let shell_line = format!(
        "do shell script \"bash '{}'\" with administrator privileges",
        script_path.display()
    );
    let output = Command::new(elevation::OSASCRIPT_BIN)
        .args(["-e", &shell_line])
        .output()?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let combined = combined.trim().to_string();

    if output.status.success() {
        Ok(combined)
    } else {
        debug!(status = ?output.status.code(), "elevated script failed");
        let output = if combined.is_empty() {
            "administrator authorization was not granted".to_string()
        } else {
            combined
        };
        Err(HiDpiError::Transaction { output })
    }
}

/// A per-invocation unique path component: process id plus a nanosecond
/// timestamp, enough to keep concurrent invocations from colliding.
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos())
        .unwrap_or(0);
    format!("{}_{}", std::process::id(), nanos)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_suffix_changes_between_calls() {
        assert_ne!(unique_suffix(), unique_suffix());
    }

    #[test]
    fn test_unique_suffix_contains_pid() {
        assert!(unique_suffix().starts_with(&std::process::id().to_string()));
    }
}
