//! Best-effort "open in viewer" hook
//!
//! Failing to open the report is never an error; the outcome is logged.

use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

/// `start` treats its first quoted argument as a window title
const WINDOWS_START_ARGS: &[&str] = &["/C", "start", ""];

const NO_ARGS: &[&str] = &[];

/// Command and leading arguments that open a file with the desktop default
#[must_use]
pub fn opener_command() -> (&'static str, &'static [&'static str]) {
    if cfg!(target_os = "windows") {
        ("cmd", WINDOWS_START_ARGS)
    } else if cfg!(target_os = "macos") {
        ("open", NO_ARGS)
    } else {
        ("xdg-open", NO_ARGS)
    }
}

/// Ask the platform to open `path`, returning whether it succeeded
pub fn open_report(path: &Path) -> bool {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let (program, args) = opener_command();
    debug!(program, path = %absolute.display(), "Opening report");

    match Command::new(program).args(args).arg(&absolute).status() {
        Ok(status) if status.success() => true,
        Ok(status) => {
            info!(program, %status, "Could not automatically open the report");
            false
        }
        Err(e) => {
            info!(program, error = %e, "Could not automatically open the report");
            false
        }
    }
}
