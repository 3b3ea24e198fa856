//! Mount root preflight check.

use super::CheckResult;
use crate::utils::fs;
use std::path::Path;

/// Check that pointer files can be written under the mount root.
pub fn check(mount_path: &Path) -> CheckResult {
    match fs::check_writable(mount_path) {
        Ok(()) => CheckResult::ok("Mount", &format!("{} is writable", mount_path.display())),
        Err(e) => CheckResult::fail(
            "Mount",
            &format!("{} is not writable ({})", mount_path.display(), e),
            "Pass --mount or set STRM_MOUNT_PATH to a writable directory",
        ),
    }
}
