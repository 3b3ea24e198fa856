//! Unmount command implementation.

use crate::core::materializer::unmount_strm;
use crate::models::config::Config;
use crate::Result;
use colored::Colorize;

/// Remove every pointer file under the configured mount root.
pub fn unmount(config: &Config) -> Result<()> {
    println!("{}", "[UNMOUNT] Removing strm files...".bold().cyan());

    let report = unmount_strm(&config.mount_path)?;

    println!(
        "{} removed {} files and {} folders from {}",
        "[OK]".green(),
        report.removed_files,
        report.removed_dirs,
        config.mount_path.display()
    );
    Ok(())
}
