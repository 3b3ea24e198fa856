//! Mount command implementation.
//!
//! Reads the download listing, optionally cleans names up with AI and writes
//! one .strm pointer file per download.

use crate::core::materializer::{run_strm, StrmWriter};
use crate::core::naming::{NamingAdvisor, NamingCache};
use crate::core::source::JsonFileSource;
use crate::models::config::Config;
use crate::models::report::{RunReport, StrmOutcome};
use crate::utils::fs;
use crate::Result;
use colored::Colorize;
use indicatif::ProgressBar;
use std::path::Path;

/// Materialize pointer files for every download in `downloads`.
pub async fn mount(
    config: &Config,
    downloads: &Path,
    no_ai: bool,
    report_path: Option<&Path>,
) -> Result<()> {
    println!("{}", "[MOUNT] Writing strm files...".bold().cyan());
    println!();

    let advisor = if no_ai {
        NamingAdvisor::disabled()
    } else {
        NamingAdvisor::from_config(&config.openrouter)?
    };

    println!("  {} {}", "Downloads:".bold(), downloads.display());
    println!("  {} {}", "Mount:".bold(), config.mount_path.display());
    println!(
        "  {} {}",
        "AI naming:".bold(),
        if advisor.is_enabled() {
            config.openrouter.model.as_str()
        } else {
            "disabled"
        }
    );
    println!();

    let source = JsonFileSource::new(downloads);
    let writer = StrmWriter::new(&config.mount_path);
    let mut cache = NamingCache::new();
    let pb = ProgressBar::new(0);

    let report = run_strm(&source, &advisor, &mut cache, &writer, &pb).await?;
    print_summary(&report);

    if let Some(path) = report_path {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write_file(path, &json)?;
        println!(
            "{} {}",
            "[OK] Report saved to:".bold().green(),
            path.display()
        );
    }

    Ok(())
}

fn print_summary(report: &RunReport) {
    for entry in &report.records {
        let name = entry.file_name.as_deref().unwrap_or("unknown");
        match &entry.outcome {
            StrmOutcome::Written { .. } => {}
            StrmOutcome::Skipped { reason } => {
                println!("  {} {} ({})", "[SKIP]".yellow(), name, reason);
            }
            StrmOutcome::Failed { message, .. } => {
                println!("  {} {}: {}", "[FAIL]".red(), name, message);
            }
        }
    }

    println!();
    println!("{}", "[Summary]".bold());
    println!("  {} {}", "Processed:".bold(), report.processed);
    println!("  {} {}", "Written:".bold(), report.written.to_string().green());
    println!("  {} {}", "Skipped:".bold(), report.skipped.to_string().yellow());
    println!("  {} {}", "Failed:".bold(), report.failed.to_string().red());
    println!("  {} {}", "Renamed by AI:".bold(), report.renamed);
}
