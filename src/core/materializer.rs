//! Pointer file materializer.
//!
//! Writes one `.strm` file per download under the mount root:
//! `<mount>/<movies|series>/<root folder>[/<sub folder>]/<file name>.strm`
//! and clears that tree again on unmount.

use crate::core::naming::{apply_suggestion, NamingAdvisor, NamingCache};
use crate::core::source::DownloadSource;
use crate::generators::filename::{has_path_separator, strm_file_name};
use crate::generators::folder::{generate_folder_path, is_contained, type_folder};
use crate::models::download::{Download, TypeFolder};
use crate::models::report::{
    FailureKind, RecordEntry, RunReport, SkipReason, StrmOutcome, TeardownReport,
};
use crate::services::CompletionBackend;
use crate::utils::fs;
use crate::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

/// Writes and removes pointer files under a mount root.
#[derive(Debug, Clone)]
pub struct StrmWriter {
    mount_path: PathBuf,
}

impl StrmWriter {
    pub fn new(mount_path: impl Into<PathBuf>) -> Self {
        Self {
            mount_path: mount_path.into(),
        }
    }

    /// Directory of a type folder under the mount root.
    pub fn type_dir(&self, folder: TypeFolder) -> PathBuf {
        self.mount_path.join(folder.as_str())
    }

    /// Write the pointer file for a download at `folder_path`.
    ///
    /// Never fails: problems are logged and reported in the outcome so the
    /// caller can move on to the next record.
    pub fn write_strm_file(&self, folder_path: Option<&Path>, download: &Download) -> StrmOutcome {
        let Some(folder_path) = folder_path.filter(|p| !p.as_os_str().is_empty()) else {
            return skipped(SkipReason::NoFolderPath, download);
        };
        let Some(file_name) = download.resolved_file_name() else {
            return skipped(SkipReason::MissingFileName, download);
        };
        let Some(link) = download.download_link() else {
            return skipped(SkipReason::MissingLink, download);
        };

        if has_path_separator(file_name) || !is_contained(folder_path) {
            let message = format!(
                "{} / {} escapes the mount folder",
                folder_path.display(),
                file_name
            );
            tracing::error!(
                "Error creating strm file (likely bad naming scheme of file): {}",
                message
            );
            return StrmOutcome::Failed {
                kind: FailureKind::InvalidName,
                message,
            };
        }

        let full_path = self
            .type_dir(type_folder(download.media_type()))
            .join(folder_path)
            .join(strm_file_name(file_name));

        match fs::write_file(&full_path, link) {
            Ok(()) => {
                tracing::debug!("Created strm file: {}", full_path.display());
                StrmOutcome::Written { path: full_path }
            }
            Err(e) => {
                let kind = FailureKind::from_io(&e);
                match kind {
                    FailureKind::PermissionDenied => tracing::error!(
                        "Error creating strm file (likely bad or missing permissions): {}: {}",
                        full_path.display(),
                        e
                    ),
                    FailureKind::InvalidName => tracing::error!(
                        "Error creating strm file (likely bad naming scheme of file): {}: {}",
                        full_path.display(),
                        e
                    ),
                    FailureKind::Other => tracing::error!(
                        "Error creating strm file: {}: {}",
                        full_path.display(),
                        e
                    ),
                }
                StrmOutcome::Failed {
                    kind,
                    message: e.to_string(),
                }
            }
        }
    }

    /// Delete everything previously written under the mount root.
    ///
    /// The mount root, `movies` and `series` directories themselves stay in
    /// place; only their contents go.
    pub fn unmount(&self) -> Result<TeardownReport> {
        let mut report = TeardownReport::default();
        let type_names: Vec<&str> = TypeFolder::ALL.iter().map(TypeFolder::as_str).collect();

        // Clearing the root must not take the type folders with it.
        let mut folders: Vec<(PathBuf, &[&str])> =
            vec![(self.mount_path.clone(), type_names.as_slice())];
        folders.extend(
            TypeFolder::ALL
                .iter()
                .map(|folder| (self.type_dir(*folder), &[] as &[&str])),
        );

        for (folder, keep) in folders {
            if !folder.is_dir() {
                continue;
            }
            tracing::debug!("Folder {} already exists. Deleting...", folder.display());
            let cleared = fs::clear_directory(&folder, keep)?;
            report.removed_files += cleared.removed_files;
            report.removed_dirs += cleared.removed_dirs;
        }

        Ok(report)
    }
}

fn skipped(reason: SkipReason, download: &Download) -> StrmOutcome {
    tracing::debug!(
        "Skipping download {}: {}",
        download.file_name().unwrap_or("unknown"),
        reason
    );
    StrmOutcome::Skipped { reason }
}

/// Fetch all downloads and materialize a pointer file for each.
///
/// Records go through the naming advisor first, which may rewrite
/// `metadata_filename` and `metadata_mediatype` in place. Per-record failures
/// are reported, never propagated; only a failing fetch aborts the run.
pub async fn run_strm<S, B>(
    source: &S,
    advisor: &NamingAdvisor<B>,
    cache: &mut NamingCache,
    writer: &StrmWriter,
    pb: &ProgressBar,
) -> Result<RunReport>
where
    S: DownloadSource + ?Sized,
    B: CompletionBackend,
{
    let mut report = RunReport::new(Utc::now().to_rfc3339());
    let downloads = source.fetch_downloads()?;

    pb.set_length(downloads.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-"),
    );

    for mut download in downloads {
        pb.set_message(download.file_name().unwrap_or("unknown").to_string());

        let renamed = match advisor.suggest(&download, cache).await {
            Some(suggestion) => apply_suggestion(&mut download, &suggestion),
            None => false,
        };

        let folder_path = generate_folder_path(&download);
        let outcome = writer.write_strm_file(folder_path.as_deref(), &download);

        report.record(RecordEntry {
            file_name: download.file_name.take(),
            renamed,
            outcome,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    report.finished_at = Utc::now().to_rfc3339();
    tracing::info!("Updated {} strm files.", report.processed);
    tracing::debug!(
        "Written {}, skipped {}, failed {}, renamed {}",
        report.written,
        report.skipped,
        report.failed,
        report.renamed
    );
    Ok(report)
}

/// Clear every pointer file under `mount_path`.
pub fn unmount_strm(mount_path: &Path) -> Result<TeardownReport> {
    let report = StrmWriter::new(mount_path).unmount()?;
    tracing::info!(
        "Removed {} files and {} folders from {}",
        report.removed_files,
        report.removed_dirs,
        mount_path.display()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn movie() -> Download {
        Download {
            file_name: Some("movie.2020.mkv".to_string()),
            metadata_filename: Some("Movie (2020).mkv".to_string()),
            metadata_rootfoldername: Some("Movie (2020)".to_string()),
            metadata_mediatype: Some("movie".to_string()),
            download_link: Some("https://cdn.example/movie".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_write_movie() {
        let temp = TempDir::new().unwrap();
        let writer = StrmWriter::new(temp.path());

        let outcome = writer.write_strm_file(Some(Path::new("Movie (2020)")), &movie());

        let expected = temp
            .path()
            .join("movies")
            .join("Movie (2020)")
            .join("Movie (2020).mkv.strm");
        assert_eq!(outcome, StrmOutcome::Written { path: expected.clone() });
        assert_eq!(
            std::fs::read_to_string(expected).unwrap(),
            "https://cdn.example/movie"
        );
    }

    #[test]
    fn test_skip_reasons() {
        let temp = TempDir::new().unwrap();
        let writer = StrmWriter::new(temp.path());

        assert_eq!(
            writer.write_strm_file(None, &movie()),
            StrmOutcome::Skipped { reason: SkipReason::NoFolderPath }
        );

        let mut nameless = movie();
        nameless.file_name = None;
        nameless.metadata_filename = None;
        assert_eq!(
            writer.write_strm_file(Some(Path::new("Movie (2020)")), &nameless),
            StrmOutcome::Skipped { reason: SkipReason::MissingFileName }
        );

        let mut linkless = movie();
        linkless.download_link = Some(String::new());
        assert_eq!(
            writer.write_strm_file(Some(Path::new("Movie (2020)")), &linkless),
            StrmOutcome::Skipped { reason: SkipReason::MissingLink }
        );

        assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_rejects_escaping_names() {
        let temp = TempDir::new().unwrap();
        let writer = StrmWriter::new(temp.path().join("mount"));

        let mut sneaky = movie();
        sneaky.metadata_filename = Some("../../etc/passwd".to_string());
        let outcome = writer.write_strm_file(Some(Path::new("Movie (2020)")), &sneaky);
        assert!(matches!(
            outcome,
            StrmOutcome::Failed { kind: FailureKind::InvalidName, .. }
        ));

        let outcome = writer.write_strm_file(Some(Path::new("/tmp")), &movie());
        assert!(matches!(
            outcome,
            StrmOutcome::Failed { kind: FailureKind::InvalidName, .. }
        ));
    }

    #[test]
    fn test_unmount_missing_mount() {
        let temp = TempDir::new().unwrap();
        let report = unmount_strm(&temp.path().join("never-mounted")).unwrap();
        assert_eq!(report, TeardownReport::default());
    }
}
