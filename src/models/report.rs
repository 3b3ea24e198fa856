//! Per-record outcomes and run reports.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Why a record was skipped without touching the filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Neither root folder nor sub folder metadata.
    NoFolderPath,
    /// Neither `metadata_filename` nor `file_name`.
    MissingFileName,
    /// No playback URL to write.
    MissingLink,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::NoFolderPath => write!(f, "no folder path"),
            SkipReason::MissingFileName => write!(f, "missing file name"),
            SkipReason::MissingLink => write!(f, "missing download link"),
        }
    }
}

/// Classification of a failed write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    PermissionDenied,
    InvalidName,
    Other,
}

impl FailureKind {
    /// Classify an IO error for reporting.
    pub fn from_io(err: &std::io::Error) -> Self {
        use std::io::ErrorKind;
        match err.kind() {
            ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
                FailureKind::PermissionDenied
            }
            ErrorKind::NotFound | ErrorKind::InvalidInput | ErrorKind::InvalidFilename => {
                FailureKind::InvalidName
            }
            _ => FailureKind::Other,
        }
    }
}

/// Result of materializing one download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StrmOutcome {
    Written { path: PathBuf },
    Skipped { reason: SkipReason },
    Failed { kind: FailureKind, message: String },
}

/// Outcome entry for one record in a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordEntry {
    /// Original catalog file name.
    pub file_name: Option<String>,
    /// Whether the naming advisor changed the record.
    pub renamed: bool,
    pub outcome: StrmOutcome,
}

/// Summary of a `run_strm` batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: String,
    pub finished_at: String,
    pub processed: usize,
    pub written: usize,
    pub skipped: usize,
    pub failed: usize,
    pub renamed: usize,
    pub records: Vec<RecordEntry>,
}

impl RunReport {
    pub(crate) fn new(started_at: String) -> Self {
        Self {
            started_at,
            finished_at: String::new(),
            processed: 0,
            written: 0,
            skipped: 0,
            failed: 0,
            renamed: 0,
            records: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, entry: RecordEntry) {
        self.processed += 1;
        if entry.renamed {
            self.renamed += 1;
        }
        match entry.outcome {
            StrmOutcome::Written { .. } => self.written += 1,
            StrmOutcome::Skipped { .. } => self.skipped += 1,
            StrmOutcome::Failed { .. } => self.failed += 1,
        }
        self.records.push(entry);
    }
}

/// Summary of an unmount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    pub removed_files: usize,
    pub removed_dirs: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_failure_kind_from_io() {
        let err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert_eq!(FailureKind::from_io(&err), FailureKind::PermissionDenied);

        let err = io::Error::new(io::ErrorKind::NotFound, "missing");
        assert_eq!(FailureKind::from_io(&err), FailureKind::InvalidName);

        let err = io::Error::new(io::ErrorKind::Other, "boom");
        assert_eq!(FailureKind::from_io(&err), FailureKind::Other);
    }

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new("2024-01-01T00:00:00Z".to_string());
        report.record(RecordEntry {
            file_name: Some("a.mkv".to_string()),
            renamed: true,
            outcome: StrmOutcome::Written {
                path: PathBuf::from("/mnt/movies/A/a.mkv.strm"),
            },
        });
        report.record(RecordEntry {
            file_name: None,
            renamed: false,
            outcome: StrmOutcome::Skipped {
                reason: SkipReason::NoFolderPath,
            },
        });

        assert_eq!(report.processed, 2);
        assert_eq!(report.written, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.failed, 0);
        assert_eq!(report.renamed, 1);
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let outcome = StrmOutcome::Skipped {
            reason: SkipReason::MissingLink,
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(json, r#"{"status":"skipped","reason":"missing_link"}"#);
    }
}
