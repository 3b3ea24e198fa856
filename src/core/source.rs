//! Download catalog sources.

use crate::models::download::Download;
use crate::{Error, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::PathBuf;

/// Something that can list the user's downloads.
pub trait DownloadSource {
    /// Fetch all download records, in catalog order.
    fn fetch_downloads(&self) -> Result<Vec<Download>>;
}

/// Listing shapes accepted from JSON input.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Bare(Vec<Download>),
    Wrapped { data: Vec<Download> },
}

/// Reads downloads from a JSON file, or stdin when the path is `-`.
///
/// Accepts either a JSON array of records or an object with a `data` array.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_input(&self) -> Result<String> {
        if self.path.as_os_str() == "-" {
            let mut content = String::new();
            std::io::stdin().read_to_string(&mut content)?;
            return Ok(content);
        }
        if !self.path.exists() {
            return Err(Error::PathNotFound(self.path.display().to_string()));
        }
        Ok(std::fs::read_to_string(&self.path)?)
    }
}

impl DownloadSource for JsonFileSource {
    fn fetch_downloads(&self) -> Result<Vec<Download>> {
        let content = self.read_input()?;
        let downloads = parse_listing(&content)?;
        tracing::debug!(
            "Loaded {} downloads from {}",
            downloads.len(),
            self.path.display()
        );
        Ok(downloads)
    }
}

/// Parse a download listing from JSON text.
pub fn parse_listing(content: &str) -> Result<Vec<Download>> {
    match serde_json::from_str::<Listing>(content) {
        Ok(Listing::Bare(downloads)) | Ok(Listing::Wrapped { data: downloads }) => Ok(downloads),
        Err(e) => Err(Error::InvalidDownloads(e.to_string())),
    }
}

/// In-memory source, handy when downloads were fetched elsewhere.
impl DownloadSource for Vec<Download> {
    fn fetch_downloads(&self) -> Result<Vec<Download>> {
        Ok(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_bare_array() {
        let downloads = parse_listing(r#"[{"file_name": "a.mkv"}, {"file_name": "b.mkv"}]"#).unwrap();
        assert_eq!(downloads.len(), 2);
        assert_eq!(downloads[1].file_name(), Some("b.mkv"));
    }

    #[test]
    fn test_parse_wrapped() {
        let downloads =
            parse_listing(r#"{"success": true, "data": [{"file_name": "a.mkv"}]}"#).unwrap();
        assert_eq!(downloads.len(), 1);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            parse_listing(r#"{"files": []}"#),
            Err(Error::InvalidDownloads(_))
        ));
        assert!(parse_listing("not json").is_err());
    }

    #[test]
    fn test_json_file_source() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("downloads.json");
        std::fs::write(&path, r#"[{"file_name": "a.mkv", "download_link": "http://x"}]"#).unwrap();

        let downloads = JsonFileSource::new(&path).fetch_downloads().unwrap();
        assert_eq!(downloads[0].download_link(), Some("http://x"));
    }

    #[test]
    fn test_json_file_source_missing() {
        let result = JsonFileSource::new("/nonexistent/downloads.json").fetch_downloads();
        assert!(matches!(result, Err(Error::PathNotFound(_))));
    }
}
