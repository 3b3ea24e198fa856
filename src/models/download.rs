//! Download catalog data models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Normalized media classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    Series,
}

impl MediaKind {
    /// Classify a free-form media type label by keyword.
    ///
    /// `"movie"` wins only when the label says nothing about series or shows;
    /// any of `series`, `show`, `tv` or `anime` maps to [`MediaKind::Series`].
    pub fn from_label(label: &str) -> Option<Self> {
        let candidate = label.trim().to_lowercase();
        if candidate.is_empty() {
            return None;
        }
        if candidate.contains("movie")
            && !candidate.contains("series")
            && !candidate.contains("show")
        {
            return Some(MediaKind::Movie);
        }
        if ["series", "show", "tv", "anime"]
            .iter()
            .any(|keyword| candidate.contains(keyword))
        {
            return Some(MediaKind::Series);
        }
        None
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "series",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level folder under the mount root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFolder {
    Movies,
    Series,
}

impl TypeFolder {
    /// All type folders, in teardown order.
    pub const ALL: [TypeFolder; 2] = [TypeFolder::Movies, TypeFolder::Series];

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeFolder::Movies => "movies",
            TypeFolder::Series => "series",
        }
    }
}

impl std::fmt::Display for TypeFolder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single download from the remote catalog.
///
/// Every field is optional since the catalog omits keys freely. Empty strings
/// are treated the same as missing values by the accessors below.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Download {
    /// Original file name; the naming cache key.
    pub file_name: Option<String>,
    /// Clean file name, preferred over `file_name` when writing.
    pub metadata_filename: Option<String>,
    pub metadata_title: Option<String>,
    /// Title folder, e.g. `Show (2020)`.
    pub metadata_rootfoldername: Option<String>,
    /// Season folder, e.g. `Season 01`.
    pub metadata_foldername: Option<String>,
    /// Raw media type label (`movie`, `series`, `anime`, ...).
    pub metadata_mediatype: Option<String>,
    pub metadata_years: Option<Value>,
    pub metadata_season: Option<Value>,
    pub metadata_episode: Option<Value>,
    /// Extension including the leading dot, e.g. `.mkv`.
    pub extension: Option<String>,
    /// Playback URL written into the pointer file.
    pub download_link: Option<String>,
}

impl Download {
    pub fn file_name(&self) -> Option<&str> {
        non_empty(&self.file_name)
    }

    pub fn root_folder(&self) -> Option<&str> {
        non_empty(&self.metadata_rootfoldername)
    }

    pub fn sub_folder(&self) -> Option<&str> {
        non_empty(&self.metadata_foldername)
    }

    pub fn media_type(&self) -> Option<&str> {
        non_empty(&self.metadata_mediatype)
    }

    pub fn extension(&self) -> Option<&str> {
        non_empty(&self.extension)
    }

    pub fn download_link(&self) -> Option<&str> {
        non_empty(&self.download_link)
    }

    /// File name used for the pointer file: `metadata_filename`, else `file_name`.
    pub fn resolved_file_name(&self) -> Option<&str> {
        non_empty(&self.metadata_filename).or_else(|| self.file_name())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Render a catalog value as prompt text, `"unknown"` when missing.
pub fn display_value(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => "unknown".to_string(),
        Some(Value::String(s)) if s.is_empty() => "unknown".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(", "),
        Some(other) => other.to_string(),
    }
}
