//! Naming advisor using an LLM.
//!
//! Asks the completion backend for a cleaner file name and a media type for
//! each download, caching answers by the download's original `file_name`.
//! Every failure degrades to "no suggestion" so a batch never stops here.

use crate::generators::filename::ensure_extension;
use crate::models::config::OpenRouterConfig;
use crate::models::download::{display_value, Download, MediaKind};
use crate::services::openrouter::OpenRouterClient;
use crate::services::CompletionBackend;
use crate::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// A proposed file name and media type. Either may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamingSuggestion {
    pub filename: Option<String>,
    pub media_type: Option<MediaKind>,
}

impl NamingSuggestion {
    pub fn is_empty(&self) -> bool {
        self.filename.is_none() && self.media_type.is_none()
    }
}

/// Suggestions keyed by original file name.
///
/// Never evicted; lives as long as its owner.
#[derive(Debug, Default)]
pub struct NamingCache {
    entries: HashMap<String, NamingSuggestion>,
}

impl NamingCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&NamingSuggestion> {
        self.entries.get(file_name)
    }

    pub fn insert(&mut self, file_name: String, suggestion: NamingSuggestion) {
        self.entries.insert(file_name, suggestion);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Raw suggestion as the model returns it.
#[derive(Debug, Default, Deserialize)]
struct AiSuggestion {
    #[serde(default)]
    filename: Option<Value>,
    #[serde(default)]
    media_type: Option<Value>,
}

/// Naming advisor over a completion backend.
///
/// Without a backend the advisor is disabled and never suggests anything.
pub struct NamingAdvisor<B = OpenRouterClient> {
    backend: Option<B>,
}

impl NamingAdvisor<OpenRouterClient> {
    /// Build an advisor from configuration; disabled when no API key is set.
    pub fn from_config(config: &OpenRouterConfig) -> Result<Self> {
        if !config.is_enabled() {
            tracing::debug!("OpenRouter API key not set, AI naming disabled");
            return Ok(Self::disabled());
        }
        let client = OpenRouterClient::with_config(config.clone())?;
        Ok(Self::with_backend(client))
    }
}

impl<B> NamingAdvisor<B> {
    /// An advisor that never calls out.
    pub fn disabled() -> Self {
        Self { backend: None }
    }

    /// An advisor over the given backend.
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend: Some(backend),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.backend.is_some()
    }
}

impl<B: CompletionBackend> NamingAdvisor<B> {
    /// Suggest a better name and media type for a download.
    ///
    /// Returns `None` when disabled, when the download has no `file_name`, or
    /// when the backend call or reply parsing fails. Successful answers are
    /// cached even if they carry no usable field.
    pub async fn suggest(
        &self,
        download: &Download,
        cache: &mut NamingCache,
    ) -> Option<NamingSuggestion> {
        let backend = self.backend.as_ref()?;
        let cache_key = download.file_name()?;

        if let Some(cached) = cache.get(cache_key) {
            tracing::debug!("Naming cache hit for {}", cache_key);
            return Some(cached.clone());
        }

        let prompt = generate_prompt(download);
        let content = match backend.complete(&prompt).await {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("OpenRouter naming request failed for {}: {}", cache_key, e);
                return None;
            }
        };

        let raw = match parse_ai_response(&content) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Failed to parse OpenRouter response for {}: {}", cache_key, e);
                return None;
            }
        };

        let suggestion = build_suggestion(raw, download);
        cache.insert(cache_key.to_string(), suggestion.clone());
        tracing::debug!("OpenRouter naming suggestion {:?} for {}", suggestion, cache_key);
        Some(suggestion)
    }
}

/// Write a suggestion into a download. Returns whether anything changed.
pub fn apply_suggestion(download: &mut Download, suggestion: &NamingSuggestion) -> bool {
    let mut updated = false;
    if let Some(ref filename) = suggestion.filename {
        download.metadata_filename = Some(filename.clone());
        updated = true;
    }
    if let Some(media_type) = suggestion.media_type {
        download.metadata_mediatype = Some(media_type.to_string());
        updated = true;
    }
    if updated {
        tracing::debug!(
            "OpenRouter normalized download {} -> {} ({})",
            download.file_name().unwrap_or("unknown"),
            download.metadata_filename.as_deref().unwrap_or("unknown"),
            download.metadata_mediatype.as_deref().unwrap_or("unknown"),
        );
    }
    updated
}

/// Generate the naming prompt for a download.
pub fn generate_prompt(download: &Download) -> String {
    let text = |value: &Option<String>| {
        value
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or("unknown")
            .to_string()
    };

    let original_filename = text(&download.file_name);
    let metadata_filename = text(&download.metadata_filename);
    let metadata_title = text(&download.metadata_title);
    let root_folder = text(&download.metadata_rootfoldername);
    let media_type = text(&download.metadata_mediatype);
    let years = display_value(&download.metadata_years);
    let season = display_value(&download.metadata_season);
    let episode = display_value(&download.metadata_episode);
    let extension = download.extension().unwrap_or("");
    let folder_name = text(&download.metadata_foldername);

    format!(
        r#"You are a media librarian helping normalize downloads into the best possible file names for `.strm` mounts.
Original filename: {original_filename}
Current metadata filename: {metadata_filename}
Metadata title: {metadata_title}
Metadata root folder: {root_folder}
Metadata type: {media_type}
Metadata year(s): {years}
Season: {season}
Episode: {episode}
File extension: {extension}
Folder name: {folder_name}

Return only a single JSON object with the following keys:
  * `filename` - the desired `.strm` file name (include the original extension, e.g. `Title (Year).mkv`)
  * `media_type` - one of `movie` or `series`

If you are confident this is a TV show or anime, be sure the filename follows the `Title - SXXEXX.ext` format, otherwise use `Title (Year).ext`. Keep the extension the same as the one provided above.
If you cannot improve the name, return the same title and type you already had."#
    )
}

/// Extract a JSON object from a model reply.
///
/// Handles bare objects, objects fenced in triple backticks (with or without a
/// `json` tag) and objects surrounded by prose.
pub fn extract_json(content: &str) -> Result<&str> {
    let mut payload = content.trim();

    if let Some(fenced) = payload.strip_prefix("```") {
        payload = fenced.trim_start_matches('`');
        if let Some(end) = payload.rfind("```") {
            payload = &payload[..end];
        }
        payload = payload.trim_end_matches('`').trim();
        if let Some(rest) = payload.strip_prefix("json") {
            payload = rest.trim_start();
        }
    }

    if let (Some(start), Some(end)) = (payload.find('{'), payload.rfind('}')) {
        if start < end {
            payload = &payload[start..=end];
        }
    }

    if !payload.starts_with('{') {
        return Err(crate::Error::JsonNotFound);
    }
    Ok(payload)
}

fn parse_ai_response(content: &str) -> Result<AiSuggestion> {
    let payload = extract_json(content)?;
    Ok(serde_json::from_str(payload)?)
}

fn build_suggestion(raw: AiSuggestion, download: &Download) -> NamingSuggestion {
    let filename = raw
        .filename
        .as_ref()
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| ensure_extension(name, download.extension().unwrap_or("")));

    let media_type = raw
        .media_type
        .as_ref()
        .and_then(Value::as_str)
        .and_then(MediaKind::from_label)
        .or_else(|| download.media_type().and_then(MediaKind::from_label));

    NamingSuggestion {
        filename,
        media_type,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn download() -> Download {
        Download {
            file_name: Some("movie.2020.1080p.web.mkv".to_string()),
            metadata_mediatype: Some("movie".to_string()),
            extension: Some(".mkv".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_extract_json_bare() {
        let content = r#"{"filename": "A.mkv", "media_type": "movie"}"#;
        assert_eq!(extract_json(content).unwrap(), content);
    }

    #[test]
    fn test_extract_json_fenced() {
        let bare = r#"{"filename": "A.mkv", "media_type": "movie"}"#;
        let fenced = format!("```json\n{}\n```", bare);
        assert_eq!(extract_json(&fenced).unwrap(), bare);

        let plain = format!("```\n{}\n```", bare);
        assert_eq!(extract_json(&plain).unwrap(), bare);
    }

    #[test]
    fn test_extract_json_with_prose() {
        let content = r#"Sure! Here you go: {"filename": "A.mkv"} Let me know."#;
        assert_eq!(extract_json(content).unwrap(), r#"{"filename": "A.mkv"}"#);
    }

    #[test]
    fn test_extract_json_trailing_prose() {
        let content = "{\"filename\": \"A.mkv\"}\nHope this helps!";
        assert_eq!(extract_json(content).unwrap(), r#"{"filename": "A.mkv"}"#);

        let content = "Here you go:\n{\"filename\": \"A.mkv\"}";
        assert_eq!(extract_json(content).unwrap(), r#"{"filename": "A.mkv"}"#);
    }

    #[test]
    fn test_extract_json_missing() {
        assert!(matches!(
            extract_json("I cannot help with that."),
            Err(crate::Error::JsonNotFound)
        ));
        assert!(extract_json("} backwards {").is_err());
    }

    #[test]
    fn test_build_suggestion_appends_extension() {
        let raw: AiSuggestion =
            serde_json::from_str(r#"{"filename": "  Movie (2020)  ", "media_type": "Feature Movie"}"#)
                .unwrap();
        let suggestion = build_suggestion(raw, &download());
        assert_eq!(suggestion.filename.as_deref(), Some("Movie (2020).mkv"));
        assert_eq!(suggestion.media_type, Some(MediaKind::Movie));
    }

    #[test]
    fn test_build_suggestion_falls_back_to_record_type() {
        let raw: AiSuggestion =
            serde_json::from_str(r#"{"filename": null, "media_type": "documentary"}"#).unwrap();
        let mut d = download();
        d.metadata_mediatype = Some("anime".to_string());
        let suggestion = build_suggestion(raw, &d);
        assert!(suggestion.filename.is_none());
        assert_eq!(suggestion.media_type, Some(MediaKind::Series));
    }

    #[test]
    fn test_build_suggestion_ignores_non_string_fields() {
        let raw: AiSuggestion =
            serde_json::from_str(r#"{"filename": 42, "media_type": ["tv"]}"#).unwrap();
        let mut d = download();
        d.metadata_mediatype = None;
        let suggestion = build_suggestion(raw, &d);
        assert!(suggestion.is_empty());
    }

    #[test]
    fn test_generate_prompt_unknown_fields() {
        let prompt = generate_prompt(&download());
        assert!(prompt.contains("Original filename: movie.2020.1080p.web.mkv"));
        assert!(prompt.contains("Metadata title: unknown"));
        assert!(prompt.contains("Season: unknown"));
        assert!(prompt.contains("File extension: .mkv"));
    }

    #[test]
    fn test_apply_suggestion() {
        let mut d = download();
        let changed = apply_suggestion(
            &mut d,
            &NamingSuggestion {
                filename: Some("Movie (2020).mkv".to_string()),
                media_type: Some(MediaKind::Series),
            },
        );
        assert!(changed);
        assert_eq!(d.metadata_filename.as_deref(), Some("Movie (2020).mkv"));
        assert_eq!(d.metadata_mediatype.as_deref(), Some("series"));

        assert!(!apply_suggestion(&mut d, &NamingSuggestion::default()));
    }
}
