//! Folder path generator.

use crate::models::download::{Download, TypeFolder};
use std::path::{Component, Path, PathBuf};

/// Whether a raw media type label is laid out as a show (title/season folders).
fn is_episodic(media_type: Option<&str>) -> bool {
    matches!(
        media_type.map(str::to_lowercase).as_deref(),
        Some("series") | Some("anime")
    )
}

/// Generate the folder path of a download, relative to its type folder.
///
/// Layout:
/// - series / anime: `Show (Year)/Season XX`
/// - movie / anything else: `Movie (Year)`
///
/// Returns `None` when the download has neither a root folder nor a sub folder.
pub fn generate_folder_path(download: &Download) -> Option<PathBuf> {
    let root = download.root_folder();
    let sub = download.sub_folder();

    if root.is_none() && sub.is_none() {
        return None;
    }

    if is_episodic(download.media_type()) {
        let mut path = PathBuf::new();
        path.extend(root);
        path.extend(sub);
        Some(path)
    } else {
        // Movies only use the title folder; fall back to the sub folder when
        // the catalog left the root empty.
        root.or(sub).map(PathBuf::from)
    }
}

/// Top-level folder for a raw media type label.
///
/// `series` and `anime` go to `series`; `movie`, unknown and missing labels go
/// to `movies`.
pub fn type_folder(media_type: Option<&str>) -> TypeFolder {
    if is_episodic(media_type) {
        TypeFolder::Series
    } else {
        TypeFolder::Movies
    }
}

/// Whether a folder path stays below the folder it is joined onto.
pub fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty()
        && path
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
