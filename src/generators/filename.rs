//! Filename generator.

/// Suffix of every pointer file.
pub const STRM_SUFFIX: &str = ".strm";

/// Make sure `filename` ends with `extension`.
///
/// The comparison is case-insensitive, so `Movie.MKV` already satisfies `.mkv`.
/// Otherwise trailing dots and spaces are dropped before the extension is
/// appended. An empty extension leaves the name untouched.
pub fn ensure_extension(filename: &str, extension: &str) -> String {
    if extension.is_empty() {
        return filename.to_string();
    }
    if filename.to_lowercase().ends_with(&extension.to_lowercase()) {
        return filename.to_string();
    }
    let stripped = filename.trim_end_matches(['.', ' ']);
    format!("{}{}", stripped, extension)
}

/// Pointer file name for a resolved media file name: `<name>.strm`.
pub fn strm_file_name(file_name: &str) -> String {
    format!("{}{}", file_name, STRM_SUFFIX)
}

/// Whether a file name would escape its folder when joined onto a path.
pub fn has_path_separator(file_name: &str) -> bool {
    file_name.contains('/') || file_name.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_extension_appends() {
        assert_eq!(ensure_extension("Movie (2020)", ".mkv"), "Movie (2020).mkv");
    }

    #[test]
    fn test_ensure_extension_case_insensitive() {
        assert_eq!(ensure_extension("Movie (2020).MKV", ".mkv"), "Movie (2020).MKV");
    }

    #[test]
    fn test_ensure_extension_strips_trailing_dots() {
        assert_eq!(ensure_extension("Show - S01E02. ", ".mp4"), "Show - S01E02.mp4");
        assert_eq!(ensure_extension("Title...", ".mkv"), "Title.mkv");
    }

    #[test]
    fn test_ensure_extension_empty_extension() {
        assert_eq!(ensure_extension("Title. ", ""), "Title. ");
    }

    #[test]
    fn test_strm_file_name() {
        assert_eq!(strm_file_name("Movie (2020).mkv"), "Movie (2020).mkv.strm");
    }

    #[test]
    fn test_has_path_separator() {
        assert!(has_path_separator("a/b.mkv"));
        assert!(has_path_separator("a\\b.mkv"));
        assert!(!has_path_separator("AC-DC Live.mkv"));
    }
}
