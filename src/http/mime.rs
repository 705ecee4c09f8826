//! MIME type detection based on file extensions.

use std::collections::HashMap;

/// Type used when an extension is missing or unknown.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

const STANDARD_TYPES: &[(&str, &str)] = &[
    ("html", "text/html"),
    ("htm", "text/html"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("png", "image/png"),
    ("css", "text/css"),
    ("js", "application/javascript"),
    ("json", "application/json"),
    ("txt", "text/plain"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
];

/// Read-only mapping from lowercase extension (without the dot) to MIME type.
///
/// Built once at startup and shared between connections.
#[derive(Debug, Clone)]
pub struct ContentTypeTable {
    types: HashMap<&'static str, &'static str>,
}

impl ContentTypeTable {
    /// Table with the extensions the server knows out of the box.
    pub fn standard() -> Self {
        Self {
            types: STANDARD_TYPES.iter().copied().collect(),
        }
    }

    /// Looks up the MIME type for `extension`, ignoring ASCII case.
    ///
    /// # Example
    ///
    /// ```
    /// # use docserve::http::mime::ContentTypeTable;
    /// let table = ContentTypeTable::standard();
    /// assert_eq!(table.lookup("JPG"), "image/jpeg");
    /// assert_eq!(table.lookup("zip"), "application/octet-stream");
    /// ```
    pub fn lookup(&self, extension: &str) -> &'static str {
        self.types
            .get(extension.to_ascii_lowercase().as_str())
            .copied()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
    }

    /// Resolves the MIME type of a file name via its extension.
    pub fn for_file_name(&self, file_name: &str) -> &'static str {
        self.lookup(file_extension(file_name))
    }

    /// Extensions in the table, sorted.
    pub fn extensions(&self) -> Vec<&'static str> {
        let mut exts: Vec<_> = self.types.keys().copied().collect();
        exts.sort_unstable();
        exts
    }
}

/// Returns the text after the last `.` of `file_name`.
///
/// A dot in first or last position does not start an extension, so hidden
/// files like `.profile` and names like `archive.` have none.
///
/// # Example
///
/// ```
/// # use docserve::http::mime::file_extension;
/// assert_eq!(file_extension("a.b.TXT"), "TXT");
/// assert_eq!(file_extension("noext"), "");
/// assert_eq!(file_extension(".hidden"), "");
/// ```
pub fn file_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) if idx > 0 && idx < file_name.len() - 1 => &file_name[idx + 1..],
        _ => "",
    }
}

/// Whether `content_type` is textual content.
pub fn is_textual(content_type: &str) -> bool {
    content_type.starts_with("text/")
        || content_type == "application/javascript"
        || content_type == "application/json"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_uses_last_dot() {
        assert_eq!(file_extension("dir/archive.tar.gz"), "gz");
        assert_eq!(file_extension("trailing."), "");
    }

    #[test]
    fn textual_classification() {
        assert!(is_textual("text/css"));
        assert!(is_textual("application/json"));
        assert!(!is_textual("image/png"));
        assert!(!is_textual(FALLBACK_CONTENT_TYPE));
    }
}
