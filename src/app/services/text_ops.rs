use std::path::Path;

/// Extract filename from a file path
///
/// Returns the filename component of a path, or "Unknown" if it can't be extracted.
pub fn extract_filename(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .filter(|s| !s.is_empty() && *s != ".")
        .map(|s| s.to_string())
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Lowercased text after the last `.` of a file name, if any.
pub fn file_extension(name: &str) -> Option<String> {
    let (_, ext) = name.rsplit_once('.')?;
    if ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// MIME type used when exporting a document with this file name.
pub fn mime_type_for(name: &str) -> &'static str {
    match file_extension(name).as_deref() {
        Some("js") => "application/javascript",
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("php") => "application/x-httpd-php",
        Some("sql") => "application/sql",
        _ => "text/plain",
    }
}

/// Find next occurrence of search string in text (case-sensitive)
///
/// Returns the byte position of the match, or None if not found.
/// Searches from start_pos onwards; start_pos must lie on a char boundary.
pub fn find_in_text(text: &str, search: &str, start_pos: usize) -> Option<usize> {
    if search.is_empty() || start_pos > text.len() {
        return None;
    }
    text.get(start_pos..)?.find(search).map(|pos| start_pos + pos)
}

/// Round a byte offset down to the nearest char boundary within `text`.
pub fn floor_char_boundary(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

/// Decode file bytes as UTF-8, replacing invalid sequences with U+FFFD.
pub fn decode_lossy(bytes: Vec<u8>) -> String {
    String::from_utf8(bytes)
        .unwrap_or_else(|e| String::from_utf8_lossy(e.as_bytes()).into_owned())
}
