//! Include reference resolution.
//!
//! References starting with `./` are relative to the directory of the
//! document being rendered; anything else is used as written and therefore
//! relative to the process working directory. Paths are handled lexically as
//! `/`-separated strings, the way they appear inside documents.

use crate::constants::RELATIVE_MARKER;

/// Resolves `reference` against the document currently being rendered.
///
/// Returns an empty string when the reference collapses to the current
/// directory, which callers treat as "include nothing".
///
/// # Examples
///
/// ```
/// use boilerplate::templating::path::resolve;
///
/// assert_eq!(resolve("site/index.html.t", "./header.html"), "site/header.html");
/// assert_eq!(resolve("site/index.html.t", "../common/footer.html"), "common/footer.html");
/// assert_eq!(resolve("site/index.html.t", "shared/nav.html"), "shared/nav.html");
/// ```
pub fn resolve(current_document: &str, reference: &str) -> String {
    if reference.is_empty() {
        return String::new();
    }

    let resolved = if reference.starts_with(RELATIVE_MARKER) {
        clean(&format!("{}{}", dir_of(current_document), reference))
    } else {
        reference.to_string()
    };

    if resolved == "." { String::new() } else { resolved }
}

/// Directory part of `document` with a trailing `/`.
///
/// A document without any directory component lives in `./`.
pub fn dir_of(document: &str) -> String {
    let dir = match document.rfind('/') {
        Some(0) => "/".to_string(),
        Some(idx) => clean(&document[..idx]),
        None => ".".to_string(),
    };
    if dir.ends_with('/') { dir } else { format!("{dir}/") }
}

/// Last element of a `/`-separated path, ignoring trailing separators.
pub fn base_name(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return if path.is_empty() { ".".to_string() } else { "/".to_string() };
    }
    match trimmed.rfind('/') {
        Some(idx) => trimmed[idx + 1..].to_string(),
        None => trimmed.to_string(),
    }
}

/// Strips the final extension (`.t`, `.html`, ...) from a path.
///
/// Only the last path element is inspected, so dots in directory names are
/// left alone.
pub fn strip_extension(path: &str) -> &str {
    let start = path.rfind('/').map_or(0, |idx| idx + 1);
    match path[start..].rfind('.') {
        Some(dot) => &path[..start + dot],
        None => path,
    }
}

/// Lexically normalizes a `/`-separated path.
///
/// Collapses duplicate separators, drops `.` elements and resolves `..`
/// against preceding elements. Leading `..` elements of a relative path are
/// kept; `..` directly under the root is dropped. An empty result becomes `.`.
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return ".".to_string();
    }

    let rooted = path.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if rooted => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let joined = parts.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}
