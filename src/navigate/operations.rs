//! Path resolution implementation
//!
//! Pure string arithmetic over `/`-separated absolute paths. The namespace
//! is keyed by these strings, so every operation resolves user input here
//! before touching the store.

/// Resolves user input against the current working path.
///
/// Absolute input is returned unchanged; relative input is joined onto
/// `current` and normalized. Resolution never fails: the result is a
/// syntactically valid absolute path that may or may not have an entry,
/// and existence is the caller's next check.
pub fn resolve_path(current: &str, input: &str) -> String {
    if input.starts_with('/') {
        return input.to_string();
    }
    normalize(&format!("{}/{}", current, input))
}

/// Collapses `.`, `..` and redundant separators into a canonical absolute
/// path. `..` above the root stays at the root.
pub fn normalize(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s => segments.push(s),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", segments.join("/"))
    }
}

/// Returns the parent of an absolute path, or `None` at the root.
pub fn parent_of(path: &str) -> Option<String> {
    if path == "/" {
        return None;
    }
    match path.rfind('/') {
        Some(0) => Some("/".to_string()),
        Some(idx) => Some(path[..idx].to_string()),
        None => None,
    }
}

/// Returns every ancestor of `path` up to but excluding the root,
/// deepest first. The path itself is not included.
pub fn ancestors(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = parent_of(path);
    while let Some(p) = current {
        if p == "/" {
            break;
        }
        current = parent_of(&p);
        out.push(p);
    }
    out
}
