//! Platform-independent path handling.
//!
//! Every path that leaves this crate uses `/` separators, carries no trailing
//! slash and has `.`/`..` segments folded away, so two configurations produced
//! on different operating systems compare equal byte for byte.

use path_clean::PathClean;
use std::path::Path;

/// Convert separators to `/` and fold `.`/`..` segments.
///
/// ```
/// use lode_config::normalize_path;
///
/// assert_eq!(normalize_path("C:\\app\\src\\..\\dist\\"), "C:/app/dist");
/// assert_eq!(normalize_path("/app/./dist/"), "/app/dist");
/// ```
pub fn normalize_path(path: &str) -> String {
    let forward = path.replace('\\', "/");
    if forward.is_empty() {
        return ".".to_string();
    }

    let cleaned = Path::new(&forward).to_path_buf().clean();
    let cleaned = cleaned.to_string_lossy().replace('\\', "/");

    if cleaned.len() > 1 && cleaned.ends_with('/') && !is_drive_root(&cleaned) {
        cleaned.trim_end_matches('/').to_string()
    } else {
        cleaned
    }
}

/// Whether `path` is absolute under either POSIX or Windows conventions.
pub fn is_absolute(path: &str) -> bool {
    let path = path.replace('\\', "/");
    if path.starts_with('/') {
        return true;
    }
    let bytes = path.as_bytes();
    bytes.len() >= 3 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' && bytes[2] == b'/'
}

/// Resolve `path` against `base` the way a build tool resolves user paths:
/// absolute paths win, relative paths are appended to `base`.
///
/// ```
/// use lode_config::resolve_path;
///
/// assert_eq!(resolve_path("/app", "my-dist/"), "/app/my-dist");
/// assert_eq!(resolve_path("/app", "/srv/out"), "/srv/out");
/// assert_eq!(resolve_path("/app", "../shared"), "/shared");
/// ```
pub fn resolve_path(base: &str, path: &str) -> String {
    if is_absolute(path) {
        return normalize_path(path);
    }
    normalize_path(&join_segments(base, path))
}

/// Append `segment` below `base` even when `segment` looks absolute
/// (public base paths such as `/app/` are nested, not substituted).
pub fn join_path(base: &str, segment: &str) -> String {
    let segment = segment.replace('\\', "/");
    normalize_path(&join_segments(base, segment.trim_start_matches('/')))
}

fn join_segments(base: &str, path: &str) -> String {
    let base = base.replace('\\', "/");
    if path.is_empty() {
        return base;
    }
    format!("{}/{}", base.trim_end_matches('/'), path)
}

fn is_drive_root(path: &str) -> bool {
    path.len() == 3 && path.as_bytes()[1] == b':'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_trailing_slash() {
        assert_eq!(normalize_path("/project/dist/"), "/project/dist");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn normalize_converts_backslashes() {
        assert_eq!(normalize_path("src\\entry.ssr"), "src/entry.ssr");
    }

    #[test]
    fn windows_drive_paths_are_absolute() {
        assert!(is_absolute("C:\\project"));
        assert!(is_absolute("d:/project"));
        assert!(!is_absolute("project/dist"));
        assert!(!is_absolute("c:"));
    }

    #[test]
    fn resolve_relative_against_base() {
        assert_eq!(resolve_path("/project", "./src/index.ts"), "/project/src/index.ts");
        assert_eq!(resolve_path("/project/", "dist/"), "/project/dist");
    }

    #[test]
    fn join_nests_absolute_segment() {
        assert_eq!(join_path("/project/dist", "/app/"), "/project/dist/app");
        assert_eq!(join_path("/project/dist", "/"), "/project/dist");
    }
}
