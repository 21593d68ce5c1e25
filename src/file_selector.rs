use crate::errors::Result;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Expands `folder` joined with `filter` into the list of matching paths.
///
/// Standard glob syntax applies to `filter` (`*`, `?`, `[...]`). An empty
/// result is not an error. Malformed syntax is. Entries that match but
/// cannot be inspected are skipped with a warning.
///
/// `filter` always stays under `folder`, even when it starts with a
/// separator. Paths are returned in the order the glob walk yields them;
/// no extra sorting is applied here.
pub fn select_files(folder: &str, filter: &str) -> Result<Vec<PathBuf>> {
    let Some(pattern) = join_pattern(folder, filter) else {
        return Ok(Vec::new());
    };
    debug!(%pattern, "expanding file pattern");

    let mut files = Vec::new();
    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) => files.push(path),
            Err(e) => warn!(path = %e.path().display(), "skipping unreadable entry: {}", e.error()),
        }
    }

    debug!(count = files.len(), "files selected");
    Ok(files)
}

/// Joins the non-empty parts with `/` and cleans the result lexically.
///
/// `.` segments and repeated separators are dropped, and `..` removes the
/// preceding segment by text alone. A rooted result stays rooted and `..`
/// at the root is discarded. Returns `None` when both parts are empty.
fn join_pattern(folder: &str, filter: &str) -> Option<String> {
    let parts: Vec<&str> = [folder, filter].into_iter().filter(|p| !p.is_empty()).collect();
    if parts.is_empty() {
        return None;
    }
    let joined = parts.join("/");
    let rooted = joined.starts_with('/');

    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|last| *last != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let cleaned = segments.join("/");
    Some(match (rooted, cleaned.is_empty()) {
        (true, _) => format!("/{cleaned}"),
        (false, true) => ".".to_string(),
        (false, false) => cleaned,
    })
}
