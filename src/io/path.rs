use std::path::{Path, PathBuf};

use crate::core::MediaError;

/// Validate a single category or filename segment.
///
/// Anything that could leave its parent directory, or that names a hidden
/// file, is [`MediaError::Forbidden`]. The message is safe to log but is not
/// meant for clients.
pub fn check_segment(segment: &str) -> Result<(), MediaError> {
    let reason = if segment.is_empty() {
        "empty path segment"
    } else if segment.starts_with('.') {
        // also covers "." and ".."
        "hidden or relative path segment"
    } else if segment.contains(['/', '\\', '\0']) {
        "path separator in segment"
    } else if Path::new(segment).is_absolute() {
        "absolute path segment"
    } else {
        return Ok(());
    };
    Err(MediaError::Forbidden(format!("{reason}: {segment:?}")))
}

/// Build `<root>/<category>/<filename>` after checking both segments.
pub fn resolve_media_path(
    root: &Path,
    category: &str,
    filename: &str,
) -> Result<PathBuf, MediaError> {
    check_segment(category)?;
    check_segment(filename)?;
    Ok(root.join(category).join(filename))
}

/// Canonicalize `path` and make sure it is still inside `root`, which catches
/// symlinks pointing out of the media tree.
pub async fn ensure_within_root(root: &Path, path: &Path) -> Result<PathBuf, MediaError> {
    let canonical_root = tokio::fs::canonicalize(root).await.map_err(|e| {
        MediaError::IoError(format!("resolving media root {}: {}", root.display(), e))
    })?;
    let canonical = tokio::fs::canonicalize(path).await.map_err(|e| match e.kind() {
        // a category that is a plain file is just a missing category
        std::io::ErrorKind::NotFound | std::io::ErrorKind::NotADirectory => {
            MediaError::NotFound(path.display().to_string())
        }
        _ => MediaError::IoError(format!("resolving {}: {}", path.display(), e)),
    })?;
    if !canonical.starts_with(&canonical_root) {
        return Err(MediaError::Forbidden(format!(
            "{} resolves outside the media root",
            path.display()
        )));
    }
    Ok(canonical)
}
