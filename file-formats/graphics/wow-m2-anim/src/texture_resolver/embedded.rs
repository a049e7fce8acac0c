//! Lookup of textures referenced by an embedded relative path
//!
//! Asset trees are often moved relative to the paths stored in the model.
//! The file is looked for next to the model first, by file name only, then
//! under every ancestor directory by its full relative path.

use std::fs;
use std::path::{Path, PathBuf};

/// Normalize an embedded path to `/` separators without a leading separator
pub fn normalize_embedded_path(path: &str) -> String {
    path.replace('\\', "/").trim_start_matches('/').to_string()
}

/// Entry of `dir` whose name matches `file_name` ignoring case
fn find_in_directory(dir: &Path, file_name: &str) -> Option<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            log::warn!("Cannot list texture directory {}: {}", dir.display(), e);
            return None;
        }
    };

    let wanted = file_name.to_lowercase();
    entries
        .filter_map(|entry| entry.ok())
        .find(|entry| entry.file_name().to_string_lossy().to_lowercase() == wanted)
        .map(|entry| entry.path())
}

/// Resolve an embedded texture path against the model's directory.
///
/// Returns `None` when the file exists neither in `dir` nor under any of its
/// ancestors.
pub fn resolve_embedded_path<P: AsRef<Path>>(dir: P, embedded: &str) -> Option<PathBuf> {
    let dir = dir.as_ref();
    let normalized = normalize_embedded_path(embedded);
    let file_name = normalized.rsplit('/').next().filter(|name| !name.is_empty())?;

    if let Some(found) = find_in_directory(dir, file_name) {
        log::debug!("Texture {} found next to the model: {}", embedded, found.display());
        return Some(found);
    }

    let found = dir
        .ancestors()
        .skip(1)
        .map(|ancestor| ancestor.join(&normalized))
        .find(|candidate| candidate.exists());
    match &found {
        Some(path) => log::debug!("Texture {} found at {}", embedded, path.display()),
        None => log::trace!("Texture {} not found from {}", embedded, dir.display()),
    }
    found
}
