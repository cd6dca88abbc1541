//! Description loaders.

mod level;

pub use level::LevelLoader;

use std::path::Path;

/// Result alias shared by the loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Reads a description file into memory with path context on failure.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
}
