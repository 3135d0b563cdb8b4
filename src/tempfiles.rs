use anyhow::{anyhow, Context};
use std::path::PathBuf;
use tempfile::Builder;

use crate::config::Config;

/// Allocate a fresh, uniquely-named temp file path in the configured
/// tmp directory, and persist it immediately so its path survives past
/// the `NamedTempFile` handle - the caller owns the path from here on
/// and is responsible for eventually removing it (directly, or via the
/// run [`crate::registry::Registry`]).
pub(crate) fn allocate(config: &Config) -> Result<PathBuf, anyhow::Error> {
    let tmp_file = Builder::new()
        .prefix(config.tmp_prefix())
        .suffix(config.tmp_suffix())
        .tempfile_in(config.tmp())
        .with_context(|| format!("create temp file in {}", config.tmp().display()))?;
    let (_file, path) = tmp_file
        .keep()
        .map_err(|e| anyhow!("failed to persist temp file: {}", e))?;
    Ok(path)
}
