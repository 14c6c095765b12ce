use anyhow::{Context, Result};
use std::{
    env, fs,
    path::{Path, PathBuf},
};

/// Directory holding the running executable, with symlinks resolved.
pub fn startup_dir() -> Result<PathBuf> {
    let exe = env::current_exe().context("Cannot locate the running executable")?;
    containing_dir(&exe)
}

/// Resolves `path` through any symlinks and returns its parent directory.
/// A path without a parent component resolves to the working directory.
pub fn containing_dir(path: &Path) -> Result<PathBuf> {
    let real = fs::canonicalize(path)
        .with_context(|| format!("Cannot resolve path {}", path.display()))?;
    match real.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.to_path_buf()),
        _ => env::current_dir().context("Cannot read the working directory"),
    }
}
