//! Save directory resolution.
//!
//! Saves live in the platform config directory for `bounty`. Setting
//! `BOUNTY_SAVE_DIR` moves them anywhere else (tests, portable installs).

use crate::core::constants::SAVE_DIR_ENV;
use directories::ProjectDirs;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Get the save directory, creating it if needed.
pub fn save_dir() -> io::Result<PathBuf> {
    let dir = resolve_save_dir(std::env::var_os(SAVE_DIR_ENV))?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

/// Picks the override when set and non-empty, else the platform config dir.
pub fn resolve_save_dir(override_dir: Option<OsString>) -> io::Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let project_dirs = ProjectDirs::from("", "", "bounty").ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::NotFound,
            "Could not determine config directory",
        )
    })?;
    Ok(project_dirs.config_dir().to_path_buf())
}

/// Get the full path for a file in the save directory.
pub fn save_path(filename: &str) -> io::Result<PathBuf> {
    Ok(save_dir()?.join(filename))
}
