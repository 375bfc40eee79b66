//! Default path helpers and symlink checks.
//! Determines OS-appropriate config/log paths and detects symlinked ancestors for safety.

use anyhow::{Result, anyhow};
use dirs::{config_dir, data_dir};
use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "REPLMV_CONFIG";

/// Config file path: `$REPLMV_CONFIG` (relative values resolve against the
/// current directory), else `<config_dir>/replmv/config.xml`.
pub fn default_config_path() -> Result<PathBuf> {
    if let Some(p) = env::var_os(CONFIG_ENV) {
        let p = PathBuf::from(p);
        if p.is_relative() {
            return Ok(env::current_dir()?.join(p));
        }
        return Ok(p);
    }
    if let Some(base) = config_dir() {
        return Ok(base.join("replmv").join("config.xml"));
    }
    env::var_os("HOME")
        .map(|h| PathBuf::from(h).join(".config").join("replmv").join("config.xml"))
        .ok_or_else(|| anyhow!("cannot determine a config directory (no config dir and HOME unset)"))
}

/// Log file path: next to an explicit `$REPLMV_CONFIG`, else
/// `<data_dir>/replmv/replmv.log`.
pub fn default_log_path() -> Result<PathBuf> {
    if env::var_os(CONFIG_ENV).is_some() {
        let cfg = default_config_path()?;
        let parent = cfg.parent().unwrap_or_else(|| Path::new("."));
        return Ok(parent.join("replmv.log"));
    }
    if let Some(base) = data_dir() {
        return Ok(base.join("replmv").join("replmv.log"));
    }
    env::var_os("HOME")
        .map(|h| {
            PathBuf::from(h)
                .join(".local")
                .join("share")
                .join("replmv")
                .join("replmv.log")
        })
        .ok_or_else(|| anyhow!("cannot determine a data directory (no data dir and HOME unset)"))
}

/// Return true if any existing ancestor of `path` is a symlink.
pub fn path_has_symlink_ancestor(path: &Path) -> io::Result<bool> {
    let mut p = path.parent();
    while let Some(anc) = p {
        if anc.exists() {
            let meta = fs::symlink_metadata(anc)?;
            if meta.file_type().is_symlink() {
                return Ok(true);
            }
        }
        p = anc.parent();
    }
    Ok(false)
}
