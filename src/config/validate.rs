//! Config validation logic.
//! Verifies the start directory and the target encoding, then freezes the
//! config into the immutable settings the walker consumes.

use anyhow::{Result, anyhow, bail};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

use super::types::Config;
use crate::fs_ops::{WalkSettings, io_error_with_help};
use crate::mapping::{EncodingValidator, NameMapper};

impl Config {
    /// Validate start directory and encoding; returns the start directory.
    pub fn validate(&self) -> Result<PathBuf> {
        let start = self
            .start_dir
            .as_deref()
            .ok_or_else(|| anyhow!("no start directory: pass START_DIR or set <start_dir> in the config"))?;

        ensure_dir_exists_and_is_dir(start, "start_dir")?;
        ensure_readable(start, "start_dir")?;

        let validator = self.validator()?;
        if validator.is_single_byte() {
            warn!(
                encoding = validator.name(),
                "target encoding is single-byte; every name verifies, so verification can not catch bad translations"
            );
        }

        info!(
            "Config validated: start='{}' target='{}' rules={} dry_run={} verify_first={}",
            start.display(),
            validator.name(),
            self.table.len(),
            self.dry_run,
            self.verify_first
        );
        Ok(start.to_path_buf())
    }

    /// Resolve the target encoding label.
    pub fn validator(&self) -> Result<EncodingValidator> {
        EncodingValidator::for_label(&self.target_encoding)
            .ok_or_else(|| anyhow!("unknown target encoding '{}'", self.target_encoding))
    }

    /// Immutable settings for the walker.
    pub fn walk_settings(&self) -> Result<WalkSettings> {
        Ok(WalkSettings {
            mapper: NameMapper::new(self.table.clone(), self.validator()?, self.verify_first),
            dry_run: self.dry_run,
            verbose: self.verbose,
        })
    }
}

/// Ensure path exists and is a directory; emit clear errors with path context.
fn ensure_dir_exists_and_is_dir(path: &Path, name: &str) -> Result<()> {
    if !path.exists() {
        error!("{name} does not exist: {}", path.display());
        bail!("{name} does not exist: {}", path.display());
    }
    if !path.is_dir() {
        error!("{name} is not a directory: {}", path.display());
        bail!("{name} is not a directory: {}", path.display());
    }
    Ok(())
}

/// Ensure directory is readable by attempting to open its entries.
fn ensure_readable(path: &Path, name: &str) -> Result<()> {
    fs::read_dir(path).map_err(io_error_with_help("read start directory", path))?;
    debug!("{name} readable: {}", path.display());
    Ok(())
}
