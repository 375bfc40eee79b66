//! XML configuration support.
//! - Loads settings from config.xml (quick_xml + serde).
//! - Creates a secure template if missing (unless REPLMV_CONFIG is set).
//!
//! Notes:
//! - This module only reads/writes the config file; validation happens elsewhere.
//! - Unknown XML fields are an error to surface misconfigurations early.
//! - Table rules are hex strings: `<rule from="e4" to="c3a4"/>`.

use anyhow::{Context, Result, bail};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::paths::{CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor};
use super::TARGET_ENCODING_DEFAULT;

use crate::config::types::{Config, LogLevel};
use crate::mapping::TranslationTable;
use crate::platform::{set_dir_mode_0700, set_file_mode_0600, write_config_secure_new_0600};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    start_dir: Option<String>,
    target_encoding: Option<String>,
    dry_run: Option<bool>,
    verify_first: Option<bool>,
    verbose: Option<bool>,
    log_level: Option<String>,
    log_file: Option<String>,
    table: Option<XmlTable>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlTable {
    #[serde(rename = "rule", default)]
    rules: Vec<XmlRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct XmlRule {
    #[serde(rename = "@from")]
    from: String,
    #[serde(rename = "@to")]
    to: String,
}

/// Outcome of locating and loading the config file.
#[derive(Debug)]
pub enum LoadResult {
    /// Parsed from the given file.
    Loaded(Config, PathBuf),
    /// No file existed at the default location; a template was written there.
    CreatedTemplate(PathBuf),
    /// `REPLMV_CONFIG` names a file that does not exist; defaults apply.
    Missing(PathBuf),
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

// Map XmlConfig -> Config
fn xml_to_config(parsed: XmlConfig) -> Result<Config> {
    let mut cfg = Config::default();

    cfg.start_dir = non_empty(parsed.start_dir).map(PathBuf::from);
    if let Some(enc) = non_empty(parsed.target_encoding) {
        cfg.target_encoding = enc;
    }
    if let Some(lf) = non_empty(parsed.log_file) {
        cfg.log_file = Some(PathBuf::from(lf));
    }
    if let Some(s) = non_empty(parsed.log_level) {
        cfg.log_level = s.parse::<LogLevel>().map_err(anyhow::Error::msg)?;
    }

    cfg.dry_run = parsed.dry_run.unwrap_or(cfg.dry_run);
    cfg.verify_first = parsed.verify_first.unwrap_or(cfg.verify_first);
    cfg.verbose = parsed.verbose.unwrap_or(cfg.verbose);

    // Absent <table> keeps the builtin table; an empty one means verify only.
    if let Some(table) = parsed.table {
        cfg.table = TranslationTable::from_hex_pairs(
            table.rules.iter().map(|r| (r.from.as_str(), r.to.as_str())),
        )
        .context("invalid <table>")?;
    }

    Ok(cfg)
}

/// Load a Config from a specific XML file path.
pub fn load_config_from_xml_path(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config xml '{}'", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&contents)
        .with_context(|| format!("parse config xml '{}'", path.display()))?;
    xml_to_config(parsed).with_context(|| format!("config xml '{}'", path.display()))
}

/// Locate the config file and load it, writing a template on first use.
pub fn load_or_init() -> Result<LoadResult> {
    let path = default_config_path()?;
    if path.exists() {
        let cfg = load_config_from_xml_path(&path)?;
        return Ok(LoadResult::Loaded(cfg, path));
    }
    if env::var_os(CONFIG_ENV).is_some() {
        return Ok(LoadResult::Missing(path));
    }
    create_template_config(&path)?;
    Ok(LoadResult::CreatedTemplate(path))
}

fn template_rules() -> String {
    let mut out = String::new();
    for rule in TranslationTable::builtin().rules() {
        let _ = writeln!(
            out,
            "    <rule from=\"{}\" to=\"{}\"/>",
            hex::encode(rule.from_bytes()),
            hex::encode(rule.to_bytes())
        );
    }
    out
}

/// Create default template config file and parent directory (best-effort permissions).
/// Refuses to write through a symlinked ancestor.
pub fn create_template_config(path: &Path) -> Result<()> {
    if path_has_symlink_ancestor(path)? {
        bail!(
            "Refusing to create config: ancestor of {} is a symlink",
            path.display()
        );
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
        let _ = set_dir_mode_0700(parent);
    }

    let suggested_log = default_log_path()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|_| "/path/to/replmv.log".into());

    let content = format!(
        "<!--\n  replmv configuration (XML)\n\n  Fields:\n    start_dir        -> root of the tree whose names are repaired\n    target_encoding  -> encoding new names must decode under (e.g. utf-8)\n    dry_run          -> true: only print planned renames (REN: old -> new)\n    verify_first     -> true: leave names that already decode untouched\n    verbose          -> true: print DIR: lines for the top levels\n    log_level        -> quiet | normal | info | debug\n    log_file         -> path to log file (optional)\n    table            -> ordered <rule from=\"hex\" to=\"hex\"/> substitutions;\n                        each rule runs on the output of the previous ones\n\n  Always run with dry_run=true first and read every REN and ERR line.\n-->\n<config>\n  <start_dir></start_dir>\n  <target_encoding>{}</target_encoding>\n  <dry_run>true</dry_run>\n  <verify_first>true</verify_first>\n  <verbose>true</verbose>\n  <log_level>normal</log_level>\n  <log_file>{}</log_file>\n  <table>\n{}  </table>\n</config>\n",
        TARGET_ENCODING_DEFAULT,
        suggested_log,
        template_rules()
    );

    // Atomic, secure write (temp sibling + rename on Unix), then tighten perms.
    write_config_secure_new_0600(path, content.as_bytes())?;
    let _ = set_file_mode_0600(path);

    info!("Created template config at {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn template_parses_back_to_builtin_defaults() {
        let td = tempdir().unwrap();
        let path = td.path().join("replmv").join("config.xml");
        create_template_config(&path).unwrap();

        let cfg = load_config_from_xml_path(&path).unwrap();
        assert_eq!(cfg.start_dir, None);
        assert_eq!(cfg.target_encoding, "utf-8");
        assert!(cfg.dry_run);
        assert!(cfg.verify_first);
        assert_eq!(cfg.table, TranslationTable::builtin());
    }

    #[test]
    fn bad_hex_rule_is_an_error() {
        let td = tempdir().unwrap();
        let path = td.path().join("config.xml");
        fs::write(
            &path,
            r#"<config><table><rule from="zz" to="41"/></table></config>"#,
        )
        .unwrap();
        let err = load_config_from_xml_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid hex"), "got: {err:#}");
    }
}
