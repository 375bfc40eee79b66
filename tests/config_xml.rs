use serial_test::serial;
use std::fs;
use tempfile::tempdir;

use replmv::{
    CONFIG_ENV, LoadResult, LogLevel, TranslationTable, default_config_path, default_log_path,
    load_config_from_xml_path, load_or_init,
};

struct EnvGuard;

impl EnvGuard {
    fn set(value: &std::path::Path) -> Self {
        unsafe {
            std::env::set_var(CONFIG_ENV, value);
        }
        EnvGuard
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        unsafe {
            std::env::remove_var(CONFIG_ENV);
        }
    }
}

#[test]
#[serial]
fn env_override_names_config_and_colocates_log() {
    let td = tempdir().unwrap();
    let base = fs::canonicalize(td.path()).unwrap();
    let cfg = base.join("custom.xml");
    let _env = EnvGuard::set(&cfg);

    assert_eq!(default_config_path().unwrap(), cfg);
    assert_eq!(default_log_path().unwrap(), base.join("replmv.log"));
}

#[test]
#[serial]
fn missing_env_config_falls_back_to_defaults_without_writing() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("absent.xml");
    let _env = EnvGuard::set(&cfg);

    match load_or_init().unwrap() {
        LoadResult::Missing(p) => assert_eq!(p, cfg),
        other => panic!("expected Missing, got {other:?}"),
    }
    assert!(!cfg.exists());
}

#[test]
#[serial]
fn env_config_is_loaded() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(
        &cfg,
        r#"<config>
  <start_dir>/srv/share</start_dir>
  <target_encoding>utf-8</target_encoding>
  <dry_run>false</dry_run>
  <verify_first>false</verify_first>
  <verbose>false</verbose>
  <log_level>debug</log_level>
  <table>
    <rule from="e4" to="c3a4"/>
    <rule from="f6" to="c3b6"/>
  </table>
</config>"#,
    )
    .unwrap();
    let _env = EnvGuard::set(&cfg);

    let LoadResult::Loaded(loaded, path) = load_or_init().unwrap() else {
        panic!("expected Loaded");
    };
    assert_eq!(path, cfg);
    assert_eq!(loaded.start_dir.as_deref(), Some(std::path::Path::new("/srv/share")));
    assert!(!loaded.dry_run);
    assert!(!loaded.verify_first);
    assert!(!loaded.verbose);
    assert_eq!(loaded.log_level, LogLevel::Debug);
    assert_eq!(loaded.table.len(), 2);
    assert_eq!(loaded.table.translate(b"\xe4\xf6"), "äö".as_bytes());
}

#[test]
fn missing_fields_keep_defaults() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config>\n  <start_dir>  </start_dir>\n</config>\n").unwrap();

    let loaded = load_config_from_xml_path(&cfg).unwrap();
    assert_eq!(loaded.start_dir, None);
    assert!(loaded.dry_run);
    assert!(loaded.verify_first);
    assert_eq!(loaded.target_encoding, "utf-8");
    assert_eq!(loaded.table, TranslationTable::builtin());
}

#[test]
fn empty_table_means_verify_only() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config><table></table></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg).unwrap().table.is_empty());
}

#[test]
fn unknown_field_is_rejected() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, "<config><colour>blue</colour></config>").unwrap();
    assert!(load_config_from_xml_path(&cfg).is_err());
}

#[test]
fn empty_rule_pattern_is_rejected() {
    let td = tempdir().unwrap();
    let cfg = td.path().join("config.xml");
    fs::write(&cfg, r#"<config><table><rule from="" to="41"/></table></config>"#).unwrap();
    let err = load_config_from_xml_path(&cfg).unwrap_err();
    assert!(format!("{err:#}").contains("rule 0"), "got: {err:#}");
}

#[test]
fn validation_rejects_unknown_encoding_and_missing_start() {
    let td = tempdir().unwrap();
    let mut cfg = replmv::Config::new(td.path());
    cfg.target_encoding = "klingon".into();
    let err = cfg.validate().unwrap_err();
    assert!(err.to_string().contains("unknown target encoding"));

    let cfg = replmv::Config::default();
    assert!(cfg.validate().is_err());

    let cfg = replmv::Config::new(td.path().join("nope"));
    assert!(cfg.validate().unwrap_err().to_string().contains("does not exist"));
}
