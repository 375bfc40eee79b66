//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{CONFIG_ENV, default_config_path, default_log_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use xml::{LoadResult, create_template_config, load_config_from_xml_path, load_or_init};

/// Target encoding used when none is configured.
pub const TARGET_ENCODING_DEFAULT: &str = "utf-8";
