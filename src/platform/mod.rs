//! Platform helpers for POSIX systems: secure log/config file creation and
//! permission tightening.

mod temp;
mod unix;

pub use unix::{
    open_log_file_secure_append, set_dir_mode_0700, set_file_mode_0600,
    write_config_secure_new_0600,
};
