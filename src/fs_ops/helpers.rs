//! I/O helper utilities.
//!
//! Enrich io::Error with the operation, the path and an errno-based hint so
//! the `ERR:` lines and fatal messages are actionable on their own.
//!
//! Usage:
//!   // in functions returning anyhow::Result<_>
//!   fs::read_dir(dir).map_err(io_error_with_help("list directory", dir))?;
//!
//!   // in functions returning io::Result<_>
//!   File::open(p).map_err(io_error_with_help_io("open", p))?;

use anyhow::anyhow;
use std::io;
use std::path::Path;

/// Short hint for well-known errno values, if any.
fn errno_hint(code: i32) -> Option<&'static str> {
    let hint = match code {
        libc::EACCES | libc::EPERM => "permission denied; check ownership and write permission on the parent directory",
        libc::ENOENT => "path not found; it may have been removed during the run",
        libc::EEXIST | libc::ENOTEMPTY => "target already exists",
        libc::EXDEV => "cross-filesystem; a rename can not leave its filesystem",
        libc::EBUSY => "resource busy; a mount point can not be renamed",
        libc::EINVAL => "invalid rename; a directory can not move into itself",
        libc::EROFS => "read-only filesystem; names can not be changed here",
        libc::ELOOP => "too many symbolic link levels (ELOOP); possible symlink cycle",
        libc::ENAMETOOLONG => "name too long for this filesystem; the translated name grew past the limit",
        libc::EMFILE => "process file descriptor limit reached; raise the limit",
        libc::ENFILE => "system-wide file table overflow; reduce open files",
        libc::EWOULDBLOCK => "locked by another process",
        _ => return None,
    };
    Some(hint)
}

/// Format a human-friendly message with op/path plus an errno hint.
pub(crate) fn build_message(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);

    if let Some(code) = e.raw_os_error() {
        if let Some(hint) = errno_hint(code) {
            msg.push_str(" - ");
            msg.push_str(hint);
        }
        msg.push_str(&format!(" [os code: {}]", code));
    } else {
        match e.kind() {
            io::ErrorKind::PermissionDenied => msg.push_str(" - permission denied"),
            io::ErrorKind::NotFound => msg.push_str(" - path not found"),
            io::ErrorKind::AlreadyExists => msg.push_str(" - target already exists"),
            _ => {}
        }
    }

    msg
}

/// Adapter for anyhow::Result code.
pub fn io_error_with_help<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> anyhow::Error + 'a {
    move |e: io::Error| anyhow!(build_message(op, path, &e))
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), build_message(op, path, &e))
}
