//! Advisory tree lock.
//!
//! A live run holds an exclusive flock(2) on the start directory itself, so a
//! second live run on the same tree fails fast instead of racing the first.
//! No sidecar file is created: anything written into the tree would be walked.
//!
//! Notes:
//! - The lock is released when the TreeLock guard is dropped.
//! - Advisory only; other programs renaming in the tree are not stopped.

use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};
use tracing::trace;

use super::helpers::io_error_with_help_io;

/// RAII guard held while the tree lock is active.
#[derive(Debug)]
pub struct TreeLock {
    file: File,
    path: PathBuf,
}

impl TreeLock {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TreeLock {
    fn drop(&mut self) {
        // flock releases on close anyway; unlock explicitly, ignore errors.
        let _ = unsafe { libc::flock(self.file.as_raw_fd(), libc::LOCK_UN) };
    }
}

/// Take the tree lock on `dir` without blocking.
///
/// Fails with `ErrorKind::WouldBlock` when another run already holds it.
pub fn acquire_tree_lock(dir: &Path) -> io::Result<TreeLock> {
    let file = OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_DIRECTORY | libc::O_CLOEXEC)
        .open(dir)
        .map_err(io_error_with_help_io("open for locking", dir))?;

    let rc = unsafe { libc::flock(file.as_raw_fd(), libc::LOCK_EX | libc::LOCK_NB) };
    if rc != 0 {
        let e = io::Error::last_os_error();
        if e.raw_os_error() == Some(libc::EWOULDBLOCK) {
            return Err(io::Error::new(
                io::ErrorKind::WouldBlock,
                format!("another replmv run holds the lock on {}", dir.display()),
            ));
        }
        return Err(e);
    }
    trace!(path = %dir.display(), "tree lock acquired");
    Ok(TreeLock {
        file,
        path: dir.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn second_lock_on_same_tree_is_refused() {
        let td = tempdir().unwrap();
        let first = acquire_tree_lock(td.path()).unwrap();
        let err = acquire_tree_lock(td.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::WouldBlock);
        assert!(err.to_string().contains("holds the lock"));

        drop(first);
        let again = acquire_tree_lock(td.path()).unwrap();
        assert_eq!(again.path(), td.path());
    }

    #[test]
    fn lock_leaves_no_file_behind() {
        let td = tempdir().unwrap();
        let _guard = acquire_tree_lock(td.path()).unwrap();
        assert_eq!(std::fs::read_dir(td.path()).unwrap().count(), 0);
    }

    #[test]
    fn lock_on_plain_file_fails() {
        let td = tempdir().unwrap();
        let f = td.path().join("file");
        std::fs::write(&f, b"x").unwrap();
        assert!(acquire_tree_lock(&f).is_err());
    }
}
