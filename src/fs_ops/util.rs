use std::fs::File;
use std::io;
use std::path::Path;

/// fsync a directory so a completed rename survives a crash.
pub(super) fn fsync_dir(dir: &Path) -> io::Result<()> {
    let f = File::open(dir)?;
    f.sync_all()
}
