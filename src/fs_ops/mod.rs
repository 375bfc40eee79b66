//! Filesystem operations: the rename primitive, the tree walk and the
//! advisory lock that keeps two live runs apart.

mod helpers;
mod lock;
mod mover;
mod util;
mod walker;

pub use helpers::{io_error_with_help, io_error_with_help_io};
pub use lock::{TreeLock, acquire_tree_lock};
pub use mover::{MoveOutcome, move_entry};
pub use walker::{MAX_DEPTH, WalkSettings, WalkStats, Walker, walk};
