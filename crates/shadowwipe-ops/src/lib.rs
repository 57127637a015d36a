//! Host-boundary operations for shadowwipe.
//!
//! Everything here sits outside the scan pipeline: moving redundant copies
//! to the system trash with per-file failure reporting, opening or
//! revealing files with the platform's native tools, and generating the
//! thumbnails the host UI shows next to image groups.

mod error;
mod open;
mod thumbnail;
mod trash;

pub use error::OpsError;
pub use self::open::{open_file, reveal_in_file_manager};
pub use self::trash::{DeleteOperation, TrashFailure, move_to_trash};
pub use thumbnail::{ThumbnailCache, generate_thumbnail};
