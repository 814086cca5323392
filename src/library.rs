//! Library module: turns a folder (or a list of files) into sorted tracks.
//!
//! Only the top level of a folder is considered; the playlist index is built
//! from the result by `crate::playlist`.

mod model;
mod scan;

pub use model::Track;
pub use scan::{ScanError, scan, tracks_from_paths};
