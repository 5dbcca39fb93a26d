//! Structures that make up 7zip archives.
//! These are "low-level", meaning that they're meant to
//! reflect how data is stored in the archive, not provide a friendly interface to it.

mod header;
mod property_id;
mod streams_info;
pub use header::*;
pub use property_id::*;
pub use streams_info::*;
