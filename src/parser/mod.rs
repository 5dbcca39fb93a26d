//! Parsing of the archive's headers into an `Archive`.

pub mod crc;
mod err;
mod interface;
mod parsers;
mod reader;
mod types;

pub use err::*;
pub use interface::*;
pub use reader::*;
pub use types::PropertyID;
