//! Domain models for dokk
//!
//! Contains the core link types without any I/O concerns.

mod color;
mod entry;

pub use color::FileColor;
pub use entry::{Entry, EntryError};
