//! Per-file color tags
//!
//! Every file that contributes links gets a stable color so its entries can
//! be told apart in lists and in the interactive menu. Tags are assigned in
//! first-seen order during a scan, cycling through a fixed palette, which
//! makes the assignment reproducible for a given directory snapshot.

use serde::{Deserialize, Serialize};

/// A semantic color tag from the fixed palette.
///
/// The core never emits escape codes; presentation layers map tags to
/// terminal colors (and may ignore them entirely when colors are disabled).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileColor {
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl FileColor {
    /// The palette, in assignment order
    pub const PALETTE: [FileColor; 7] = [
        FileColor::Red,
        FileColor::Green,
        FileColor::Yellow,
        FileColor::Blue,
        FileColor::Magenta,
        FileColor::Cyan,
        FileColor::White,
    ];

    /// Returns the color for the n-th first-seen file, wrapping around
    pub fn for_index(index: usize) -> Self {
        Self::PALETTE[index % Self::PALETTE.len()]
    }

    /// Returns a display name for the color
    pub fn name(&self) -> &'static str {
        match self {
            FileColor::Red => "red",
            FileColor::Green => "green",
            FileColor::Yellow => "yellow",
            FileColor::Blue => "blue",
            FileColor::Magenta => "magenta",
            FileColor::Cyan => "cyan",
            FileColor::White => "white",
        }
    }
}
