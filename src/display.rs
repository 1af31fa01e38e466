//! Text rendering of a position as a boxed board
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use serde::Deserialize;
use crate::chess::*;

const BORDER: &str = "+-------------------+";

/// Figurines, indexed by `Color` then `Piece`
const FIGURINES: [[&str; Piece::COUNT]; Color::COUNT] = [
    ["♙", "♘", "♗", "♖", "♕", "♔"],
    ["♟", "♞", "♝", "♜", "♛", "♚"],
];

/// Piece letters, indexed by `Color` then `Piece`
const LETTERS: [[&str; Piece::COUNT]; Color::COUNT] = [
    ["P", "N", "B", "R", "Q", "K"],
    ["p", "n", "b", "r", "q", "k"],
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The characters used to draw pieces and empty squares
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GlyphSet {
    /// Unicode chess figurines, with `□` and `■` for empty light and dark squares
    Figurine,
    /// FEN piece letters, with `.` and `#` for empty light and dark squares
    Ascii,
}

impl GlyphSet {
    fn piece(self, color: Color, piece: Piece) -> &'static str {
        match self {
            GlyphSet::Figurine => FIGURINES[color as usize][piece as usize],
            GlyphSet::Ascii => LETTERS[color as usize][piece as usize],
        }
    }

    fn empty(self, light: bool) -> &'static str {
        match (self, light) {
            (GlyphSet::Figurine, true) => "□",
            (GlyphSet::Figurine, false) => "■",
            (GlyphSet::Ascii, true) => ".",
            (GlyphSet::Ascii, false) => "#",
        }
    }
}

impl Default for GlyphSet {
    fn default() -> Self {
        GlyphSet::Figurine
    }
}

/// Which side of the board is drawn at the bottom
#[derive(Debug, Copy, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    /// The side to move is at the bottom
    SideToMove,
    /// Rank 1 is at the bottom
    White,
    /// Rank 8 is at the bottom
    Black,
}

impl Orientation {
    /// Returns the color whose pieces start at the bottom of the board for `record`
    pub fn bottom(self, record: &PositionRecord) -> Color {
        match self {
            Orientation::SideToMove => record.turn(),
            Orientation::White => Color::White,
            Orientation::Black => Color::Black,
        }
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::SideToMove
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Draws the board of `record` inside a box, one line per rank.
///
/// # Example
/// ```
/// use fenboard::chess::PositionRecord;
/// use fenboard::display::{render, GlyphSet, Orientation};
///
/// let board = render(&PositionRecord::new(), GlyphSet::Ascii, Orientation::White);
/// assert_eq!(board.lines().nth(1), Some("|  r n b q k b n r  |"));
/// assert_eq!(board.lines().nth(4), Some("|  # . # . # . # .  |"));
/// ```
pub fn render(record: &PositionRecord, glyphs: GlyphSet, orientation: Orientation) -> String {
    let flipped = orientation.bottom(record) == Color::Black;
    let mut out = String::with_capacity(Square::COUNT * 8);

    out += BORDER;
    out.push('\n');
    for i in 0..Rank::COUNT {
        let row = if flipped { Rank::COUNT - 1 - i } else { i };
        let cells: Vec<&str> = (0..File::COUNT).map(|j| {
            let column = if flipped { File::COUNT - 1 - j } else { j };
            let square = Square::from_grid(row, column).expect("INFALLIBLE");
            match record.symbol_at(square) {
                Symbol::Piece(color, piece) => glyphs.piece(color, piece),
                Symbol::Empty => glyphs.empty(square.is_light()),
            }
        }).collect();
        out += "|  ";
        out += &cells.join(" ");
        out += "  |\n";
    }
    out += BORDER;
    out.push('\n');

    out
}
