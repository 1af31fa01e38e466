//! The `chess` module holds the board vocabulary shared by the notation validator, the position
//! model and the move token grammar.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use std::fmt;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    White = 0,
    Black = 1,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Returns the color that owns the given piece letter. Uppercase letters are `White`.
    pub fn of_letter(c: char) -> Color {
        if c.is_ascii_uppercase() { Color::White } else { Color::Black }
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use fenboard::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "w"),
            Color::Black => write!(f, "b"),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    /// Parses the side-to-move module of a FEN string
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::Grammar(Grammar::Module(2))),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// Every piece type, ordered by discriminant
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King,
    ];

    /// Returns how many pieces of this type one side has in a standard set
    pub fn supply(self) -> u8 {
        match self {
            Piece::Pawn => 8,
            Piece::Knight | Piece::Bishop | Piece::Rook => 2,
            Piece::Queen | Piece::King => 1,
        }
    }

    /// Returns the piece type named by `c`, ignoring case
    pub fn from_char(c: char) -> Option<Piece> {
        match c.to_ascii_uppercase() {
            'P' => Some(Piece::Pawn),
            'N' => Some(Piece::Knight),
            'B' => Some(Piece::Bishop),
            'R' => Some(Piece::Rook),
            'Q' => Some(Piece::Queen),
            'K' => Some(Piece::King),
            _   => None,
        }
    }

    /// Returns the FEN letter for this piece when owned by `color`
    pub fn letter(self, color: Color) -> char {
        let c = match self {
            Piece::Pawn => 'P',
            Piece::Knight => 'N',
            Piece::Bishop => 'B',
            Piece::Rook => 'R',
            Piece::Queen => 'Q',
            Piece::King => 'K',
        };
        match color {
            Color::White => c,
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter(Color::White))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum File {
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// Every file from `A` to `H`
    pub const ALL: [File; File::COUNT] = [
        File::A, File::B, File::C, File::D, File::E, File::F, File::G, File::H,
    ];

    /// Returns the file for a lowercase letter `a` through `h`
    pub fn from_char(c: char) -> Option<File> {
        match c {
            'a' ..= 'h' => Some(File::ALL[(c as u8 - b'a') as usize]),
            _ => None,
        }
    }

    /// Returns the file's letter
    pub fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for File {
    type Err = Error;

    /// Parses a single lowercase letter `a` through `h`
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => File::from_char(c).ok_or(Error::Bounds),
            _ => Err(Error::Bounds),
        }
    }
}

impl TryFrom<usize> for File {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        File::ALL.get(value).copied().ok_or(Error::Bounds)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Rank {
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// Every rank from `R1` to `R8`
    pub const ALL: [Rank; Rank::COUNT] = [
        Rank::R1, Rank::R2, Rank::R3, Rank::R4, Rank::R5, Rank::R6, Rank::R7, Rank::R8,
    ];

    /// Returns the rank with the given number, 1 through 8
    pub fn from_number(n: u32) -> Option<Rank> {
        match n {
            1 ..= 8 => Some(Rank::ALL[n as usize - 1]),
            _ => None,
        }
    }

    /// Returns the rank's number, 1 through 8
    pub fn number(self) -> u32 {
        self as u32 + 1
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

impl FromStr for Rank {
    type Err = Error;

    /// Parses a single digit `1` through `8`
    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => c.to_digit(10).and_then(Rank::from_number).ok_or(Error::Bounds),
            _ => Err(Error::Bounds),
        }
    }
}

impl TryFrom<usize> for Rank {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Rank::ALL.get(value).copied().ok_or(Error::Bounds)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Square {
    file: File,
    rank: Rank,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = File::COUNT * Rank::COUNT;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square { file, rank }
    }

    /// Returns the square named by a file letter and a rank number.
    ///
    /// Fails with `Error::Bounds` unless `file` is in `'a'..='h'` and `rank` in `1..=8`.
    pub fn from_chars(file: char, rank: u32) -> Result<Square> {
        match (File::from_char(file), Rank::from_number(rank)) {
            (Some(file), Some(rank)) => Ok(Square { file, rank }),
            _ => Err(Error::Bounds),
        }
    }

    /// Returns the square at `row` (counted from the top, rank 8 is row 0) and `column`
    /// (file `a` is column 0).
    pub fn from_grid(row: usize, column: usize) -> Result<Square> {
        if row >= Rank::COUNT {
            return Err(Error::Bounds);
        }
        Ok(Square {
            file: File::try_from(column)?,
            rank: Rank::try_from(Rank::COUNT - 1 - row)?,
        })
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        self.file
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        self.rank
    }

    /// Index of the square's rank counted from the top of the board as written in FEN
    pub fn row(self) -> usize {
        Rank::COUNT - 1 - self.rank as usize
    }

    /// Index of the square's file, starting at 0 for file `a`
    pub fn column(self) -> usize {
        self.file as usize
    }

    /// Returns `true` for light squares. `a8` is light.
    pub fn is_light(self) -> bool {
        (self.row() + self.column()) % 2 == 0
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file, self.rank)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        if s.len() != 2 || !s.is_char_boundary(1) {
            return Err(Error::Bounds);
        }
        Ok(Square::from_coord(s[..1].parse()?, s[1..].parse()?))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The content of one square of an expanded placement
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// An empty square, written `_` in expanded form
    Empty,
    /// A piece of the given color
    Piece(Color, Piece),
}

impl Symbol {
    /// Placeholder character for an empty square
    pub const EMPTY: char = '_';

    /// Returns the symbol written as `c`, either a FEN piece letter or the empty placeholder
    pub fn from_char(c: char) -> Option<Symbol> {
        if c == Self::EMPTY {
            return Some(Symbol::Empty);
        }
        Piece::from_char(c).map(|piece| Symbol::Piece(Color::of_letter(c), piece))
    }

    /// Returns the character for this symbol
    pub fn to_char(self) -> char {
        match self {
            Symbol::Empty => Self::EMPTY,
            Symbol::Piece(color, piece) => piece.letter(color),
        }
    }

    /// Returns `true` if the square holds no piece
    pub fn is_empty(self) -> bool {
        self == Symbol::Empty
    }
}

impl Default for Symbol {
    fn default() -> Self {
        Symbol::Empty
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod error;
pub mod fen;
pub mod moves;
mod position;

pub use error::{Error, Grammar, Result};
pub use fen::validate;
pub use moves::{validate_move_token, MoveApplier, MoveToken, Suffix, Unsupported};
pub use position::{CastlingRights, PositionRecord, STARTING_FEN};
pub use position::builder::PositionBuilder;
pub use position::placement::ExpandedPlacement;

#[cfg(test)]
mod color_tests {
    use super::*;

    #[test]
    fn display_trait_works() {
        assert_eq!(format!("{}", Color::White), "w");
        assert_eq!(format!("{}", Color::Black), "b");
    }

    #[test]
    fn fromstr_trait_works() {
        assert_eq!("w".parse::<Color>(), Ok(Color::White));
        assert_eq!("b".parse::<Color>(), Ok(Color::Black));
        assert_eq!("W".parse::<Color>(), Err(Error::Grammar(Grammar::Module(2))));
    }

    #[test]
    fn letter_case_decides_color() {
        assert_eq!(Color::of_letter('Q'), Color::White);
        assert_eq!(Color::of_letter('q'), Color::Black);
    }
}
