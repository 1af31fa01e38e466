//! Move tokens in long (expanded) algebraic notation
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use lazy_static::lazy_static;
use regex::Regex;
use super::*;

lazy_static! {
    static ref MOVE_TOKEN: Regex =
        Regex::new(r"^([KQRBN])?([a-h][1-8])(x)?([a-h][1-8])(?:=([KQRBN]))?([+#])?$")
            .expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Check or mate marker at the end of a move token
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Suffix {
    /// `+`
    Check,
    /// `#`
    Mate,
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suffix::Check => write!(f, "+"),
            Suffix::Mate => write!(f, "#"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move written in long algebraic notation, such as `e2e4`, `Ng1f3`, `Rd1xd8+` or `e7e8=Q`.
///
/// Only the syntax is known here. Whether the piece is actually on `from`, or the move is legal,
/// is for a `MoveApplier` to decide.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveToken {
    /// The piece moved. Tokens without a piece letter move a pawn.
    pub piece: Piece,
    /// Origin square
    pub from: Square,
    /// `true` if the token marks a capture with `x`
    pub capture: bool,
    /// Destination square
    pub to: Square,
    /// The piece promoted to, if any
    pub promotion: Option<Piece>,
    /// Check or mate marker, if any
    pub suffix: Option<Suffix>,
}

impl FromStr for MoveToken {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = Error::Grammar(Grammar::Move);
        let caps = MOVE_TOKEN.captures(s).ok_or(invalid)?;
        let letter = |i| caps.get(i).and_then(|m| m.as_str().chars().next());

        Ok(MoveToken {
            piece: letter(1).and_then(Piece::from_char).unwrap_or(Piece::Pawn),
            from: caps[2].parse().map_err(|_| invalid)?,
            capture: caps.get(3).is_some(),
            to: caps[4].parse().map_err(|_| invalid)?,
            promotion: letter(5).and_then(Piece::from_char),
            suffix: match letter(6) {
                Some('+') => Some(Suffix::Check),
                Some('#') => Some(Suffix::Mate),
                _ => None,
            },
        })
    }
}

impl fmt::Display for MoveToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.piece != Piece::Pawn {
            write!(f, "{}", self.piece)?;
        }
        write!(f, "{}", self.from)?;
        if self.capture {
            write!(f, "x")?;
        }
        write!(f, "{}", self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "={}", promotion)?;
        }
        if let Some(suffix) = self.suffix {
            write!(f, "{}", suffix)?;
        }
        Ok(())
    }
}

/// Checks that `token` is a move in long algebraic notation: an optional piece letter (`K`, `Q`,
/// `R`, `B` or `N`), the origin square, an optional `x`, the destination square, an optional
/// promotion (`=` and a piece letter) and an optional `+` or `#`.
///
/// Any mismatch gives the same `Error::Grammar(Grammar::Move)`. Castling written as `O-O` is not
/// part of this grammar.
///
/// # Example
/// ```
/// use fenboard::chess::validate_move_token;
/// assert!(validate_move_token("e2e4").is_ok());
/// assert!(validate_move_token("e2-e4").is_err());
/// ```
pub fn validate_move_token(token: &str) -> Result<()> {
    token.parse::<MoveToken>().map(|_| ())
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Plays syntactically valid moves on a position.
///
/// This is where piece movement rules belong; the crate itself provides none.
pub trait MoveApplier {
    /// Reason a move could not be applied
    type Error: fmt::Display;

    /// Returns the position after `token` is played in `record`
    fn apply_move(&mut self, record: &PositionRecord, token: &MoveToken)
        -> std::result::Result<PositionRecord, Self::Error>;
}

/// A `MoveApplier` that refuses every move with `Error::UnsupportedMove`
#[derive(Debug, Copy, Clone, Default)]
pub struct Unsupported;

impl MoveApplier for Unsupported {
    type Error = Error;

    fn apply_move(&mut self, _record: &PositionRecord, _token: &MoveToken)
        -> Result<PositionRecord> {
        Err(Error::UnsupportedMove)
    }
}
