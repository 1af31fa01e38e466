//! Defines the error types needed by the chess module
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// What failed a grammar check
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Grammar {
    /// A FEN module, numbered from 1 (placement) to 6 (move number)
    Module(usize),
    /// A move token
    Move,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string does not split into exactly six modules
    Structure,
    /// A module or move token contains characters its grammar does not allow
    Grammar(Grammar),
    /// The rank, numbered from 1 at the top as written, does not add up to eight files
    RankLength(usize),
    /// More pieces of this letter than a standard set contains
    SupplyExceeded(char),
    /// En-passant square without a pawn that could have just passed it
    EnPassant,
    /// Square outside the 8x8 board
    Bounds,
    /// No move application is available for a syntactically valid move
    UnsupportedMove,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Structure => write!(f, "FEN does not have the correct number of modules"),
            Error::Grammar(Grammar::Module(n)) => write!(f, "bad module #{}", n),
            Error::Grammar(Grammar::Move) => write!(f, "either illegal characters entered or \
                expanded algebraic notation formatted incorrectly"),
            Error::RankLength(rank) => write!(f, "incorrect number of files on rank {}", rank),
            Error::SupplyExceeded(c) => write!(f, "too many pieces of type {}", c),
            Error::EnPassant => write!(f, "the en passant square is invalid for this situation"),
            Error::Bounds => write!(f, "square is outside the board"),
            Error::UnsupportedMove => write!(f, "applying moves is not supported"),
        }
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_failing_part() {
        assert_eq!(Error::Grammar(Grammar::Module(4)).to_string(), "bad module #4");
        assert_eq!(Error::RankLength(3).to_string(), "incorrect number of files on rank 3");
        assert_eq!(Error::SupplyExceeded('p').to_string(), "too many pieces of type p");
    }
}
