//! The board module of a FEN string with every empty square spelled out
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A placement with one `Symbol` per square, stored rank by rank from the top of the board (rank
/// 8) down, files `a` through `h` within each rank. Written out, every digit of the FEN placement
/// becomes that many `_` characters.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ExpandedPlacement {
    rows: [[Symbol; File::COUNT]; Rank::COUNT],
}

impl ExpandedPlacement {
    /// Returns a placement with no pieces
    pub fn empty() -> Self {
        ExpandedPlacement { rows: [[Symbol::Empty; File::COUNT]; Rank::COUNT] }
    }

    /// Expands the placement module of a FEN string.
    ///
    /// Input is expected to have passed `validate`; anything that cannot be laid out as eight
    /// ranks of eight squares is still rejected rather than guessed at.
    pub fn expand(placement: &str) -> Result<Self> {
        let mut rows = [[Symbol::Empty; File::COUNT]; Rank::COUNT];

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != Rank::COUNT {
            return Err(Error::Grammar(Grammar::Module(1)));
        }

        for (row, rank) in ranks.iter().enumerate() {
            let mut column = 0;
            for c in rank.chars() {
                let (symbol, run) = match c {
                    '1' ..= '8' => (Symbol::Empty, (c as u8 - b'0') as usize),
                    _ => match Symbol::from_char(c) {
                        Some(symbol @ Symbol::Piece(..)) => (symbol, 1),
                        _ => return Err(Error::Grammar(Grammar::Module(1))),
                    },
                };
                if column + run > File::COUNT {
                    return Err(Error::RankLength(row + 1));
                }
                for cell in &mut rows[row][column .. column + run] {
                    *cell = symbol;
                }
                column += run;
            }
            if column != File::COUNT {
                return Err(Error::RankLength(row + 1));
            }
        }

        Ok(ExpandedPlacement { rows })
    }

    /// Returns the symbol on `square`
    pub fn at(&self, square: Square) -> Symbol {
        self.rows[square.row()][square.column()]
    }

    /// Puts `symbol` on `square`
    pub fn set(&mut self, square: Square, symbol: Symbol) {
        self.rows[square.row()][square.column()] = symbol;
    }

    /// The symbols, rank 8 first
    pub fn rows(&self) -> &[[Symbol; File::COUNT]; Rank::COUNT] {
        &self.rows
    }

    /// Writes the placement back in FEN form, with runs of empty squares as digits
    pub fn compress(&self) -> String {
        let mut board = String::new();

        for (row, rank) in self.rows.iter().enumerate() {
            let mut count = 0;
            for symbol in rank.iter() {
                if symbol.is_empty() {
                    count += 1;
                } else {
                    if count > 0 {
                        board += &count.to_string();
                        count = 0;
                    }
                    board.push(symbol.to_char());
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
            if row < Rank::COUNT - 1 {
                board.push('/');
            }
        }

        board
    }
}

impl Default for ExpandedPlacement {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for ExpandedPlacement {
    /// Writes the expanded form, e.g. `rnbqkbnr/pppppppp/________/...`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.rows.iter().enumerate() {
            if row > 0 {
                write!(f, "/")?;
            }
            for symbol in rank.iter() {
                write!(f, "{}", symbol)?;
            }
        }
        Ok(())
    }
}
