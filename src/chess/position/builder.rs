//! Contains a builder for `PositionRecord`
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A builder for `PositionRecord`.
///
/// Nothing is checked while the fields are being set. `validate` writes the result out as FEN
/// and passes it through the same validation as any other FEN string, so a record built this way
/// obeys the same rules as a parsed one.
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    record: PositionRecord,
}

impl PositionBuilder {
    /// Creates a new builder with an empty board, White to move, no castling rights, no en
    /// passant square, a halfmove clock of 0 and move number 1
    pub fn new() -> Self {
        PositionBuilder {
            record: PositionRecord {
                placement: ExpandedPlacement::empty(),
                turn: Color::White,
                castling: CastlingRights::none(),
                ep_square: None,
                halfmove_clock: 0,
                fullmove_number: 1,
            },
        }
    }

    /// Creates a builder starting from an existing record
    pub fn from_record(record: &PositionRecord) -> Self {
        PositionBuilder { record: record.clone() }
    }

    /// Sets the piece at `square`
    pub fn piece(&mut self, color: Color, piece: Piece, square: Square) -> &mut Self {
        self.record.placement.set(square, Symbol::Piece(color, piece));
        self
    }

    /// Clears the piece at `square`
    pub fn clear(&mut self, square: Square) -> &mut Self {
        self.record.placement.set(square, Symbol::Empty);
        self
    }

    /// Sets the turn to `color`
    pub fn turn(&mut self, color: Color) -> &mut Self {
        self.record.turn = color;
        self
    }

    /// Sets king side castling rights for `color`
    pub fn can_castle_king_side(&mut self, color: Color, available: bool) -> &mut Self {
        self.record.castling.set_king_side(color, available);
        self
    }

    /// Sets queen side castling rights for `color`
    pub fn can_castle_queen_side(&mut self, color: Color, available: bool) -> &mut Self {
        self.record.castling.set_queen_side(color, available);
        self
    }

    /// Sets or clears the en-passant square
    pub fn en_passant_square(&mut self, square: Option<Square>) -> &mut Self {
        self.record.ep_square = square;
        self
    }

    /// Sets the halfmove clock
    pub fn halfmove_clock(&mut self, plies: u32) -> &mut Self {
        self.record.halfmove_clock = plies;
        self
    }

    /// Sets the move number
    pub fn fullmove_number(&mut self, number: u32) -> &mut Self {
        self.record.fullmove_number = number;
        self
    }

    /// Returns the FEN string the builder currently describes
    pub fn to_fen_str(&self) -> String {
        self.record.to_fen_str()
    }

    /// Validates the position and returns a `PositionRecord`
    pub fn validate(&self) -> Result<PositionRecord> {
        self.to_fen_str().parse()
    }
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
