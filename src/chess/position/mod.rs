//! Contains structures related to the `PositionRecord`
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use super::*;
use super::fen::split_modules;

use placement::ExpandedPlacement;

/// The standard starting position
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const CASTLE_KING_SIDE: u8 = 0x1;
const CASTLE_QUEEN_SIDE: u8 = 0x2;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Castling availability for both sides
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights([u8; Color::COUNT]);

impl CastlingRights {
    /// No castling for either side
    pub fn none() -> Self {
        CastlingRights([0; Color::COUNT])
    }

    /// Castling on both wings for both sides
    pub fn all() -> Self {
        CastlingRights([CASTLE_KING_SIDE | CASTLE_QUEEN_SIDE; Color::COUNT])
    }

    /// Returns `true` if `color` may still castle king side
    pub fn king_side(self, color: Color) -> bool {
        self.0[color as usize] & CASTLE_KING_SIDE != 0
    }

    /// Returns `true` if `color` may still castle queen side
    pub fn queen_side(self, color: Color) -> bool {
        self.0[color as usize] & CASTLE_QUEEN_SIDE != 0
    }

    /// Sets king side castling rights for `color`
    pub fn set_king_side(&mut self, color: Color, available: bool) {
        self.set(color, CASTLE_KING_SIDE, available);
    }

    /// Sets queen side castling rights for `color`
    pub fn set_queen_side(&mut self, color: Color, available: bool) {
        self.set(color, CASTLE_QUEEN_SIDE, available);
    }

    /// Returns `true` if neither side may castle
    pub fn is_empty(self) -> bool {
        self.0.iter().all(|&rights| rights == 0)
    }

    fn set(&mut self, color: Color, flag: u8, available: bool) {
        if available {
            self.0[color as usize] |= flag;
        } else {
            self.0[color as usize] &= !flag;
        }
    }

    /// Flags in FEN order
    fn flags() -> [(char, Color, u8); 4] {
        [
            ('K', Color::White, CASTLE_KING_SIDE),
            ('Q', Color::White, CASTLE_QUEEN_SIDE),
            ('k', Color::Black, CASTLE_KING_SIDE),
            ('q', Color::Black, CASTLE_QUEEN_SIDE),
        ]
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (c, color, flag) in Self::flags().iter() {
            if self.0[*color as usize] & flag != 0 {
                write!(f, "{}", c)?;
            }
        }
        Ok(())
    }
}

impl FromStr for CastlingRights {
    type Err = Error;

    /// Parses the castling module. Flags must appear in `KQkq` order, each at most once.
    fn from_str(s: &str) -> Result<Self> {
        let mut rights = CastlingRights::none();
        if s == "-" {
            return Ok(rights);
        }

        let flags = Self::flags();
        let mut next = 0;
        for c in s.chars() {
            match flags[next..].iter().position(|(flag, _, _)| *flag == c) {
                Some(i) => {
                    let (_, color, flag) = flags[next + i];
                    rights.0[color as usize] |= flag;
                    next += i + 1;
                }
                None => return Err(Error::Grammar(Grammar::Module(3))),
            }
        }
        if next == 0 {
            return Err(Error::Grammar(Grammar::Module(3)));
        }

        Ok(rights)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The six modules of a FEN string in typed form: the expanded placement, the color to move,
/// castling rights, the en passant square, the halfmove clock and the move number.
///
/// A record only comes from a validated string, from the standard starting position, or from a
/// `PositionBuilder` (which validates).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionRecord {
    placement: ExpandedPlacement,
    turn: Color,
    castling: CastlingRights,
    ep_square: Option<Square>,
    halfmove_clock: u32,
    fullmove_number: u32,
}

impl PositionRecord {
    /// Returns the standard starting position
    pub fn new() -> PositionRecord {
        PositionRecord::from_validated(STARTING_FEN).expect("INFALLIBLE")
    }

    /// Builds a record from a FEN string that has already passed `validate`.
    ///
    /// Validation is not repeated. A module that cannot be put in its typed form (for instance a
    /// move number too large for `u32`) is reported as a grammar error for that module.
    pub fn from_validated(raw: &str) -> Result<PositionRecord> {
        let modules = split_modules(raw)?;
        let bad_module = |n| Error::Grammar(Grammar::Module(n));

        Ok(PositionRecord {
            placement: ExpandedPlacement::expand(modules[0])?,
            turn: modules[1].parse()?,
            castling: modules[2].parse()?,
            ep_square: match modules[3] {
                "-" => None,
                square => Some(square.parse().map_err(|_| bad_module(4))?),
            },
            halfmove_clock: modules[4].parse().map_err(|_| bad_module(5))?,
            fullmove_number: modules[5].parse().map_err(|_| bad_module(6))?,
        })
    }

    /// Converts the record to a FEN string
    pub fn to_fen_str(&self) -> String {
        let ep_square = match self.ep_square {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} {} {}", self.placement.compress(), self.turn, self.castling,
                                     ep_square, self.halfmove_clock, self.fullmove_number)
    }

    /// Returns the symbol on the square named by `file` (`'a'` to `'h'`) and `rank` (1 to 8).
    ///
    /// # Example
    /// ```
    /// use fenboard::chess::{PositionRecord, Symbol, Color, Piece, Error};
    /// let pos = PositionRecord::new();
    /// assert_eq!(pos.square_at('e', 1), Ok(Symbol::Piece(Color::White, Piece::King)));
    /// assert_eq!(pos.square_at('e', 4), Ok(Symbol::Empty));
    /// assert_eq!(pos.square_at('e', 9), Err(Error::Bounds));
    /// ```
    pub fn square_at(&self, file: char, rank: u32) -> Result<Symbol> {
        Ok(self.placement.at(Square::from_chars(file, rank)?))
    }

    /// Returns the symbol on `square`
    pub fn symbol_at(&self, square: Square) -> Symbol {
        self.placement.at(square)
    }

    /// Returns the expanded placement
    pub fn placement(&self) -> &ExpandedPlacement {
        &self.placement
    }

    /// Returns the color whose turn it is
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// Returns the castling rights
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    /// Returns the en passant square, if any
    pub fn en_passant(&self) -> Option<Square> {
        self.ep_square
    }

    /// Returns the number of plies since the last capture or pawn move
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    /// Returns the move number. This is normally 1 or more, but a FEN string with a move number
    /// of 0 is accepted and kept as 0.
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }
}

impl Default for PositionRecord {
    /// Returns the standard starting position
    fn default() -> Self {
        PositionRecord::new()
    }
}

impl fmt::Display for PositionRecord {
    /// Writes out the record using FEN
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fen_str())
    }
}

impl FromStr for PositionRecord {
    type Err = Error;

    /// Validates a FEN string, then builds the record from it
    fn from_str(s: &str) -> Result<Self> {
        fen::validate(s)?;
        PositionRecord::from_validated(s)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod builder;
pub mod placement;

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;

    /// PositionRecord::new() must return the standard starting position.
    #[test]
    fn new_returns_the_standard_starting_position() {
        let pos = PositionRecord::new();
        assert_eq!(pos.to_fen_str(), STARTING_FEN);
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.castling(), CastlingRights::all());
        assert_eq!(pos.en_passant(), None);
        assert_eq!(pos.halfmove_clock(), 0);
        assert_eq!(pos.fullmove_number(), 1);
    }

    #[test]
    fn default_is_new() {
        assert_eq!(PositionRecord::default(), PositionRecord::new());
    }

    mod from_validated {
        use super::*;

        #[test]
        fn fields_are_typed() {
            let pos = PositionRecord::from_validated(
                "rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3").expect("valid");
            assert_eq!(pos.turn(), Color::White);
            assert!(pos.castling().king_side(Color::White));
            assert!(!pos.castling().queen_side(Color::White));
            assert!(!pos.castling().king_side(Color::Black));
            assert!(pos.castling().queen_side(Color::Black));
            assert_eq!(pos.en_passant(), Some(Square::from_coord(File::D, Rank::R6)));
            assert_eq!(pos.halfmove_clock(), 0);
            assert_eq!(pos.fullmove_number(), 3);
        }

        #[test]
        fn black_to_move_and_no_castling() {
            let pos = PositionRecord::from_validated("4k3/8/8/8/8/8/8/4K3 b - - 12 40")
                .expect("valid");
            assert_eq!(pos.turn(), Color::Black);
            assert!(pos.castling().is_empty());
            assert_eq!(pos.halfmove_clock(), 12);
            assert_eq!(pos.fullmove_number(), 40);
        }

        #[test]
        fn unrepresentable_move_number_is_reported() {
            assert_eq!(PositionRecord::from_validated("8/8/8/8/8/8/8/8 w - - 0 99999999999"),
                Err(Error::Grammar(Grammar::Module(6))));
        }

        #[test]
        fn zero_move_number_is_kept() {
            let pos: PositionRecord = "8/8/8/8/8/8/8/8 w - - 0 0".parse().expect("valid");
            assert_eq!(pos.fullmove_number(), 0);
        }

        #[test]
        fn wrong_module_count_is_reported() {
            assert_eq!(PositionRecord::from_validated("8/8/8/8/8/8/8/8 w - -"),
                Err(Error::Structure));
        }
    }

    mod from_str {
        use super::*;

        #[test]
        fn validated_strings_always_parse() {
            for raw in &["8/8/8/8/8/8/8/8 w - - 0 4294967295",
                         "8/8/8/8/8/8/8/8 w - - 0 99999999999",
                         "8/8/8/8/8/8/8/8 b - - 99 1"] {
                let parsed = raw.parse::<PositionRecord>().map(|_| ());
                assert_eq!(fen::validate(raw), parsed, "{}", raw);
            }
        }

        #[test]
        fn validation_runs_first() {
            assert_eq!("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1"
                .parse::<PositionRecord>(), Err(Error::EnPassant));
            assert_eq!("rnbqkbnr/pppppppp/8/8/8/P7/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
                .parse::<PositionRecord>(), Err(Error::SupplyExceeded('P')));
        }

        #[test]
        fn back_to_identical_fen() {
            for fen in &[
                STARTING_FEN,
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
                "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
                "4k3/8/8/8/8/8/8/4K3 b Qk - 99 1000",
            ] {
                let pos: PositionRecord = fen.parse().expect("valid fen");
                assert_eq!(pos.to_fen_str(), *fen);
                assert_eq!(pos.to_string(), *fen);
            }
        }

        #[test]
        fn round_trip_is_field_for_field() {
            let pos: PositionRecord = "4k3/8/8/8/8/8/8/4K3 w - - 07 5".parse().expect("valid fen");
            let again: PositionRecord = pos.to_fen_str().parse().expect("still valid");
            assert_eq!(pos, again);
            assert_eq!(again.halfmove_clock(), 7);
        }
    }

    mod square_at {
        use super::*;

        #[test]
        fn standard_position_lookups() {
            let pos = PositionRecord::new();
            assert_eq!(pos.square_at('e', 1), Ok(Symbol::Piece(Color::White, Piece::King)));
            assert_eq!(pos.square_at('e', 4), Ok(Symbol::Empty));
            assert_eq!(pos.square_at('d', 8), Ok(Symbol::Piece(Color::Black, Piece::Queen)));
            assert_eq!(pos.square_at('b', 7), Ok(Symbol::Piece(Color::Black, Piece::Pawn)));
            assert_eq!(pos.square_at('g', 1), Ok(Symbol::Piece(Color::White, Piece::Knight)));
        }

        #[test]
        fn out_of_range_is_a_bounds_error() {
            let pos = PositionRecord::new();
            assert_eq!(pos.square_at('i', 1), Err(Error::Bounds));
            assert_eq!(pos.square_at('a', 0), Err(Error::Bounds));
            assert_eq!(pos.square_at('a', 9), Err(Error::Bounds));
            assert_eq!(pos.square_at('E', 1), Err(Error::Bounds));
        }

        #[test]
        fn all_sixty_four_squares_agree_with_the_placement() {
            let pos = PositionRecord::new();
            let expanded = pos.placement().to_string().replace('/', "");
            let mut symbols = expanded.chars();
            for rank in (1..=8).rev() {
                for file in "abcdefgh".chars() {
                    assert_eq!(pos.square_at(file, rank).expect("on the board").to_char(),
                               symbols.next().expect("64 symbols"));
                }
            }
        }
    }

    mod castling_rights {
        use super::*;

        #[test]
        fn display_uses_canonical_order() {
            let mut rights = CastlingRights::none();
            assert_eq!(rights.to_string(), "-");
            rights.set_queen_side(Color::Black, true);
            rights.set_king_side(Color::White, true);
            assert_eq!(rights.to_string(), "Kq");
            assert_eq!(CastlingRights::all().to_string(), "KQkq");
            rights.set_king_side(Color::White, false);
            assert_eq!(rights.to_string(), "q");
        }

        #[test]
        fn fromstr_rejects_repeats_and_disorder() {
            assert_eq!("KQkq".parse::<CastlingRights>(), Ok(CastlingRights::all()));
            assert_eq!("-".parse::<CastlingRights>(), Ok(CastlingRights::none()));
            for bad in &["", "KK", "qk", "Qk-", "x"] {
                assert_eq!(bad.parse::<CastlingRights>(), Err(Error::Grammar(Grammar::Module(3))));
            }
        }
    }
}
