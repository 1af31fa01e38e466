//! Validation of positions written in Forsyth-Edwards Notation (FEN)
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
use super::position::placement::ExpandedPlacement;

/// The number of space separated modules in a FEN string
pub const MODULE_COUNT: usize = 6;

/// Grammar of each module: placement, color to move, castling ability, en passant square,
/// halfmove clock and move number.
const GRAMMARS: [&str; MODULE_COUNT] = [
    r"^[KQRBNPkqrbnp1-8]{1,8}(?:/[KQRBNPkqrbnp1-8]{1,8}){7}$",
    r"^[wb]$",
    r"^(?:-|K?Q?k?q?)$",
    r"^(?:-|[a-h][1-8])$",
    r"^[0-9]{1,2}$",
    r"^[0-9]+$",
];

lazy_static! {
    static ref MODULE_GRAMMARS: Vec<Regex> = {
        let mut grammars = Vec::new();
        for grammar in &GRAMMARS {
            grammars.push(Regex::new(grammar).expect("INFALLIBLE"));
        }
        grammars
    };
}

/// Checks that `raw` is a well-formed and consistent FEN string.
///
/// The checks run in order and stop at the first failure:
///
/// 1. the string splits on single spaces into exactly six modules
/// 2. each module matches its grammar
/// 3. every rank adds up to eight files and no side has more pieces of a type than a standard
///    set contains
/// 4. an en passant square has the pawn that just passed it on the square in front of it
///
/// Whether the side not to move is in check is not examined.
///
/// # Example
/// ```
/// use fenboard::chess::{validate, Error};
/// assert_eq!(validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"), Ok(()));
/// assert_eq!(validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq -"),
///            Err(Error::Structure));
/// ```
pub fn validate(raw: &str) -> Result<()> {
    let modules = split_modules(raw)?;
    check_grammar(&modules)?;
    count_pieces(modules[0])?;
    check_en_passant(&modules)
}

/// Splits a FEN string into its six modules
pub(crate) fn split_modules(raw: &str) -> Result<[&str; MODULE_COUNT]> {
    // a trailing space leaves an empty seventh module; callers trim user input first
    let modules: Vec<&str> = raw.split(' ').collect();
    if modules.len() != MODULE_COUNT {
        return Err(Error::Structure);
    }

    Ok([modules[0], modules[1], modules[2], modules[3], modules[4], modules[5]])
}

fn check_grammar(modules: &[&str; MODULE_COUNT]) -> Result<()> {
    for (i, (module, grammar)) in modules.iter().zip(MODULE_GRAMMARS.iter()).enumerate() {
        // the castling grammar alone would accept an empty module
        if module.is_empty() || !grammar.is_match(module) {
            return Err(Error::Grammar(Grammar::Module(i + 1)));
        }
    }

    // both counters must fit the record's u32 fields
    for &i in &[4, 5] {
        if modules[i].parse::<u32>().is_err() {
            return Err(Error::Grammar(Grammar::Module(i + 1)));
        }
    }

    Ok(())
}

/// Walks the placement once, counting files per rank and pieces per color and type
fn count_pieces(placement: &str) -> Result<()> {
    let mut supply = [[0u8; Piece::COUNT]; Color::COUNT];
    for color in 0..Color::COUNT {
        for piece in Piece::ALL.iter() {
            supply[color][*piece as usize] = piece.supply();
        }
    }

    let mut rank = 1;
    let mut files_left = File::COUNT as i32;
    for c in placement.chars() {
        match c {
            '/' => {
                if files_left != 0 {
                    return Err(Error::RankLength(rank));
                }
                files_left = File::COUNT as i32;
                rank += 1;
            }
            '1' ..= '8' => files_left -= c.to_digit(10).expect("INFALLIBLE") as i32,
            _ => {
                let piece = Piece::from_char(c).ok_or(Error::Grammar(Grammar::Module(1)))?;
                let left = &mut supply[Color::of_letter(c) as usize][piece as usize];
                if *left == 0 {
                    return Err(Error::SupplyExceeded(c));
                }
                *left -= 1;
                files_left -= 1;
            }
        }
    }
    if files_left != 0 {
        return Err(Error::RankLength(rank));
    }

    Ok(())
}

/// A target on the 6th rank belongs with White to move and needs a black pawn on the 5th; a
/// target on the 3rd belongs with Black to move and needs a white pawn on the 4th.
fn check_en_passant(modules: &[&str; MODULE_COUNT]) -> Result<()> {
    if modules[3] == "-" {
        return Ok(());
    }

    let target: Square = modules[3].parse()?;
    let turn: Color = modules[1].parse()?;
    let (pawn_rank, pawn) = match (target.rank(), turn) {
        (Rank::R6, Color::White) => (Rank::R5, Symbol::Piece(Color::Black, Piece::Pawn)),
        (Rank::R3, Color::Black) => (Rank::R4, Symbol::Piece(Color::White, Piece::Pawn)),
        _ => return Err(Error::EnPassant),
    };

    let placement = ExpandedPlacement::expand(modules[0])?;
    if placement.at(Square::from_coord(target.file(), pawn_rank)) != pawn {
        return Err(Error::EnPassant);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    #[test]
    fn standard_starting_position_is_valid() {
        assert_eq!(validate(START), Ok(()));
    }

    #[test]
    fn wrong_module_count_is_a_structure_error() {
        assert_eq!(validate(""), Err(Error::Structure));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0"), Err(Error::Structure));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 1 extra"), Err(Error::Structure));
        // modules are separated by exactly one space
        assert_eq!(validate("8/8/8/8/8/8/8/8 w  - - 0 1"), Err(Error::Structure));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 1 "), Err(Error::Structure));
        assert_eq!(validate("8/8/8/8/8/8/8/8\tw - - 0 1"), Err(Error::Structure));
    }

    #[test]
    fn structure_is_checked_before_grammar() {
        assert_eq!(validate("x x x"), Err(Error::Structure));
    }

    #[test]
    fn bad_placement_is_module_1() {
        let bad = [
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR/8 w KQkq - 0 1",
            "rnbqkbnr/pppppppp/9/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp/0/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/pppppppp//8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppxppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "rnbqkbnr/ppppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        ];
        for fen in bad.iter() {
            assert_eq!(validate(fen), Err(Error::Grammar(Grammar::Module(1))), "{}", fen);
        }
    }

    #[test]
    fn bad_color_is_module_2() {
        assert_eq!(validate("8/8/8/8/8/8/8/8 x - - 0 1"), Err(Error::Grammar(Grammar::Module(2))));
        assert_eq!(validate("8/8/8/8/8/8/8/8 W - - 0 1"), Err(Error::Grammar(Grammar::Module(2))));
        assert_eq!(validate("8/8/8/8/8/8/8/8 wb - - 0 1"), Err(Error::Grammar(Grammar::Module(2))));
    }

    #[test]
    fn castling_flags_must_be_in_canonical_order_without_repeats() {
        for flags in &["K", "Q", "k", "q", "KQ", "Kk", "Qq", "KQkq", "Kq", "-"] {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {} - 0 1", flags);
            assert_eq!(validate(&fen), Ok(()), "{}", fen);
        }
        for flags in &["KK", "QK", "qk", "kQ", "x", "--", "K-", "KQkqK"] {
            let fen = format!("r3k2r/8/8/8/8/8/8/R3K2R w {} - 0 1", flags);
            assert_eq!(validate(&fen), Err(Error::Grammar(Grammar::Module(3))), "{}", fen);
        }
    }

    #[test]
    fn bad_en_passant_square_is_module_4() {
        for ep in &["e9", "i6", "E6", "e", "e66", "6e"] {
            let fen = format!("8/8/8/8/8/8/8/8 w - {} 0 1", ep);
            assert_eq!(validate(&fen), Err(Error::Grammar(Grammar::Module(4))), "{}", fen);
        }
    }

    #[test]
    fn halfmove_clock_is_one_or_two_digits() {
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 99 1"), Ok(()));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 07 1"), Ok(()));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 100 1"),
            Err(Error::Grammar(Grammar::Module(5))));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - x 1"), Err(Error::Grammar(Grammar::Module(5))));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - -1 1"),
            Err(Error::Grammar(Grammar::Module(5))));
    }

    #[test]
    fn move_number_is_any_run_of_digits() {
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 9999"), Ok(()));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 x"), Err(Error::Grammar(Grammar::Module(6))));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 +1"),
            Err(Error::Grammar(Grammar::Module(6))));
        // only ASCII digits count
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 ١"), Err(Error::Grammar(Grammar::Module(6))));
    }

    #[test]
    fn move_number_must_fit_the_record() {
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 4294967295"), Ok(()));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 4294967296"),
            Err(Error::Grammar(Grammar::Module(6))));
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 99999999999"),
            Err(Error::Grammar(Grammar::Module(6))));
        // leading zeros are still digits
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 00 000000000000000001"), Ok(()));
    }

    #[test]
    fn first_failing_module_is_reported() {
        assert_eq!(validate("8/8/8/8/8/8/8/8 x y - 0 1"), Err(Error::Grammar(Grammar::Module(2))));
    }

    #[test]
    fn short_rank_is_named() {
        assert_eq!(validate("rnbqkbnr/pppppppp/8/8/7/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(Error::RankLength(5)));
        assert_eq!(validate("rnbqkbn/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(Error::RankLength(1)));
    }

    #[test]
    fn long_rank_is_named() {
        assert_eq!(validate("rnbqkbnr/pppppppp/18/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(Error::RankLength(3)));
        assert_eq!(validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN2 w KQkq - 0 1"),
            Err(Error::RankLength(8)));
    }

    #[test]
    fn last_rank_is_counted_too() {
        assert_eq!(validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBN w KQkq - 0 1"),
            Err(Error::RankLength(8)));
    }

    #[test]
    fn ninth_pawn_exceeds_supply() {
        assert_eq!(validate("rnbqkbnr/pppppppp/8/8/8/P7/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(Error::SupplyExceeded('P')));
        assert_eq!(validate("rnbqkbnr/pppppppp/p7/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            Err(Error::SupplyExceeded('p')));
    }

    #[test]
    fn every_supply_limit_is_enforced() {
        let cases = [
            ("KK6/8/8/8/8/8/8/8 w - - 0 1", 'K'),
            ("qq6/8/8/8/8/8/8/8 w - - 0 1", 'q'),
            ("RRR5/8/8/8/8/8/8/8 w - - 0 1", 'R'),
            ("bbb5/8/8/8/8/8/8/8 w - - 0 1", 'b'),
            ("NNN5/8/8/8/8/8/8/8 w - - 0 1", 'N'),
        ];
        for (fen, c) in cases.iter() {
            assert_eq!(validate(fen), Err(Error::SupplyExceeded(*c)), "{}", fen);
        }
    }

    #[test]
    fn first_violation_in_scan_order_wins() {
        // the extra queen comes before the end of the over-long first rank
        assert_eq!(validate("qq7/8/8/8/8/8/8/8 w - - 0 1"), Err(Error::SupplyExceeded('q')));
        // the short rank ends before the extra pawn is reached
        assert_eq!(validate("7/pppppppp/p7/8/8/8/8/8 w - - 0 1"), Err(Error::RankLength(1)));
    }

    #[test]
    fn empty_board_passes_without_kings() {
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - - 0 1"), Ok(()));
    }

    #[test]
    fn en_passant_target_on_rank_3_needs_black_to_move() {
        assert_eq!(validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1"),
            Err(Error::EnPassant));
        assert_eq!(validate("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"),
            Ok(()));
    }

    #[test]
    fn en_passant_target_on_rank_6_needs_white_to_move() {
        assert_eq!(validate("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w KQkq d6 0 3"),
            Ok(()));
        assert_eq!(validate("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR b KQkq d6 0 3"),
            Err(Error::EnPassant));
    }

    #[test]
    fn en_passant_target_needs_the_passing_pawn() {
        assert_eq!(validate("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1"),
            Err(Error::EnPassant));
        // a pawn of the wrong color does not count
        assert_eq!(validate("rnbqkbnr/pppppppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 1"),
            Err(Error::EnPassant));
        // neither does a pawn on a neighbouring file
        assert_eq!(validate("rnbqkbnr/ppp1pppp/8/3p4/8/8/PPPPPPPP/RNBQKBNR w KQkq e6 0 1"),
            Err(Error::EnPassant));
    }

    #[test]
    fn en_passant_target_on_other_ranks_is_rejected() {
        assert_eq!(validate("8/8/8/8/8/8/8/8 w - e4 0 1"), Err(Error::EnPassant));
        assert_eq!(validate("8/8/8/8/8/8/8/8 b - e5 0 1"), Err(Error::EnPassant));
    }

    #[test]
    fn split_modules_keeps_module_text() {
        let modules = split_modules(START).expect("six modules");
        assert_eq!(modules, ["rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR", "w", "KQkq", "-",
                             "0", "1"]);
    }
}
