//! The interactive prompt loop: choose a position, accept the rules, then enter moves until the
//! game is paused.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::io::{self, BufRead, Write};
use log::{debug, info, warn};
use crate::chess::{self, Color, MoveApplier, MoveToken, PositionRecord};
use crate::config::Config;
use crate::display::{render, GlyphSet, Orientation};

const POSITION_PROMPT: &str =
    "Enter starting position using FEN notation or press enter for standard position: ";

const MOVE_PROMPT: &str = "Please enter your move in expanded algebraic notation: ";

const RULES: &str = "\
Know all moves must be expressed in expanded algebraic notation.
If unsure about how to express a move, input \"help\" at any time.
In case of exit, enter \"stop\" at any time to pause the game and
receive the FEN to pick up the game at another time.";

const HELP: &str = "
-------------------------------------------------------
Expanded algebraic notation requires that you write
start and end position of every piece moved; if the
piece is not a pawn, the piece letter (K, Q, R, B, N)
should also be included before the move. If a move is
a capture, include \"x\" in between the start and end
positions. If a move gives check, add \"+\" to the very
end of the notation (after special moves); if
checkmate, add \"#\".
See https://en.wikipedia.org/wiki/Chess_notation for
examples, under \"Long algebraic.\"

Special moves:
Castling is written as the king's move, e.g. \"Ke1g1\".
In the case of pawn promotion, add \"=X\" on the end of
the notation, where X is the promoted piece letter.
En passant should be recorded as a standard capture.
-------------------------------------------------------
";

const NOT_OVER: &str =
    "   But the game's not over! Save the FEN and input it when you come back to keep playing!";

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A source of user input, one line at a time
pub trait Input {
    /// Returns the next line with surrounding whitespace removed, or `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Reads lines from any buffered reader, such as a locked stdin or an in-memory buffer. Each line
/// read is logged using the log crate (assuming a logger is set up).
#[derive(Debug)]
pub struct LineInput<R> {
    reader: R,
}

impl<R: BufRead> LineInput<R> {
    /// Creates a new `LineInput` reading from `reader`
    pub fn new(reader: R) -> Self {
        LineInput { reader }
    }
}

impl<R: BufRead> Input for LineInput<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            debug!("<user>: end of input");
            return Ok(None);
        }
        let line = line.trim().to_string();
        info!("<user>: {}", line);
        Ok(Some(line))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// How many invalid entries in a row a prompt accepts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RetryPolicy {
    /// Keep prompting forever
    Unbounded,
    /// Give up after this many invalid entries in a row. `Bounded(0)` behaves like `Bounded(1)`:
    /// the first invalid entry ends the session.
    Bounded(usize),
}

impl RetryPolicy {
    fn allows(self, failures: usize) -> bool {
        match self {
            RetryPolicy::Unbounded => true,
            RetryPolicy::Bounded(max) => failures < max,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::Unbounded
    }
}

/// How a session that did not fail came to an end
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The user did not accept the rules, or input ended before a game started
    Declined,
    /// The game was paused in the given position
    Paused(PositionRecord),
}

/// A session that could not continue
#[derive(Debug)]
pub enum SessionError {
    /// Reading input or writing output failed
    Io(io::Error),
    /// Too many invalid entries were made in a row
    RetriesExhausted,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Io(err) => write!(f, "io error: {}", err),
            SessionError::RetriesExhausted => write!(f, "too many invalid entries"),
        }
    }
}

impl std::error::Error for SessionError { }

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        SessionError::Io(err)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An interactive session over some input and output.
///
/// Validation itself never retries; re-prompting after an invalid position or move is up to the
/// session and its `RetryPolicy`.
#[derive(Debug)]
pub struct Session<I, W, A> {
    input: I,
    output: W,
    applier: A,
    glyphs: GlyphSet,
    orientation: Orientation,
    retry: RetryPolicy,
}

impl<I: Input, W: Write, A: MoveApplier> Session<I, W, A> {
    /// Creates a new session. Moves are handed to `applier` once they pass validation.
    pub fn new(input: I, output: W, applier: A, config: &Config) -> Self {
        Session {
            input,
            output,
            applier,
            glyphs: config.glyphs,
            orientation: config.orientation,
            retry: config.retry_policy(),
        }
    }

    /// Runs the session to its end
    pub fn run(&mut self) -> Result<Outcome, SessionError> {
        let record = match self.choose_position()? {
            Some(record) => record,
            None => {
                info!("input ended before a position was chosen");
                return Ok(Outcome::Declined);
            },
        };

        writeln!(self.output)?;
        writeln!(self.output, "{}", RULES)?;
        writeln!(self.output, "Enter \"Y\" to begin game.")?;
        match self.prompt("   ")?.as_deref() {
            Some("Y") | Some("y") => self.play(record),
            _ => {
                writeln!(self.output, "Unrecognized input. Terminating session.")?;
                info!("rules declined");
                Ok(Outcome::Declined)
            },
        }
    }

    fn choose_position(&mut self) -> Result<Option<PositionRecord>, SessionError> {
        let mut failures = 0;

        loop {
            let line = match self.prompt(POSITION_PROMPT)? {
                Some(line) => line,
                None => return Ok(None),
            };

            if line.is_empty() {
                writeln!(self.output, "Standard game initiated.")?;
                info!("starting from the standard position");
                return Ok(Some(PositionRecord::new()));
            }

            match line.parse::<PositionRecord>() {
                Ok(record) => {
                    writeln!(self.output, "Valid FEN entered!")?;
                    info!("starting from {}", record);
                    return Ok(Some(record));
                },
                Err(err) => {
                    warn!("{}: {}", line, err);
                    writeln!(self.output, "Invalid FEN: {}", err)?;
                    writeln!(self.output)?;
                    self.count_failure(&mut failures)?;
                },
            }
        }
    }

    fn play(&mut self, mut record: PositionRecord) -> Result<Outcome, SessionError> {
        let mut failures = 0;
        let mut show_board = true;

        loop {
            if show_board {
                writeln!(self.output)?;
                write!(self.output, "{}", render(&record, self.glyphs, self.orientation))?;
            }
            show_board = true;

            match record.turn() {
                Color::White => writeln!(self.output, "White to move.")?,
                Color::Black => writeln!(self.output, "Black to move.")?,
            }

            let line = match self.prompt(MOVE_PROMPT)? {
                Some(line) => line,
                None => return self.pause(record),
            };

            match line.as_str() {
                "help" | "Help" => {
                    writeln!(self.output, "{}", HELP)?;
                    show_board = false;
                    continue;
                },
                "stop" | "Stop" => return self.pause(record),
                _ => { },
            }

            match self.apply(&record, &line) {
                Ok(next) => {
                    info!("{}: {}", line, next);
                    record = next;
                    failures = 0;
                },
                Err(msg) => {
                    warn!("{}: {}", line, msg);
                    writeln!(self.output, "Invalid move: {}", msg)?;
                    self.count_failure(&mut failures)?;
                },
            }
        }
    }

    fn apply(&mut self, record: &PositionRecord, line: &str) -> Result<PositionRecord, String> {
        let token: MoveToken = line.parse().map_err(|err: chess::Error| err.to_string())?;
        self.applier.apply_move(record, &token).map_err(|err| err.to_string())
    }

    fn pause(&mut self, record: PositionRecord) -> Result<Outcome, SessionError> {
        writeln!(self.output, "Your FEN is:")?;
        writeln!(self.output, "{}", record)?;
        writeln!(self.output, "{}", NOT_OVER)?;
        info!("paused at {}", record);
        Ok(Outcome::Paused(record))
    }

    fn prompt(&mut self, text: &str) -> Result<Option<String>, SessionError> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        Ok(self.input.read_line()?)
    }

    fn count_failure(&mut self, failures: &mut usize) -> Result<(), SessionError> {
        *failures += 1;
        if self.retry.allows(*failures) {
            Ok(())
        } else {
            warn!("giving up after {} invalid entries", failures);
            Err(SessionError::RetriesExhausted)
        }
    }
}
