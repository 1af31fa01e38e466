//! Validates, displays and steps through chess positions written in Forsyth-Edwards Notation.
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
#![warn(missing_docs, missing_debug_implementations, unused_extern_crates)]
#![warn(clippy::unimplemented, clippy::todo)]
#![warn(clippy::option_unwrap_used, clippy::result_unwrap_used)]

use std::fs::File;
use std::io::{stdin, stdout};
use std::path::{Path, PathBuf};
use clap::{App, Arg, SubCommand, crate_version};
use log::{info, warn};
use simplelog::{WriteLogger, LevelFilter, Config as LogConfig};
use fenboard::chess::{self, validate, validate_move_token, PositionRecord, Unsupported};
use fenboard::config::{Config, ConfigError};
use fenboard::display::{render, GlyphSet};
use fenboard::session::{LineInput, Outcome, Session, SessionError};

fn main() -> Result<(), Error> {
    let matches =
        App::new("FEN Board")
            .version(crate_version!())
            .author("Mike Leany")
            .about("Validates chess positions in Forsyth-Edwards Notation (FEN). With no \
                    subcommand,\nstarts an interactive session.")
            .arg(Arg::with_name("config")
                .long("config")
                .short("c")
                .global(true)
                .value_name("FILE")
                .takes_value(true)
                .help("Reads settings from FILE instead of ~/.fenboard/config.yaml"))
            .arg(Arg::with_name("log")
                .long("log")
                .short("l")
                .global(true)
                .help("Turns on logging"))
            .arg(Arg::with_name("log-file")
                .long("log-file")
                .global(true)
                .value_name("LOG_FILE")
                .takes_value(true)
                .default_value("fenboard.log")
                .help("Sets the log file if logging is turned on"))
            .arg(Arg::with_name("log-level")
                .long("log-level")
                .global(true)
                .value_name("LEVEL")
                .takes_value(true)
                .default_value("info")
                .help("Sets the log level if logging is turned on"))
            .subcommand(SubCommand::with_name("validate")
                .about("Checks each position and reports whether it is valid")
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .required(true)
                    .multiple(true)
                    .help("Position in Forsyth-Edwards Notation (FEN), quoted as one argument")))
            .subcommand(SubCommand::with_name("show")
                .about("Draws a position. Defaults to the standard starting position.")
                .arg(Arg::with_name("ascii")
                    .long("ascii")
                    .short("a")
                    .help("Draws pieces with letters instead of figurines"))
                .arg(Arg::with_name("fen")
                    .value_name("FEN_STRING")
                    .default_value(chess::STARTING_FEN)
                    .hide_default_value(true)
                    .help("Position in Forsyth-Edwards Notation (FEN)")))
            .subcommand(SubCommand::with_name("check-move")
                .about("Checks that each move is written in long algebraic notation")
                .arg(Arg::with_name("move")
                    .value_name("MOVE")
                    .required(true)
                    .multiple(true)
                    .help("Move such as e2e4, Ng1f3 or e7e8=Q")))
            .get_matches();

    let log_file = PathBuf::from(matches.value_of_os("log-file").expect("INFALLIBLE"));
    let log_level = match matches.value_of("log-level") {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("info") => LevelFilter::Info,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        Some(level) => return Err(Error(format!("{}: invalid log level", level))),
        None => unreachable!(),
    };

    let _logger = if matches.is_present("log") {
        WriteLogger::init(
            log_level,
            LogConfig::default(),
            File::create(&log_file).map_err(|err| {
                Error(format!("{}: {}", log_file.display(), err))
            })?)
    } else {
        WriteLogger::init(LevelFilter::Off, LogConfig::default(), std::io::sink())
    };

    let config_path = matches.value_of_os("config").map(Path::new);
    let config = Config::discover(config_path)?;
    info!("{:?}", config);

    match matches.subcommand() {
        (_, None) => {
            let stdin = stdin();
            let stdout = stdout();
            let mut session =
                Session::new(LineInput::new(stdin.lock()), stdout.lock(), Unsupported, &config);
            match session.run()? {
                Outcome::Declined => info!("session ended without a game"),
                Outcome::Paused(record) => info!("session paused at {}", record),
            }
        },
        ("validate", Some(matches)) => {
            let mut failures = 0;
            for fen in matches.values_of("fen").expect("INFALLIBLE") {
                match validate(fen) {
                    Ok(()) => println!("{}: valid", fen),
                    Err(err) => {
                        warn!("{}: {}", fen, err);
                        println!("{}: Invalid FEN: {}", fen, err);
                        failures += 1;
                    },
                }
            }
            if failures > 0 {
                return Err(Error(format!("{} invalid position(s)", failures)));
            }
        },
        ("show", Some(matches)) => {
            let fen = matches.value_of("fen").expect("INFALLIBLE");
            let record: PositionRecord = fen.parse()
                .map_err(|err| Error(format!("{}: Invalid FEN: {}", fen, err)))?;
            let glyphs = if matches.is_present("ascii") { GlyphSet::Ascii } else { config.glyphs };
            println!();
            print!("{}", render(&record, glyphs, config.orientation));
            println!("{}", record);
        },
        ("check-move", Some(matches)) => {
            let mut failures = 0;
            for token in matches.values_of("move").expect("INFALLIBLE") {
                match validate_move_token(token) {
                    Ok(()) => println!("{}: valid", token),
                    Err(err) => {
                        warn!("{}: {}", token, err);
                        println!("{}: Invalid move: {}", token, err);
                        failures += 1;
                    },
                }
            }
            if failures > 0 {
                return Err(Error(format!("{} invalid move(s)", failures)));
            }
        },
        _ => unreachable!(),
    }

    Ok(())
}

struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error { }

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error(err.to_string())
    }
}

impl From<SessionError> for Error {
    fn from(err: SessionError) -> Self {
        Error(err.to_string())
    }
}
