//! A console chess tournament manager.
//!
//! Tournaments, their players and their rounds live in one JSON file. Each
//! round pairs the roster at random, the operator enters match results one at
//! a time, and every change is saved right away so a tournament can be paused
//! in the middle of a round and resumed in a later session.
//!
//! The [`engine::Engine`] drives a tournament through a [`store::Store`] and a
//! [`presenter::Presenter`]; the `chess-tournament` binary provides the console
//! for both.

// This file is part of chess-tournament.
//
// chess-tournament is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// chess-tournament is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#![deny(clippy::panic)]

pub mod chess_id;
pub mod chess_match;
pub mod engine;
pub mod error;
pub mod export;
pub mod outcome;
pub mod pairing;
pub mod player;
pub mod presenter;
pub mod report;
pub mod round;
pub mod store;
pub mod tournament;
pub mod utils;

pub use error::{Error, Result};

/// A generated player id such as `AB12345`.
pub type ChessId = String;

pub const HOME: &str = "chess-tournament";
pub const DATA_FILE: &str = "tournaments.json";
pub const REPORTS_FOLDER: &str = "reports";

pub const COPYRIGHT: &str = r".SH COPYRIGHT
Copyright (C) 2026 Developers of the chess-tournament project

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU Affero General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU Affero General Public License for more details.

You should have received a copy of the GNU Affero General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>.
";

pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "
Copyright (c) 2026 Developers of the chess-tournament project
Licensed under the AGPLv3"
);
