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

use std::{io, path::PathBuf};

use thiserror::Error;

use crate::ChessId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("tournament: a tournament named '{0}' already exists")]
    AlreadyExists(String),
    #[error("tournament: '{name}' already has all of its {number_of_rounds} rounds")]
    CapacityExceeded { name: String, number_of_rounds: u32 },
    #[error("pairing: an even number of players is needed, got {0}")]
    InvalidRosterSize(usize),
    #[error("tournament: {0}")]
    InvalidTournament(String),
    #[error("data file {}: {reason}", path.display())]
    MalformedPersistedState { path: PathBuf, reason: String },
    #[error("result: {round}, match {id} already has a result")]
    MatchAlreadyResolved { round: String, id: u32 },
    #[error("tournament: there is no tournament named '{0}'")]
    NotFound(String),
    #[error("round: {0} still has matches without a result")]
    RoundIncomplete(String),
    #[error("result: there is no player with the chess id {0}")]
    UnknownPlayer(ChessId),

    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Errors the operator can fix by choosing differently, as opposed to
    /// broken data or a failing disk.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::AlreadyExists(_)
                | Self::InvalidRosterSize(_)
                | Self::InvalidTournament(_)
                | Self::NotFound(_)
        )
    }
}
