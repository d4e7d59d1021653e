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

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The score of a match, stored on disk as a `[player_one, player_two]` pair.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub enum Outcome {
    #[default]
    Pending,
    Draw,
    PlayerOneWins,
    PlayerTwoWins,
}

impl Outcome {
    #[must_use]
    pub fn points(self) -> (f64, f64) {
        match self {
            Self::Pending => (0.0, 0.0),
            Self::Draw => (0.5, 0.5),
            Self::PlayerOneWins => (1.0, 0.0),
            Self::PlayerTwoWins => (0.0, 1.0),
        }
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }
}

impl From<Outcome> for [f64; 2] {
    fn from(outcome: Outcome) -> Self {
        let (one, two) = outcome.points();
        [one, two]
    }
}

impl TryFrom<[f64; 2]> for Outcome {
    type Error = Error;

    #[allow(clippy::float_cmp)]
    fn try_from([one, two]: [f64; 2]) -> Result<Self, Error> {
        [
            Self::Pending,
            Self::Draw,
            Self::PlayerOneWins,
            Self::PlayerTwoWins,
        ]
        .into_iter()
        .find(|outcome| outcome.points() == (one, two))
        .ok_or_else(|| Error::InvalidTournament(format!("invalid match score [{one}, {two}]")))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (one, two) = self.points();
        write!(f, "{one} - {two}")
    }
}

/// What the operator answers when asked for a match result.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Decision {
    Draw,
    PlayerOneWins,
    PlayerTwoWins,
    Pause,
}

impl Decision {
    /// The outcome to record, `None` when the operator wants to stop here.
    #[must_use]
    pub fn outcome(self) -> Option<Outcome> {
        match self {
            Self::Draw => Some(Outcome::Draw),
            Self::PlayerOneWins => Some(Outcome::PlayerOneWins),
            Self::PlayerTwoWins => Some(Outcome::PlayerTwoWins),
            Self::Pause => None,
        }
    }
}

impl FromStr for Decision {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> anyhow::Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "1" | "draw" => Ok(Self::Draw),
            "2" | "one" => Ok(Self::PlayerOneWins),
            "3" | "two" => Ok(Self::PlayerTwoWins),
            "4" | "pause" => Ok(Self::Pause),
            _ => Err(anyhow::Error::msg(format!("invalid decision: {value}"))),
        }
    }
}
