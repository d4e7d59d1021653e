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

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    chess_match::Match,
    error::{Error, Result},
};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Round {
    pub name: String,
    #[serde(default)]
    pub matches: Vec<Match>,
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RoundState {
    NotStarted,
    Active,
    Completed,
}

impl fmt::Display for RoundState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => write!(f, "not started"),
            Self::Active => write!(f, "active"),
            Self::Completed => write!(f, "completed"),
        }
    }
}

/// Whether a round that already exists keeps the start time it was given in an
/// earlier session.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Resume {
    No,
    #[default]
    Yes,
}

impl From<bool> for Resume {
    fn from(boolean: bool) -> Self {
        if boolean { Self::Yes } else { Self::No }
    }
}

impl Round {
    #[must_use]
    pub fn new(number: u32, matches: Vec<Match>) -> Self {
        Self {
            name: Self::name_for(number),
            matches,
            start_time: None,
            end_time: None,
        }
    }

    /// Rounds are called "Round 1", "Round 2", ...
    #[must_use]
    pub fn name_for(number: u32) -> String {
        format!("Round {number}")
    }

    #[must_use]
    pub fn state(&self) -> RoundState {
        match (self.start_time, self.end_time) {
            (_, Some(_)) => RoundState::Completed,
            (Some(_), None) => RoundState::Active,
            (None, None) => RoundState::NotStarted,
        }
    }

    /// Stamps the start time. A completed round is left as it is.
    pub fn start(&mut self, now: NaiveDateTime, resume: Resume) {
        if self.end_time.is_some() {
            return;
        }

        if self.start_time.is_none() || resume == Resume::No {
            self.start_time = Some(now);
        }
    }

    #[must_use]
    pub fn all_resolved(&self) -> bool {
        self.matches.iter().all(Match::is_resolved)
    }

    /// Index of the first match still waiting for a result.
    #[must_use]
    pub fn next_pending(&self) -> Option<usize> {
        self.matches.iter().position(|game| !game.is_resolved())
    }

    #[must_use]
    pub fn resolved_count(&self) -> usize {
        self.matches.iter().filter(|game| game.is_resolved()).count()
    }

    /// # Errors
    ///
    /// If a match has no result yet.
    pub fn finish(&mut self, now: NaiveDateTime) -> Result<()> {
        if !self.all_resolved() {
            return Err(Error::RoundIncomplete(self.name.clone()));
        }

        if self.end_time.is_none() {
            self.end_time = Some(now);
        }

        Ok(())
    }
}
