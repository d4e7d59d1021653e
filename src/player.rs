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

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ChessId;

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Player {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub chess_id: ChessId,
    #[serde(default)]
    pub score: f64,
}

impl Player {
    #[must_use]
    pub fn new(new_player: NewPlayer, chess_id: ChessId) -> Self {
        Self {
            first_name: new_player.first_name,
            last_name: new_player.last_name,
            birth_date: new_player.birth_date,
            chess_id,
            score: 0.0,
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The (first name, last name) ordering used by the alphabetical reports.
    #[must_use]
    pub fn alphabetical_key(&self) -> (&str, &str) {
        (&self.first_name, &self.last_name)
    }
}

/// What the operator enters for a player, before an id is handed out.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewPlayer {
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
}
