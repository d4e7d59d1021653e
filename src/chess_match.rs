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

use serde::{Deserialize, Deserializer, Serialize};

use crate::{ChessId, outcome::Outcome, player::Player};

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Match {
    #[serde(default)]
    pub id: u32,
    #[serde(deserialize_with = "deserialize_players")]
    pub players: [ChessId; 2],
    #[serde(default)]
    pub score: Outcome,
}

impl Match {
    #[must_use]
    pub fn new(id: u32, player_one: ChessId, player_two: ChessId) -> Self {
        Self {
            id,
            players: [player_one, player_two],
            score: Outcome::Pending,
        }
    }

    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.score.is_pending()
    }

    #[must_use]
    pub fn player_one(&self) -> &str {
        &self.players[0]
    }

    #[must_use]
    pub fn player_two(&self) -> &str {
        &self.players[1]
    }
}

/// Older data files embed whole player records in each match.
#[derive(Deserialize)]
#[serde(untagged)]
enum PlayerRef {
    Id(ChessId),
    Record(Box<Player>),
}

impl From<PlayerRef> for ChessId {
    fn from(player: PlayerRef) -> Self {
        match player {
            PlayerRef::Id(id) => id,
            PlayerRef::Record(player) => player.chess_id,
        }
    }
}

fn deserialize_players<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<[ChessId; 2], D::Error> {
    let [one, two] = <[PlayerRef; 2]>::deserialize(deserializer)?;
    Ok([one.into(), two.into()])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn players_are_written_as_ids() -> anyhow::Result<()> {
        let game = Match::new(1, "AB12345".to_string(), "CD67890".to_string());
        let value = serde_json::to_value(&game)?;

        assert_eq!(
            value,
            serde_json::json!({"id": 1, "players": ["AB12345", "CD67890"], "score": [0.0, 0.0]})
        );
        Ok(())
    }

    #[test]
    fn nested_player_records_are_read_as_ids() -> anyhow::Result<()> {
        let game: Match = serde_json::from_str(
            r#"{
                "players": [
                    {"first_name": "John", "last_name": "Doe", "birth_date": "1990-01-01", "chess_id": "AB12345", "score": 1.0},
                    {"first_name": "Jane", "last_name": "Doe", "birth_date": "1992-02-02", "chess_id": "CD67890", "score": 0.0}
                ],
                "score": [1, 0]
            }"#,
        )?;

        assert_eq!(game.player_one(), "AB12345");
        assert_eq!(game.player_two(), "CD67890");
        assert_eq!(game.score, Outcome::PlayerOneWins);
        assert!(game.is_resolved());
        Ok(())
    }

    #[test]
    fn three_players_are_rejected() {
        let result = serde_json::from_str::<Match>(
            r#"{"id": 1, "players": ["AB12345", "CD67890", "EF13579"], "score": [0, 0]}"#,
        );
        assert!(result.is_err());
    }
}
