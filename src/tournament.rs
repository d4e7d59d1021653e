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

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    outcome::Outcome,
    player::{NewPlayer, Player},
    round::{Round, RoundState},
};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Tournament {
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub number_of_rounds: u32,
    #[serde(default)]
    pub current_round: u32,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

/// Everything the operator enters to create a tournament.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct NewTournament {
    pub name: String,
    pub location: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub description: String,
    pub number_of_rounds: u32,
    pub players: Vec<NewPlayer>,
}

impl NewTournament {
    /// # Errors
    ///
    /// If the name is blank, there are no rounds, the dates are reversed or the
    /// number of players is odd or zero.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::InvalidTournament("the name is empty".to_string()));
        }
        if self.number_of_rounds == 0 {
            return Err(Error::InvalidTournament(
                "a tournament needs at least one round".to_string(),
            ));
        }
        if self.end_date < self.start_date {
            return Err(Error::InvalidTournament(format!(
                "the end date {} is before the start date {}",
                self.end_date, self.start_date
            )));
        }
        if self.players.is_empty() || self.players.len() % 2 != 0 {
            return Err(Error::InvalidRosterSize(self.players.len()));
        }

        Ok(())
    }
}

impl Tournament {
    /// Builds the tournament from validated input, pairing each player with the
    /// id at the same position in `chess_ids`. The name is stored trimmed.
    #[must_use]
    pub fn new(new_tournament: NewTournament, chess_ids: Vec<String>) -> Self {
        let players = new_tournament
            .players
            .into_iter()
            .zip(chess_ids)
            .map(|(player, chess_id)| Player::new(player, chess_id))
            .collect();

        Self {
            name: new_tournament.name.trim().to_string(),
            location: new_tournament.location,
            start_date: new_tournament.start_date,
            end_date: new_tournament.end_date,
            description: new_tournament.description,
            number_of_rounds: new_tournament.number_of_rounds,
            current_round: 0,
            players,
            rounds: Vec::new(),
        }
    }

    #[must_use]
    pub fn has_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.current_round >= self.number_of_rounds
    }

    #[must_use]
    pub fn is_paused(&self) -> bool {
        (self.current_round > 0 && !self.is_complete())
            || self
                .rounds
                .iter()
                .any(|round| round.state() == RoundState::Active)
    }

    #[must_use]
    pub fn player(&self, chess_id: &str) -> Option<&Player> {
        self.players
            .iter()
            .find(|player| player.chess_id == chess_id)
    }

    #[must_use]
    pub fn round(&self, name: &str) -> Option<&Round> {
        self.rounds.iter().find(|round| round.name == name)
    }

    #[must_use]
    pub fn round_index(&self, name: &str) -> Option<usize> {
        self.rounds.iter().position(|round| round.name == name)
    }

    /// The name of the round `current_round` points at.
    #[must_use]
    pub fn current_round_name(&self) -> String {
        Round::name_for(self.current_round + 1)
    }

    /// # Errors
    ///
    /// If every round of the budget already exists.
    pub fn add_round(&mut self, round: Round) -> Result<usize> {
        if self.rounds.len() >= self.number_of_rounds as usize {
            return Err(Error::CapacityExceeded {
                name: self.name.clone(),
                number_of_rounds: self.number_of_rounds,
            });
        }

        self.rounds.push(round);
        Ok(self.rounds.len() - 1)
    }

    /// Sets the score of one match and adds it to both players.
    ///
    /// # Errors
    ///
    /// If the outcome is `Pending`, the match already has a result, or one of
    /// its players is not on the roster. Nothing is changed on error.
    ///
    /// # Panics
    ///
    /// If `round_index` or `match_index` is out of range.
    pub fn record_result(
        &mut self,
        round_index: usize,
        match_index: usize,
        outcome: Outcome,
    ) -> Result<()> {
        let round = &mut self.rounds[round_index];
        let game = &mut round.matches[match_index];

        if game.is_resolved() {
            return Err(Error::MatchAlreadyResolved {
                round: round.name.clone(),
                id: game.id,
            });
        }
        if outcome.is_pending() {
            return Err(Error::InvalidTournament(format!(
                "{}, match {}: a result can't be pending",
                round.name, game.id
            )));
        }

        let position = |chess_id: &str| {
            self.players
                .iter()
                .position(|player| player.chess_id == chess_id)
                .ok_or_else(|| Error::UnknownPlayer(chess_id.to_string()))
        };
        let one = position(game.player_one())?;
        let two = position(game.player_two())?;

        game.score = outcome;
        let (points_one, points_two) = outcome.points();
        self.players[one].score += points_one;
        self.players[two].score += points_two;

        Ok(())
    }

    /// Players by score, highest first. Equal scores keep roster order.
    #[must_use]
    pub fn standings(&self) -> Vec<&Player> {
        let mut players: Vec<_> = self.players.iter().collect();
        players.sort_by(|a, b| b.score.total_cmp(&a.score));
        players
    }

    pub fn reset(&mut self) {
        self.current_round = 0;
        self.rounds.clear();
        for player in &mut self.players {
            player.score = 0.0;
        }
    }

    /// Checks a tournament read from disk, numbering matches that were stored
    /// without an id.
    ///
    /// # Errors
    ///
    /// Returns a description of the first broken invariant. Besides the round
    /// budget and the roster, rounds must be named `Round 1`, `Round 2`, ... and
    /// `current_round` must count the completed rounds at the front.
    pub fn check_loaded(&mut self) -> std::result::Result<(), String> {
        let budget = self.number_of_rounds as usize;

        if self.rounds.len() > budget {
            return Err(format!(
                "{}: {} rounds for a budget of {}",
                self.name,
                self.rounds.len(),
                self.number_of_rounds
            ));
        }
        if self.current_round > self.number_of_rounds {
            return Err(format!(
                "{}: current round {} is past the budget of {}",
                self.name, self.current_round, self.number_of_rounds
            ));
        }

        let mut chess_ids = HashSet::new();
        for player in &self.players {
            if !chess_ids.insert(player.chess_id.as_str()) {
                return Err(format!(
                    "{}: the chess id {} is used twice",
                    self.name, player.chess_id
                ));
            }
        }

        for round in &mut self.rounds {
            if round.end_time.is_some() && !round.all_resolved() {
                return Err(format!(
                    "{}: {} ended with matches still pending",
                    self.name, round.name
                ));
            }

            for (id, game) in (1..).zip(round.matches.iter_mut()) {
                if let Some(chess_id) = game
                    .players
                    .iter()
                    .find(|chess_id| !chess_ids.contains(chess_id.as_str()))
                {
                    return Err(format!(
                        "{}: {} refers to the unknown player {chess_id}",
                        self.name, round.name
                    ));
                }

                if game.id == 0 {
                    game.id = id;
                }
            }
        }

        for (number, round) in (1..).zip(&self.rounds) {
            let expected = Round::name_for(number);
            if round.name != expected {
                return Err(format!(
                    "{}: found {} where {expected} belongs",
                    self.name, round.name
                ));
            }
        }

        let completed = self
            .rounds
            .iter()
            .take_while(|round| round.state() == RoundState::Completed)
            .count();
        if completed != self.current_round as usize || self.rounds.len() > completed + 1 {
            return Err(format!(
                "{}: current round {} but {completed} of {} rounds completed in order",
                self.name,
                self.current_round,
                self.rounds.len()
            ));
        }

        Ok(())
    }
}
