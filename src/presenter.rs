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

use std::io;

use crate::{chess_match::Match, outcome::Decision, round::Round, tournament::Tournament};

/// What the engine needs from whoever is sitting at the console.
pub trait Presenter {
    /// # Errors
    ///
    /// If the output can't be written.
    fn render_tournament_summary(&mut self, tournament: &Tournament) -> io::Result<()>;

    /// Shows the round with the match at `current_match` up next.
    ///
    /// # Errors
    ///
    /// If the output can't be written.
    fn render_round_progress(
        &mut self,
        tournament: &Tournament,
        round: &Round,
        current_match: usize,
    ) -> io::Result<()>;

    /// Returns `true` when the operator wants to reset and play the tournament
    /// again.
    ///
    /// # Errors
    ///
    /// If the output can't be written or the answer can't be read.
    fn render_final_standings(&mut self, tournament: &Tournament) -> io::Result<bool>;

    /// # Errors
    ///
    /// If the output can't be written or the answer can't be read.
    fn prompt_match_result(&mut self, tournament: &Tournament, game: &Match)
    -> io::Result<Decision>;
}
