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

use rand::{Rng, seq::SliceRandom};

use crate::{
    chess_match::Match,
    error::{Error, Result},
    player::Player,
};

/// Shuffles the roster in place and pairs its neighbours: 0 with 1, 2 with 3,
/// and so on. There is no score grouping and no rematch avoidance.
///
/// # Errors
///
/// If the roster is empty or has an odd number of players.
pub fn random_pairings<R: Rng + ?Sized>(players: &mut [Player], rng: &mut R) -> Result<Vec<Match>> {
    if players.is_empty() || players.len() % 2 != 0 {
        return Err(Error::InvalidRosterSize(players.len()));
    }

    players.shuffle(rng);

    Ok((1..)
        .zip(players.chunks_exact(2))
        .map(|(id, pair)| Match::new(id, pair[0].chess_id.clone(), pair[1].chess_id.clone()))
        .collect())
}
