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

use rand::Rng;

use crate::ChessId;

const PREFIX_LEN: usize = 2;
const SUFFIX_LEN: usize = 5;

/// Returns an id like `AB12345` that is not in `taken`.
///
/// Collisions are retried, so this only stops once a free id comes up.
pub fn generate_unique<R: Rng + ?Sized>(taken: &HashSet<ChessId>, rng: &mut R) -> ChessId {
    loop {
        let id = generate(rng);
        if !taken.contains(&id) {
            return id;
        }
    }
}

fn generate<R: Rng + ?Sized>(rng: &mut R) -> ChessId {
    let mut id = String::with_capacity(PREFIX_LEN + SUFFIX_LEN);

    for _ in 0..PREFIX_LEN {
        id.push(char::from(rng.random_range(b'A'..=b'Z')));
    }
    for _ in 0..SUFFIX_LEN {
        id.push(char::from(rng.random_range(b'0'..=b'9')));
    }

    id
}

#[cfg(test)]
pub(crate) fn is_valid(id: &str) -> bool {
    id.len() == PREFIX_LEN + SUFFIX_LEN
        && id.bytes().take(PREFIX_LEN).all(|byte| byte.is_ascii_uppercase())
        && id.bytes().skip(PREFIX_LEN).all(|byte| byte.is_ascii_digit())
}
