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

//! Plain text reports. The console prints them and `export` writes them out.

use crate::{chess_match::Match, player::Player, round::Round, tournament::Tournament};

const WIDTH: usize = 40;

fn rule(character: char) -> String {
    character.to_string().repeat(WIDTH)
}

fn framed(title: &str, body: Vec<String>) -> String {
    let mut lines = vec![rule('='), title.to_string(), rule('=')];
    lines.extend(body);
    lines.push(rule('='));
    lines.join("\n")
}

fn alphabetical<'a>(players: impl IntoIterator<Item = &'a Player>) -> Vec<&'a Player> {
    let mut players: Vec<_> = players.into_iter().collect();
    players.sort_by(|a, b| a.alphabetical_key().cmp(&b.alphabetical_key()));
    players
}

fn name_of(tournament: &Tournament, chess_id: &str) -> String {
    tournament
        .player(chess_id)
        .map_or_else(|| chess_id.to_string(), Player::full_name)
}

/// `John Doe vs Jane Doe - Score: 1 - 0`
#[must_use]
pub fn match_line(tournament: &Tournament, game: &Match) -> String {
    let score = if game.is_resolved() {
        game.score.to_string()
    } else {
        "not played".to_string()
    };

    format!(
        "{} vs {} - Score: {score}",
        name_of(tournament, game.player_one()),
        name_of(tournament, game.player_two()),
    )
}

#[must_use]
pub fn all_players<'a>(players: impl IntoIterator<Item = &'a Player>) -> String {
    let body = alphabetical(players)
        .into_iter()
        .map(|player| format!("- {} ({})", player.full_name(), player.chess_id))
        .collect();

    framed("All players in alphabetical order", body)
}

#[must_use]
pub fn all_tournaments(tournaments: &[Tournament]) -> String {
    let mut body = Vec::new();
    for tournament in tournaments {
        body.push(format!("- {} - {}", tournament.name, tournament.location));
        body.push(format!(
            "  From {} to {}",
            tournament.start_date, tournament.end_date
        ));
        body.push(rule('-'));
    }

    framed("All tournaments", body)
}

fn details(tournament: &Tournament) -> Vec<String> {
    vec![
        format!("Name: {}", tournament.name),
        format!("Location: {}", tournament.location),
        format!(
            "Dates: from {} to {}",
            tournament.start_date, tournament.end_date
        ),
        format!(
            "Rounds: {} of {} played",
            tournament.current_round, tournament.number_of_rounds
        ),
        format!("Description: {}", tournament.description),
    ]
}

#[must_use]
pub fn tournament_details(tournament: &Tournament) -> String {
    framed(&format!("Tournament {}", tournament.name), details(tournament))
}

/// The details followed by the roster, shown before a tournament is played.
#[must_use]
pub fn tournament_summary(tournament: &Tournament) -> String {
    let mut body = details(tournament);
    body.push("Players:".to_string());
    body.extend(
        alphabetical(&tournament.players)
            .into_iter()
            .map(|player| format!("- {}", player.full_name())),
    );

    framed(&format!("Tournament {}", tournament.name), body)
}

#[must_use]
pub fn tournament_players(tournament: &Tournament) -> String {
    let body = alphabetical(&tournament.players)
        .into_iter()
        .map(|player| format!("- {}", player.full_name()))
        .collect();

    framed(
        &format!("Players of {} in alphabetical order", tournament.name),
        body,
    )
}

#[must_use]
pub fn rounds_and_matches(tournament: &Tournament) -> String {
    let mut body = Vec::new();
    for round in &tournament.rounds {
        body.push(rule('-'));
        body.push(format!("{} ({})", round.name, round.state()));
        body.push(rule('-'));
        body.extend(
            round
                .matches
                .iter()
                .map(|game| format!("- {}", match_line(tournament, game))),
        );
    }
    if body.is_empty() {
        body.push("No round has been played yet.".to_string());
    }

    framed(&format!("Rounds and matches of {}", tournament.name), body)
}

#[must_use]
pub fn round_progress(tournament: &Tournament, round: &Round, current_match: usize) -> String {
    let format_time = |time: Option<chrono::NaiveDateTime>| {
        time.map_or_else(
            || "-".to_string(),
            |time| time.format("%Y-%m-%d %H:%M:%S").to_string(),
        )
    };

    let mut body = vec![
        format!("Started: {}", format_time(round.start_time)),
        format!("Ended: {}", format_time(round.end_time)),
        rule('-'),
    ];
    for (index, game) in round.matches.iter().enumerate() {
        let marker = if index == current_match { ">" } else { " " };
        body.push(format!(
            "{marker} {}. {}",
            game.id,
            match_line(tournament, game)
        ));
    }

    framed(&format!("-- {} --", round.name), body)
}

#[must_use]
pub fn final_standings(tournament: &Tournament) -> String {
    let body = tournament
        .standings()
        .into_iter()
        .enumerate()
        .map(|(place, player)| {
            format!("{}. {}: {} points", place + 1, player.full_name(), player.score)
        })
        .collect();

    framed(&format!("Final results of {}", tournament.name), body)
}
