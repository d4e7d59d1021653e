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

#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used)]
#![cfg(test)]

use std::io::{Cursor, ErrorKind};

use chess_tournament::{
    engine::Engine,
    export::Exporter,
    outcome::Outcome,
    player::NewPlayer,
    round::RoundState,
    store::MemoryStore,
    tournament::NewTournament,
};
use chrono::NaiveDate;
use rand::{SeedableRng, rngs::StdRng};

use super::*;

type TestApp = App<MemoryStore, Cursor<Vec<u8>>, Vec<u8>>;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn engine_with_spring() -> Engine<MemoryStore> {
    let mut engine =
        Engine::with_rng(MemoryStore::default(), StdRng::seed_from_u64(3)).unwrap();

    engine
        .create_tournament(NewTournament {
            name: "Spring".to_string(),
            location: "Paris".to_string(),
            start_date: date(2024, 5, 1),
            end_date: date(2024, 5, 2),
            description: String::new(),
            number_of_rounds: 2,
            players: ["Ada", "Alan", "Grace", "Edsger"]
                .into_iter()
                .map(|first_name| NewPlayer {
                    first_name: first_name.to_string(),
                    last_name: "Test".to_string(),
                    birth_date: date(1950, 1, 1),
                })
                .collect(),
        })
        .unwrap();

    engine
}

fn app(engine: Engine<MemoryStore>, input: &str, exporter: Exporter) -> TestApp {
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
    App::new(engine, console, exporter)
}

fn output(app: &TestApp) -> String {
    String::from_utf8(app.console().output().clone()).unwrap()
}

fn scratch_exporter() -> Exporter {
    Exporter::new(std::env::temp_dir().join("chess-tournament-unused"))
}

#[test]
fn a_tournament_is_created_from_the_menu() -> anyhow::Result<()> {
    let engine = Engine::with_rng(MemoryStore::default(), StdRng::seed_from_u64(1))?;
    let input = [
        "1",
        "Spring",
        "Paris",
        "2024-05-01",
        "2024-04-30",
        "2024-05-02",
        "0",
        "1",
        "Club rapid",
        "3",
        "2",
        "Ada",
        "Lovelace",
        "1815-12-10",
        "Alan",
        "Turing",
        "not a date",
        "1912-06-23",
        "6",
    ]
    .join("\n");

    let mut app = app(engine, &input, scratch_exporter());
    app.run()?;

    let tournament = app.engine().tournament("spring")?;
    assert_eq!(tournament.end_date, date(2024, 5, 2));
    assert_eq!(tournament.number_of_rounds, 1);
    assert_eq!(tournament.description, "Club rapid");
    assert_eq!(tournament.players.len(), 2);
    assert_eq!(tournament.players[1].full_name(), "Alan Turing");
    assert_eq!(app.engine().store().saves, 1);

    let output = output(&app);
    assert!(output.contains("the end date can't be before 2024-05-01"));
    assert!(output.contains("a tournament needs at least one round"));
    assert!(output.contains("the number of players must be even"));
    assert!(output.contains("Spring was created."));
    Ok(())
}

#[test]
fn an_existing_name_is_reported_and_the_session_goes_on() -> anyhow::Result<()> {
    let input = [
        "no",
        "1",
        "SPRING",
        "Lyon",
        "2024-06-01",
        "2024-06-01",
        "1",
        "",
        "",
        "A",
        "A",
        "2000-01-01",
        "B",
        "B",
        "2000-01-01",
        "C",
        "C",
        "2000-01-01",
        "D",
        "D",
        "2000-01-01",
        "6",
    ]
    .join("\n");

    let mut app = app(engine_with_spring(), &input, scratch_exporter());
    app.run()?;

    assert_eq!(app.engine().tournaments().len(), 1);
    assert!(output(&app).contains("? tournament: a tournament named 'SPRING' already exists"));
    Ok(())
}

#[test]
fn pausing_saves_and_ends_the_session() -> anyhow::Result<()> {
    let input = ["yes", "1", "2", "4"].join("\n");

    let mut app = app(engine_with_spring(), &input, scratch_exporter());
    app.run()?;

    let tournament = app.engine().tournament("Spring")?;
    assert_eq!(tournament.current_round, 0);
    assert_eq!(tournament.rounds.len(), 1);
    assert_eq!(tournament.rounds[0].state(), RoundState::Active);
    assert_eq!(tournament.rounds[0].resolved_count(), 1);
    assert_eq!(app.engine().store().tournaments, app.engine().tournaments());

    let output = output(&app);
    assert!(output.contains("Round 1"));
    assert!(output.contains("Spring is saved. Run it again to resume."));
    Ok(())
}

#[test]
fn a_tournament_is_played_to_the_end_from_the_menu() -> anyhow::Result<()> {
    let input = ["2", "1", "1", "2", "3", "1", "no", "6"].join("\n");

    let mut app = app(engine_with_spring(), &format!("no\n{input}"), scratch_exporter());
    app.run()?;

    let tournament = app.engine().tournament("Spring")?;
    assert!(tournament.is_complete());
    let total: f64 = tournament.players.iter().map(|player| player.score).sum();
    assert!((total - 4.0).abs() < f64::EPSILON);
    assert!(output(&app).contains("Final results of Spring"));
    Ok(())
}

#[test]
fn reports_are_shown_and_exported() -> anyhow::Result<()> {
    let directory = tempfile::tempdir()?;
    let input = ["no", "3", "4", "1", "yes", "3", "1", "no", "6", "6"].join("\n");

    let mut app = app(
        engine_with_spring(),
        &input,
        Exporter::new(directory.path()),
    );
    app.run()?;

    assert!(directory.path().join("players-Spring.txt").exists());
    assert!(directory.path().join("players-Spring.html").exists());

    let output = output(&app);
    assert!(output.contains("Players of Spring in alphabetical order"));
    assert!(output.contains("All players in alphabetical order"));
    assert!(output.contains("Exported the report as text and html"));
    Ok(())
}

/// A new session over what `app` saved.
fn reload(app: &TestApp) -> Engine<MemoryStore> {
    let store = MemoryStore {
        tournaments: app.engine().store().tournaments.clone(),
        saves: 0,
    };

    Engine::with_rng(store, StdRng::seed_from_u64(5)).unwrap()
}

#[test]
fn a_paused_tournament_is_resumed_in_the_next_session() -> anyhow::Result<()> {
    let mut first = app(engine_with_spring(), "yes\n1\n2\n4\n", scratch_exporter());
    first.run()?;

    let input = ["yes", "1", "no", "3", "4"].join("\n");
    let mut second = app(reload(&first), &input, scratch_exporter());
    second.run()?;

    let tournament = second.engine().tournament("Spring")?;
    assert_eq!(tournament.current_round, 1);
    assert_eq!(tournament.rounds.len(), 2);
    assert_eq!(tournament.rounds[0].state(), RoundState::Completed);
    let round = &tournament.rounds[0];
    let paused_round = &first.engine().tournament("Spring")?.rounds[0];
    assert_eq!(round.matches[0], paused_round.matches[0]);
    assert_eq!(round.matches[1].players, paused_round.matches[1].players);
    assert_eq!(round.matches[1].score, Outcome::PlayerTwoWins);

    let output = output(&second);
    assert!(output.contains("Paused: Spring"));
    assert!(output.contains("Keep the start time of the round in progress?"));
    Ok(())
}

#[test]
fn resetting_every_tournament_asks_first() -> anyhow::Result<()> {
    let mut first = app(engine_with_spring(), "yes\n1\n1\n4\n", scratch_exporter());
    first.run()?;

    let mut app = app(reload(&first), "no\n5\nno\n5\nyes\n6\n", scratch_exporter());
    app.run()?;

    let tournament = app.engine().tournament("Spring")?;
    assert!(tournament.rounds.is_empty());
    assert_eq!(app.engine().store().saves, 1);
    assert!(output(&app).contains("Every tournament was reset."));
    Ok(())
}

#[test]
fn the_end_of_input_ends_with_an_error() {
    let mut app = app(engine_with_spring(), "no\n1\nWinter\n", scratch_exporter());

    let error = app.run().unwrap_err();
    let error = error.downcast_ref::<std::io::Error>().unwrap();
    assert_eq!(error.kind(), ErrorKind::UnexpectedEof);
}
