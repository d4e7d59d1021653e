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

use chrono::{Local, NaiveDateTime};
use log::{debug, info};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    chess_id,
    error::{Error, Result},
    pairing,
    player::Player,
    presenter::Presenter,
    round::{Resume, Round, RoundState},
    store::Store,
    tournament::{NewTournament, Tournament},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RunOutcome {
    Completed,
    Paused,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum RoundProgress {
    Completed,
    Paused,
}

/// Holds every tournament in memory and writes them back through the store
/// after each change.
pub struct Engine<S> {
    store: S,
    tournaments: Vec<Tournament>,
    rng: StdRng,
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

impl<S: Store> Engine<S> {
    /// # Errors
    ///
    /// If the store can't be read.
    pub fn load(store: S) -> Result<Self> {
        Self::with_rng(store, StdRng::from_os_rng())
    }

    /// # Errors
    ///
    /// If the store can't be read.
    pub fn with_rng(mut store: S, rng: StdRng) -> Result<Self> {
        let tournaments = store.load()?;

        Ok(Self {
            store,
            tournaments,
            rng,
        })
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn tournaments(&self) -> &[Tournament] {
        &self.tournaments
    }

    #[must_use]
    pub fn tournament_names(&self) -> Vec<&str> {
        self.tournaments
            .iter()
            .map(|tournament| tournament.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn paused_tournament_names(&self) -> Vec<&str> {
        self.tournaments
            .iter()
            .filter(|tournament| tournament.is_paused())
            .map(|tournament| tournament.name.as_str())
            .collect()
    }

    /// Looks a tournament up by name, ignoring case.
    ///
    /// # Errors
    ///
    /// If no tournament has that name.
    pub fn tournament(&self, name: &str) -> Result<&Tournament> {
        Ok(&self.tournaments[self.position(name)?])
    }

    /// Every player of every tournament.
    pub fn players(&self) -> impl Iterator<Item = &Player> {
        self.tournaments
            .iter()
            .flat_map(|tournament| tournament.players.iter())
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.tournaments
            .iter()
            .position(|tournament| tournament.has_name(name))
            .ok_or_else(|| Error::NotFound(name.to_string()))
    }

    fn save(&mut self) -> Result<()> {
        self.store.save(&self.tournaments)
    }

    /// # Errors
    ///
    /// If the input is invalid, the name is taken, or saving fails. Nothing is
    /// kept when saving fails.
    pub fn create_tournament(&mut self, new_tournament: NewTournament) -> Result<&Tournament> {
        new_tournament.validate()?;

        if self
            .tournaments
            .iter()
            .any(|tournament| tournament.has_name(&new_tournament.name))
        {
            return Err(Error::AlreadyExists(new_tournament.name));
        }

        let mut taken: HashSet<_> = self
            .players()
            .map(|player| player.chess_id.clone())
            .collect();
        let mut chess_ids = Vec::with_capacity(new_tournament.players.len());
        for _ in &new_tournament.players {
            let chess_id = chess_id::generate_unique(&taken, &mut self.rng);
            taken.insert(chess_id.clone());
            chess_ids.push(chess_id);
        }

        self.tournaments
            .push(Tournament::new(new_tournament, chess_ids));

        if let Err(error) = self.save() {
            self.tournaments.pop();
            return Err(error);
        }

        let tournament = &self.tournaments[self.tournaments.len() - 1];
        info!(
            "created {} with {} players and {} rounds",
            tournament.name,
            tournament.players.len(),
            tournament.number_of_rounds
        );
        Ok(tournament)
    }

    /// Plays a tournament from its current round until it is complete or the
    /// operator pauses.
    ///
    /// A complete tournament only shows its standings; when the operator asks
    /// for a restart it is reset and played again.
    ///
    /// # Errors
    ///
    /// If the tournament doesn't exist, the presenter fails, or saving fails.
    pub fn run_tournament<P: Presenter + ?Sized>(
        &mut self,
        name: &str,
        resume: Resume,
        presenter: &mut P,
    ) -> Result<RunOutcome> {
        let index = self.position(name)?;
        presenter.render_tournament_summary(&self.tournaments[index])?;

        loop {
            while !self.tournaments[index].is_complete() {
                if self.play_round(index, resume, presenter)? == RoundProgress::Paused {
                    info!("{}: paused", self.tournaments[index].name);
                    return Ok(RunOutcome::Paused);
                }
            }

            self.save()?;
            info!("{}: complete", self.tournaments[index].name);

            if !presenter.render_final_standings(&self.tournaments[index])? {
                return Ok(RunOutcome::Completed);
            }

            self.tournaments[index].reset();
            self.save()?;
            info!("{}: restarting", self.tournaments[index].name);
            presenter.render_tournament_summary(&self.tournaments[index])?;
        }
    }

    fn play_round<P: Presenter + ?Sized>(
        &mut self,
        index: usize,
        resume: Resume,
        presenter: &mut P,
    ) -> Result<RoundProgress> {
        let tournament = &mut self.tournaments[index];
        let round_name = tournament.current_round_name();

        let round_index = if let Some(round_index) = tournament.round_index(&round_name) {
            let round = &mut tournament.rounds[round_index];
            round.start(now(), resume);
            info!(
                "{}: continuing {round_name}, {}/{} results in",
                tournament.name,
                round.resolved_count(),
                round.matches.len()
            );
            round_index
        } else {
            let matches = pairing::random_pairings(&mut tournament.players, &mut self.rng)?;
            let mut round = Round::new(tournament.current_round + 1, matches);
            round.start(now(), Resume::Yes);
            let round_index = tournament.add_round(round)?;
            info!("{}: started {round_name}", tournament.name);
            round_index
        };
        self.save()?;

        loop {
            let tournament = &self.tournaments[index];
            let round = &tournament.rounds[round_index];
            let Some(match_index) = round.next_pending() else {
                break;
            };

            presenter.render_round_progress(tournament, round, match_index)?;
            let game = &round.matches[match_index];
            let Some(outcome) = presenter.prompt_match_result(tournament, game)?.outcome() else {
                self.save()?;
                return Ok(RoundProgress::Paused);
            };

            self.tournaments[index].record_result(round_index, match_index, outcome)?;
            debug!(
                "{}: {round_name}, match {}: {outcome}",
                self.tournaments[index].name,
                match_index + 1
            );
            self.save()?;
        }

        let tournament = &mut self.tournaments[index];
        let round = &mut tournament.rounds[round_index];
        round.finish(now())?;
        debug_assert_eq!(round.state(), RoundState::Completed);
        tournament.current_round += 1;
        info!(
            "{}: finished {round_name}, round {}/{}",
            tournament.name, tournament.current_round, tournament.number_of_rounds
        );
        self.save()?;

        Ok(RoundProgress::Completed)
    }

    /// # Errors
    ///
    /// If the tournament doesn't exist or saving fails.
    pub fn reset_tournament(&mut self, name: &str) -> Result<()> {
        let index = self.position(name)?;
        self.tournaments[index].reset();
        self.save()?;

        info!("{}: reset", self.tournaments[index].name);
        Ok(())
    }

    /// # Errors
    ///
    /// If saving fails.
    pub fn reset_all(&mut self) -> Result<()> {
        for tournament in &mut self.tournaments {
            tournament.reset();
        }
        self.save()?;

        info!("reset {} tournaments", self.tournaments.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::VecDeque, io};

    use chrono::NaiveDate;

    use super::*;
    use crate::{
        chess_match::Match, outcome::Decision, player::NewPlayer, store::MemoryStore,
    };

    #[derive(Default)]
    struct Script {
        decisions: VecDeque<Decision>,
        restart: bool,
        progress: Vec<(String, usize)>,
        standings_shown: usize,
    }

    impl Presenter for Script {
        fn render_tournament_summary(&mut self, _tournament: &Tournament) -> io::Result<()> {
            Ok(())
        }

        fn render_round_progress(
            &mut self,
            _tournament: &Tournament,
            round: &Round,
            current_match: usize,
        ) -> io::Result<()> {
            self.progress.push((round.name.clone(), current_match));
            Ok(())
        }

        fn render_final_standings(&mut self, _tournament: &Tournament) -> io::Result<bool> {
            self.standings_shown += 1;
            Ok(std::mem::take(&mut self.restart))
        }

        fn prompt_match_result(
            &mut self,
            _tournament: &Tournament,
            _game: &Match,
        ) -> io::Result<Decision> {
            self.decisions
                .pop_front()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    fn script(decisions: &[Decision]) -> Script {
        Script {
            decisions: decisions.iter().copied().collect(),
            ..Script::default()
        }
    }

    fn new_tournament(name: &str, players: usize, rounds: u32) -> NewTournament {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();

        NewTournament {
            name: name.to_string(),
            location: "Paris".to_string(),
            start_date: date,
            end_date: date,
            description: String::new(),
            number_of_rounds: rounds,
            players: (0..players)
                .map(|i| NewPlayer {
                    first_name: format!("Player{i}"),
                    last_name: "Test".to_string(),
                    birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                })
                .collect(),
        }
    }

    fn engine() -> Engine<MemoryStore> {
        Engine::with_rng(MemoryStore::default(), StdRng::seed_from_u64(11)).unwrap()
    }

    #[test]
    fn created_tournaments_get_unique_ids_and_are_saved() -> anyhow::Result<()> {
        let mut engine = engine();
        engine.create_tournament(new_tournament("Spring", 4, 2))?;
        engine.create_tournament(new_tournament("Autumn", 6, 3))?;

        let ids: HashSet<_> = engine.players().map(|player| &player.chess_id).collect();
        assert_eq!(ids.len(), 10);
        assert!(ids.iter().all(|id| chess_id::is_valid(id)));
        assert_eq!(engine.store().saves, 2);
        assert_eq!(engine.store().tournaments.len(), 2);
        assert_eq!(engine.tournament_names(), ["Spring", "Autumn"]);
        Ok(())
    }

    #[test]
    fn duplicate_names_and_odd_rosters_are_refused() -> anyhow::Result<()> {
        let mut engine = engine();
        engine.create_tournament(new_tournament("Spring", 4, 2))?;

        assert!(matches!(
            engine.create_tournament(new_tournament("SPRING", 4, 2)),
            Err(Error::AlreadyExists(_))
        ));
        assert!(matches!(
            engine.create_tournament(new_tournament("Summer", 5, 2)),
            Err(Error::InvalidRosterSize(5))
        ));
        assert_eq!(engine.tournaments().len(), 1);
        Ok(())
    }

    #[test]
    fn a_full_run_awards_one_point_per_match() -> anyhow::Result<()> {
        let mut engine = engine();
        engine.create_tournament(new_tournament("Spring", 4, 3))?;

        let mut presenter = script(&[
            Decision::Draw,
            Decision::PlayerOneWins,
            Decision::PlayerTwoWins,
            Decision::Draw,
            Decision::PlayerOneWins,
            Decision::PlayerOneWins,
        ]);
        let outcome = engine.run_tournament("spring", Resume::Yes, &mut presenter)?;
        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(presenter.standings_shown, 1);

        let tournament = engine.tournament("Spring")?;
        assert!(tournament.is_complete());
        assert_eq!(tournament.current_round, 3);
        assert_eq!(tournament.rounds.len(), 3);
        assert!(
            tournament
                .rounds
                .iter()
                .all(|round| round.state() == RoundState::Completed)
        );

        let total: f64 = tournament.players.iter().map(|player| player.score).sum();
        assert!((total - 6.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn pausing_keeps_earlier_results() -> anyhow::Result<()> {
        let mut engine = engine();
        engine.create_tournament(new_tournament("Spring", 4, 2))?;

        let mut presenter = script(&[Decision::PlayerOneWins, Decision::Pause]);
        let outcome = engine.run_tournament("Spring", Resume::Yes, &mut presenter)?;
        assert_eq!(outcome, RunOutcome::Paused);

        let tournament = engine.tournament("Spring")?;
        assert_eq!(tournament.current_round, 0);
        assert_eq!(tournament.rounds.len(), 1);
        assert_eq!(tournament.rounds[0].resolved_count(), 1);
        assert_eq!(tournament.rounds[0].state(), RoundState::Active);
        assert_eq!(engine.paused_tournament_names(), ["Spring"]);
        assert_eq!(engine.store().tournaments, engine.tournaments());

        let mut presenter = script(&[Decision::Draw, Decision::Pause]);
        engine.run_tournament("Spring", Resume::Yes, &mut presenter)?;
        assert_eq!(presenter.progress, [("Round 1".to_string(), 1), ("Round 2".to_string(), 0)]);

        let tournament = engine.tournament("Spring")?;
        assert_eq!(tournament.current_round, 1);
        assert_eq!(tournament.rounds.len(), 2);
        Ok(())
    }

    #[test]
    fn a_complete_tournament_can_be_restarted() -> anyhow::Result<()> {
        let mut engine = engine();
        engine.create_tournament(new_tournament("Spring", 2, 1))?;

        let mut presenter = script(&[Decision::PlayerOneWins]);
        engine.run_tournament("Spring", Resume::Yes, &mut presenter)?;

        let mut presenter = script(&[Decision::Draw]);
        presenter.restart = true;
        let outcome = engine.run_tournament("Spring", Resume::Yes, &mut presenter)?;

        assert_eq!(outcome, RunOutcome::Completed);
        assert_eq!(presenter.standings_shown, 2);
        let tournament = engine.tournament("Spring")?;
        assert_eq!(tournament.rounds.len(), 1);
        assert_eq!(tournament.rounds[0].matches[0].score, crate::outcome::Outcome::Draw);
        assert!(
            tournament
                .players
                .iter()
                .all(|player| (player.score - 0.5).abs() < f64::EPSILON)
        );
        Ok(())
    }

    #[test]
    fn unknown_tournaments_are_not_found() {
        let mut engine = engine();

        assert!(matches!(engine.tournament("Nowhere"), Err(Error::NotFound(_))));
        assert!(matches!(
            engine.reset_tournament("Nowhere"),
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            engine.run_tournament("Nowhere", Resume::Yes, &mut script(&[])),
            Err(Error::NotFound(_))
        ));
        assert_eq!(engine.store().saves, 0);
    }

    #[test]
    fn reset_all_clears_every_tournament() -> anyhow::Result<()> {
        let mut engine = engine();
        engine.create_tournament(new_tournament("Spring", 2, 2))?;
        engine.create_tournament(new_tournament("Autumn", 2, 2))?;
        engine.run_tournament("Spring", Resume::Yes, &mut script(&[Decision::Draw, Decision::Pause]))?;
        engine.run_tournament("Autumn", Resume::Yes, &mut script(&[Decision::PlayerTwoWins, Decision::Pause]))?;

        engine.reset_all()?;

        for tournament in engine.tournaments() {
            assert!(tournament.rounds.is_empty());
            assert_eq!(tournament.current_round, 0);
            assert!(
                tournament
                    .players
                    .iter()
                    .all(|player| player.score.abs() < f64::EPSILON)
            );
        }
        assert!(engine.paused_tournament_names().is_empty());
        assert_eq!(engine.store().tournaments, engine.tournaments());
        Ok(())
    }
}
