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

use std::{
    fmt,
    io::{BufRead, Write},
};

use chess_tournament::{
    engine::{Engine, RunOutcome},
    export::{Exporter, Format},
    player::NewPlayer,
    report,
    round::Resume,
    store::Store,
    tournament::{NewTournament, Tournament},
};
use chrono::NaiveDate;
use log::error;

use crate::console::Console;

const DEFAULT_PLAYERS: usize = 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Session {
    Continue,
    Quit,
}

#[derive(Clone, Copy, Debug)]
enum MainMenu {
    Create,
    Run,
    Reports,
    Reset,
    ResetAll,
}

impl MainMenu {
    const ALL: [Self; 5] = [
        Self::Create,
        Self::Run,
        Self::Reports,
        Self::Reset,
        Self::ResetAll,
    ];
}

impl fmt::Display for MainMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "Create a tournament"),
            Self::Run => write!(f, "Run or resume a tournament"),
            Self::Reports => write!(f, "Reports"),
            Self::Reset => write!(f, "Reset a tournament"),
            Self::ResetAll => write!(f, "Reset all tournaments"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum ReportMenu {
    AllPlayers,
    AllTournaments,
    Details,
    Players,
    Rounds,
}

impl ReportMenu {
    const ALL: [Self; 5] = [
        Self::AllPlayers,
        Self::AllTournaments,
        Self::Details,
        Self::Players,
        Self::Rounds,
    ];
}

impl fmt::Display for ReportMenu {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllPlayers => write!(f, "All players in alphabetical order"),
            Self::AllTournaments => write!(f, "All tournaments"),
            Self::Details => write!(f, "Name and dates of a tournament"),
            Self::Players => write!(f, "Players of a tournament in alphabetical order"),
            Self::Rounds => write!(f, "Rounds and matches of a tournament"),
        }
    }
}

fn label(tournament: &Tournament) -> String {
    if tournament.is_complete() {
        format!("{} (complete)", tournament.name)
    } else if tournament.is_paused() {
        format!(
            "{} (paused, {} of {} rounds played)",
            tournament.name, tournament.current_round, tournament.number_of_rounds
        )
    } else {
        tournament.name.clone()
    }
}

/// Tells the operator about errors they can fix and hands every other error
/// back to the caller.
fn recover<T, R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    result: chess_tournament::Result<T>,
) -> anyhow::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(error) if error.is_recoverable() => {
            console.say(format!("? {error}"))?;
            Ok(None)
        }
        Err(error) => Err(error.into()),
    }
}

pub(crate) struct App<S, R, W> {
    engine: Engine<S>,
    console: Console<R, W>,
    exporter: Exporter,
}

impl<S: Store, R: BufRead, W: Write> App<S, R, W> {
    pub(crate) fn new(engine: Engine<S>, console: Console<R, W>, exporter: Exporter) -> Self {
        Self {
            engine,
            console,
            exporter,
        }
    }

    #[cfg(test)]
    pub(crate) fn engine(&self) -> &Engine<S> {
        &self.engine
    }

    #[cfg(test)]
    pub(crate) fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs the session until the operator quits or pauses a tournament.
    ///
    /// # Errors
    ///
    /// If the console closes or the engine fails in a way the operator can't
    /// fix.
    pub(crate) fn run(&mut self) -> anyhow::Result<()> {
        self.console
            .say("\nHello! Welcome to the chess tournament manager!\n")?;

        if !self.engine.tournaments().is_empty()
            && self
                .console
                .prompt_yes_no("Would you like to run an existing tournament? (yes/no): ")?
            && self.run_menu()? == Session::Quit
        {
            return Ok(());
        }

        loop {
            let Some(choice) =
                self.console
                    .prompt_choice("What would you like to do?", &MainMenu::ALL, "Quit")?
            else {
                return Ok(());
            };

            let session = match MainMenu::ALL.get(choice) {
                Some(MainMenu::Create) => self.create_menu()?,
                Some(MainMenu::Run) => self.run_menu()?,
                Some(MainMenu::Reports) => self.report_menu()?,
                Some(MainMenu::Reset) => self.reset_menu()?,
                Some(MainMenu::ResetAll) => self.reset_all_menu()?,
                None => Session::Continue,
            };

            if session == Session::Quit {
                return Ok(());
            }
        }
    }

    /// Returns the name of the tournament picked, `None` when there are none or
    /// the operator goes back.
    fn select_tournament(&mut self, title: &str) -> anyhow::Result<Option<String>> {
        let tournaments = self.engine.tournaments();
        if tournaments.is_empty() {
            self.console.say("? there are no tournaments yet")?;
            return Ok(None);
        }

        let labels: Vec<_> = tournaments.iter().map(label).collect();
        let names: Vec<_> = tournaments
            .iter()
            .map(|tournament| tournament.name.clone())
            .collect();

        let choice = self.console.prompt_choice(title, &labels, "Back")?;
        Ok(choice.and_then(|index| names.get(index).cloned()))
    }

    fn run_menu(&mut self) -> anyhow::Result<Session> {
        let paused = self.engine.paused_tournament_names().join(", ");
        if !paused.is_empty() {
            self.console.say(format!("\nPaused: {paused}"))?;
        }

        let Some(name) = self.select_tournament("Select a tournament to run:")? else {
            return Ok(Session::Continue);
        };

        let resume = if self.engine.tournament(&name).is_ok_and(Tournament::is_paused) {
            Resume::from(
                self.console
                    .prompt_yes_no("Keep the start time of the round in progress? (yes/no): ")?,
            )
        } else {
            Resume::Yes
        };

        let result = self
            .engine
            .run_tournament(&name, resume, &mut self.console);

        match recover(&mut self.console, result)? {
            Some(RunOutcome::Paused) => {
                self.console
                    .say(format!("\n{name} is saved. Run it again to resume."))?;
                Ok(Session::Quit)
            }
            Some(RunOutcome::Completed) | None => Ok(Session::Continue),
        }
    }

    fn create_menu(&mut self) -> anyhow::Result<Session> {
        self.console.say("\nNew tournament\n")?;

        let name = self.console.prompt_non_empty("Name: ")?;
        let location = self.console.prompt_non_empty("Location: ")?;
        let start_date = self.console.prompt_date("Start date (YYYY-MM-DD): ")?;
        let end_date = loop {
            let end_date = self.console.prompt_date("End date (YYYY-MM-DD): ")?;
            if end_date >= start_date {
                break end_date;
            }
            self.console
                .say(format!("? the end date can't be before {start_date}"))?;
        };
        let number_of_rounds = loop {
            let rounds: u32 = self.console.prompt_parsed("Number of rounds: ")?;
            if rounds >= 1 {
                break rounds;
            }
            self.console.say("? a tournament needs at least one round")?;
        };
        let description = self.console.read_line("Description: ")?;

        let count = self.player_count()?;
        let mut players = Vec::with_capacity(count);
        for number in 1..=count {
            players.push(self.new_player(number)?);
        }

        let result = self.engine.create_tournament(NewTournament {
            name,
            location,
            start_date,
            end_date,
            description,
            number_of_rounds,
            players,
        });

        if let Some(tournament) = recover(&mut self.console, result)? {
            let message = format!("\n{} was created.", tournament.name);
            self.console.say(message)?;
        }

        Ok(Session::Continue)
    }

    fn player_count(&mut self) -> anyhow::Result<usize> {
        loop {
            let line = self
                .console
                .read_line(&format!("Number of players ({DEFAULT_PLAYERS}): "))?;
            if line.is_empty() {
                return Ok(DEFAULT_PLAYERS);
            }

            match line.parse::<usize>() {
                Ok(count) if count >= 2 && count % 2 == 0 => return Ok(count),
                Ok(count) => self
                    .console
                    .say(format!("? {count}: the number of players must be even"))?,
                Err(error) => self.console.say(format!("? {error}"))?,
            }
        }
    }

    fn new_player(&mut self, number: usize) -> anyhow::Result<NewPlayer> {
        self.console.say(format!("\nPlayer {number}"))?;

        let first_name = self.console.prompt_non_empty("First name: ")?;
        let last_name = self.console.prompt_non_empty("Last name: ")?;
        let birth_date: NaiveDate = self.console.prompt_date("Birth date (YYYY-MM-DD): ")?;

        Ok(NewPlayer {
            first_name,
            last_name,
            birth_date,
        })
    }

    fn report_menu(&mut self) -> anyhow::Result<Session> {
        loop {
            let Some(choice) = self.console.prompt_choice(
                "Which report?",
                &ReportMenu::ALL,
                "Back to the main menu",
            )?
            else {
                return Ok(Session::Continue);
            };

            let report = match ReportMenu::ALL.get(choice) {
                Some(ReportMenu::AllPlayers) => Some((
                    "all-players".to_string(),
                    report::all_players(self.engine.players()),
                )),
                Some(ReportMenu::AllTournaments) => Some((
                    "all-tournaments".to_string(),
                    report::all_tournaments(self.engine.tournaments()),
                )),
                Some(ReportMenu::Details) => {
                    self.tournament_report("details", report::tournament_details)?
                }
                Some(ReportMenu::Players) => {
                    self.tournament_report("players", report::tournament_players)?
                }
                Some(ReportMenu::Rounds) => {
                    self.tournament_report("rounds", report::rounds_and_matches)?
                }
                None => None,
            };

            if let Some((name, text)) = report {
                self.console.say(format!("\n{text}"))?;
                self.offer_export(&name, &text)?;
            }
        }
    }

    fn tournament_report(
        &mut self,
        kind: &str,
        build: fn(&Tournament) -> String,
    ) -> anyhow::Result<Option<(String, String)>> {
        let Some(name) = self.select_tournament("Select a tournament:")? else {
            return Ok(None);
        };

        let result = self.engine.tournament(&name).map(build);
        Ok(recover(&mut self.console, result)?.map(|text| (format!("{kind}-{name}"), text)))
    }

    fn offer_export(&mut self, name: &str, text: &str) -> anyhow::Result<()> {
        if !self
            .console
            .prompt_yes_no("Export this report? (yes/no): ")?
        {
            return Ok(());
        }

        self.console.say(format!(
            "Reports are written to {}",
            self.exporter.directory().display()
        ))?;
        let format: Format = self
            .console
            .prompt_parsed("Format (1. text, 2. html, 3. both): ")?;

        match self.exporter.export(name, text, format) {
            Ok(paths) => {
                self.console
                    .say(format!("Exported the report as {format}"))?;
                for path in paths {
                    self.console.say(format!("Wrote {}", path.display()))?;
                }
            }
            Err(error) => {
                error!("export {name}: {error}");
                self.console
                    .say(format!("? the report was not exported: {error}"))?;
            }
        }

        Ok(())
    }

    fn reset_menu(&mut self) -> anyhow::Result<Session> {
        if let Some(name) = self.select_tournament("Select a tournament to reset:")? {
            let result = self.engine.reset_tournament(&name);
            if recover(&mut self.console, result)?.is_some() {
                self.console.say(format!("\n{name} was reset."))?;
            }
        }

        Ok(Session::Continue)
    }

    fn reset_all_menu(&mut self) -> anyhow::Result<Session> {
        if self
            .console
            .prompt_yes_no("Reset every tournament? (yes/no): ")?
        {
            self.engine.reset_all()?;
            self.console.say("\nEvery tournament was reset.")?;
        }

        Ok(Session::Continue)
    }
}
