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
    io::{self, BufRead, ErrorKind, Write},
    str::FromStr,
};

use chess_tournament::{
    chess_match::Match, outcome::Decision, presenter::Presenter, report, round::Round,
    tournament::Tournament,
};
use chrono::NaiveDate;

/// Line based prompts over any reader and writer. Invalid answers are asked
/// again until they parse.
pub(crate) struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub(crate) fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub(crate) fn output(&self) -> &W {
        &self.output
    }

    pub(crate) fn say(&mut self, text: impl fmt::Display) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    /// # Errors
    ///
    /// At the end of the input.
    pub(crate) fn read_line(&mut self, prompt: &str) -> io::Result<String> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer)? == 0 {
            return Err(io::Error::new(ErrorKind::UnexpectedEof, "no more input"));
        }

        Ok(buffer.trim().to_string())
    }

    pub(crate) fn prompt_parsed<T>(&mut self, prompt: &str) -> io::Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        loop {
            match self.read_line(prompt)?.parse() {
                Ok(value) => return Ok(value),
                Err(error) => self.say(format!("? {error}"))?,
            }
        }
    }

    pub(crate) fn prompt_non_empty(&mut self, prompt: &str) -> io::Result<String> {
        loop {
            let line = self.read_line(prompt)?;
            if !line.is_empty() {
                return Ok(line);
            }
            self.say("? this can't be empty")?;
        }
    }

    pub(crate) fn prompt_date(&mut self, prompt: &str) -> io::Result<NaiveDate> {
        loop {
            let line = self.read_line(prompt)?;
            match NaiveDate::parse_from_str(&line, "%Y-%m-%d") {
                Ok(date) => return Ok(date),
                Err(error) => self.say(format!("? {line}: {error}, use YYYY-MM-DD"))?,
            }
        }
    }

    pub(crate) fn prompt_yes_no(&mut self, prompt: &str) -> io::Result<bool> {
        loop {
            match self.read_line(prompt)?.to_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.say("? answer yes or no")?,
            }
        }
    }

    /// Lists `items` followed by a `leave` entry. Returns the index picked,
    /// `None` for `leave`.
    pub(crate) fn prompt_choice<T: fmt::Display>(
        &mut self,
        title: &str,
        items: &[T],
        leave: &str,
    ) -> io::Result<Option<usize>> {
        self.say(format!("\n{title}\n"))?;
        for (number, item) in (1..).zip(items) {
            self.say(format!("{number}. {item}"))?;
        }
        let back = items.len() + 1;
        self.say(format!("{back}. {leave}\n"))?;

        loop {
            match self.read_line("Enter your choice: ")?.parse::<usize>() {
                Ok(number) if (1..back).contains(&number) => return Ok(Some(number - 1)),
                Ok(number) if number == back => return Ok(None),
                Ok(number) => self.say(format!("? {number} isn't on the list"))?,
                Err(error) => self.say(format!("? {error}"))?,
            }
        }
    }
}

fn player_name(tournament: &Tournament, chess_id: &str) -> String {
    tournament
        .player(chess_id)
        .map_or_else(|| chess_id.to_string(), chess_tournament::player::Player::full_name)
}

impl<R: BufRead, W: Write> Presenter for Console<R, W> {
    fn render_tournament_summary(&mut self, tournament: &Tournament) -> io::Result<()> {
        self.say(report::tournament_summary(tournament))
    }

    fn render_round_progress(
        &mut self,
        tournament: &Tournament,
        round: &Round,
        current_match: usize,
    ) -> io::Result<()> {
        self.say(report::round_progress(tournament, round, current_match))
    }

    fn render_final_standings(&mut self, tournament: &Tournament) -> io::Result<bool> {
        self.say(report::final_standings(tournament))?;
        self.prompt_yes_no("Reset the tournament and play it again? (yes/no): ")
    }

    fn prompt_match_result(&mut self, tournament: &Tournament, game: &Match) -> io::Result<Decision> {
        let one = player_name(tournament, game.player_one());
        let two = player_name(tournament, game.player_two());

        self.say(format!("\nMatch {}: {one} vs {two}", game.id))?;
        self.say("1. Draw")?;
        self.say(format!("2. {one} wins"))?;
        self.say(format!("3. {two} wins"))?;
        self.say("4. Pause (save and quit)")?;
        self.prompt_parsed("Enter the result: ")
    }
}
