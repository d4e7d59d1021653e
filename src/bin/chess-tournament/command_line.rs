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

use std::{io::Write as _, path::PathBuf};

use chess_tournament::{COPYRIGHT, DATA_FILE, LONG_VERSION, REPORTS_FOLDER, utils};
use clap::{CommandFactory, Parser};

/// Chess Tournament
///
/// Create tournaments, enter match results round by round and print reports.
/// Every result is saved right away, so a tournament can be paused and resumed
/// later.
#[derive(Parser, Debug)]
#[command(long_version = LONG_VERSION, about = "Chess Tournament")]
pub(crate) struct Args {
    /// The JSON file holding every tournament
    #[arg(long, value_name = "PATH")]
    pub data_file: Option<PathBuf>,

    /// Where exported reports are written
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Whether to log on the debug level
    #[arg(long)]
    pub debug: bool,

    /// Whether to keep everything in memory instead of reading and writing the
    /// data file
    #[arg(long)]
    pub skip_the_data_file: bool,

    /// Build the manpage
    #[arg(long)]
    pub man: bool,
}

impl Args {
    pub(crate) fn data_file(&self) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| utils::data_file(DATA_FILE))
    }

    pub(crate) fn export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| utils::data_file(REPORTS_FOLDER))
    }

    pub(crate) fn generate_man_page() -> anyhow::Result<()> {
        let mut buffer: Vec<u8> = Vec::default();
        let cmd = Self::command().name("chess-tournament").long_version(None);
        let man = clap_mangen::Man::new(cmd).date("2026-10-16");

        man.render(&mut buffer)?;
        write!(buffer, "{COPYRIGHT}")?;

        std::fs::write("chess-tournament.1", buffer)?;
        Ok(())
    }
}
