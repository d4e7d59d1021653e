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
    fs::{self, File},
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    tournament::Tournament,
};

/// Loads and saves every tournament at once.
pub trait Store {
    /// # Errors
    ///
    /// If the stored data can't be read or is malformed.
    fn load(&mut self) -> Result<Vec<Tournament>>;

    /// # Errors
    ///
    /// If the data can't be written.
    fn save(&mut self, tournaments: &[Tournament]) -> Result<()>;
}

#[derive(Deserialize)]
struct Document {
    #[serde(default)]
    tournaments: Vec<Tournament>,
}

#[derive(Serialize)]
struct DocumentRef<'a> {
    tournaments: &'a [Tournament],
}

/// A single JSON document: `{"tournaments": [...]}`.
#[derive(Clone, Debug)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn malformed(&self, reason: impl ToString) -> Error {
        Error::MalformedPersistedState {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl Store for JsonFile {
    fn load(&mut self) -> Result<Vec<Tournament>> {
        let string = match fs::read_to_string(&self.path) {
            Ok(string) => string,
            Err(error) => match error.kind() {
                ErrorKind::NotFound => {
                    info!(
                        "{} not found, starting without tournaments",
                        self.path.display()
                    );
                    return Ok(Vec::new());
                }
                _ => return Err(error.into()),
            },
        };

        let document: Document =
            serde_json::from_str(&string).map_err(|error| self.malformed(error))?;

        let mut tournaments = document.tournaments;
        for tournament in &mut tournaments {
            tournament
                .check_loaded()
                .map_err(|reason| self.malformed(reason))?;
        }

        info!(
            "loaded {} tournaments from {}",
            tournaments.len(),
            self.path.display()
        );
        Ok(tournaments)
    }

    fn save(&mut self, tournaments: &[Tournament]) -> Result<()> {
        let string = serde_json::to_string_pretty(&DocumentRef { tournaments })?;

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        // A failed write must never truncate the data file.
        let mut temporary = self.path.clone().into_os_string();
        temporary.push(".tmp");
        let temporary = PathBuf::from(temporary);

        let mut file = File::create(&temporary)?;
        file.write_all(string.as_bytes())?;
        file.sync_all()?;
        fs::rename(&temporary, &self.path)?;

        debug!(
            "saved {} tournaments to {}",
            tournaments.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps the tournaments in memory, for `--skip-the-data-file` and tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    pub tournaments: Vec<Tournament>,
    pub saves: usize,
}

impl Store for MemoryStore {
    fn load(&mut self) -> Result<Vec<Tournament>> {
        Ok(self.tournaments.clone())
    }

    fn save(&mut self, tournaments: &[Tournament]) -> Result<()> {
        self.tournaments = tournaments.to_vec();
        self.saves += 1;
        Ok(())
    }
}
