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

#![deny(clippy::expect_used)]
#![deny(clippy::indexing_slicing)]
#![deny(clippy::panic)]
#![deny(clippy::unwrap_used)]

mod command_line;
mod console;
mod menu;
mod tests;

use std::io;

use chess_tournament::{
    engine::Engine,
    export::Exporter,
    store::{JsonFile, MemoryStore, Store},
    utils,
};
use clap::Parser;
use log::info;

use crate::{command_line::Args, console::Console, menu::App};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    utils::init_logger(args.debug);

    if args.man {
        return Args::generate_man_page();
    }

    let exporter = Exporter::new(args.export_dir());

    if args.skip_the_data_file {
        info!("keeping the tournaments in memory");
        run(MemoryStore::default(), exporter)
    } else {
        let store = JsonFile::new(args.data_file());
        info!("data file: {}", store.path().display());
        run(store, exporter)
    }
}

fn run<S: Store>(store: S, exporter: Exporter) -> anyhow::Result<()> {
    let engine = Engine::load(store)?;
    let console = Console::new(io::stdin().lock(), io::stdout().lock());

    App::new(engine, console, exporter).run()
}
