use std::io::Write;

use super::{find_repo, App, Result};

use minigit_core::history;

use clap::{ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("log").about("Show the commit log, newest first")
}

pub(crate) fn run(app: &mut App, _args: &ArgMatches) -> Result<()> {
    let repo = find_repo::from_current_dir()?;
    app.write_all(&history::read_log(&repo)?)?;
    Ok(())
}
