use std::io::Write;

use chrono::Local;

use super::{find_repo, App, Result};
use crate::config::Identity;

use minigit_core::commit;

use clap::{Arg, ArgMatches, SubCommand};

const DEFAULT_MESSAGE: &str = "new commit done";

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("commit")
        .about("Record the staged snapshot as a new commit")
        .arg(
            Arg::with_name("message")
                .short("m")
                .long("message")
                .takes_value(true)
                .value_name("msg")
                .help("Commit message (single line)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let message = args.value_of("message").unwrap_or(DEFAULT_MESSAGE);
    let (attribution, date) = Identity::from_env().attribution_at(&Local::now())?;

    let mut repo = find_repo::from_current_dir()?;
    let id = commit::commit(&mut repo, &attribution, &date, message)?;

    writeln!(app, "{}", id)?;
    Ok(())
}
