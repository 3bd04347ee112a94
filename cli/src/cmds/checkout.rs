use std::io::Write;

use super::{find_repo, parse_id, App, Result};

use minigit_core::checkout;

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("checkout")
        .about("Restore the files of a commit into the working directory")
        .arg(
            Arg::with_name("commit")
                .required(true)
                .help("The commit ID (a tree ID is accepted too)"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id = parse_id(args.value_of("commit"))?;

    let repo = find_repo::from_current_dir()?;
    let report = checkout::checkout(&repo, &id)?;

    for name in &report.restored {
        writeln!(app, "restored {}", name)?;
    }

    for (name, err) in &report.failed {
        writeln!(app.stderr, "error: {}: {}", name, err)?;
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(format!("{} file(s) could not be restored", report.failed.len()).into())
    }
}
