use std::io::Write;

use super::{find_repo, parse_id, App, Result};

use minigit_core::repo::Repo;

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("cat-file")
        .about("Show the content, size, or type of a stored object")
        .arg(
            Arg::with_name("p")
                .short("p")
                .help("Print the object's content"),
        )
        .arg(
            Arg::with_name("s")
                .short("s")
                .help("Print the object's size in bytes"),
        )
        .arg(
            Arg::with_name("t")
                .short("t")
                .help("Print the object's type"),
        )
        .group(
            ArgGroup::with_name("mode")
                .args(&["p", "s", "t"])
                .required(true),
        )
        .arg(
            Arg::with_name("object")
                .required(true)
                .help("The object ID"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id = parse_id(args.value_of("object"))?;

    let repo = find_repo::from_current_dir()?;
    let object = repo.get_object(&id)?;

    if args.is_present("s") {
        writeln!(app, "{}", object.len())?;
    } else if args.is_present("t") {
        writeln!(app, "{}", object.kind())?;
    } else {
        app.write_all(&object.content()?)?;
    }

    Ok(())
}
