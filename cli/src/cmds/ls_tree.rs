use std::io::Write;

use super::{find_repo, parse_id, App, Result};

use minigit_core::checkout::resolve_tree;
use minigit_core::repo::Repo;

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("ls-tree")
        .about("List the entries of a tree object")
        .arg(
            Arg::with_name("name-only")
                .long("name-only")
                .help("List only entry names"),
        )
        .arg(
            Arg::with_name("tree-ish")
                .required(true)
                .help("A tree ID, or a commit ID whose tree is listed"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let id = parse_id(args.value_of("tree-ish"))?;

    let repo = find_repo::from_current_dir()?;
    let tree = resolve_tree(&repo, &id)?;
    let name_only = args.is_present("name-only");

    for entry in repo.read_tree(&tree)? {
        if name_only {
            writeln!(app, "{}", entry.name)?;
        } else {
            writeln!(
                app,
                "{} {} {}\t{}",
                entry.mode,
                entry.kind(),
                entry.id,
                entry.name
            )?;
        }
    }

    Ok(())
}
