use crate::{App, Result};

mod add;
mod cat_file;
mod checkout;
mod commit;
pub(crate) mod find_repo;
mod hash_object;
mod init;
mod log;
mod ls_tree;
mod write_tree;

pub(crate) fn add_subcommands<'a, 'b>(app: clap::App<'a, 'b>) -> clap::App<'a, 'b> {
    app.subcommand(add::subcommand())
        .subcommand(cat_file::subcommand())
        .subcommand(checkout::subcommand())
        .subcommand(commit::subcommand())
        .subcommand(hash_object::subcommand())
        .subcommand(init::subcommand())
        .subcommand(log::subcommand())
        .subcommand(ls_tree::subcommand())
        .subcommand(write_tree::subcommand())
}

pub(crate) fn dispatch(app: &mut App) -> Result<()> {
    let matches = app.arg_matches.clone();
    // ^^ Ugh. Need an independent copy of matches so we can still pass
    // the App struct through to subcommand imps.

    match matches.subcommand() {
        ("add", Some(m)) => add::run(app, &m),
        ("cat-file", Some(m)) => cat_file::run(app, &m),
        ("checkout", Some(m)) => checkout::run(app, &m),
        ("commit", Some(m)) => commit::run(app, &m),
        ("hash-object", Some(m)) => hash_object::run(app, &m),
        ("init", Some(m)) => init::run(app, &m),
        ("log", Some(m)) => log::run(app, &m),
        ("ls-tree", Some(m)) => ls_tree::run(app, &m),
        ("write-tree", Some(m)) => write_tree::run(app, &m),
        _ => unreachable!(),
        // unreachable: Should have exited out with appropriate help or
        // error message if no subcommand was given.
    }
}

/// Parses an object ID given on the command line.
pub(crate) fn parse_id(value: Option<&str>) -> Result<minigit_core::object::Id> {
    let value = value.ok_or("missing object ID")?;
    Ok(value.parse()?)
}
