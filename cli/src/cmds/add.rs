use std::io::Write;

use super::{find_repo, App, Result};

use minigit_core::staging::{self, AddReport};

use clap::{Arg, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("add")
        .about("Stage file content in the index")
        .arg(
            Arg::with_name("paths")
                .required(true)
                .multiple(true)
                .help("Files or directories to stage; `.` stages the whole working directory"),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let paths: Vec<&str> = args.values_of("paths").map(|v| v.collect()).unwrap_or_default();

    // `.` anywhere in the list stages the whole working directory; the
    // other paths are still staged so their failures get reported.
    let (all, rest): (Vec<&str>, Vec<&str>) = paths.into_iter().partition(|p| *p == ".");

    let mut repo = find_repo::from_current_dir()?;
    let mut report = if all.is_empty() {
        AddReport::default()
    } else {
        staging::add_all(&mut repo)?
    };

    if !rest.is_empty() {
        let more = staging::add_paths(&mut repo, &rest[..])?;
        report.added.extend(more.added);
        report.failed.extend(more.failed);
    }

    print_report(app, &report)
}

fn print_report(app: &mut App, report: &AddReport) -> Result<()> {
    for (path, id) in &report.added {
        writeln!(app, "added {} {}", path, id)?;
    }

    for (path, err) in &report.failed {
        writeln!(app.stderr, "error: {}: {}", path.display(), err)?;
    }

    if report.is_ok() {
        Ok(())
    } else {
        Err(format!("{} path(s) could not be added", report.failed.len()).into())
    }
}
