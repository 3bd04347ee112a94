use std::io::Write;

use super::{find_repo, App, Result};

use minigit_core::repo::Repo;
use minigit_core::tree_builder;

use clap::{ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("write-tree")
        .about("Store the working directory as a tree object and print its ID")
}

pub(crate) fn run(app: &mut App, _args: &ArgMatches) -> Result<()> {
    let mut repo = find_repo::from_current_dir()?;
    let work_dir = repo.work_dir().to_path_buf();

    let id = tree_builder::build_tree(&mut repo, &work_dir)?;
    writeln!(app, "{}", id)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cwd_guard::CwdGuard;
    use crate::App;

    use minigit_core::object::Id;
    use minigit_core::repo::Repo;
    use minigit_on_disk::TempRepo;
    use serial_test::serial;

    #[test]
    #[serial]
    fn empty_work_dir() {
        let tr = TempRepo::new();
        let _cwd = CwdGuard::enter(tr.path());

        let stdout = App::run_with_args(vec!["write-tree"]).unwrap();
        assert_eq!(stdout, b"4b825dc642cb6eb9a060e54bf8d69288fbee4904\n".to_vec());
    }

    #[test]
    #[serial]
    fn stores_nested_tree() {
        let tr = TempRepo::new();
        tr.write_file("a.txt", "hi").write_file("src/lib.rs", "// lib\n");
        let _cwd = CwdGuard::enter(tr.path());

        let stdout = App::run_with_args(vec!["write-tree"]).unwrap();
        let hex = String::from_utf8(stdout).unwrap();
        let id: Id = hex.trim_end().parse().unwrap();

        let entries = tr.repo().read_tree(&id).unwrap();
        let names: Vec<&str> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "src"]);
    }

    #[test]
    #[serial]
    fn same_content_same_id() {
        let one = TempRepo::new();
        one.write_file("a.txt", "hi");
        let two = TempRepo::new();
        two.write_file("a.txt", "hi");

        let id1 = {
            let _cwd = CwdGuard::enter(one.path());
            App::run_with_args(vec!["write-tree"]).unwrap()
        };
        let id2 = {
            let _cwd = CwdGuard::enter(two.path());
            App::run_with_args(vec!["write-tree"]).unwrap()
        };

        assert_eq!(id1, id2);
    }
}
