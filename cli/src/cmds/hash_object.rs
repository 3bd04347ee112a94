use std::io::Write;
use std::path::Path;

use super::{find_repo, App, Result};

use minigit_core::object::{Kind, Object};
use minigit_core::repo::Repo;
use minigit_core::tree_builder;

use clap::{Arg, ArgGroup, ArgMatches, SubCommand};

pub(crate) fn subcommand<'a, 'b>() -> clap::App<'a, 'b> {
    SubCommand::with_name("hash-object")
        .about("Compute the object ID of a file and optionally store it as a blob")
        .arg(
            Arg::with_name("w")
                .short("w")
                .help("Actually write the object into the object database"),
        )
        .arg(
            Arg::with_name("stdin")
                .long("stdin")
                .help("Read the object from standard input instead of from a file"),
        )
        .arg(Arg::with_name("file"))
        .group(
            ArgGroup::with_name("source")
                .args(&["stdin", "file"])
                .required(true),
        )
}

pub(crate) fn run(app: &mut App, args: &ArgMatches) -> Result<()> {
    let object = match args.value_of("file") {
        Some(file) => tree_builder::blob_from_file(Path::new(file))?.1,
        None => {
            let mut content = Vec::new();
            app.stdin.read_to_end(&mut content)?;
            Object::from_bytes(Kind::Blob, content)
        }
    };

    if args.is_present("w") {
        let mut repo = find_repo::from_current_dir()?;
        repo.put_loose_object(&object)?;
    }

    writeln!(app, "{}", object.id())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::cwd_guard::CwdGuard;
    use crate::App;

    use minigit_on_disk::TempRepo;
    use serial_test::serial;

    const HELLO_SHA1: &str = "5e1c309dae7f45e0f39b1bf3ac3cd9db12e7d689";

    #[test]
    fn hash_file_without_writing() {
        let tr = TempRepo::new();
        tr.write_file("hello", "Hello World");
        let path = tr.path().join("hello");

        let stdout = App::run_with_args(vec!["hash-object", path.to_str().unwrap()]).unwrap();
        assert_eq!(stdout, format!("{}\n", HELLO_SHA1).as_bytes());

        assert!(!tr.path().join(".minigit/objects/5e").exists());
    }

    #[test]
    fn hash_stdin_without_repo() {
        let stdout =
            App::run_with_stdin_and_args(b"Hello World".to_vec(), vec!["hash-object", "--stdin"])
                .unwrap();
        assert_eq!(stdout, format!("{}\n", HELLO_SHA1).as_bytes());
    }

    #[test]
    #[serial]
    fn hash_file_and_write_to_database() {
        let tr = TempRepo::new();
        tr.write_file("hello", "Hello World");
        let _cwd = CwdGuard::enter(tr.path());

        let stdout = App::run_with_args(vec!["hash-object", "-w", "hello"]).unwrap();
        assert_eq!(stdout, format!("{}\n", HELLO_SHA1).as_bytes());

        let object_path = tr
            .path()
            .join(".minigit/objects/5e/1c309dae7f45e0f39b1bf3ac3cd9db12e7d689");
        assert!(fs::metadata(object_path).unwrap().is_file());
    }

    #[test]
    #[serial]
    fn write_requires_repo() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("hello"), "Hello World").unwrap();
        let _cwd = CwdGuard::enter(dir.path());

        let err = App::run_with_args(vec!["hash-object", "-w", "hello"]).unwrap_err();
        assert!(err.to_string().contains("doesn't exist"), "{}", err);
    }

    #[test]
    fn error_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope");

        let err = App::run_with_args(vec!["hash-object", path.to_str().unwrap()]).unwrap_err();
        assert!(err.to_string().contains("no such file"), "{}", err);
    }

    #[test]
    fn error_no_source() {
        assert!(App::run_with_args(vec!["hash-object"]).is_err());
        assert!(App::run_with_args(vec!["hash-object", "--stdin", "file"]).is_err());
    }
}
