use std::{fs, path::Path};

use assert_cmd::Command;
use tempfile::TempDir;

/// Returns a `minigit` command that runs inside `dir`.
pub fn minigit(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("minigit").unwrap();
    cmd.current_dir(dir)
        .env("MINIGIT_AUTHOR_NAME", "Test Author")
        .env("MINIGIT_AUTHOR_EMAIL", "author@example.com")
        .env_remove("RUST_LOG");
    cmd
}

/// Creates a temporary directory holding a freshly initialized repository.
pub fn init_repo() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    minigit(dir.path()).arg("init").assert().success();
    dir
}

/// Writes a file below `dir`, creating parent directories.
#[allow(dead_code)]
pub fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Runs `minigit` with `args` and returns its trimmed stdout.
#[allow(dead_code)]
pub fn stdout_of(dir: &Path, args: &[&str]) -> String {
    let output = minigit(dir).args(args).assert().success().get_output().clone();
    String::from_utf8(output.stdout).unwrap().trim_end().to_string()
}
