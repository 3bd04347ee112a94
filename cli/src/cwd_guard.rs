use std::{
    env,
    path::{Path, PathBuf},
};

/// Runs the rest of a test inside another directory.
///
/// Commands discover their repository from the process working directory,
/// so tests point it at a temporary repository with `CwdGuard::enter` and
/// the previous directory comes back when the guard is dropped.
///
/// The working directory is process-wide: every test holding a guard
/// must be `#[serial]`.
pub(crate) struct CwdGuard {
    restore_to: PathBuf,
}

impl CwdGuard {
    pub fn enter<P: AsRef<Path>>(dir: P) -> CwdGuard {
        let restore_to = env::current_dir().unwrap();
        env::set_current_dir(dir.as_ref()).unwrap();
        CwdGuard { restore_to }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        // A second panic while unwinding aborts the test binary.
        if let Err(err) = env::set_current_dir(&self.restore_to) {
            if !std::thread::panicking() {
                panic!("can't restore {}: {}", self.restore_to.display(), err);
            }
        }
    }
}
