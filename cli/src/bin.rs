#![deny(warnings)]

use std::{
    error::Error,
    io::{self, Write},
};

use tracing_subscriber::EnvFilter;

mod app;
pub(crate) use app::App;

mod cmds;
mod config;

#[cfg(test)]
mod cwd_guard;

pub(crate) type Result<T> = std::result::Result<T, Box<dyn Error>>;

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

#[allow(unused_must_use)]
#[cfg(not(tarpaulin_include))]
fn main() {
    // Keep this function as small as possible. Everything it calls is
    // reachable from unit tests through `App`.

    init_tracing();

    let stdin = io::stdin();
    let mut stdin = stdin.lock();

    let stdout = io::stdout();
    let mut stdout = stdout.lock();

    let stderr = io::stderr();
    let mut stderr = stderr.lock();

    let mut app = App {
        arg_matches: app::clap_app().get_matches(),
        stdin: &mut stdin,
        stdout: &mut stdout,
        stderr: &mut stderr,
    };

    let r = app.run();

    app.flush();
    // Intentionally ignoring the result of this flush.

    std::process::exit(match r {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("ERROR: {}", err);
            1
        }
    });
}
