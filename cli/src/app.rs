use std::io::{Read, Write};

#[cfg(test)]
use std::ffi::OsString;

use crate::{cmds, Result};

use clap::{crate_version, AppSettings, ArgMatches};

pub(crate) fn clap_app<'a, 'b>() -> clap::App<'a, 'b> {
    let app = clap::App::new("minigit")
        .version(crate_version!())
        .about("A minimal content-addressed version control tool")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .setting(AppSettings::VersionlessSubcommands);

    cmds::add_subcommands(app)
}

pub(crate) struct App<'a> {
    pub arg_matches: ArgMatches<'a>,
    pub stdin: &'a mut dyn Read,
    pub stdout: &'a mut dyn Write,

    /// Per-item diagnostics from batch commands.
    pub stderr: &'a mut dyn Write,
}

/// Everything a command run produced, for tests.
#[cfg(test)]
pub(crate) struct Output {
    pub result: Result<()>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

#[cfg(test)]
impl Output {
    pub fn stdout_str(&self) -> &str {
        std::str::from_utf8(&self.stdout).unwrap()
    }

    pub fn stderr_str(&self) -> &str {
        std::str::from_utf8(&self.stderr).unwrap()
    }
}

impl<'a> App<'a> {
    pub fn run(&mut self) -> Result<()> {
        cmds::dispatch(self)
    }

    #[cfg(test)]
    pub fn run_for_output<I, T>(stdin: Vec<u8>, args: I) -> Output
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(|x| x.into()).collect();
        args.insert(0, OsString::from("minigit"));

        let mut stdin = std::io::Cursor::new(stdin);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();

        let result = match clap_app().get_matches_from_safe(args) {
            Ok(arg_matches) => App {
                arg_matches,
                stdin: &mut stdin,
                stdout: &mut stdout,
                stderr: &mut stderr,
            }
            .run(),
            Err(err) => Err(err.into()),
        };

        Output {
            result,
            stdout,
            stderr,
        }
    }

    #[cfg(test)]
    pub fn run_with_stdin_and_args<I, T>(stdin: Vec<u8>, args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let Output { result, stdout, .. } = App::run_for_output(stdin, args);
        result.map(|()| stdout)
    }

    #[cfg(test)]
    pub fn run_with_args<I, T>(args: I) -> Result<Vec<u8>>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let stdin: Vec<u8> = Vec::new();
        App::run_with_stdin_and_args(stdin, args)
    }
}

impl<'a> Write for App<'a> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.stdout.write(buf)
    }

    #[cfg(not(tarpaulin_include))]
    fn flush(&mut self) -> std::io::Result<()> {
        self.stdout.flush()?;
        self.stderr.flush()
    }
}
