use crate::command::{CommandRunner, ExitCode};
use anyhow::{Context, Result, bail};
use std::ffi::{OsStr, OsString};
use std::io::{self, ErrorKind};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::ExitStatus;

/// Exit code for a program that does not exist.
pub const NOT_FOUND: ExitCode = 127;
/// Exit code for a program that exists but could not be executed.
pub const NOT_EXECUTABLE: ExitCode = 126;

/// A program started by path in a child process with an empty environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    name: OsString,
    path: OsString,
    args: Vec<OsString>,
}

impl ExternalCommand {
    /// Build a command from raw tokens; `None` if `argv` is empty.
    ///
    /// The first token is used as a literal path and is never looked up in
    /// PATH: a bare name like `ls` means `./ls`. The token itself is still
    /// passed to the child as `argv[0]`.
    pub fn from_argv(argv: &[&[u8]]) -> Option<Self> {
        let (first, rest) = argv.split_first()?;
        let name = OsStr::from_bytes(first).to_owned();
        let path = literal_path(&name);
        Some(Self {
            name,
            path,
            args: rest.iter().map(|a| OsStr::from_bytes(a).to_owned()).collect(),
        })
    }

    pub fn path(&self) -> &Path {
        Path::new(&self.path)
    }

    /// Run the command and block until it exits or is killed.
    pub fn execute(&self) -> Result<ExitCode> {
        let spawned = std::process::Command::new(&self.path)
            .arg0(&self.name)
            .args(&self.args)
            .env_clear()
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) if is_resource_exhaustion(&e) => {
                return Err(e).with_context(|| {
                    format!("failed to create process for {}", self.path().display())
                });
            }
            Err(e) => {
                eprintln!("hsh: {}: {}", self.path().display(), e);
                return Ok(exec_failure_code(&e));
            }
        };
        tracing::debug!(pid = child.id(), program = %self.path().display(), "spawned");

        let exit_status = child
            .wait()
            .with_context(|| format!("failed to wait for {}", self.path().display()))?;
        let code = match exit_status.code() {
            Some(x) => x,
            None => terminated_by_signal(exit_status)?,
        };
        tracing::debug!(pid = child.id(), code, "child finished");
        Ok(code)
    }
}

fn literal_path(name: &OsStr) -> OsString {
    if name.as_bytes().contains(&b'/') {
        name.to_owned()
    } else {
        Path::new(".").join(name).into_os_string()
    }
}

/// Errors that mean no process could be created at all.
fn is_resource_exhaustion(e: &io::Error) -> bool {
    matches!(e.kind(), ErrorKind::OutOfMemory | ErrorKind::WouldBlock)
}

fn exec_failure_code(e: &io::Error) -> ExitCode {
    match e.kind() {
        ErrorKind::NotFound => NOT_FOUND,
        _ => NOT_EXECUTABLE,
    }
}

fn terminated_by_signal(exit_status: ExitStatus) -> Result<ExitCode> {
    use std::os::unix::process::ExitStatusExt;
    match exit_status.signal() {
        Some(signal) => Ok(128 + signal),
        None => bail!("child ended without exit code or signal: {exit_status:?}"),
    }
}

/// [`CommandRunner`] that runs every command as an [`ExternalCommand`].
#[derive(Debug, Default)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(&mut self, argv: &[&[u8]]) -> Result<ExitCode> {
        match ExternalCommand::from_argv(argv) {
            Some(cmd) => cmd.execute(),
            None => Ok(0),
        }
    }
}
