use anyhow::Result;

/// Conventional process exit code type used by this crate.
///
/// A value of 0 indicates success; any non-zero value indicates failure.
/// Children killed by a signal are reported as `128 + signal`.
pub type ExitCode = i32;

/// Runs one command line's argument vector to completion.
///
/// `argv[0]` names the program. Implementors block until the command has
/// finished. An `Err` is reserved for failures the interpreter cannot continue
/// after (the process could not be created or waited for); a command that
/// merely fails, or cannot be executed, yields `Ok` with a non-zero code.
pub trait CommandRunner {
    fn run(&mut self, argv: &[&[u8]]) -> Result<ExitCode>;
}
