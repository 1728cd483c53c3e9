use crate::command::{CommandRunner, ExitCode};
use crate::lexer::{self, DELIMITERS};
use crate::reader::LineSource;
use anyhow::Result;

/// Word that terminates the interpreter when it is the first token of a line.
pub const EXIT_COMMAND: &[u8] = b"exit";

/// What happened during one [`Interpreter::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The line was handled; keep reading.
    Continue,
    /// The line asked the interpreter to stop.
    Exit,
    /// There is no more input.
    EndOfInput,
}

/// The read-tokenize-execute loop.
///
/// Lines come from a [`LineSource`] and every non-blank line is handed to a
/// [`CommandRunner`], one at a time: the next line is only read once the
/// previous command has finished.
///
/// Example
/// ```
/// use hsh::{Interpreter, ProcessRunner, StreamSource};
/// let source = StreamSource::new("/bin/true\nexit\n".as_bytes());
/// let mut sh = Interpreter::new(source, ProcessRunner);
/// sh.run().unwrap();
/// assert_eq!(sh.last_status(), Some(0));
/// ```
pub struct Interpreter<S, C> {
    source: S,
    runner: C,
    last_status: Option<ExitCode>,
}

impl<S: LineSource, C: CommandRunner> Interpreter<S, C> {
    pub fn new(source: S, runner: C) -> Self {
        Self {
            source,
            runner,
            last_status: None,
        }
    }

    /// Read and handle a single line.
    ///
    /// Errors are fatal: the input could not be read or a process could not
    /// be created or waited for.
    pub fn step(&mut self) -> Result<Step> {
        let Some(line) = self.source.next_line()? else {
            return Ok(Step::EndOfInput);
        };
        let tokens = match lexer::tokenize(line, DELIMITERS) {
            Ok(tokens) => tokens,
            Err(e) => {
                eprintln!("hsh: {e}");
                return Ok(Step::Continue);
            }
        };
        match tokens.program() {
            None => Ok(Step::Continue),
            Some(EXIT_COMMAND) => Ok(Step::Exit),
            Some(program) => {
                let code = self.runner.run(tokens.as_slice())?;
                tracing::debug!(
                    program = %String::from_utf8_lossy(program),
                    code,
                    "command finished"
                );
                self.last_status = Some(code);
                Ok(Step::Continue)
            }
        }
    }

    /// Handle lines until `exit` or end-of-input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.step()? {
                Step::Continue => {}
                Step::Exit => {
                    tracing::debug!("exit requested");
                    return Ok(());
                }
                Step::EndOfInput => {
                    tracing::debug!("end of input");
                    return Ok(());
                }
            }
        }
    }

    /// Exit code of the most recent command, if any has run.
    pub fn last_status(&self) -> Option<ExitCode> {
        self.last_status
    }

    pub fn runner(&self) -> &C {
        &self.runner
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::StreamSource;
    use std::io::Cursor;

    /// Records every argv instead of running it.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Vec<String>>,
        code: ExitCode,
    }

    impl CommandRunner for Recorder {
        fn run(&mut self, argv: &[&[u8]]) -> Result<ExitCode> {
            self.calls.push(
                argv.iter()
                    .map(|a| String::from_utf8_lossy(a).into_owned())
                    .collect(),
            );
            Ok(self.code)
        }
    }

    /// Fails every command as if no process could be created.
    #[derive(Default)]
    struct Failing {
        calls: usize,
    }

    impl CommandRunner for Failing {
        fn run(&mut self, _argv: &[&[u8]]) -> Result<ExitCode> {
            self.calls += 1;
            anyhow::bail!("fork failed")
        }
    }

    fn interpreter(input: &str) -> Interpreter<StreamSource<Cursor<Vec<u8>>>, Recorder> {
        let source = StreamSource::new(Cursor::new(input.as_bytes().to_vec()));
        Interpreter::new(source, Recorder::default())
    }

    #[test]
    fn test_runs_each_command_with_full_argv() {
        let mut sh = interpreter("/bin/echo hi\n/bin/ls -l /tmp\n");
        sh.run().unwrap();
        assert_eq!(
            sh.runner().calls,
            vec![vec!["/bin/echo", "hi"], vec!["/bin/ls", "-l", "/tmp"]]
        );
        assert_eq!(sh.last_status(), Some(0));
    }

    #[test]
    fn test_blank_lines_are_never_executed() {
        let mut sh = interpreter("\n   \n\n ");
        assert_eq!(sh.step().unwrap(), Step::Continue);
        assert_eq!(sh.step().unwrap(), Step::Continue);
        assert_eq!(sh.step().unwrap(), Step::Continue);
        assert_eq!(sh.step().unwrap(), Step::Continue);
        assert_eq!(sh.step().unwrap(), Step::EndOfInput);
        assert!(sh.runner().calls.is_empty());
        assert_eq!(sh.last_status(), None);
    }

    #[test]
    fn test_exit_stops_before_later_lines() {
        let mut sh = interpreter("/bin/true\nexit now please\n/bin/echo no\n");
        assert_eq!(sh.step().unwrap(), Step::Continue);
        assert_eq!(sh.step().unwrap(), Step::Exit);
        assert_eq!(sh.runner().calls, vec![vec!["/bin/true"]]);
    }

    #[test]
    fn test_exit_must_be_the_whole_first_token() {
        let mut sh = interpreter("exit2\n/bin/exit\n  exit\n");
        assert_eq!(sh.step().unwrap(), Step::Continue);
        assert_eq!(sh.step().unwrap(), Step::Continue);
        assert_eq!(sh.step().unwrap(), Step::Exit);
        assert_eq!(sh.runner().calls, vec![vec!["exit2"], vec!["/bin/exit"]]);
    }

    #[test]
    fn test_failing_command_does_not_stop_the_loop() {
        let source = StreamSource::new(Cursor::new(b"/bin/false\n/bin/false\n".to_vec()));
        let mut sh = Interpreter::new(
            source,
            Recorder {
                code: 1,
                ..Default::default()
            },
        );
        sh.run().unwrap();
        assert_eq!(sh.runner().calls.len(), 2);
        assert_eq!(sh.last_status(), Some(1));
    }

    #[test]
    fn test_too_many_tokens_skips_only_that_line() {
        let crowded = vec!["x"; lexer::MAX_TOKENS + 1].join(" ");
        let mut sh = interpreter(&format!("{crowded}\n/bin/true\n"));
        sh.run().unwrap();
        assert_eq!(sh.runner().calls, vec![vec!["/bin/true"]]);
    }

    #[test]
    fn test_last_line_without_newline_runs() {
        let mut sh = interpreter("/bin/echo tail");
        sh.run().unwrap();
        assert_eq!(sh.runner().calls, vec![vec!["/bin/echo", "tail"]]);
    }

    #[test]
    fn test_runner_error_stops_the_loop() {
        let source = StreamSource::new(Cursor::new(b"/bin/true\n/bin/true\n".to_vec()));
        let mut sh = Interpreter::new(source, Failing::default());
        let err = sh.run().unwrap_err();
        assert_eq!(err.to_string(), "fork failed");
        assert_eq!(sh.runner().calls, 1);
        assert_eq!(sh.last_status(), None);
    }
}
