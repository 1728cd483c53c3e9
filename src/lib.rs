//! A minimal interactive command interpreter.
//!
//! Each input line is split on spaces and its first word is run, as a literal
//! path, in a child process that receives the remaining words as arguments and
//! an empty environment. The interpreter waits for the child before reading
//! the next line, and stops at end-of-input or on a line starting with `exit`.
//!
//! The loop lives in [`Interpreter`]. Lines come from a [`LineSource`]: the
//! plain [`StreamSource`] for scripts and pipes, or the rustyline-backed
//! [`EditorSource`] on terminals. Commands go to a [`CommandRunner`], which is
//! [`ProcessRunner`] outside of tests.

pub mod buffer;
pub mod command;
pub mod config;
mod editor;
pub mod external;
mod interpreter;
pub mod lexer;
pub mod reader;

pub use command::{CommandRunner, ExitCode};
pub use config::Config;
pub use editor::EditorSource;
pub use external::{ExternalCommand, ProcessRunner};
pub use interpreter::{Interpreter, Step};
pub use reader::{LineSource, StreamSource};

/// Prompt shown before each read when input is a terminal.
pub const PROMPT: &str = "($) ";
