//! Interactive line editing for terminal sessions.

use crate::reader::LineSource;
use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// [`LineSource`] that reads from the terminal through `rustyline`.
///
/// Non-blank lines are added to the in-memory history. Ctrl-D ends the
/// input; Ctrl-C abandons the current line and yields an empty one, so the
/// loop simply prompts again.
pub struct EditorSource {
    editor: DefaultEditor,
    prompt: &'static str,
    line: String,
}

impl EditorSource {
    pub fn new(prompt: &'static str) -> Result<Self> {
        let editor = DefaultEditor::new().context("failed to initialize line editor")?;
        Ok(Self {
            editor,
            prompt,
            line: String::new(),
        })
    }
}

impl LineSource for EditorSource {
    fn next_line(&mut self) -> Result<Option<&[u8]>> {
        match self.editor.readline(self.prompt) {
            Ok(line) => {
                if !line.trim_matches(' ').is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                self.line = line;
            }
            Err(ReadlineError::Interrupted) => self.line.clear(),
            Err(ReadlineError::Eof) => return Ok(None),
            Err(err) => return Err(err).context("failed to read from terminal"),
        }
        Ok(Some(self.line.as_bytes()))
    }
}
