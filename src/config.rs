//! Runtime settings taken from the interpreter's own environment.
//!
//! These variables are read once at startup. Children never see them, since
//! every command runs with an empty environment.

use std::io::IsTerminal;

/// Variable holding the log filter, in `tracing_subscriber::EnvFilter` syntax.
pub const LOG_VAR: &str = "HSH_LOG";
/// Variable that turns rustyline editing on terminals off when set to a false value.
pub const LINE_EDITING_VAR: &str = "HSH_LINE_EDITING";
/// Filter used when [`LOG_VAR`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Standard input is a terminal, so a prompt is shown.
    pub interactive: bool,
    /// Use the line editor instead of the plain reader on terminals.
    pub line_editing: bool,
    pub log_filter: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(std::io::stdin().is_terminal(), |key| {
            std::env::var(key).ok()
        })
    }

    pub fn from_lookup(interactive: bool, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let line_editing = match lookup(LINE_EDITING_VAR) {
            Some(value) => !is_false(&value),
            None => true,
        };
        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        Self {
            interactive,
            line_editing,
            log_filter,
        }
    }

    /// Whether lines should come from the rustyline editor.
    pub fn use_editor(&self) -> bool {
        self.interactive && self.line_editing
    }
}

fn is_false(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "off" | "no"
    )
}
