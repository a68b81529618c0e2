//! Exec form (`["cmd", "arg"]`) versus shell form (`cmd arg`) detection.

use crate::util::shell_join;

/// How a RUN/CMD/ENTRYPOINT argument was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandForm {
    /// JSON array of discrete arguments.
    Exec(Vec<String>),
    /// Shell-syntax string, whitespace-normalised.
    Shell(String),
}

impl CommandForm {
    pub fn parse(raw: &str) -> Self {
        match parse_json_array(raw) {
            Some(args) => CommandForm::Exec(args),
            None => CommandForm::Shell(normalize_whitespace(raw)),
        }
    }

    /// One shell command line: exec arguments are each quoted, shell text is passed through.
    pub fn to_command_line(&self) -> String {
        match self {
            CommandForm::Exec(args) => shell_join(args),
            CommandForm::Shell(text) => text.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CommandForm::Exec(args) => args.is_empty(),
            CommandForm::Shell(text) => text.is_empty(),
        }
    }
}

/// Parse a JSON array of strings; anything else (invalid JSON, non-string items) is `None`.
pub fn parse_json_array(raw: &str) -> Option<Vec<String>> {
    let trimmed = raw.trim();
    if !trimmed.starts_with('[') {
        return None;
    }
    serde_json::from_str::<Vec<String>>(trimmed).ok()
}

/// Collapse runs of unquoted whitespace into one space and trim the ends.
///
/// Text inside single or double quotes, and backslash-escaped characters, are left untouched.
pub fn normalize_whitespace(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_single = false;
    let mut in_double = false;
    let mut escaped = false;
    let mut pending_space = false;

    for ch in s.trim().chars() {
        if escaped {
            out.push(ch);
            escaped = false;
            continue;
        }
        if !in_single && !in_double && ch.is_whitespace() {
            pending_space = true;
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        match ch {
            '\\' if !in_single => escaped = true,
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            _ => {}
        }
        out.push(ch);
    }
    out
}
