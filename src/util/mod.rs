#![allow(clippy::module_name_repetitions)]
//! POSIX shell quoting helpers.

pub fn shell_join(args: &[String]) -> String {
    args.iter()
        .map(|a| shell_escape(a))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn shell_escape(s: &str) -> String {
    if s.is_empty() {
        "''".to_string()
    } else if s
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_=./:@".contains(c))
    {
        s.to_string()
    } else {
        let escaped = s.replace('\'', "'\"'\"'");
        format!("'{}'", escaped)
    }
}

fn is_glob_char(c: char) -> bool {
    matches!(c, '*' | '?' | '[' | ']')
}

pub fn has_glob(s: &str) -> bool {
    s.chars().any(is_glob_char)
}

/// Quote a path while leaving `*`, `?`, `[` and `]` live so the shell still expands them.
pub fn shell_escape_glob(s: &str) -> String {
    if !has_glob(s) {
        return shell_escape(s);
    }
    let mut out = String::with_capacity(s.len() + 4);
    let mut run = String::new();
    for ch in s.chars() {
        if is_glob_char(ch) {
            if !run.is_empty() {
                out.push_str(&shell_escape(&run));
                run.clear();
            }
            out.push(ch);
        } else {
            run.push(ch);
        }
    }
    if !run.is_empty() {
        out.push_str(&shell_escape(&run));
    }
    out
}

/// Escape text for use inside a double-quoted shell string (`"..."`).
pub fn dq_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        if matches!(ch, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
