//! Line reassembly: folds continuation lines into logical instruction lines and drops comments
//! and blank lines.
//!
//! Invariants:
//! - A physical line whose right-trimmed text ends with the escape character continues on the
//!   next non-comment, non-blank line; pieces are joined with exactly one space.
//! - A continuation still pending at end of input is emitted as-is.
//! - `# escape=` parser directives are only honoured before the first non-directive line.

/// Escape (and continuation) character used when no parser directive selects another one.
pub const DEFAULT_ESCAPE: char = '\\';

/// One logical Dockerfile line assembled from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based number of the first physical line.
    pub line: usize,
    pub text: String,
}

/// Read the `# escape=` parser directive from the top of a Dockerfile.
///
/// Directives are `# key=value` comments; scanning stops at the first line that is not one.
/// Only `\` and `` ` `` are valid escape characters.
pub fn escape_directive(input: &str) -> char {
    for raw in input.lines() {
        let Some(body) = raw.trim().strip_prefix('#') else {
            break;
        };
        let Some((key, value)) = body.split_once('=') else {
            break;
        };
        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric()) {
            break;
        }
        if key.eq_ignore_ascii_case("escape") {
            return match value.trim() {
                "`" => '`',
                _ => DEFAULT_ESCAPE,
            };
        }
    }
    DEFAULT_ESCAPE
}

/// Reassemble using the escape character selected by the file's parser directive.
pub fn reassemble(input: &str) -> Vec<LogicalLine> {
    reassemble_with(input, escape_directive(input))
}

pub fn reassemble_with(input: &str, escape: char) -> Vec<LogicalLine> {
    let mut out = Vec::new();
    let mut pending: Option<LogicalLine> = None;

    for (idx, raw) in input.lines().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let body = raw.trim_end();
        let (content, continues) = match body.strip_suffix(escape) {
            Some(rest) => (rest.trim(), true),
            None => (body.trim_start(), false),
        };

        match pending.as_mut() {
            Some(cur) => {
                if !content.is_empty() {
                    if !cur.text.is_empty() {
                        cur.text.push(' ');
                    }
                    cur.text.push_str(content);
                }
            }
            None => {
                pending = Some(LogicalLine {
                    line: idx + 1,
                    text: content.to_string(),
                })
            }
        }

        if !continues {
            out.extend(pending.take().filter(|l| !l.text.is_empty()));
        }
    }

    out.extend(pending.take().filter(|l| !l.text.is_empty()));
    out
}
