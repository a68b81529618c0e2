//! Instruction dispatch: keyword extraction and the closed set of recognized keywords.

use serde::Serialize;

use crate::reassemble::LogicalLine;

/// Recognized Dockerfile keywords plus an explicit catch-all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    From,
    Run,
    Copy,
    Add,
    Workdir,
    Env,
    Arg,
    User,
    Label,
    Maintainer,
    Expose,
    Volume,
    Cmd,
    Entrypoint,
    Unknown,
}

impl Keyword {
    /// Case-insensitive keyword lookup.
    pub fn parse(word: &str) -> Keyword {
        match word.to_ascii_uppercase().as_str() {
            "FROM" => Keyword::From,
            "RUN" => Keyword::Run,
            "COPY" => Keyword::Copy,
            "ADD" => Keyword::Add,
            "WORKDIR" => Keyword::Workdir,
            "ENV" => Keyword::Env,
            "ARG" => Keyword::Arg,
            "USER" => Keyword::User,
            "LABEL" => Keyword::Label,
            "MAINTAINER" => Keyword::Maintainer,
            "EXPOSE" => Keyword::Expose,
            "VOLUME" => Keyword::Volume,
            "CMD" => Keyword::Cmd,
            "ENTRYPOINT" => Keyword::Entrypoint,
            _ => Keyword::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::From => "FROM",
            Keyword::Run => "RUN",
            Keyword::Copy => "COPY",
            Keyword::Add => "ADD",
            Keyword::Workdir => "WORKDIR",
            Keyword::Env => "ENV",
            Keyword::Arg => "ARG",
            Keyword::User => "USER",
            Keyword::Label => "LABEL",
            Keyword::Maintainer => "MAINTAINER",
            Keyword::Expose => "EXPOSE",
            Keyword::Volume => "VOLUME",
            Keyword::Cmd => "CMD",
            Keyword::Entrypoint => "ENTRYPOINT",
            Keyword::Unknown => "UNKNOWN",
        }
    }
}

/// One logical Dockerfile directive.
///
/// Serializes as `{"instruction": "RUN", "value": "...", "line": 3}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    #[serde(skip)]
    pub keyword: Keyword,
    /// Keyword as written, uppercased (kept for unrecognized keywords too).
    #[serde(rename = "instruction")]
    pub name: String,
    #[serde(rename = "value")]
    pub raw_arguments: String,
    pub line: usize,
    /// The full logical line.
    #[serde(skip)]
    pub source: String,
}

impl Instruction {
    pub fn from_line(line: &LogicalLine) -> Self {
        let text = line.text.trim();
        let (word, rest) = match text.find(char::is_whitespace) {
            Some(i) => (&text[..i], &text[i..]),
            None => (text, ""),
        };
        Instruction {
            keyword: Keyword::parse(word),
            name: word.to_ascii_uppercase(),
            raw_arguments: rest.trim().to_string(),
            line: line.line,
            source: text.to_string(),
        }
    }
}

pub fn parse_instructions(lines: &[LogicalLine]) -> Vec<Instruction> {
    lines.iter().map(Instruction::from_line).collect()
}
