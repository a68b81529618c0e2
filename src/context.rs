//! Per-run translation state threaded through every emitter.

use std::collections::HashMap;

use crate::reassemble::DEFAULT_ESCAPE;
use crate::words::{Segment, VarOp, Word};

/// State carried across instructions within one translation run.
///
/// Starts with working directory `/` (not yet set by WORKDIR), an empty environment and no user
/// switch. Never shared between runs.
#[derive(Debug, Clone)]
pub struct TranslationContext {
    escape: char,
    workdir: Option<Word>,
    env: HashMap<String, Word>,
    user: Option<Word>,
    context_ref: bool,
}

impl Default for TranslationContext {
    fn default() -> Self {
        Self::new(DEFAULT_ESCAPE)
    }
}

impl TranslationContext {
    pub fn new(escape: char) -> Self {
        Self {
            escape,
            workdir: None,
            env: HashMap::new(),
            user: None,
            context_ref: false,
        }
    }

    /// Escape character selected by the Dockerfile's parser directive.
    pub fn escape(&self) -> char {
        self.escape
    }

    /// Working directory explicitly set by WORKDIR, if any.
    pub fn workdir(&self) -> Option<&Word> {
        self.workdir.as_ref()
    }

    /// Effective working directory (`/` until WORKDIR runs).
    pub fn working_dir(&self) -> Word {
        self.workdir.clone().unwrap_or_else(|| Word::literal("/"))
    }

    pub fn set_workdir(&mut self, dir: Word) {
        self.workdir = Some(dir);
    }

    pub fn env(&self, name: &str) -> Option<&Word> {
        self.env.get(name)
    }

    pub fn set_env(&mut self, name: impl Into<String>, value: Word) {
        self.env.insert(name.into(), value);
    }

    /// Non-root user RUN commands execute as.
    pub fn user(&self) -> Option<&Word> {
        self.user.as_ref()
    }

    pub fn set_user(&mut self, user: Option<Word>) {
        self.user = user;
    }

    /// Record that an emitted line refers to the build context captured when the script starts.
    pub fn note_context_ref(&mut self) {
        self.context_ref = true;
    }

    pub fn uses_context_ref(&self) -> bool {
        self.context_ref
    }

    /// Substitute variables recorded by ENV; unknown names stay as references.
    pub fn expand(&self, word: &Word) -> Word {
        let mut out = Word::default();
        for seg in word.segments() {
            match seg {
                Segment::Literal(l) => out.push_str(l),
                Segment::Var { name, op } => match (self.env.get(name), op.as_deref()) {
                    (Some(value), None) => out.append(value.clone()),
                    (Some(value), Some(VarOp::Default(default))) => {
                        if value.is_empty() {
                            out.append(self.expand(default));
                        } else {
                            out.append(value.clone());
                        }
                    }
                    (Some(value), Some(VarOp::Alternate(alt))) => {
                        if !value.is_empty() {
                            out.append(self.expand(alt));
                        }
                    }
                    (None, None) => out.push_var(name.clone(), None),
                    (None, Some(VarOp::Default(default))) => {
                        out.push_var(name.clone(), Some(VarOp::Default(self.expand(default))))
                    }
                    (None, Some(VarOp::Alternate(alt))) => {
                        out.push_var(name.clone(), Some(VarOp::Alternate(self.expand(alt))))
                    }
                },
            }
        }
        out
    }

    /// Resolve a path against the working directory; fully literal results are normalised.
    pub fn resolve_path(&self, path: &Word) -> Word {
        let joined = if path.starts_with("/") {
            path.clone()
        } else {
            let mut base = self.working_dir();
            if !base.ends_with("/") {
                base.push_str("/");
            }
            base.append(path.clone());
            base
        };
        match joined.as_literal() {
            Some(text) => Word::literal(normalize_path(&text)),
            None => joined,
        }
    }
}

/// Lexically normalise an absolute path: collapse `//`, `.` and `..`; keep a trailing `/`.
pub fn normalize_path(path: &str) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            p => parts.push(p),
        }
    }
    let mut out = format!("/{}", parts.join("/"));
    if path.ends_with('/') && out != "/" {
        out.push('/');
    }
    out
}

/// Lexical parent of a literal path (`/a/b` -> `/a`, `/a/b/` -> `/a`, `/a` -> `/`).
pub fn parent_path(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => trimmed[..i].to_string(),
    }
}
