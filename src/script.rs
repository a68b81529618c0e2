use std::io;

/// Interpreter written into the shebang line unless overridden.
pub const DEFAULT_SHELL: &str = "/bin/sh";

/// Translated shell script: a fixed prologue followed by statements in instruction order.
///
/// Invariants:
/// - Statements are append-only and rendered verbatim, never reordered or deduplicated.
/// - No line may contain `\n` or `\0`; `render()` refuses such scripts. A lone `\r` is ordinary
///   text to the shell and passes through.
/// - `render()` joins lines with `\n` and always ends with a trailing newline.
#[derive(Debug, Clone)]
pub struct OutputScript {
    prologue: Vec<String>,
    statements: Vec<String>,
    skipped: usize,
}

impl OutputScript {
    pub fn new(shell: &str) -> Self {
        Self {
            prologue: vec![format!("#!{shell}"), "set -e".to_string()],
            statements: Vec::new(),
            skipped: 0,
        }
    }

    /// Add a comment naming the translated Dockerfile right after the strict-mode line.
    pub fn with_source(mut self, source: &str) -> Self {
        self.prologue.push(format!("# translated from {source}"));
        self
    }

    /// Append a setup line that runs before every statement.
    pub(crate) fn push_prologue(&mut self, line: impl Into<String>) {
        self.prologue.push(line.into());
    }

    /// Append one statement line (no embedded newlines).
    pub fn push(&mut self, line: impl Into<String>) -> &mut Self {
        self.statements.push(line.into());
        self
    }

    pub fn extend<I>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = String>,
    {
        for l in lines {
            self.statements.push(l);
        }
        self
    }

    pub(crate) fn note_skipped(&mut self) {
        self.skipped += 1;
    }

    /// Number of instructions that were left as `# skipped:` comments.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn prologue(&self) -> &[String] {
        &self.prologue
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Statements that run something, i.e. everything that is not a comment.
    pub fn executable_lines(&self) -> impl Iterator<Item = &str> {
        self.statements
            .iter()
            .map(String::as_str)
            .filter(|l| !l.trim_start().starts_with('#'))
    }

    pub fn render(&self) -> io::Result<String> {
        let lines = self.prologue.iter().chain(self.statements.iter());
        for (i, l) in lines.clone().enumerate() {
            if l.contains('\n') || l.contains('\0') {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("script line {i} contains a newline or NUL; use atomic lines"),
                ));
            }
        }

        let mut out = lines.map(String::as_str).collect::<Vec<_>>().join("\n");
        out.push('\n');
        debug_assert!(!out.contains('\0'));
        Ok(out)
    }
}
