//! Dockerfile word lexer.
//!
//! Arguments of ENV, ARG, WORKDIR, COPY/ADD, USER and VOLUME follow Dockerfile word rules rather
//! than shell rules: quotes group text, the escape character protects the next character and
//! `$NAME` / `${NAME}` / `${NAME:-word}` / `${NAME:+word}` refer to variables. A lexed [`Word`]
//! keeps variable references as separate segments so they can either be substituted from the
//! translation context or emitted as live shell references.

use crate::util::{dq_escape, shell_escape, shell_escape_glob};

/// `${NAME:-word}` / `${NAME:+word}` modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VarOp {
    Default(Word),
    Alternate(Word),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Var { name: String, op: Option<Box<VarOp>> },
}

/// One Dockerfile word: literal text interleaved with variable references.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Word {
    segments: Vec<Segment>,
}

impl Word {
    pub fn literal(s: impl Into<String>) -> Self {
        let s = s.into();
        let mut w = Word::default();
        if !s.is_empty() {
            w.segments.push(Segment::Literal(s));
        }
        w
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn push_str(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Literal(l)) => l.push_str(s),
            _ => self.segments.push(Segment::Literal(s.to_string())),
        }
    }

    pub fn push_char(&mut self, c: char) {
        match self.segments.last_mut() {
            Some(Segment::Literal(l)) => l.push(c),
            _ => self.segments.push(Segment::Literal(c.to_string())),
        }
    }

    pub fn push_var(&mut self, name: impl Into<String>, op: Option<VarOp>) {
        self.segments.push(Segment::Var {
            name: name.into(),
            op: op.map(Box::new),
        });
    }

    /// Append another word, merging adjacent literal text.
    pub fn append(&mut self, other: Word) {
        for seg in other.segments {
            match seg {
                Segment::Literal(s) => self.push_str(&s),
                var => self.segments.push(var),
            }
        }
    }

    /// Join words with a literal separator.
    pub fn join(words: &[Word], sep: &str) -> Word {
        let mut out = Word::default();
        for (i, w) in words.iter().enumerate() {
            if i > 0 {
                out.push_str(sep);
            }
            out.append(w.clone());
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.segments.iter().all(|s| match s {
            Segment::Literal(l) => l.is_empty(),
            Segment::Var { .. } => false,
        })
    }

    /// The plain text of the word when it has no variable references.
    pub fn as_literal(&self) -> Option<String> {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(l) => out.push_str(l),
                Segment::Var { .. } => return None,
            }
        }
        Some(out)
    }

    pub fn starts_with(&self, prefix: &str) -> bool {
        matches!(self.segments.first(), Some(Segment::Literal(l)) if l.starts_with(prefix))
    }

    pub fn ends_with(&self, suffix: &str) -> bool {
        matches!(self.segments.last(), Some(Segment::Literal(l)) if l.ends_with(suffix))
    }

    /// Split at the first `ch` of the leading literal text, as in `KEY=value`.
    pub fn split_key(&self, ch: char) -> Option<(String, Word)> {
        let Some(Segment::Literal(first)) = self.segments.first() else {
            return None;
        };
        let (key, rest) = first.split_once(ch)?;
        let mut value = Word::literal(rest);
        for seg in &self.segments[1..] {
            match seg {
                Segment::Literal(s) => value.push_str(s),
                var => value.segments.push(var.clone()),
            }
        }
        Some((key.to_string(), value))
    }

    /// Render as one shell word; unresolved variables stay live as `"${NAME}"`.
    pub fn to_shell(&self) -> String {
        self.render(shell_escape)
    }

    /// Like [`Word::to_shell`] but leaves glob characters in literal text unquoted.
    pub fn to_shell_glob(&self) -> String {
        self.render(shell_escape_glob)
    }

    fn render(&self, quote: fn(&str) -> String) -> String {
        if self.is_empty() {
            return "''".to_string();
        }
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(l) if l.is_empty() => {}
                Segment::Literal(l) => out.push_str(&quote(l)),
                Segment::Var { .. } => {
                    out.push('"');
                    push_var_expansion(&mut out, seg);
                    out.push('"');
                }
            }
        }
        out
    }

    /// Render for use between double quotes (`"..."`).
    pub fn to_double_quoted(&self) -> String {
        let mut out = String::new();
        for seg in &self.segments {
            match seg {
                Segment::Literal(l) => out.push_str(&dq_escape(l)),
                Segment::Var { .. } => push_var_expansion(&mut out, seg),
            }
        }
        out
    }
}

fn push_var_expansion(out: &mut String, seg: &Segment) {
    let Segment::Var { name, op } = seg else {
        return;
    };
    out.push_str("${");
    out.push_str(name);
    match op.as_deref() {
        Some(VarOp::Default(w)) => {
            out.push_str(":-");
            out.push_str(&w.to_double_quoted());
        }
        Some(VarOp::Alternate(w)) => {
            out.push_str(":+");
            out.push_str(&w.to_double_quoted());
        }
        None => {}
    }
    out.push('}');
}

/// Split Dockerfile arguments into words.
pub fn split_words(input: &str, escape: char) -> Vec<Word> {
    lex(input, escape, true)
}

/// Lex text as a single word; whitespace is kept literally.
pub fn single_word(input: &str, escape: char) -> Word {
    lex(input, escape, false).into_iter().next().unwrap_or_default()
}

pub fn is_var_name(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn lex(input: &str, escape: char, split: bool) -> Vec<Word> {
    let chars: Vec<char> = input.chars().collect();
    let mut words = Vec::new();
    let mut cur = Word::default();
    let mut started = false;
    let mut in_double = false;
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        if in_double {
            if c == '"' {
                in_double = false;
                i += 1;
            } else if c == escape {
                match chars.get(i + 1) {
                    Some(&n) if n == '"' || n == '$' || n == escape => {
                        cur.push_char(n);
                        i += 2;
                    }
                    _ => {
                        cur.push_char(c);
                        i += 1;
                    }
                }
            } else if c == '$' {
                i = lex_var(&chars, i, escape, &mut cur);
            } else {
                cur.push_char(c);
                i += 1;
            }
            continue;
        }

        if split && c.is_whitespace() {
            if started {
                words.push(std::mem::take(&mut cur));
                started = false;
            }
            i += 1;
            continue;
        }

        started = true;
        if c == '\'' {
            i += 1;
            while i < chars.len() && chars[i] != '\'' {
                cur.push_char(chars[i]);
                i += 1;
            }
            i += 1;
        } else if c == '"' {
            in_double = true;
            i += 1;
        } else if c == escape {
            match chars.get(i + 1) {
                Some(&n) => {
                    cur.push_char(n);
                    i += 2;
                }
                None => {
                    cur.push_char(c);
                    i += 1;
                }
            }
        } else if c == '$' {
            i = lex_var(&chars, i, escape, &mut cur);
        } else {
            cur.push_char(c);
            i += 1;
        }
    }

    if started || !cur.is_empty() {
        words.push(cur);
    }
    words
}

/// Lex a variable reference starting at `chars[i] == '$'`; returns the index after it.
fn lex_var(chars: &[char], i: usize, escape: char, cur: &mut Word) -> usize {
    match chars.get(i + 1) {
        Some('{') => {
            let start = i + 2;
            let mut depth = 1;
            let mut j = start;
            while j < chars.len() {
                match chars[j] {
                    '{' => depth += 1,
                    '}' => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    }
                    _ => {}
                }
                j += 1;
            }
            if j >= chars.len() {
                cur.push_char('$');
                return i + 1;
            }
            let inner: String = chars[start..j].iter().collect();
            let (name, op) = match inner.split_once(':') {
                Some((name, rest)) if rest.starts_with('-') => {
                    (name, Some(VarOp::Default(single_word(&rest[1..], escape))))
                }
                Some((name, rest)) if rest.starts_with('+') => {
                    (name, Some(VarOp::Alternate(single_word(&rest[1..], escape))))
                }
                Some(_) => ("", None),
                None => (inner.as_str(), None),
            };
            if is_var_name(name) {
                cur.push_var(name, op);
            } else {
                cur.push_str(&format!("${{{inner}}}"));
            }
            j + 1
        }
        Some(&c) if c.is_ascii_alphabetic() || c == '_' => {
            let mut j = i + 1;
            while j < chars.len() && (chars[j].is_ascii_alphanumeric() || chars[j] == '_') {
                j += 1;
            }
            let name: String = chars[i + 1..j].iter().collect();
            cur.push_var(name, None);
            j
        }
        _ => {
            cur.push_char('$');
            i + 1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lits(input: &str) -> Vec<Option<String>> {
        split_words(input, '\\')
            .iter()
            .map(Word::as_literal)
            .collect()
    }

    #[test]
    fn splits_on_unquoted_whitespace() {
        assert_eq!(
            lits("a  b\tc"),
            vec![Some("a".into()), Some("b".into()), Some("c".into())]
        );
    }

    #[test]
    fn quotes_group_text() {
        assert_eq!(
            lits(r#"A="hello world" 'x y' """#),
            vec![Some("A=hello world".into()), Some("x y".into()), Some("".into())]
        );
    }

    #[test]
    fn escape_protects_next_char() {
        assert_eq!(lits(r"a\ b c\$d"), vec![Some("a b".into()), Some("c$d".into())]);
        let w = split_words("C:`Program` Files", '`');
        assert_eq!(w[0].as_literal().as_deref(), Some("C:Program Files"));
    }

    #[test]
    fn single_quotes_keep_dollar_literal() {
        assert_eq!(lits("'$HOME'"), vec![Some("$HOME".into())]);
    }

    #[test]
    fn variables_become_segments() {
        let w = &split_words("/opt/$APP/${VER}", '\\')[0];
        assert_eq!(w.as_literal(), None);
        assert_eq!(w.to_shell(), "/opt/\"${APP}\"/\"${VER}\"");
    }

    #[test]
    fn default_and_alternate_modifiers() {
        let w = &split_words("${A:-x y}${B:+z}", '\\')[0];
        assert_eq!(w.to_double_quoted(), "${A:-x y}${B:+z}");
    }

    #[test]
    fn invalid_or_unterminated_references_stay_literal() {
        assert_eq!(lits("$ ${1x} ${open"), vec![
            Some("$".into()),
            Some("${1x}".into()),
            Some("${open".into()),
        ]);
    }

    #[test]
    fn split_key_at_first_equals() {
        let w = &split_words("URL=http://x/?a=b", '\\')[0];
        let (k, v) = w.split_key('=').unwrap();
        assert_eq!(k, "URL");
        assert_eq!(v.as_literal().as_deref(), Some("http://x/?a=b"));
    }

    #[test]
    fn empty_word_renders_as_empty_quotes() {
        assert_eq!(Word::default().to_shell(), "''");
    }

    #[test]
    fn join_merges_literals() {
        let words = split_words("my dir", '\\');
        assert_eq!(Word::join(&words, " ").as_literal().as_deref(), Some("my dir"));
    }

    #[test]
    fn var_names() {
        assert!(is_var_name("_A1"));
        assert!(!is_var_name("1A"));
        assert!(!is_var_name("A-B"));
        assert!(!is_var_name(""));
    }
}
