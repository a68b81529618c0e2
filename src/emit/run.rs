use super::Emission;
use crate::context::TranslationContext;
use crate::form::CommandForm;
use crate::util::shell_escape;
use crate::words::is_var_name;

/// Builtins whose effect outlives the command when run in the script's own shell.
const STATEFUL_BUILTINS: &[&str] = &[
    "cd", "pushd", "popd", "export", "unset", "umask", "set", "alias", "unalias", "source", ".",
    "exec", "readonly", "trap", "ulimit", "shift", "local", "declare", "typeset", "eval", "shopt",
    "hash",
];

/// Words that may precede the command name without being one.
const LEADING_RESERVED: &[&str] = &[
    "if", "then", "else", "elif", "do", "while", "until", "!", "{", "time",
];

pub(super) fn emit_run(raw: &str, ctx: &TranslationContext) -> Emission {
    let form = CommandForm::parse(raw);
    if form.is_empty() {
        return Emission::Skip;
    }
    Emission::line(scoped_command(form.to_command_line(), ctx))
}

/// Scope a command line to the active user and working directory. Commands that would change
/// the script's own shell state run in a subshell; under `su` they already run in a child.
fn scoped_command(command: String, ctx: &TranslationContext) -> String {
    let isolate = ctx.user().is_none() && changes_shell_state(&command);
    let mut line = command;
    if let Some(user) = ctx.user() {
        line = format!(
            "su -s /bin/sh {} -c {}",
            user.to_shell(),
            shell_escape(&line)
        );
    }
    if let Some(dir) = ctx.workdir() {
        line = format!("cd {} && {}", dir.to_shell(), line);
    }
    if isolate {
        line = format!("({line})");
    }
    line
}

#[derive(Debug, PartialEq)]
enum Token {
    Word(String),
    Op,
}

/// Split a command line into words and control operators, honoring quotes and backslashes.
fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    let mut in_word = false;
    let mut chars = line.chars();
    let flush = |tokens: &mut Vec<Token>, word: &mut String, in_word: &mut bool| {
        if *in_word {
            tokens.push(Token::Word(std::mem::take(word)));
            *in_word = false;
        }
    };
    while let Some(c) = chars.next() {
        match c {
            '\'' => {
                in_word = true;
                for q in chars.by_ref() {
                    if q == '\'' {
                        break;
                    }
                    word.push(q);
                }
            }
            '"' => {
                in_word = true;
                while let Some(q) = chars.next() {
                    match q {
                        '"' => break,
                        '\\' => {
                            if let Some(n) = chars.next() {
                                word.push(n);
                            }
                        }
                        _ => word.push(q),
                    }
                }
            }
            '\\' => {
                in_word = true;
                if let Some(n) = chars.next() {
                    word.push(n);
                }
            }
            ';' | '&' | '|' | '(' | ')' | '\n' => {
                flush(&mut tokens, &mut word, &mut in_word);
                tokens.push(Token::Op);
            }
            c if c.is_whitespace() => flush(&mut tokens, &mut word, &mut in_word),
            c => {
                in_word = true;
                word.push(c);
            }
        }
    }
    flush(&mut tokens, &mut word, &mut in_word);
    tokens
}

/// Whether any simple command in `line` is a state-changing builtin or a bare assignment.
fn changes_shell_state(line: &str) -> bool {
    let mut at_start = true;
    let mut assigned = false;
    for token in tokenize(line) {
        match token {
            Token::Op => {
                if assigned {
                    return true;
                }
                at_start = true;
            }
            Token::Word(w) if at_start => {
                if LEADING_RESERVED.contains(&w.as_str()) {
                    continue;
                }
                if w.split_once('=').is_some_and(|(name, _)| is_var_name(name)) {
                    assigned = true;
                    continue;
                }
                if STATEFUL_BUILTINS.contains(&w.as_str()) {
                    return true;
                }
                assigned = false;
                at_start = false;
            }
            Token::Word(_) => {}
        }
    }
    assigned
}
