use super::Emission;
use crate::context::TranslationContext;
use crate::words::{is_var_name, split_words, Word};

/// ENV `KEY=VALUE ...` or legacy `ENV KEY VALUE`: one export per pair.
///
/// All values are expanded against the environment as it was before this instruction.
pub(super) fn emit_env(raw: &str, ctx: &mut TranslationContext) -> Emission {
    let Some(pairs) = env_pairs(raw, ctx.escape()) else {
        return Emission::Skip;
    };

    let expanded: Vec<(String, Word)> = pairs
        .into_iter()
        .map(|(key, value)| {
            let value = ctx.expand(&value);
            (key, value)
        })
        .collect();

    let mut lines = Vec::with_capacity(expanded.len());
    for (key, value) in expanded {
        lines.push(format!("export {key}={}", value.to_shell()));
        ctx.set_env(key, value);
    }
    Emission::Lines(lines)
}

fn env_pairs(raw: &str, escape: char) -> Option<Vec<(String, Word)>> {
    let first = raw.split_whitespace().next()?;
    if !first.contains('=') {
        let rest = raw[first.len()..].trim();
        if !is_var_name(first) || rest.is_empty() {
            return None;
        }
        let value = Word::join(&split_words(rest, escape), " ");
        return Some(vec![(first.to_string(), value)]);
    }

    let mut pairs = Vec::new();
    for word in split_words(raw, escape) {
        let (key, value) = word.split_key('=')?;
        if !is_var_name(&key) {
            return None;
        }
        pairs.push((key, value));
    }
    Some(pairs)
}

/// ARG `NAME[=default] ...`: exported with the default, overridable from the caller's environment.
pub(super) fn emit_arg(raw: &str, ctx: &mut TranslationContext) -> Emission {
    let mut lines = Vec::new();
    for word in split_words(raw, ctx.escape()) {
        let (name, default) = match word.split_key('=') {
            Some((name, default)) => (name, Some(default)),
            None => match word.as_literal() {
                Some(name) => (name, None),
                None => return Emission::Skip,
            },
        };
        if !is_var_name(&name) {
            return Emission::Skip;
        }
        match default {
            Some(default) => {
                let default = ctx.expand(&default);
                lines.push(format!(
                    "export {name}=\"${{{name}:-{}}}\"",
                    default.to_double_quoted()
                ));
            }
            None => lines.push(format!("export {name}")),
        }
    }
    if lines.is_empty() {
        return Emission::Skip;
    }
    Emission::Lines(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(e: Emission) -> Vec<String> {
        match e {
            Emission::Lines(l) => l,
            Emission::Skip => panic!("unexpected skip"),
        }
    }

    #[test]
    fn key_value_pairs_export_quoted_values() {
        let mut ctx = TranslationContext::default();
        assert_eq!(
            lines(emit_env(r#"A=1 GREETING="hello world" Q='it''s'"#, &mut ctx)),
            vec!["export A=1", "export GREETING='hello world'", "export Q=its"]
        );
        assert_eq!(
            ctx.env("GREETING").and_then(Word::as_literal).as_deref(),
            Some("hello world")
        );
    }

    #[test]
    fn legacy_form_takes_rest_of_line() {
        let mut ctx = TranslationContext::default();
        assert_eq!(
            lines(emit_env("MY_NAME John  Doe", &mut ctx)),
            vec!["export MY_NAME='John Doe'"]
        );
    }

    #[test]
    fn values_reference_earlier_env_and_keep_unknown_live() {
        let mut ctx = TranslationContext::default();
        emit_env("APP=/opt/app", &mut ctx);
        assert_eq!(
            lines(emit_env("PATH=$APP/bin:$PATH", &mut ctx)),
            vec!["export PATH=/opt/app/bin:\"${PATH}\""]
        );
    }

    #[test]
    fn same_instruction_sees_previous_values() {
        let mut ctx = TranslationContext::default();
        emit_env("A=old", &mut ctx);
        assert_eq!(
            lines(emit_env("A=new B=$A", &mut ctx)),
            vec!["export A=new", "export B=old"]
        );
    }

    #[test]
    fn dollar_in_single_quotes_stays_literal() {
        let mut ctx = TranslationContext::default();
        assert_eq!(
            lines(emit_env("PRICE='$5'", &mut ctx)),
            vec!["export PRICE='$5'"]
        );
    }

    #[test]
    fn malformed_env_is_skipped() {
        let mut ctx = TranslationContext::default();
        assert_eq!(emit_env("", &mut ctx), Emission::Skip);
        assert_eq!(emit_env("ONLYKEY", &mut ctx), Emission::Skip);
        assert_eq!(emit_env("1BAD=x", &mut ctx), Emission::Skip);
        assert_eq!(emit_env("A=1 nokey", &mut ctx), Emission::Skip);
    }

    #[test]
    fn arg_with_and_without_default() {
        let mut ctx = TranslationContext::default();
        assert_eq!(
            lines(emit_arg("VERSION=1.2 DEBUG", &mut ctx)),
            vec!["export VERSION=\"${VERSION:-1.2}\"", "export DEBUG"]
        );
    }

    #[test]
    fn arg_default_is_double_quote_safe() {
        let mut ctx = TranslationContext::default();
        assert_eq!(
            lines(emit_arg(r#"MSG='a"b$c' GREETING="hi there""#, &mut ctx)),
            vec![
                r#"export MSG="${MSG:-a\"b\$c}""#,
                r#"export GREETING="${GREETING:-hi there}""#,
            ]
        );
    }

    #[test]
    fn arg_default_expands_env() {
        let mut ctx = TranslationContext::default();
        emit_env("BASE=/opt", &mut ctx);
        assert_eq!(
            lines(emit_arg("PREFIX=$BASE/local", &mut ctx)),
            vec![r#"export PREFIX="${PREFIX:-/opt/local}""#]
        );
        assert_eq!(emit_arg("", &mut ctx), Emission::Skip);
        assert_eq!(emit_arg("bad-name=1", &mut ctx), Emission::Skip);
    }
}
