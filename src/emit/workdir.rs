use super::Emission;
use crate::context::TranslationContext;
use crate::words::{split_words, Word};

/// WORKDIR: create and enter the directory; later instructions resolve against it.
pub(super) fn emit_workdir(raw: &str, ctx: &mut TranslationContext) -> Emission {
    let words = split_words(raw, ctx.escape());
    let path = Word::join(&words, " ");
    if path.is_empty() {
        return Emission::Skip;
    }
    let dir = ctx.resolve_path(&ctx.expand(&path));
    let quoted = dir.to_shell();
    ctx.set_workdir(dir);
    Emission::line(format!("mkdir -p {quoted} && cd {quoted}"))
}

/// USER: later RUN lines execute through `su`; `root`/`0` switches back.
pub(super) fn emit_user(raw: &str, ctx: &mut TranslationContext) -> Emission {
    let Some(spec) = split_words(raw, ctx.escape()).into_iter().next() else {
        return Emission::Skip;
    };
    let spec = ctx.expand(&spec);
    let user = match spec.split_key(':') {
        Some((name, _group)) => Word::literal(name),
        None => spec,
    };
    if user.is_empty() {
        return Emission::Skip;
    }

    let shown = user.to_shell();
    if matches!(user.as_literal().as_deref(), Some("root") | Some("0")) {
        ctx.set_user(None);
        return Emission::line(format!("# USER {shown}: RUN lines execute as the invoking user"));
    }
    ctx.set_user(Some(user));
    Emission::line(format!("# USER {shown}: RUN lines execute via su -s /bin/sh {shown}"))
}
