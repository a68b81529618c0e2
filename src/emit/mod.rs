//! Per-keyword translation rules.
//!
//! Every emitter takes the instruction and the run's [`TranslationContext`] and either returns
//! the shell lines for it or asks for the instruction to be skipped. Skipped instructions become
//! a single `# skipped: <original line>` comment so the script stays valid and auditable.

mod embed;
mod env;
mod files;
mod meta;
mod run;
mod workdir;

pub(crate) use files::CONTEXT_VAR;

use crate::context::TranslationContext;
use crate::instruction::{Instruction, Keyword};
use crate::translate::TranslateOptions;

/// Result of translating one instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Emission {
    Lines(Vec<String>),
    Skip,
}

impl Emission {
    pub(crate) fn line(line: impl Into<String>) -> Self {
        Emission::Lines(vec![line.into()])
    }
}

/// Route one instruction to its emitter.
pub fn emit(
    inst: &Instruction,
    ctx: &mut TranslationContext,
    opts: &TranslateOptions,
) -> Emission {
    let raw = inst.raw_arguments.as_str();
    match inst.keyword {
        Keyword::From => meta::emit_from(raw),
        Keyword::Run => run::emit_run(raw, ctx),
        Keyword::Copy => files::emit_copy(raw, ctx, opts),
        Keyword::Add => files::emit_add(raw, ctx, opts),
        Keyword::Workdir => workdir::emit_workdir(raw, ctx),
        Keyword::Env => env::emit_env(raw, ctx),
        Keyword::Arg => env::emit_arg(raw, ctx),
        Keyword::User => workdir::emit_user(raw, ctx),
        Keyword::Label | Keyword::Maintainer => meta::emit_metadata(inst.keyword, raw),
        Keyword::Expose => meta::emit_expose(raw),
        Keyword::Volume => files::emit_volume(raw, ctx),
        Keyword::Cmd | Keyword::Entrypoint => meta::emit_start_command(inst.keyword, raw),
        Keyword::Unknown => Emission::Skip,
    }
}

/// Comment line left in place of an instruction that has no translation.
pub fn skipped_comment(inst: &Instruction) -> String {
    format!("# skipped: {}", inst.source)
}
