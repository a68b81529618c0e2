//! Translation entry points: text in, [`OutputScript`] out.

use std::io::Read;
use std::path::Path;

use tracing::instrument;

use crate::context::TranslationContext;
use crate::emit::{emit, skipped_comment, Emission, CONTEXT_VAR};
use crate::errors::{Result, TranslateError};
use crate::instruction::{parse_instructions, Instruction};
use crate::reassemble::{escape_directive, reassemble_with};
use crate::script::{OutputScript, DEFAULT_SHELL};

/// Knobs for one translation run. The library reads no environment variables itself.
#[derive(Debug, Clone)]
pub struct TranslateOptions {
    /// Interpreter for the shebang line.
    pub shell: String,
    /// Build context directory prepended to relative COPY/ADD sources. Without one, sources are
    /// resolved against the directory the script is started from.
    pub context_dir: Option<String>,
    /// Name recorded in a header comment.
    pub source_name: Option<String>,
    /// Inline regular files from the build context as heredocs instead of copying at run time.
    pub embed: bool,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            shell: DEFAULT_SHELL.to_string(),
            context_dir: None,
            source_name: None,
            embed: false,
        }
    }
}

/// Parse Dockerfile text into instructions without translating them.
pub fn parse_dockerfile(input: &str) -> Vec<Instruction> {
    parse_instructions(&reassemble_with(input, escape_directive(input)))
}

/// Translate Dockerfile text into a shell script.
#[instrument(level = "debug", skip_all, fields(bytes = input.len()))]
pub fn translate(input: &str, opts: &TranslateOptions) -> OutputScript {
    let escape = escape_directive(input);
    let mut ctx = TranslationContext::new(escape);
    let mut script = OutputScript::new(&opts.shell);
    if let Some(name) = &opts.source_name {
        script = script.with_source(name);
    }

    for inst in parse_instructions(&reassemble_with(input, escape)) {
        tracing::debug!(
            line = inst.line,
            keyword = inst.keyword.as_str(),
            "translating instruction"
        );
        match emit(&inst, &mut ctx, opts) {
            Emission::Lines(lines) => {
                script.extend(lines);
            }
            Emission::Skip => {
                tracing::info!(line = inst.line, "skipped instruction: {}", inst.source);
                script.push(skipped_comment(&inst));
                script.note_skipped();
            }
        }
    }
    if ctx.uses_context_ref() {
        script.push_prologue(format!("{CONTEXT_VAR}=\"${{{CONTEXT_VAR}:-$PWD}}\""));
    }
    script
}

/// Read a Dockerfile; `-` reads standard input.
pub fn read_dockerfile(path: &Path) -> Result<String> {
    let read = if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf).map(|_| buf)
    } else {
        std::fs::read_to_string(path)
    };
    read.map_err(|source| TranslateError::InputRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and translate a Dockerfile. Nothing is produced when the file cannot be read.
pub fn translate_file(path: &Path, opts: &TranslateOptions) -> Result<OutputScript> {
    let input = read_dockerfile(path)?;
    Ok(translate(&input, opts))
}

/// Translate and render to the final script text.
pub fn translate_to_string(input: &str, opts: &TranslateOptions) -> Result<String> {
    translate(input, opts)
        .render()
        .map_err(TranslateError::Render)
}
