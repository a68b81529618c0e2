//! Error mapping guide:
//! - Translation itself never fails; only reading input, rendering and writing output can.
//! - Every failure maps to exit code 1; usage errors are reported by clap with its own code.
use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("cannot read {}: {source}", path.display())]
    InputRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot render script: {0}")]
    Render(#[source] io::Error),

    #[error("cannot write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, TranslateError>;

/// Process exit code for a failed run.
pub fn exit_code_for_translate_error(e: &TranslateError) -> u8 {
    match e {
        TranslateError::InputRead { .. }
        | TranslateError::Render(_)
        | TranslateError::WriteOutput { .. } => 1,
    }
}
