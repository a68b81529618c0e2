//! docker2sh: translate Dockerfile build instructions into a POSIX shell script.
//!
//! The pipeline is linear:
//! - [`reassemble`] folds continuation lines into logical lines,
//! - [`instruction`] classifies each line by keyword,
//! - [`emit`] turns each instruction into shell lines using the running [`TranslationContext`],
//! - [`script`] collects them behind a shebang and `set -e`.
//!
//! Translation never runs the commands it emits. Beyond reading the Dockerfile it only touches
//! the filesystem when [`TranslateOptions::embed`] asks for context files to be inlined.
//!
//! ```
//! use docker2sh::{translate, TranslateOptions};
//!
//! let script = translate("FROM alpine\nWORKDIR /app\nRUN echo hi\n", &TranslateOptions::default());
//! let lines: Vec<&str> = script.executable_lines().collect();
//! assert_eq!(lines, ["mkdir -p /app && cd /app", "cd /app && echo hi"]);
//! ```

mod color;
pub mod context;
pub mod emit;
mod errors;
pub mod form;
pub mod instruction;
pub mod reassemble;
pub mod script;
mod telemetry;
mod translate;
pub mod util;
pub mod words;

pub use color::*;
pub use context::TranslationContext;
pub use emit::Emission;
pub use errors::{exit_code_for_translate_error, Result, TranslateError};
pub use instruction::{Instruction, Keyword};
pub use reassemble::{reassemble, LogicalLine};
pub use script::{OutputScript, DEFAULT_SHELL};
pub use telemetry::telemetry_init;
pub use translate::{
    parse_dockerfile, read_dockerfile, translate, translate_file, translate_to_string,
    TranslateOptions,
};
pub use util::{shell_escape, shell_join};
