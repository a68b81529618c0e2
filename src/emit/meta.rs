//! Instructions that only document the image: FROM, LABEL, MAINTAINER, EXPOSE, CMD, ENTRYPOINT.

use super::Emission;
use crate::form::{normalize_whitespace, CommandForm};
use crate::instruction::Keyword;

pub(super) fn emit_from(raw: &str) -> Emission {
    let image = normalize_whitespace(raw);
    if image.is_empty() {
        return Emission::Skip;
    }
    Emission::line(format!("# FROM {image} (base image is not materialized)"))
}

pub(super) fn emit_metadata(keyword: Keyword, raw: &str) -> Emission {
    Emission::line(format!("# {} {}", keyword.as_str(), normalize_whitespace(raw)))
}

pub(super) fn emit_expose(raw: &str) -> Emission {
    Emission::line(format!(
        "# EXPOSE {} (no-op outside a container)",
        normalize_whitespace(raw)
    ))
}

/// CMD/ENTRYPOINT: suggest the command instead of running it; the script only sets things up.
pub(super) fn emit_start_command(keyword: Keyword, raw: &str) -> Emission {
    let form = CommandForm::parse(raw);
    if form.is_empty() {
        return Emission::Skip;
    }
    Emission::line(format!(
        "# {} (run manually): {}",
        keyword.as_str(),
        form.to_command_line()
    ))
}
