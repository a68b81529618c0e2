//! Inline build-context files into the script as gzip + base64 heredocs.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use base64::Engine as _;
use flate2::write::GzEncoder;
use flate2::Compression;

/// Heredoc terminator; outside the base64 alphabet so payload lines never match it.
const DELIMITER: &str = "DOCKER2SH_EOF";
const LINE_WIDTH: usize = 76;

/// Where a COPY/ADD source lives on the translating host.
pub(super) fn host_path(src: &str, context_dir: Option<&str>) -> PathBuf {
    let src = Path::new(src);
    if src.is_absolute() {
        return src.to_path_buf();
    }
    Path::new(context_dir.unwrap_or(".")).join(src)
}

/// Contents of a regular file, or `None` for directories and unreadable paths.
pub(super) fn read_source(path: &Path) -> Option<Vec<u8>> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        Ok(_) => {
            tracing::debug!(path = %path.display(), "not a regular file, copying at run time");
            return None;
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "cannot embed: {e}");
            return None;
        }
    }
    std::fs::read(path)
        .map_err(|e| tracing::warn!(path = %path.display(), "cannot embed: {e}"))
        .ok()
}

/// Compress and encode, wrapped at a fixed width.
pub(super) fn encode(bytes: &[u8]) -> io::Result<Vec<String>> {
    let mut gz = GzEncoder::new(Vec::new(), Compression::best());
    gz.write_all(bytes)?;
    let packed = gz.finish()?;
    let text = base64::engine::general_purpose::STANDARD.encode(packed);
    Ok(text
        .as_bytes()
        .chunks(LINE_WIDTH)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect())
}

/// Script lines that recreate the file at `target` (already shell-quoted).
pub(super) fn heredoc(target: &str, payload: Vec<String>) -> Vec<String> {
    let mut lines = Vec::with_capacity(payload.len() + 2);
    lines.push(format!("base64 -d <<'{DELIMITER}' | gunzip -c > {target}"));
    lines.extend(payload);
    lines.push(DELIMITER.to_string());
    lines
}
