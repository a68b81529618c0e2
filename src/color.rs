//! Colored diagnostics on stderr. The generated script is never colored.

use clap::ValueEnum;
use once_cell::sync::OnceCell;

#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Severity of a diagnostic line.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Tone {
    Info,
    Warn,
    Error,
}

impl Tone {
    fn code(self) -> &'static str {
        match self {
            Tone::Info => "\x1b[36;1m",
            Tone::Warn => "\x1b[33m",
            Tone::Error => "\x1b[31;1m",
        }
    }
}

static COLOR_MODE: OnceCell<ColorMode> = OnceCell::new();

/// Fix the mode chosen on the command line; later calls are ignored.
pub fn set_color_mode(mode: ColorMode) {
    let _ = COLOR_MODE.set(mode);
}

/// `NO_COLOR` wins, then `--color`, then `DOCKER2SH_COLOR`.
fn effective_mode(no_color: bool, flag: Option<ColorMode>, env: Option<&str>) -> ColorMode {
    if no_color {
        return ColorMode::Never;
    }
    flag.or_else(|| env.and_then(|v| ColorMode::from_str(v.trim(), true).ok()))
        .unwrap_or(ColorMode::Auto)
}

fn stderr_colored() -> bool {
    let env = std::env::var("DOCKER2SH_COLOR").ok();
    match effective_mode(
        std::env::var_os("NO_COLOR").is_some(),
        COLOR_MODE.get().copied(),
        env.as_deref(),
    ) {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => atty::is(atty::Stream::Stderr),
    }
}

fn format_line(tone: Tone, colored: bool, msg: &str) -> String {
    if colored {
        format!("{}docker2sh: {msg}\x1b[0m", tone.code())
    } else {
        format!("docker2sh: {msg}")
    }
}

/// Print one `docker2sh:`-prefixed line to stderr.
pub fn log_stderr(tone: Tone, msg: &str) {
    eprintln!("{}", format_line(tone, stderr_colored(), msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_overrides_everything() {
        assert_eq!(
            effective_mode(true, Some(ColorMode::Always), Some("always")),
            ColorMode::Never
        );
    }

    #[test]
    fn flag_beats_environment() {
        assert_eq!(
            effective_mode(false, Some(ColorMode::Never), Some("always")),
            ColorMode::Never
        );
        assert_eq!(effective_mode(false, None, Some(" Always ")), ColorMode::Always);
        assert_eq!(effective_mode(false, None, Some("rainbow")), ColorMode::Auto);
        assert_eq!(effective_mode(false, None, None), ColorMode::Auto);
    }

    #[test]
    fn lines_carry_prefix_and_reset() {
        assert_eq!(format_line(Tone::Warn, false, "x"), "docker2sh: x");
        assert_eq!(
            format_line(Tone::Error, true, "x"),
            "\x1b[31;1mdocker2sh: x\x1b[0m"
        );
    }
}
