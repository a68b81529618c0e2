use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use docker2sh::{
    exit_code_for_translate_error, log_stderr, parse_dockerfile, read_dockerfile, translate, Tone,
    TranslateError, TranslateOptions, DEFAULT_SHELL,
};

mod cli;

use crate::cli::Cli;

fn resolve_shell(cli: &Cli) -> String {
    cli.shell
        .clone()
        .or_else(|| {
            env::var("DOCKER2SH_SHELL")
                .ok()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        })
        .unwrap_or_else(|| DEFAULT_SHELL.to_string())
}

fn source_name(path: &Path) -> String {
    if path.as_os_str() == "-" {
        "<stdin>".to_string()
    } else {
        path.display().to_string()
    }
}

/// Build context when `--context` is absent: the Dockerfile's own directory. Standard input has
/// none; the script then resolves sources against the directory it is started from.
fn default_context(dockerfile: &Path) -> Option<String> {
    if dockerfile.as_os_str() == "-" {
        return None;
    }
    let parent = match dockerfile.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match fs::canonicalize(parent) {
        Ok(dir) => dir.to_str().map(str::to_string),
        Err(e) => {
            tracing::debug!(dir = %parent.display(), "cannot resolve build context: {e}");
            None
        }
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> io::Result<()> {
    Ok(())
}

fn write_output(text: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text)
                .and_then(|()| make_executable(path))
                .map_err(|source| TranslateError::WriteOutput {
                    path: path.to_path_buf(),
                    source,
                })?;
            tracing::debug!(path = %path.display(), "script written");
        }
        None => {
            let mut out = io::stdout().lock();
            out.write_all(text.as_bytes())
                .and_then(|()| out.flush())
                .map_err(|e| anyhow::anyhow!("cannot write to stdout: {e}"))?;
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let input = read_dockerfile(&cli.dockerfile)?;

    if cli.json {
        let mut text = serde_json::to_string_pretty(&parse_dockerfile(&input))
            .context("cannot serialize instructions")?;
        text.push('\n');
        return write_output(&text, cli.output.as_deref());
    }

    let opts = TranslateOptions {
        shell: resolve_shell(cli),
        context_dir: cli
            .context
            .clone()
            .or_else(|| default_context(&cli.dockerfile)),
        source_name: Some(source_name(&cli.dockerfile)),
        embed: cli.embed,
    };
    let script = translate(&input, &opts);
    let text = script.render().map_err(TranslateError::Render)?;
    write_output(&text, cli.output.as_deref())?;

    if cli.verbose {
        let summary = format!(
            "{} statement(s) emitted, {} instruction(s) skipped",
            script.statements().len(),
            script.skipped()
        );
        let tone = if script.skipped() > 0 {
            Tone::Warn
        } else {
            Tone::Info
        };
        log_stderr(tone, &summary);
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Some(mode) = cli.color {
        docker2sh::set_color_mode(mode);
    }
    docker2sh::telemetry_init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::from(0),
        Err(e) => {
            log_stderr(Tone::Error, &e.to_string());
            let code = e
                .downcast_ref::<TranslateError>()
                .map(exit_code_for_translate_error)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}
