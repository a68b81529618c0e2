//! COPY, ADD and VOLUME: filesystem instructions.

use super::{embed, Emission};
use crate::context::{parent_path, TranslationContext};
use crate::form::parse_json_array;
use crate::translate::TranslateOptions;
use crate::util::has_glob;
use crate::words::{single_word, split_words, Word};

/// Shell variable holding the build context when no directory was given at translation time.
pub(crate) const CONTEXT_VAR: &str = "DOCKER2SH_CONTEXT";

const ARCHIVE_SUFFIXES: &[&str] = &[
    ".tar", ".tar.gz", ".tgz", ".tar.bz2", ".tbz2", ".tar.xz", ".txz",
];

#[derive(Debug, Default)]
struct TransferFlags {
    chown: Option<Word>,
    chmod: Option<Word>,
    from: Option<String>,
}

/// Sources and destination of a COPY/ADD, with flags peeled off the front.
#[derive(Debug)]
struct Transfer {
    flags: TransferFlags,
    /// Expanded, not yet located in the build context.
    sources: Vec<Word>,
    dest: Word,
}

impl Transfer {
    fn parse(raw: &str, ctx: &TranslationContext) -> Option<Transfer> {
        let escape = ctx.escape();
        let mut flags = TransferFlags::default();
        let mut rest = raw.trim_start();
        while rest.starts_with("--") {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let flag = &rest[2..end];
            rest = rest[end..].trim_start();
            let (name, value) = flag.split_once('=').unwrap_or((flag, ""));
            let value = single_word(value, escape);
            match name {
                "chown" => flags.chown = Some(ctx.expand(&value)),
                "chmod" => flags.chmod = Some(ctx.expand(&value)),
                "from" => flags.from = Some(value.as_literal().unwrap_or_default()),
                other => tracing::debug!(flag = other, "ignoring transfer flag"),
            }
        }

        let mut paths: Vec<Word> = match parse_json_array(rest) {
            Some(items) => items.into_iter().map(Word::literal).collect(),
            None => split_words(rest, escape),
        };
        if paths.len() < 2 {
            return None;
        }

        let dest = paths.pop()?;
        let dir_hint = dest.ends_with("/")
            || matches!(dest.as_literal().as_deref(), Some("." | ".."))
            || dest.ends_with("/.")
            || dest.ends_with("/..");
        let mut dest = ctx.resolve_path(&ctx.expand(&dest));
        if dir_hint && !dest.ends_with("/") {
            dest.push_str("/");
        }
        let sources = paths.iter().map(|src| ctx.expand(src)).collect();

        Some(Transfer {
            flags,
            sources,
            dest,
        })
    }

    /// Destination names a directory: trailing slash or several sources.
    fn dest_is_dir(&self) -> bool {
        self.dest.ends_with("/") || self.sources.len() > 1
    }

    /// Directory that has to exist before anything lands in `dest`.
    fn target_dir(&self, force_dir: bool) -> String {
        if force_dir || self.dest_is_dir() {
            return self.dest.to_shell();
        }
        match self.dest.as_literal() {
            Some(path) => Word::literal(parent_path(&path)).to_shell(),
            None => format!("\"$(dirname -- {})\"", self.dest.to_shell()),
        }
    }

    /// Path a single file named `name` ends up at.
    fn file_target(&self, name: &str) -> Word {
        if !self.dest_is_dir() {
            return self.dest.clone();
        }
        let mut target = self.dest.clone();
        if !target.ends_with("/") {
            target.push_str("/");
        }
        target.push_str(name);
        target
    }

    fn ownership(&self) -> Vec<String> {
        let dest = self.dest.to_shell();
        let mut commands = Vec::new();
        if let Some(owner) = &self.flags.chown {
            commands.push(format!("chown -R {} {dest}", owner.to_shell()));
        }
        if let Some(mode) = &self.flags.chmod {
            commands.push(format!("chmod -R {} {dest}", mode.to_shell()));
        }
        commands
    }

    /// One `&&` chain when nothing is embedded; otherwise heredocs follow the chain and ownership
    /// changes come last.
    fn assemble(&self, mut commands: Vec<String>, embedded: Vec<Vec<String>>) -> Vec<String> {
        if embedded.is_empty() {
            commands.extend(self.ownership());
            return vec![commands.join(" && ")];
        }
        let mut lines = vec![commands.join(" && ")];
        lines.extend(embedded.into_iter().flatten());
        let ownership = self.ownership();
        if !ownership.is_empty() {
            lines.push(ownership.join(" && "));
        }
        lines
    }
}

/// Anchor a relative source in the build context: the directory given at translation time, or
/// the one captured in [`CONTEXT_VAR`] when the script starts.
fn locate(src: &Word, ctx: &mut TranslationContext, opts: &TranslateOptions) -> Word {
    if src.starts_with("/") {
        return src.clone();
    }
    let mut out = match &opts.context_dir {
        Some(dir) => Word::literal(dir.trim_end_matches('/')),
        None => {
            ctx.note_context_ref();
            let mut w = Word::default();
            w.push_var(CONTEXT_VAR, None);
            w
        }
    };
    out.push_str("/");
    out.append(src.clone());
    out
}

/// Split sources into inlined heredocs and the ones left for `cp`.
fn embed_sources(
    sources: Vec<Word>,
    transfer: &Transfer,
    opts: &TranslateOptions,
) -> (Vec<Vec<String>>, Vec<Word>) {
    if !opts.embed {
        return (Vec::new(), sources);
    }
    let mut embedded = Vec::new();
    let mut rest = Vec::new();
    for src in sources {
        let inlined = src
            .as_literal()
            .filter(|text| !has_glob(text))
            .and_then(|text| {
                let path = embed::host_path(&text, opts.context_dir.as_deref());
                let name = path.file_name()?.to_str()?.to_string();
                let payload = embed::encode(&embed::read_source(&path)?).ok()?;
                Some(embed::heredoc(&transfer.file_target(&name).to_shell(), payload))
            });
        match inlined {
            Some(lines) => embedded.push(lines),
            None => rest.push(src),
        }
    }
    (embedded, rest)
}

fn join_located(
    sources: &[Word],
    ctx: &mut TranslationContext,
    opts: &TranslateOptions,
) -> String {
    sources
        .iter()
        .map(|src| locate(src, ctx, opts).to_shell_glob())
        .collect::<Vec<_>>()
        .join(" ")
}

/// COPY: recursive copy into the destination, which is resolved against the working directory.
pub(super) fn emit_copy(
    raw: &str,
    ctx: &mut TranslationContext,
    opts: &TranslateOptions,
) -> Emission {
    let Some(transfer) = Transfer::parse(raw, ctx) else {
        return Emission::Skip;
    };
    if transfer.flags.from.is_some() {
        return Emission::Skip;
    }
    let (embedded, copied) = embed_sources(transfer.sources.clone(), &transfer, opts);
    let mut commands = vec![format!("mkdir -p {}", transfer.target_dir(false))];
    if !copied.is_empty() {
        commands.push(format!(
            "cp -R {} {}",
            join_located(&copied, ctx, opts),
            transfer.dest.to_shell()
        ));
    }
    Emission::Lines(transfer.assemble(commands, embedded))
}

enum AddSource {
    Url(url::Url),
    Archive(Word),
    Local(Word),
}

fn classify(src: Word) -> AddSource {
    if let Some(text) = src.as_literal() {
        if let Ok(parsed) = url::Url::parse(&text) {
            if matches!(parsed.scheme(), "http" | "https") {
                return AddSource::Url(parsed);
            }
        }
        let lower = text.to_ascii_lowercase();
        if ARCHIVE_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
            return AddSource::Archive(src);
        }
    }
    AddSource::Local(src)
}

fn url_file_name(url: &url::Url) -> String {
    url.path_segments()
        .and_then(|mut segs| segs.next_back().map(str::to_string))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| "download".to_string())
}

/// ADD: like COPY, plus remote URLs are downloaded and local tar archives are unpacked.
pub(super) fn emit_add(
    raw: &str,
    ctx: &mut TranslationContext,
    opts: &TranslateOptions,
) -> Emission {
    let Some(transfer) = Transfer::parse(raw, ctx) else {
        return Emission::Skip;
    };
    if transfer.flags.from.is_some() {
        return Emission::Skip;
    }

    let mut urls = Vec::new();
    let mut archives = Vec::new();
    let mut locals = Vec::new();
    for src in transfer.sources.iter().cloned() {
        match classify(src) {
            AddSource::Url(u) => urls.push(u),
            AddSource::Archive(w) => archives.push(w),
            AddSource::Local(w) => locals.push(w),
        }
    }
    let (embedded, locals) = embed_sources(locals, &transfer, opts);

    let dest = transfer.dest.to_shell();
    let mut commands = vec![format!(
        "mkdir -p {}",
        transfer.target_dir(!archives.is_empty())
    )];
    if !locals.is_empty() {
        commands.push(format!("cp -R {} {dest}", join_located(&locals, ctx, opts)));
    }
    for u in &urls {
        let target = if archives.is_empty() {
            transfer.file_target(&url_file_name(u)).to_shell()
        } else {
            let mut t = transfer.dest.clone();
            if !t.ends_with("/") {
                t.push_str("/");
            }
            t.push_str(&url_file_name(u));
            t.to_shell()
        };
        commands.push(format!(
            "wget -O {target} {}",
            crate::util::shell_escape(u.as_str())
        ));
    }
    for archive in &archives {
        commands.push(format!(
            "tar -xf {} -C {dest}",
            locate(archive, ctx, opts).to_shell_glob()
        ));
    }
    Emission::Lines(transfer.assemble(commands, embedded))
}

/// VOLUME: mount points become plain directories.
pub(super) fn emit_volume(raw: &str, ctx: &TranslationContext) -> Emission {
    let paths: Vec<Word> = match parse_json_array(raw) {
        Some(items) => items.into_iter().map(Word::literal).collect(),
        None => split_words(raw, ctx.escape()),
    };
    let quoted: Vec<String> = paths
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| ctx.resolve_path(&ctx.expand(p)).to_shell())
        .collect();
    if quoted.is_empty() {
        return Emission::Skip;
    }
    Emission::line(format!("mkdir -p {}", quoted.join(" ")))
}
