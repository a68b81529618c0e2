use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "docker2sh",
    version,
    about = "Translate a Dockerfile into a POSIX shell script that performs the same build steps outside a container.",
    long_about = None,
    after_long_help = "Examples:\n  docker2sh Dockerfile > build.sh\n  docker2sh -o build.sh --context ./app app/Dockerfile\n  cat Dockerfile | docker2sh -\n  docker2sh --json Dockerfile\n  docker2sh --embed Dockerfile | ssh host sh\n\n",
    after_help = "\n"
)]
pub(crate) struct Cli {
    /// Dockerfile to translate; `-` reads standard input
    #[arg(value_name = "DOCKERFILE")]
    pub(crate) dockerfile: PathBuf,

    /// Write the script to this file (made executable) instead of stdout
    #[arg(short = 'o', long, value_name = "FILE")]
    pub(crate) output: Option<PathBuf>,

    /// Print the parsed instructions as JSON instead of translating
    #[arg(short = 'j', long)]
    pub(crate) json: bool,

    /// Interpreter for the shebang line (default: $DOCKER2SH_SHELL or /bin/sh)
    #[arg(long, value_name = "PATH")]
    pub(crate) shell: Option<String>,

    /// Build context for relative COPY/ADD sources (default: the Dockerfile's directory)
    #[arg(long, value_name = "DIR")]
    pub(crate) context: Option<String>,

    /// Inline copied files into the script so it runs without the build context
    #[arg(long)]
    pub(crate) embed: bool,

    /// Log translation steps and a summary of skipped instructions to stderr
    #[arg(short, long)]
    pub(crate) verbose: bool,

    /// Colorize stderr diagnostics: auto|always|never
    #[arg(long = "color", value_enum)]
    pub(crate) color: Option<docker2sh::ColorMode>,
}
