#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

pub fn bin() -> &'static str {
    env!("CARGO_BIN_EXE_docker2sh")
}

/// Run docker2sh with the given args and optional stdin, isolated from the caller's env knobs.
pub fn run_docker2sh(args: &[&str], stdin: Option<&str>) -> Output {
    let mut cmd = Command::new(bin());
    cmd.args(args)
        .env_remove("DOCKER2SH_SHELL")
        .env_remove("DOCKER2SH_LOG")
        .env_remove("DOCKER2SH_COLOR")
        .env("NO_COLOR", "1")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    let mut child = cmd.spawn().expect("spawn docker2sh");
    {
        let mut pipe = child.stdin.take().expect("stdin pipe");
        if let Some(text) = stdin {
            pipe.write_all(text.as_bytes()).expect("write stdin");
        }
    }
    child.wait_with_output().expect("wait docker2sh")
}

pub fn write_dockerfile(dir: &Path, text: &str) -> PathBuf {
    let path = dir.join("Dockerfile");
    std::fs::write(&path, text).expect("write Dockerfile");
    path
}

pub fn stdout_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).to_string()
}

pub fn stderr_of(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).to_string()
}

pub fn assert_success(out: &Output) {
    assert!(
        out.status.success(),
        "docker2sh exited non-zero: {:?}\nstdout:\n{}\nstderr:\n{}",
        out.status.code(),
        stdout_of(out),
        stderr_of(out)
    );
}

pub fn have_sh() -> bool {
    Command::new("sh")
        .args(["-c", "true"])
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}
