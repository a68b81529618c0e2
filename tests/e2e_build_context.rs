mod support;

use std::fs;
use std::path::Path;
use std::process::Command;

fn context_with_file(root: &Path) -> std::path::PathBuf {
    let ctx = root.join("ctx");
    fs::create_dir_all(&ctx).expect("mkdir ctx");
    fs::write(ctx.join("hello.txt"), "hello from context\n").expect("write ctx file");
    ctx
}

fn write_script(script_text: &[u8], dir: &Path) -> std::path::PathBuf {
    let script = dir.join("build.sh");
    fs::write(&script, script_text).expect("write script");
    script
}

fn run_script(script_text: &[u8], dir: &Path, cwd: &Path) -> std::process::ExitStatus {
    Command::new("sh")
        .arg(write_script(script_text, dir))
        .current_dir(cwd)
        .env_remove("DOCKER2SH_CONTEXT")
        .status()
        .expect("run script")
}

#[test]
fn test_e2e_sources_resolve_from_dockerfile_directory() {
    if !support::have_sh() {
        eprintln!("skipping: sh not found");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let ctx = context_with_file(td.path());
    let dest = td.path().join("dest");
    let dockerfile = format!("WORKDIR {}\nCOPY hello.txt .\n", dest.display());
    let df = support::write_dockerfile(&ctx, &dockerfile);

    let out = support::run_docker2sh(&[df.to_str().expect("utf8 path")], None);
    support::assert_success(&out);

    // Started from an unrelated directory; the WORKDIR `cd` runs before the copy.
    let status = run_script(&out.stdout, td.path(), Path::new("/"));
    assert!(status.success(), "script failed:\n{}", support::stdout_of(&out));
    assert_eq!(
        fs::read_to_string(dest.join("hello.txt")).expect("copied file"),
        "hello from context\n"
    );
}

#[test]
fn test_e2e_stdin_sources_resolve_from_start_directory() {
    if !support::have_sh() {
        eprintln!("skipping: sh not found");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let ctx = context_with_file(td.path());
    let dest = td.path().join("dest");
    let dockerfile = format!("WORKDIR {}\nCOPY hello.txt copied.txt\n", dest.display());

    let out = support::run_docker2sh(&["-"], Some(&dockerfile));
    support::assert_success(&out);
    assert!(support::stdout_of(&out).contains("\"${DOCKER2SH_CONTEXT}\"/hello.txt"));

    let status = run_script(&out.stdout, td.path(), &ctx);
    assert!(status.success(), "script failed:\n{}", support::stdout_of(&out));
    assert_eq!(
        fs::read_to_string(dest.join("copied.txt")).expect("copied file"),
        "hello from context\n"
    );
}

#[test]
fn test_e2e_run_does_not_leak_shell_state() {
    if !support::have_sh() {
        eprintln!("skipping: sh not found");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let report = td.path().join("where.txt");
    let dockerfile = format!(
        "RUN cd /tmp\n\
         RUN export LEAK=1\n\
         RUN umask 077\n\
         RUN pwd -P > {report}; echo \"${{LEAK:-none}}\" >> {report}; umask >> {report}\n",
        report = report.display()
    );
    let df = support::write_dockerfile(td.path(), &dockerfile);

    let out = support::run_docker2sh(&[df.to_str().expect("utf8 path")], None);
    support::assert_success(&out);
    let status = Command::new("sh")
        .arg("-c")
        .arg("umask 022 && exec sh \"$0\"")
        .arg(write_script(&out.stdout, td.path()))
        .current_dir(td.path())
        .status()
        .expect("run script");
    assert!(status.success(), "script failed:\n{}", support::stdout_of(&out));

    let start = fs::canonicalize(td.path()).expect("canonical start dir");
    assert_eq!(
        fs::read_to_string(&report).expect("report"),
        format!("{}\nnone\n0022\n", start.display())
    );
}

#[test]
fn test_e2e_embedded_files_need_no_context_at_run_time() {
    if !support::have_sh() {
        eprintln!("skipping: sh not found");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let ctx = context_with_file(td.path());
    let dest = td.path().join("dest");
    let dockerfile = format!("COPY --chmod=600 hello.txt {}/hello.txt\n", dest.display());
    let df = support::write_dockerfile(&ctx, &dockerfile);

    let out = support::run_docker2sh(&["--embed", df.to_str().expect("utf8 path")], None);
    support::assert_success(&out);
    let text = support::stdout_of(&out);
    assert!(text.contains("<<'DOCKER2SH_EOF'"), "expected a heredoc:\n{text}");
    assert!(!text.contains("cp -R"), "regular files should not be copied:\n{text}");

    fs::remove_dir_all(&ctx).expect("drop context");
    let status = run_script(&out.stdout, td.path(), td.path());
    assert!(status.success(), "script failed:\n{text}");
    assert_eq!(
        fs::read_to_string(dest.join("hello.txt")).expect("embedded file"),
        "hello from context\n"
    );
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(dest.join("hello.txt")).expect("stat").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
