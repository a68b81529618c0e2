mod support;

use std::fs;
use std::process::Command;

#[test]
fn test_e2e_env_values_survive_shell_quoting() {
    if !support::have_sh() {
        eprintln!("skipping: sh not found");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let out_file = td.path().join("msg.txt");

    // Double quotes, a literal dollar, backticks, an apostrophe and a glob character.
    let dockerfile = format!(
        "ENV MSG=\"say \\\"hi\\\" \\$HOME `x` it's *\"\n\
         ENV LEGACY two   words\n\
         RUN printf '%s|%s\\n' \"$MSG\" \"$LEGACY\" > {}\n",
        out_file.display()
    );
    let df = support::write_dockerfile(td.path(), &dockerfile);
    let out = support::run_docker2sh(&[df.to_str().expect("utf8 path")], None);
    support::assert_success(&out);
    let script = td.path().join("build.sh");
    fs::write(&script, &out.stdout).expect("write script");

    let status = Command::new("sh")
        .arg(&script)
        .env_remove("MSG")
        .status()
        .expect("run script");
    assert!(status.success(), "script failed:\n{}", support::stdout_of(&out));

    assert_eq!(
        fs::read_to_string(&out_file).expect("read msg"),
        "say \"hi\" $HOME `x` it's *|two words\n"
    );
}

#[test]
fn test_e2e_exec_form_keeps_arguments_whole() {
    if !support::have_sh() {
        eprintln!("skipping: sh not found");
        return;
    }
    let td = tempfile::tempdir().expect("tmpdir");
    let out_file = td.path().join("args.txt");
    let dockerfile = format!(
        "RUN [\"sh\", \"-c\", \"printf '%s\\\\n' \\\"$0\\\" > {}\", \"a b  c\"]\n",
        out_file.display()
    );
    let df = support::write_dockerfile(td.path(), &dockerfile);
    let out = support::run_docker2sh(&[df.to_str().expect("utf8 path")], None);
    support::assert_success(&out);
    let script = td.path().join("build.sh");
    fs::write(&script, &out.stdout).expect("write script");

    let status = Command::new("sh").arg(&script).status().expect("run script");
    assert!(status.success(), "script failed:\n{}", support::stdout_of(&out));
    assert_eq!(fs::read_to_string(&out_file).expect("read args"), "a b  c\n");
}
