use std::fs;
use std::process::Command;

use file_relocator::config::CONFIG_ENV_VAR;
use tempfile::tempdir;

fn relocator_cmd(config_dir: &std::path::Path) -> Command {
    let me = assert_cmd::cargo::cargo_bin!("file_relocator");
    let mut cmd = Command::new(me);
    // Keep a developer's real config out of the test.
    cmd.env(CONFIG_ENV_VAR, config_dir.join("absent.xml"));
    cmd
}

#[test]
fn binary_print_config_succeeds() {
    let td = tempdir().unwrap();
    let out = relocator_cmd(td.path())
        .arg("--print-config")
        .output()
        .expect("spawn binary");
    assert!(out.status.success(), "binary should succeed with --print-config");
    assert!(String::from_utf8_lossy(&out.stdout).contains("absent.xml"));
}

#[test]
fn json_summary_on_stdout() {
    let td = tempdir().unwrap();
    let search = td.path().join("in");
    let dest = td.path().join("out");
    fs::create_dir_all(search.join("nested")).unwrap();
    fs::write(search.join("nested").join("a.txt"), b"a").unwrap();

    let out = relocator_cmd(td.path())
        .args(["--json", "--log-level", "quiet", "-s"])
        .arg(&search)
        .arg("-d")
        .arg(&dest)
        .output()
        .expect("spawn binary");

    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    let summary: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(summary["totalFiles"], 1);
    assert_eq!(summary["movedFiles"], 1);
    assert!(dest.join("a.txt").is_file());
}

#[test]
fn missing_search_directory_exits_nonzero() {
    let td = tempdir().unwrap();
    let out = relocator_cmd(td.path())
        .args(["--log-level", "quiet", "-s"])
        .arg(td.path().join("missing"))
        .arg("-d")
        .arg(td.path().join("out"))
        .output()
        .expect("spawn binary");

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("does not exist"));
}

#[test]
fn missing_arguments_exit_nonzero() {
    let td = tempdir().unwrap();
    let out = relocator_cmd(td.path())
        .args(["--log-level", "quiet"])
        .output()
        .expect("spawn binary");

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("search directory is required"));
}
