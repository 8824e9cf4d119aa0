use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn repogen() -> Command {
    Command::cargo_bin("repogen").expect("binary builds")
}

#[test]
fn unpacks_a_manifest_tree() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("manifest.txt");
    fs::write(
        &manifest,
        "--- FILE: src/lib.rs ---\nCONTENT\n```rust\npub fn answer() -> u32 { 42 }\n```\n\
         --- FILE: docs/guide.md ---\nCONTENT\n```\n# Guide\r\n```\n",
    )
    .unwrap();
    let out = temp.path().join("repo_out");

    repogen()
        .arg(&manifest)
        .arg("--output")
        .arg(&out)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected 2 file entries"));

    assert_eq!(
        fs::read_to_string(out.join("src/lib.rs")).unwrap(),
        "pub fn answer() -> u32 { 42 }\n"
    );
    // Carriage returns stripped, exactly one trailing newline
    assert_eq!(
        fs::read_to_string(out.join("docs/guide.md")).unwrap(),
        "# Guide\n"
    );
}

#[test]
fn missing_manifest_exits_3_without_writing() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("repo_out");

    repogen()
        .arg(temp.path().join("absent.txt"))
        .arg("--output")
        .arg(&out)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Manifest file does not exist"));

    assert!(!out.exists());
}

#[test]
fn zero_block_manifest_succeeds_with_zero_count() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("manifest.txt");
    fs::write(&manifest, "prose only, no blocks\n").unwrap();
    let out = temp.path().join("repo_out");

    repogen()
        .arg(&manifest)
        .arg("--output")
        .arg(&out)
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected 0 file entries"));

    assert!(!out.exists());
}

#[test]
fn dry_run_lists_entries_and_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("manifest.txt");
    fs::write(&manifest, "--- FILE: a/b.txt ---\nCONTENT\n```\nhi\n```\n").unwrap();
    let out = temp.path().join("repo_out");

    repogen()
        .arg(&manifest)
        .arg("--output")
        .arg(&out)
        .arg("--dry-run")
        .arg("--output-format")
        .arg("plain")
        .assert()
        .success()
        .stdout(predicate::str::contains("Detected 1 file entries"))
        .stdout(predicate::str::contains("b.txt"));

    assert!(!out.exists());
}

#[test]
fn later_duplicate_path_wins() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("manifest.txt");
    fs::write(
        &manifest,
        "--- FILE: config.ini ---\nCONTENT\n```\nfirst\n```\n\
         --- FILE: config.ini ---\nCONTENT\n```\nsecond\n```\n",
    )
    .unwrap();
    let out = temp.path().join("repo_out");

    repogen()
        .arg(&manifest)
        .arg("--output")
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(out.join("config.ini")).unwrap(),
        "second\n"
    );
}

#[test]
fn rerun_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let manifest = temp.path().join("manifest.txt");
    fs::write(
        &manifest,
        "--- FILE: stable.txt ---\nCONTENT\n```\nsame every time\n```\n",
    )
    .unwrap();
    let out = temp.path().join("repo_out");

    repogen()
        .arg(&manifest)
        .arg("-o")
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success();
    let first = fs::read(out.join("stable.txt")).unwrap();

    repogen()
        .arg(&manifest)
        .arg("-o")
        .arg(&out)
        .arg("--quiet")
        .assert()
        .success();
    let second = fs::read(out.join("stable.txt")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn generate_config_writes_sample_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("repogen.toml");

    repogen()
        .arg("--generate-config")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated sample configuration"));

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("[manifest]"));
    assert!(content.contains("[output]"));
}
