use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

/// Runs the binary from `cwd` with `HOME` pointed there too, so no user
/// configuration leaks into the test.
fn dirkeep(cwd: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("dirkeep"));
    cmd.current_dir(cwd).env("HOME", cwd).env("RUST_LOG", "off");
    cmd
}

fn files_named(dir: &Path, prefix: &str, suffix: &str) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with(prefix) && name.ends_with(suffix))
        .collect();
    names.sort();
    names
}

#[test]
fn organize_moves_root_files_into_categories() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "a");
    write_file(&temp.path().join("b.JPG"), "b");
    write_file(&temp.path().join("c.unknownext"), "c");
    write_file(&temp.path().join("sub/inner.txt"), "inner");

    dirkeep(temp.path())
        .arg("organize")
        .assert()
        .success()
        .stdout(predicate::str::contains("a.txt → documentos/"))
        .stdout(predicate::str::contains("b.JPG → imagens/"))
        .stdout(predicate::str::contains("c.unknownext → outros/"));

    assert!(temp.path().join("documentos/a.txt").is_file());
    assert!(temp.path().join("imagens/b.JPG").is_file());
    assert!(temp.path().join("outros/c.unknownext").is_file());
    assert!(temp.path().join("sub/inner.txt").is_file());
}

#[test]
fn organize_on_empty_dir_reports_nothing_to_do() {
    let temp = tempdir().unwrap();

    dirkeep(temp.path())
        .arg("organize")
        .assert()
        .success()
        .stdout(predicate::str::contains("No files found to organize."));
}

#[test]
fn organize_uses_dir_flag() {
    let cwd = tempdir().unwrap();
    let target = tempdir().unwrap();
    write_file(&target.path().join("song.mp3"), "la");

    dirkeep(cwd.path())
        .arg("organize")
        .arg("--dir")
        .arg(target.path())
        .assert()
        .success();

    assert!(target.path().join("audio_video/song.mp3").is_file());
    assert!(!cwd.path().join("_backups").exists());
}

#[test]
fn organize_reads_local_config_file() {
    let temp = tempdir().unwrap();
    write_file(
        &temp.path().join(".dirkeeprc.toml"),
        "fallback = \"misc\"\n\n[[categories]]\nname = \"notes\"\nextensions = [\"md\"]\n",
    );
    write_file(&temp.path().join("todo.md"), "- [ ] ship");
    write_file(&temp.path().join("a.txt"), "a");

    dirkeep(temp.path()).arg("organize").assert().success();

    assert!(temp.path().join("notes/todo.md").is_file());
    assert!(temp.path().join("misc/a.txt").is_file());
    // The config file is a root-level file like any other.
    assert!(temp.path().join("misc/.dirkeeprc.toml").is_file());
    assert!(!temp.path().join("documentos").exists());
}

#[test]
fn backup_writes_archive_into_backups_dir() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("notes.txt"), "notes");
    write_file(&temp.path().join("_backups/old.zip"), "old");

    dirkeep(temp.path())
        .arg("backup")
        .arg("--name")
        .arg("fotos")
        .assert()
        .success()
        .stdout(predicate::str::contains("Backup saved to"));

    let archives = files_named(&temp.path().join("_backups"), "fotos_", ".zip");
    assert_eq!(archives.len(), 1);
}

#[test]
fn backup_with_invalid_name_fails() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("notes.txt"), "notes");

    dirkeep(temp.path())
        .arg("backup")
        .arg("-n")
        .arg("../escape")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to create backup"));

    assert!(files_named(&temp.path().join("_backups"), "", "").is_empty());
}

#[test]
fn report_writes_file_and_prints_totals() {
    let temp = tempdir().unwrap();
    write_file(&temp.path().join("a.txt"), "a");
    write_file(&temp.path().join("sub/b.png"), "b");

    dirkeep(temp.path())
        .arg("report")
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"))
        .stdout(predicate::str::contains("Files: 2"))
        .stdout(predicate::str::contains("Folders: 2"));

    let reports = files_named(temp.path(), "relatorio_", ".txt");
    assert_eq!(reports.len(), 1);
    let content = fs::read_to_string(temp.path().join(&reports[0])).unwrap();
    assert!(content.contains("Total de arquivos: 2"));
    assert!(content.contains(".png: 1 arquivo(s)"));
}

#[test]
fn missing_config_file_fails() {
    let temp = tempdir().unwrap();

    dirkeep(temp.path())
        .arg("report")
        .arg("--config")
        .arg(temp.path().join("nope.toml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn missing_subcommand_is_usage_error() {
    let temp = tempdir().unwrap();

    dirkeep(temp.path()).assert().failure().code(2);
}
