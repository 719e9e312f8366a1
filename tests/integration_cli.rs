use std::fs;
use std::process::Output;

use assert_cmd::Command;
use tempfile::TempDir;

/// Binary pointed at a throwaway home and vocabulary file
fn cli(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("linguavault").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("XDG_DATA_HOME")
        .arg("--data")
        .arg(home.path().join("words.json"));
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn list_seeds_default_vocabulary() {
    let home = TempDir::new().unwrap();
    let out = cli(&home).arg("list").output().unwrap();
    assert!(out.status.success());

    let text = stdout(&out);
    assert!(text.contains("Hello"));
    assert!(text.contains("es: Hola"));
    assert!(text.contains("fr: Au revoir"));
    assert!(home.path().join("words.json").exists());
}

#[test]
fn add_search_and_remove() {
    let home = TempDir::new().unwrap();

    let out = cli(&home)
        .args(["add", "Dog", "-t", "es=Perro", "-t", "de=Hund"])
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(stdout(&out).trim(), "added #7 Dog");

    let out = cli(&home).args(["list", "--search", "perro"]).output().unwrap();
    let text = stdout(&out);
    assert!(text.contains("Dog"));
    assert!(text.contains("de: Hund"));
    assert!(!text.contains("Hello"));

    let out = cli(&home).args(["remove", "7"]).output().unwrap();
    assert_eq!(stdout(&out).trim(), "removed #7 Dog");

    let out = cli(&home).args(["remove", "7"]).output().unwrap();
    assert!(!out.status.success());
    assert!(stderr(&out).contains("NotFound"));
}

#[test]
fn add_rejects_malformed_translation() {
    let home = TempDir::new().unwrap();
    let out = cli(&home)
        .args(["add", "Dog", "-t", "Perro"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(stderr(&out).contains("MalformedTranslation"));

    let out = cli(&home)
        .args(["add", "Dog", "-t", "xx=Perro"])
        .output()
        .unwrap();
    assert!(!out.status.success());
    assert!(stderr(&out).contains("UnknownLanguage"));
}

#[test]
fn stats_games_and_languages() {
    let home = TempDir::new().unwrap();

    let text = stdout(&cli(&home).arg("stats").output().unwrap());
    assert!(text.contains("words:        6"));
    assert!(text.contains("translations: 12"));
    assert!(text.contains("Spanish"));

    let text = stdout(&cli(&home).arg("games").output().unwrap());
    assert!(text.contains("memory-match"));
    assert!(text.contains("min 4 words"));
    assert!(!text.contains("locked"));

    let text = stdout(&cli(&home).arg("languages").output().unwrap());
    assert!(text.contains("es  Spanish"));
    assert!(text.contains("2 languages have words to practice"));
}

#[test]
fn games_locked_on_empty_vocabulary() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("words.json"), "[]").unwrap();

    let text = stdout(&cli(&home).arg("games").output().unwrap());
    assert_eq!(text.matches("(locked)").count(), 5);
}

#[test]
fn export_then_import_into_empty_vocabulary() {
    let home = TempDir::new().unwrap();
    let csv_path = home.path().join("words.csv");

    let out = cli(&home).arg("export").arg(&csv_path).output().unwrap();
    assert!(out.status.success());
    assert!(stdout(&out).starts_with("exported 12 rows"));

    let target = TempDir::new().unwrap();
    fs::write(target.path().join("words.json"), "[]").unwrap();
    let out = cli(&target).arg("import").arg(&csv_path).output().unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert_eq!(
        stdout(&out).trim(),
        "imported 6 words and 12 translations (0 skipped)"
    );

    let text = stdout(&cli(&target).args(["list", "-s", "voiture"]).output().unwrap());
    assert!(text.contains("Car"));
}

#[test]
fn history_starts_empty() {
    let home = TempDir::new().unwrap();
    let out = cli(&home).args(["history", "-n", "5"]).output().unwrap();
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stdout(&out).contains("no sessions played yet"));
}

#[test]
fn play_requires_a_terminal() {
    let home = TempDir::new().unwrap();
    let out = cli(&home).arg("play").write_stdin("").output().unwrap();
    assert!(!out.status.success());
    assert!(stderr(&out).contains("stdin must be a tty"));
}
