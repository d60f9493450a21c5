use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn findex(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("findex").unwrap();
    cmd.arg("--db-dir").arg(dir.path());
    cmd
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("findex").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("partial index"));
}

#[test]
fn test_insert_requires_three_values() {
    let dir = TempDir::new().unwrap();
    findex(&dir).args(["insert", "Alice"]).assert().failure();
}

#[test]
fn test_missing_db_dir_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope");
    let mut cmd = Command::cargo_bin("findex").unwrap();
    cmd.arg("--db-dir")
        .arg(&missing)
        .arg("create-table")
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn test_create_insert_list_flow() {
    let dir = TempDir::new().unwrap();

    findex(&dir)
        .arg("create-table")
        .assert()
        .success()
        .stdout(predicate::str::contains("Table created"));

    findex(&dir)
        .args(["insert", "Alice", "1990-05-15", "F"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insert completed"));

    findex(&dir)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("(Alice, 1990-05-15, F,"));
}

#[test]
fn test_numeric_case_aliases() {
    let dir = TempDir::new().unwrap();

    findex(&dir).arg("1").assert().success().stdout(predicate::str::contains("Table created"));
    findex(&dir).args(["2", "Bob", "1980-01-02", "M"]).assert().success();
    findex(&dir).arg("3").assert().success().stdout(predicate::str::contains("Bob"));
    findex(&dir)
        .arg("7")
        .assert()
        .success()
        .stdout(predicate::str::contains("Test case for debugging"));
}

#[test]
fn test_seed_then_timed_queries() {
    let dir = TempDir::new().unwrap();

    findex(&dir).arg("create-table").assert().success();
    findex(&dir)
        .args(["seed", "--count", "200", "--f-count", "10", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate completed"));

    findex(&dir)
        .arg("query")
        .assert()
        .success()
        .stdout(predicate::str::contains("seconds ---"));

    findex(&dir)
        .arg("query-indexed")
        .assert()
        .success()
        .stdout(predicate::str::contains("Index created").and(predicate::str::contains("seconds ---")));
}
