use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;

fn linops() -> Command {
    Command::cargo_bin("linops").unwrap()
}

#[test]
fn help_lists_subcommands() {
    linops()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("viewer"))
        .stdout(predicate::str::contains("teams"))
        .stdout(predicate::str::contains("issues"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("snapshot"))
        .stdout(predicate::str::contains("export"))
        .stdout(predicate::str::contains("serve"));
}

#[test]
fn version_flag_works() {
    linops()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("linops"));
}

#[test]
fn viewer_without_api_key_fails() {
    linops()
        .arg("viewer")
        .env_remove("LINEAR_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LINEAR_API_KEY"));
}

#[test]
fn issues_count_without_api_key_fails() {
    linops()
        .args(["issues", "count"])
        .env_remove("LINEAR_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("LINEAR_API_KEY"));
}

#[test]
fn missing_config_file_is_reported() {
    linops()
        .args(["--config", "/nonexistent/linops.yaml", "teams"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file"));
}

#[test]
fn malformed_config_file_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "endpoint: [not, a, string").unwrap();
    linops()
        .args(["--config"])
        .arg(file.path())
        .arg("teams")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing config file"));
}

#[test]
fn create_requires_team_and_title() {
    linops()
        .arg("create")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--team"));
}

#[test]
fn issues_requires_a_subcommand() {
    linops().arg("issues").assert().failure();
}
