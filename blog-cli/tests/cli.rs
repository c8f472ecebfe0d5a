use assert_cmd::Command;
use predicates::prelude::*;

fn blog_cli() -> Command {
    Command::cargo_bin("blog-cli").unwrap()
}

#[test]
fn help_lists_every_command() {
    blog_cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("save"))
                .and(predicate::str::contains("delete"))
                .and(predicate::str::contains("clear")),
        );
}

#[test]
fn save_without_changes_fails_before_connecting() {
    blog_cli()
        .args(["save", "--id", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nothing to save"));
}

#[test]
fn clear_requires_confirmation() {
    blog_cli()
        .arg("clear")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));
}

#[test]
fn get_requires_numeric_id() {
    blog_cli()
        .args(["get", "--id", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}
