use assert_cmd::Command;
use assert_fs::{prelude::*, NamedTempFile};
use predicates::prelude::*;
use test_log::test;

const BIN: &str = "kripke";

const SCENARIO: &str = "
worlds {
    w0: P=1, Q=0, R=1   // world 0 values
    w1: P=0, Q=1, R=1   // world 1 values
    w2: P=1, Q=1, R=0
}
access {
    w0: w0, w1, w2
    w1: w1, w2
    w2: w2
}
expr: #(P && @Q) -> !(R || S)
";

fn description(text: &str) -> Result<NamedTempFile, Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("model.kripke")?;
    file.write_str(text)?;
    Ok(file)
}

#[test]
fn cli_argument_parsing() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg("-h");
    cmd.assert().success().stdout(predicate::str::contains("Print help"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("--version");
    cmd.assert().success().stdout(predicate::str::contains(BIN));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("Non-existing-file.kripke");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read Non-existing-file.kripke"));

    cmd = Command::cargo_bin(BIN)?;
    cmd.arg("--log-level").arg("cats").arg("model.kripke");
    cmd.assert().failure().stderr(predicate::str::contains("--log-level"));
    Ok(())
}

#[test]
fn scenario_assume_false() -> Result<(), Box<dyn std::error::Error>> {
    let file = description(SCENARIO)?;
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg(file.path()).arg("--assume-false");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Formula: #(P && @Q) -> !(R || S)"))
        .stdout(predicate::str::contains("Implies\n  Square\n"))
        .stdout(predicate::str::contains("Result:\nw0  1\nw1  1\nw2  1\n"))
        .stdout(predicate::str::contains("Holds in: {w0, w1, w2}"))
        .stdout(predicate::str::contains("Valid: true"));
    Ok(())
}

#[test]
fn scenario_quiet() -> Result<(), Box<dyn std::error::Error>> {
    let file = description(SCENARIO)?;
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg(file.path()).arg("--assume-false").arg("--quiet");
    cmd.assert().success().stdout("w0  1\nw1  1\nw2  1\n");
    Ok(())
}

#[test]
fn scenario_matrices() -> Result<(), Box<dyn std::error::Error>> {
    let file = description(SCENARIO)?;
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg(file.path())
        .arg("--assume-false")
        .arg("--knowledge")
        .arg("--worksheet")
        .arg("--dot");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Valuation:\n    P  Q  R\nw0  1  0  1\n"))
        .stdout(predicate::str::contains("Knowledge:\n    P  Q  R\nw0  2  2  2\n"))
        .stdout(predicate::str::contains("Worksheet:\n"))
        .stdout(predicate::str::contains("implies(#5, #8)"))
        .stdout(predicate::str::contains("digraph {"));
    Ok(())
}

#[test]
fn unbound_variable_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let file = description(SCENARIO)?;
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unbound variable `S`"));
    Ok(())
}

#[test]
fn missing_access_block() -> Result<(), Box<dyn std::error::Error>> {
    let file = description("worlds {\n    w0: P=1\n}\nexpr: P\n")?;
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing `access` section"));
    Ok(())
}

#[test]
fn syntax_error() -> Result<(), Box<dyn std::error::Error>> {
    let file = description("worlds {\n    w0: P=1\n}\naccess {\n}\nexpr: P &&\n")?;
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg(file.path());
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing operand for `&&`: found end of input"));
    Ok(())
}

#[test]
fn deeply_nested_expression() -> Result<(), Box<dyn std::error::Error>> {
    let text = format!("worlds {{\n    w0: P=1\n}}\naccess {{\n}}\nexpr: {}P\n", "!".repeat(200_000));
    let file = description(&text)?;
    let mut cmd = Command::cargo_bin(BIN)?;
    cmd.arg(file.path()).arg("--quiet");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("formula nests deeper than 256 levels"));
    Ok(())
}
