//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `mathdrill` command isolated from any config in the real home or
/// working directory.
fn mathdrill(dir: &TempDir) -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("mathdrill").unwrap();
    cmd.current_dir(dir.path())
        .env("HOME", dir.path())
        .env_remove("MATHDRILL_OPERATORS")
        .env_remove("MATHDRILL_QUESTIONS")
        .env_remove("RUST_LOG");
    cmd
}

fn pinned_add(dir: &TempDir) -> Command {
    let mut cmd = mathdrill(dir);
    cmd.args(["run", "-o", "+", "-f", "5", "-s", "3", "--seed", "1"]);
    cmd
}

#[test]
fn help_output() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Arithmetic drill tests"))
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("pool"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn version_output() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mathdrill"));
}

#[test]
fn run_correct_answer() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .args(["-q", "1"])
        .write_stdin("8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("5 + 3 = "))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains("Correct Answers:"))
        .stdout(predicate::str::contains("Percentage:      100.00%"));
}

#[test]
fn run_wrong_answer_shows_correction() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .args(["-q", "1"])
        .write_stdin("9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrong! (8)"))
        .stdout(predicate::str::contains("( 8)"))
        .stdout(predicate::str::contains("0.00%"));
}

#[test]
fn run_rejects_bad_input_then_accepts() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .args(["-q", "1"])
        .write_stdin("eight\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Invalid answer: Try again!"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn run_replays_skipped_questions() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .args(["-q", "1"])
        .write_stdin("\n8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped!"))
        .stdout(predicate::str::contains("Returned to skipped questions!"))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn run_end_of_input_scores_what_was_answered() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .args(["-q", "3"])
        .write_stdin("8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Skipped:"))
        .stdout(predicate::str::contains("50.00%"));
}

#[test]
fn run_json_summary() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .args(["-q", "1", "--format", "json"])
        .write_stdin("9\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"wrong\": 1"))
        .stdout(predicate::str::contains("\"correct_answer\": 8"))
        .stdout(predicate::str::contains("\"operator\": \"+\""));
}

#[test]
fn run_visualizes_multiplication() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["run", "-o", "*", "-f", "2", "-s", "3", "-q", "1", "--visualize"])
        .write_stdin("6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("o o o\no o o\n\n2 × 3 = "));
}

#[test]
fn run_invalid_operator() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["run", "-o", "%"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"))
        .stderr(predicate::str::contains("invalid operator"));
}

#[test]
fn run_zero_divisor_pin_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["run", "-o", "/", "-s", "0", "-q", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("division by zero"));
}

#[test]
fn run_zero_questions_fails() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["run", "-q", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("question count must be greater than 0"));
}

#[test]
fn run_uses_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("drill.toml");
    std::fs::write(
        &path,
        "operator = \"*\"\nfirst_operand = 2\nsecond_operand = 3\nquestion_count = 1\n",
    )
    .unwrap();
    mathdrill(&dir)
        .arg("run")
        .arg("--config")
        .arg(&path)
        .write_stdin("6\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 × 3 = "))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn run_missing_config_file() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["run", "--config", "nope.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn run_question_count_from_env() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .env("MATHDRILL_QUESTIONS", "2")
        .write_stdin("8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("50.00%"));
}

#[test]
fn run_interactive_options() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["run", "-i", "-f", "4", "-s", "2", "--seed", "3"])
        .write_stdin("n\nn\nn\ny\n1\n2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would you like to do division? (Y/N)>"))
        .stdout(predicate::str::contains("How many questions would you like on the test?>"))
        .stdout(predicate::str::contains("4 - 2 = "))
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn run_interactive_keeps_flag_values() {
    let dir = TempDir::new().unwrap();
    pinned_add(&dir)
        .args(["-i", "-q", "1"])
        .write_stdin("8\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Would you like to do").not())
        .stdout(predicate::str::contains("How many questions").not())
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn pool_counts() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["pool", "-o", "*"])
        .assert()
        .success()
        .stdout(predicate::str::contains("100"));
}

#[test]
fn pool_lists_questions() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .args(["pool", "-o", "/", "-f", "12", "--list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("12 ÷ 6 ="))
        .stdout(predicate::str::contains("12 ÷ 4 ="))
        .stdout(predicate::str::contains("12 ÷ 5 =").not());
}

#[test]
fn init_creates_config() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created mathdrill.toml"));
    assert!(dir.path().join("mathdrill.toml").exists());

    // the new file is picked up by `run`
    mathdrill(&dir)
        .args(["run", "-o", "+", "-f", "1", "-s", "1", "-q", "1"])
        .write_stdin("2\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("100.00%"));
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();
    mathdrill(&dir).arg("init").assert().success();
    mathdrill(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists, skipping"));
}
