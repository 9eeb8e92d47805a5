//! Black-box tests of the `lifecore` demo binary via `std::process::Command`.

use std::path::PathBuf;
use std::process::Command;

fn lifecore_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_lifecore") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("lifecore");
    p
}

#[test]
fn default_invocation_runs_one_generation_of_a_glider() {
    let output = Command::new(lifecore_bin())
        .output()
        .expect("failed to run lifecore");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("initial:"));
    assert!(stdout.contains("final:"));
    assert!(stdout.contains("HashLife"));
}

#[test]
fn quicklife_engine_flag_selects_quicklife() {
    let output = Command::new(lifecore_bin())
        .args(["--engine", "quicklife", "--pattern", "blinker", "--generations", "2"])
        .output()
        .expect("failed to run lifecore");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("QuickLife"));
    assert!(stdout.contains("gen=2"));
}

#[test]
fn verbose_flag_prints_a_line_per_generation() {
    let output = Command::new(lifecore_bin())
        .args(["--pattern", "block", "--generations", "3", "--verbose"])
        .output()
        .expect("failed to run lifecore");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("gen 1:"));
    assert!(stdout.contains("gen 2:"));
    assert!(stdout.contains("gen 3:"));
    assert!(!stdout.contains("final:"));
}

#[test]
fn absurd_generation_count_exits_nonzero() {
    let output = Command::new(lifecore_bin())
        .args(["--generations", "99999999999999999999"])
        .output()
        .expect("failed to run lifecore");
    assert!(!output.status.success());
}

#[test]
fn glider_gun_pattern_runs_and_reports_growing_population() {
    let output = Command::new(lifecore_bin())
        .args(["--pattern", "glider-gun", "--generations", "60"])
        .output()
        .expect("failed to run lifecore");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("final:"));
}

#[test]
fn help_flag_exits_zero() {
    let output = Command::new(lifecore_bin())
        .arg("--help")
        .output()
        .expect("failed to run lifecore");
    assert!(output.status.success());
}
