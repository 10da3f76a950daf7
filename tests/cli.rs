#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn cli(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("permanence-cli").unwrap();
    cmd.current_dir(dir)
        .arg("--store")
        .arg(dir.join("profiles.json"))
        .arg("--holidays")
        .arg(dir.join("holidays.json"));
    cmd
}

const DUPLICATE_REQUEST: &str = r#"{
  "schedule": [{
    "schedule": [
      [["alice"], ["alice"]],
      [["bob"], ["carol"]],
      [["dave"], ["erin"]],
      [["frank"], ["grace"]],
      [["heidi"], ["ivan"]]
    ],
    "scheduleDays": [
      {"date": "20250101", "shouldSchedule": true, "description": ""},
      {"date": "20250102", "shouldSchedule": true, "description": ""},
      {"date": "20250103", "shouldSchedule": true, "description": ""},
      {"date": "20250106", "shouldSchedule": true, "description": ""},
      {"date": "20250107", "shouldSchedule": true, "description": ""}
    ],
    "tasks": [{"name": "morning", "count": 1}, {"name": "evening", "count": 1}]
  }],
  "constraints": {"maxConsecutiveDays": 5, "minRestDays": 2}
}"#;

#[test]
fn validate_reports_conflicts_with_warning_code() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("request.json");
    let report = dir.path().join("conflicts.csv");
    fs::write(&input, DUPLICATE_REQUEST).unwrap();

    cli(dir.path())
        .args(["validate", "--input"])
        .arg(&input)
        .arg("--report")
        .arg(&report)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("duplicate | alice | 20250101"));

    let csv = fs::read_to_string(&report).unwrap();
    assert!(csv.starts_with("type,person,date,start_date,end_date,consecutive_days"));
    assert!(csv.contains("duplicate,alice,20250101,,,"));
}

#[test]
fn validate_rejects_empty_schedule() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("empty.json");
    fs::write(&input, r#"{"schedule": []}"#).unwrap();

    cli(dir.path())
        .args(["validate", "--input"])
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("non-empty"));
}

#[test]
fn generate_save_and_show() {
    let dir = tempdir().unwrap();
    let people = dir.path().join("people.csv");
    let tasks = dir.path().join("tasks.csv");
    fs::write(
        &people,
        "name,max_shifts,off_days,preferred_task\nalice,5,,front\nbob,5,mon,\ncarol,4,2;3,back\ndave,5,,\n",
    )
    .unwrap();
    fs::write(&tasks, "name,count\nfront,1\nback,1\n").unwrap();

    cli(dir.path())
        .args(["import-personnel", "--csv"])
        .arg(&people)
        .assert()
        .success()
        .stdout(predicate::str::contains("4 person(s) imported"));
    cli(dir.path())
        .args(["import-tasks", "--csv"])
        .arg(&tasks)
        .assert()
        .success();
    cli(dir.path())
        .args(["holiday", "set", "--date", "20250108", "--name", "Fair"])
        .assert()
        .success();

    let out_json = dir.path().join("weeks.json");
    cli(dir.path())
        .args([
            "generate",
            "--start-week",
            "2025-W02",
            "--weeks",
            "2",
            "--seed",
            "7",
            "--save",
            "january",
            "--out-json",
        ])
        .arg(&out_json)
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 2 (01/13 - 01/17)"))
        .stdout(predicate::str::contains("Fair"))
        .stdout(predicate::str::contains("Schedule saved as january"))
        .stdout(predicate::str::contains("profiles.json"));

    // Le JSON exporté se relit tel quel comme demande d'audit.
    cli(dir.path())
        .args(["validate", "--max-consecutive-days", "10", "--input"])
        .arg(&out_json)
        .assert()
        .success()
        .stdout(predicate::str::contains("OK: no conflicts"));

    cli(dir.path())
        .args(["schedule", "show", "january"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Week 1 (01/06 - 01/10)"));

    cli(dir.path())
        .args(["schedule", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("january | 2025-W02 | 2 week(s)"));
}

#[test]
fn profile_commands_update_the_store() {
    let dir = tempdir().unwrap();

    cli(dir.path())
        .args(["profile", "create", "night"])
        .assert()
        .success();
    cli(dir.path())
        .args(["profile", "use", "night"])
        .assert()
        .success();
    cli(dir.path())
        .args(["profile", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("* night"))
        .stdout(predicate::str::contains("  default"));
    cli(dir.path())
        .args(["profile", "delete", "night"])
        .assert()
        .success();
    cli(dir.path())
        .args(["profile", "delete", "default"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("last profile"));
}
