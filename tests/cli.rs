//! CLI integration tests for the estufa binary.
//!
//! Each test uses an isolated temp directory for both databases, ensuring
//! tests can run in parallel safely.

#![allow(deprecated)] // Command::cargo_bin deprecation only affects custom build dirs

use std::path::Path;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;
use serde_json::Value;

struct TestContext {
    temp_dir: TempDir,
}

impl TestContext {
    fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    fn data_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    fn data_dir_str(&self) -> String {
        self.data_dir().to_string_lossy().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("estufa").expect("failed to find binary");
        cmd.env("NO_COLOR", "1");
        cmd
    }

    fn run(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        let data_dir = self.data_dir_str();
        let mut full: Vec<&str> = args.to_vec();
        full.extend(["--data-dir", &data_dir]);
        self.cmd().args(&full).assert()
    }

    fn populate(&self) -> assert_cmd::assert::Assert {
        self.run(&["db", "populate"])
    }

    fn login(&self, email: &str, password: &str) -> assert_cmd::assert::Assert {
        self.run(&[
            "session",
            "login",
            "--email",
            email,
            "--password",
            password,
            "--non-interactive",
        ])
    }

    fn json(&self, args: &[&str]) -> Value {
        let data_dir = self.data_dir_str();
        let mut full: Vec<&str> = args.to_vec();
        full.extend(["--data-dir", &data_dir, "--json"]);
        let output = self
            .cmd()
            .args(&full)
            .output()
            .expect("failed to run command");

        serde_json::from_slice(&output.stdout).expect("failed to parse JSON")
    }
}

#[test]
fn test_populate_reports_counts() {
    let ctx = TestContext::new();

    ctx.populate().success().stdout(predicate::str::contains(
        "Seeded 3 users, 3 catalog plants, 2 greenhouses and 1 user plant(s)",
    ));

    assert!(ctx.data_dir().join("remote.db").exists());
    assert!(ctx.data_dir().join("local.db").exists());
}

#[test]
fn test_login_with_seeded_credentials() {
    let ctx = TestContext::new();
    ctx.populate().success();

    ctx.login("ana@estufa.dev", "ana123")
        .success()
        .stdout(predicate::str::contains("Logged in as Ana Souza"));

    let session = ctx.json(&["session", "show"]);
    assert_eq!(session["email"], "ana@estufa.dev");
    assert_eq!(session["nome"], "Ana Souza");
    assert!(session.get("senha").is_none());
    assert!(session["id"].as_str().is_some_and(|id| id.len() == 20));
}

#[test]
fn test_login_email_is_case_insensitive() {
    let ctx = TestContext::new();
    ctx.populate().success();

    ctx.login("Bruno@Estufa.dev", "bruno123").success();

    let session = ctx.json(&["session", "show"]);
    assert_eq!(session["nome"], "Bruno Lima");
}

#[test]
fn test_login_wrong_password_fails() {
    let ctx = TestContext::new();
    ctx.populate().success();

    ctx.login("ana@estufa.dev", "wrong")
        .failure()
        .stderr(predicate::str::contains("Invalid password"));

    ctx.run(&["session", "show"])
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_login_unknown_email_fails() {
    let ctx = TestContext::new();
    ctx.populate().success();

    ctx.login("nobody@estufa.dev", "x")
        .failure()
        .stderr(predicate::str::contains("No user registered"));
}

#[test]
fn test_login_requires_password_when_non_interactive() {
    let ctx = TestContext::new();
    ctx.populate().success();

    ctx.run(&[
        "session",
        "login",
        "--email",
        "ana@estufa.dev",
        "--non-interactive",
    ])
    .failure()
    .stderr(predicate::str::contains(
        "--password is required in non-interactive mode",
    ));
}

#[test]
fn test_session_show_json_when_logged_out() {
    let ctx = TestContext::new();

    let session = ctx.json(&["session", "show"]);
    assert!(session.is_null());
}

#[test]
fn test_logout_clears_session() {
    let ctx = TestContext::new();
    ctx.populate().success();
    ctx.login("ana@estufa.dev", "ana123").success();

    ctx.run(&["session", "logout"])
        .success()
        .stdout(predicate::str::contains("Logged out"));

    ctx.run(&["session", "show"])
        .success()
        .stdout(predicate::str::contains("Not logged in"));

    ctx.run(&["session", "logout"])
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[test]
fn test_session_update_merges_fields() {
    let ctx = TestContext::new();
    ctx.populate().success();
    ctx.login("ana@estufa.dev", "ana123").success();
    let before = ctx.json(&["session", "show"]);

    ctx.run(&["session", "update", "--name", "Ana S."])
        .success()
        .stdout(predicate::str::contains("Ana S. <ana@estufa.dev>"));

    let after = ctx.json(&["session", "show"]);
    assert_eq!(after["nome"], "Ana S.");
    assert_eq!(after["email"], "ana@estufa.dev");
    assert_eq!(after["id"], before["id"]);
}

#[test]
fn test_session_update_requires_login() {
    let ctx = TestContext::new();

    ctx.run(&["session", "update", "--name", "Ghost"])
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_plants_lists_only_own_plants() {
    let ctx = TestContext::new();
    ctx.populate().success();
    ctx.login("ana@estufa.dev", "ana123").success();

    ctx.run(&["plants"])
        .success()
        .stdout(predicate::str::contains("Catalog (3):"))
        .stdout(predicate::str::contains("My plants (1):"))
        .stdout(predicate::str::contains("Manjericão da cozinha"));

    ctx.login("bruno@estufa.dev", "bruno123").success();

    let state = ctx.json(&["plants"]);
    assert_eq!(state["catalog"].as_array().map(Vec::len), Some(3));
    assert_eq!(state["userPlants"].as_array().map(Vec::len), Some(0));
    assert_eq!(state["loading"], false);
}

#[test]
fn test_plants_reports_broken_user_plants_next_to_catalog() {
    let ctx = TestContext::new();
    ctx.populate().success();
    ctx.login("ana@estufa.dev", "ana123").success();

    let conn = rusqlite::Connection::open(ctx.data_dir().join("remote.db"))
        .expect("failed to open remote db");
    conn.execute(
        "INSERT INTO nodes (path, value) VALUES ('plantas_usuario/bad/x', 'not json')",
        [],
    )
    .expect("failed to insert corrupt row");
    drop(conn);

    ctx.run(&["plants"])
        .success()
        .stdout(predicate::str::contains("Catalog (3):"))
        .stdout(predicate::str::contains("My plants (0):"))
        .stderr(predicate::str::contains("Could not load your plants"));
}

#[test]
fn test_water_reschedules_own_plant() {
    let ctx = TestContext::new();
    ctx.populate().success();
    ctx.login("ana@estufa.dev", "ana123").success();

    let before = ctx.json(&["plants"]);
    let plant = &before["userPlants"][0];
    let plant_id = plant["id"].as_str().expect("plant id").to_string();

    ctx.run(&["water", "--plant-id", &plant_id])
        .success()
        .stdout(predicate::str::contains("Watered Manjericão da cozinha"));

    let after = ctx.json(&["plants"]);
    let watered = &after["userPlants"][0];
    assert_eq!(watered["id"], plant_id.as_str());
    assert_ne!(watered["ultimaRega"], plant["ultimaRega"]);
    assert_ne!(watered["proximaRega"], plant["proximaRega"]);
}

#[test]
fn test_water_rejects_other_users_plant() {
    let ctx = TestContext::new();
    ctx.populate().success();
    ctx.login("ana@estufa.dev", "ana123").success();
    let state = ctx.json(&["plants"]);
    let plant_id = state["userPlants"][0]["id"]
        .as_str()
        .expect("plant id")
        .to_string();

    ctx.login("bruno@estufa.dev", "bruno123").success();
    ctx.run(&["water", "--plant-id", &plant_id])
        .failure()
        .stderr(predicate::str::contains("belongs to another user"));

    ctx.run(&["water", "--plant-id", "missing"])
        .failure()
        .stderr(predicate::str::contains("No plant with id 'missing'"));

    ctx.run(&["session", "logout"]).success();
    ctx.run(&["water", "--plant-id", &plant_id])
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_plants_without_session() {
    let ctx = TestContext::new();
    ctx.populate().success();

    ctx.run(&["plants"])
        .success()
        .stdout(predicate::str::contains("Catalog (3):"))
        .stdout(predicate::str::contains("log in to see your plants"));
}

#[test]
fn test_theme_toggle_persists() {
    let ctx = TestContext::new();

    ctx.run(&["theme", "show"])
        .success()
        .stdout(predicate::str::contains("Theme: light"));

    ctx.run(&["theme", "toggle"])
        .success()
        .stdout(predicate::str::contains("Theme set to dark"));

    ctx.run(&["theme", "show"])
        .success()
        .stdout(predicate::str::contains("Theme: dark"))
        .stdout(predicate::str::contains("background"));

    ctx.run(&["theme", "toggle"])
        .success()
        .stdout(predicate::str::contains("Theme set to light"));
}

#[test]
fn test_clear_removes_seeded_data() {
    let ctx = TestContext::new();
    ctx.populate().success();

    ctx.run(&["db", "clear"])
        .success()
        .stdout(predicate::str::contains("usuarios"));

    ctx.login("ana@estufa.dev", "ana123")
        .failure()
        .stderr(predicate::str::contains("No user registered"));

    let state = ctx.json(&["plants"]);
    assert_eq!(state["catalog"].as_array().map(Vec::len), Some(0));
}

#[test]
fn test_populate_twice_duplicates_records() {
    let ctx = TestContext::new();
    ctx.populate().success();
    ctx.populate().success();

    let state = ctx.json(&["plants"]);
    assert_eq!(state["catalog"].as_array().map(Vec::len), Some(6));
}
