use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("todolist-{nanos}-{file_name}"))
}

fn write_store(path: &PathBuf, tasks: serde_json::Value) {
    std::fs::write(path, serde_json::to_string_pretty(&tasks).unwrap()).unwrap();
}

fn run(store_path: &PathBuf, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_todolist");
    Command::new(exe)
        .args(args)
        .env("TODOLIST_STORE_PATH", store_path)
        .env("TODOLIST_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run todolist")
}

fn seed() -> serde_json::Value {
    serde_json::json!([
        { "id": 1, "title": "Do exercise", "time": "06:00 AM", "hasDone": true },
        { "id": 2, "title": "Meditation", "time": "07:30 PM", "hasDone": false }
    ])
}

#[test]
fn list_prints_rows_in_collection_order() {
    let store_path = temp_path("cli-list.json");
    write_store(&store_path, seed());

    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("Today"));
    assert!(stdout.contains("[x]"));
    assert!(stdout.contains("[ ]"));
    assert!(stdout.contains("Do exercise"));
    assert!(stdout.contains("Meditation"));
    assert!(stdout.contains("07:30 PM"));

    let exercise = stdout.find("Do exercise").unwrap();
    let meditation = stdout.find("Meditation").unwrap();
    assert!(exercise < meditation);
}

#[test]
fn list_on_empty_store_says_so() {
    let store_path = temp_path("cli-list-empty.json");
    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No todos yet."));
}

#[test]
fn list_json_matches_the_persisted_slot() {
    let store_path = temp_path("cli-list-json.json");
    write_store(&store_path, seed());

    let output = run(&store_path, &["list", "--json"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let listed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(listed, seed());
}

#[test]
fn list_survives_a_malformed_slot() {
    let store_path = temp_path("cli-list-malformed.json");
    std::fs::write(&store_path, "{ not json ").unwrap();

    let output = run(&store_path, &["list"]);
    std::fs::remove_file(&store_path).ok();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No todos yet."));
}
