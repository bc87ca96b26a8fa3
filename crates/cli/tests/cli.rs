use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(prefix: &str) -> PathBuf {
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!("boneboot-{}-{}", prefix, nonce));
    std::fs::create_dir_all(&dir).expect("Failed to create temp dir");
    dir
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("BoneBoot AM335x bring-up simulator"));
}

#[test]
fn test_cli_run_blinky_prints_uart() {
    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .args(["run", "--entry", "blinky", "--cycles", "2"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.starts_with("\r\n\r\n====="));
    assert!(stdout.contains("LED ON  [0]\r\nLED OFF [0]\r\nLED ON  [1]\r\nLED OFF [1]\r\n"));
    // Logs stay off stdout.
    assert!(!stdout.contains("Starting BoneBoot simulator"));
}

#[test]
fn test_cli_run_hello() {
    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .args(["run", "--entry", "hello"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout, "HELLO BBB FROM BARE METAL\n".repeat(50));
}

#[test]
fn test_cli_run_cycles_guard() {
    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .args(["run", "--entry", "blinky", "--cycles", "18446744073709551615"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("cycles"));
}

#[test]
fn test_cli_test_mode_cycles_guard() {
    let dir = temp_dir("guard");
    let script_path = dir.join("script.yaml");
    let script_content = r#"
schema_version: "1.0"
entry: blinky
limits:
  cycles: 100001
"#;
    std::fs::write(&script_path, script_content).expect("Failed to write script");

    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .args(["test", "--script", script_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
    assert!(output.stdout.is_empty());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_cli_test_mode_outputs() {
    let dir = temp_dir("outputs");
    let script_path = dir.join("script.yaml");
    let script_content = r#"
schema_version: "1.0"
entry: blinky
limits:
  cycles: 12
assertions:
  - uart_contains: "LED OFF [9]"
  - uart_count: { text: "LED ON  [1]", times: 2 }
  - led_edges: 24
  - no_faults: true
"#;
    std::fs::write(&script_path, script_content).expect("Failed to write script");

    let output_dir = dir.join("artifacts");

    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .args([
            "test",
            "--script",
            script_path.to_str().unwrap(),
            "--no-uart-stdout",
            "--output-dir",
            output_dir.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(output.stdout.is_empty());

    let result_path = output_dir.join("result.json");
    assert!(result_path.exists());

    let result_content = std::fs::read_to_string(&result_path).unwrap();
    let result: serde_json::Value = serde_json::from_str(&result_content).unwrap();

    assert_eq!(result["status"], "pass");
    assert_eq!(result["report"]["entry"], "blinky");
    assert_eq!(result["report"]["cycles"], 12);
    assert_eq!(result["report"]["led_edges"], 24);
    assert_eq!(result["assertions"].as_array().unwrap().len(), 4);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_cli_test_mode_failing_assertion() {
    let dir = temp_dir("failing");
    let script_path = dir.join("script.yaml");
    let script_content = r#"
schema_version: "1.0"
entry: hello
assertions:
  - uart_count: { text: "HELLO", times: 49 }
"#;
    std::fs::write(&script_path, script_content).expect("Failed to write script");

    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .args(["test", "--script", script_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn test_cli_test_missing_script() {
    let output = Command::new(env!("CARGO_BIN_EXE_boneboot"))
        .args(["test", "--script", "non_existent_script.yaml"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success());
}
