//! Integration tests for the bridge client against fake tool scripts
//!
//! These tests stand in a shell script for the real bridge binary so the
//! process handling, output capture, and streaming paths run end to end
//! without any device attached.

#![cfg(unix)]

use dexview::bridge::BridgeClient;
use dexview::models::{AppEvent, DeviceState};
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;
use tokio::sync::mpsc;

fn fake_tool(dir: &std::path::Path, name: &str, script: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[tokio::test]
async fn test_run_captures_exit_code_and_output() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "adb",
        "echo out-line\necho err-line >&2\nexit 3",
    );

    let client = BridgeClient::new(tool);
    let output = client.run(&["anything"]).await.unwrap();
    assert_eq!(output.code, Some(3));
    assert!(!output.success());
    assert_eq!(output.stdout, "out-line");
    assert_eq!(output.failure_text(), "err-line");
}

#[tokio::test]
async fn test_run_fails_for_missing_tool() {
    let client = BridgeClient::new("/nonexistent/fake-adb");
    assert!(client.run(&["devices"]).await.is_err());
}

#[tokio::test]
async fn test_devices_parses_long_listing() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "adb",
        concat!(
            "echo 'List of devices attached'\n",
            "echo 'R3CN30XXXX             device product:p3s model:SM_G998B device:p3s transport_id:1'\n",
            "echo 'emulator-5554          unauthorized transport_id:2'",
        ),
    );

    let client = BridgeClient::new(tool);
    let devices = client.devices().await.unwrap();
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].serial, "R3CN30XXXX");
    assert_eq!(devices[0].state, DeviceState::Device);
    assert_eq!(devices[0].model.as_deref(), Some("SM_G998B"));
    assert_eq!(devices[1].state, DeviceState::Unauthorized);
}

#[tokio::test]
async fn test_devices_fails_on_tool_error() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "adb", "echo 'cannot connect' >&2\nexit 1");

    let client = BridgeClient::new(tool);
    let err = client.devices().await.unwrap_err();
    assert!(err.to_string().contains("cannot connect"));
}

#[tokio::test]
async fn test_push_streams_output_lines() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(
        dir.path(),
        "adb",
        "echo 'file.txt: 1 file pushed'\necho 'transfer done' >&2",
    );

    let client = BridgeClient::new(tool);
    let (tx, mut rx) = mpsc::unbounded_channel();
    client
        .push("serial123", "file.txt", "/sdcard/file.txt", tx)
        .await
        .unwrap();

    let mut lines = Vec::new();
    while let Some(event) = rx.recv().await {
        match event {
            AppEvent::BridgeOutput(operation, line) => {
                assert_eq!(operation, "push");
                lines.push(line);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
    lines.sort();
    assert_eq!(lines, vec!["file.txt: 1 file pushed", "transfer done"]);
}

#[tokio::test]
async fn test_install_failure_reports_exit_code() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "adb", "echo 'INSTALL_FAILED' \nexit 1");

    let client = BridgeClient::new(tool);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let err = client
        .install("serial123", "app.apk", tx)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("exit code 1"));

    // Output emitted before the failure is still forwarded
    let event = rx.recv().await.unwrap();
    assert!(matches!(event, AppEvent::BridgeOutput(op, line)
        if op == "install" && line == "INSTALL_FAILED"));
}

#[tokio::test]
async fn test_send_text_passes_escaped_argument() {
    let dir = tempfile::tempdir().unwrap();
    // Echo the argv back so the escaping is visible in the captured stdout
    let tool = fake_tool(dir.path(), "adb", "echo \"$@\"");

    let client = BridgeClient::new(tool);
    let output = client.send_text("serial123", "hello world").await.unwrap();
    assert_eq!(
        output.stdout,
        "-s serial123 shell input text hello%sworld"
    );
}

#[tokio::test]
async fn test_get_state_with_and_without_serial() {
    let dir = tempfile::tempdir().unwrap();
    let tool = fake_tool(dir.path(), "adb", "echo \"$@\"");

    let client = BridgeClient::new(tool);
    let output = client.get_state(Some("serial123")).await.unwrap();
    assert_eq!(output.stdout, "-s serial123 get-state");

    let output = client.get_state(None).await.unwrap();
    assert_eq!(output.stdout, "get-state");
}
