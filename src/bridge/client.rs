//! Bridge tool process invocation

use crate::bridge::parser;
use crate::models::{AppEvent, Device};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

/// Captured result of one bridge tool invocation
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Process exit code; `None` when killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Best text to show the user for a failure
    pub fn failure_text(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Client for the device bridge tool (`adb`)
#[derive(Debug, Clone)]
pub struct BridgeClient {
    program: PathBuf,
}

impl BridgeClient {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Run one bridge command to completion and capture its output
    pub async fn run(&self, args: &[&str]) -> Result<CommandOutput> {
        log::debug!("running {} {}", self.program.display(), args.join(" "));
        let output = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .with_context(|| format!("failed to run {}", self.program.display()))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }

    /// Enumerate connected devices via the long listing
    pub async fn devices(&self) -> Result<Vec<Device>> {
        let output = self.run(&["devices", "-l"]).await?;
        if !output.success() {
            anyhow::bail!("device listing failed: {}", output.failure_text());
        }
        Ok(parser::parse_device_list(&output.stdout))
    }

    /// Query the connection state, optionally for one device
    pub async fn get_state(&self, serial: Option<&str>) -> Result<CommandOutput> {
        let mut args = Vec::new();
        if let Some(serial) = serial {
            args.push("-s");
            args.push(serial);
        }
        args.push("get-state");
        self.run(&args).await
    }

    /// Copy a local file onto the device, streaming progress lines
    pub async fn push(
        &self,
        serial: &str,
        local: &str,
        remote: &str,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<()> {
        self.run_streaming("push", &["-s", serial, "push", local, remote], tx)
            .await
    }

    /// Copy a file off the device, streaming progress lines
    pub async fn pull(
        &self,
        serial: &str,
        remote: &str,
        local: &str,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<()> {
        self.run_streaming("pull", &["-s", serial, "pull", remote, local], tx)
            .await
    }

    /// Install (or reinstall) a package, streaming progress lines
    pub async fn install(
        &self,
        serial: &str,
        apk: &str,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<()> {
        self.run_streaming("install", &["-s", serial, "install", "-r", apk], tx)
            .await
    }

    /// Start an application component on the device
    pub async fn start_activity(&self, serial: &str, component: &str) -> Result<CommandOutput> {
        self.run(&["-s", serial, "shell", "am", "start", "-n", component])
            .await
    }

    /// Type text on the device
    pub async fn send_text(&self, serial: &str, text: &str) -> Result<CommandOutput> {
        let escaped = parser::escape_input_text(text);
        self.run(&["-s", serial, "shell", "input", "text", &escaped])
            .await
    }

    /// Run a long-lived bridge command, forwarding each stdout/stderr line
    /// as a `BridgeOutput` event until the process exits.
    async fn run_streaming(
        &self,
        operation: &str,
        args: &[&str],
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<()> {
        log::debug!(
            "streaming {} {} {}",
            operation,
            self.program.display(),
            args.join(" ")
        );
        let mut child = Command::new(&self.program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {}", self.program.display()))?;

        let stdout = child.stdout.take().unwrap();
        let stderr = child.stderr.take().unwrap();

        let tx_stdout = tx.clone();
        let op_stdout = operation.to_string();
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout);
            let mut buffer = String::new();
            while reader.read_line(&mut buffer).await.unwrap_or(0) > 0 {
                let line = buffer.trim().to_string();
                if !line.is_empty() {
                    let _ = tx_stdout.send(AppEvent::BridgeOutput(op_stdout.clone(), line));
                }
                buffer.clear();
            }
        });

        let tx_stderr = tx.clone();
        let op_stderr = operation.to_string();
        tokio::spawn(async move {
            let mut reader = BufReader::new(stderr);
            let mut buffer = String::new();
            while reader.read_line(&mut buffer).await.unwrap_or(0) > 0 {
                let line = buffer.trim().to_string();
                if !line.is_empty() {
                    let _ = tx_stderr.send(AppEvent::BridgeOutput(op_stderr.clone(), line));
                }
                buffer.clear();
            }
        });

        let status = child
            .wait()
            .await
            .with_context(|| format!("failed to wait for {}", operation))?;

        if status.success() {
            Ok(())
        } else {
            anyhow::bail!(
                "{} failed with exit code {}",
                operation,
                status
                    .code()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "<signal>".to_string())
            )
        }
    }
}
