//! Mirroring session management
//!
//! At most one session exists per application instance; the session owns the
//! external process handle, and its stderr is treated as an opaque log feed.

use crate::models::{AppEvent, MirrorSettings};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

/// Grace period given to the mirroring process when stopping
pub const STOP_GRACE_PERIOD: Duration = Duration::from_secs(3);

/// Handle for one live mirroring process
pub struct MirrorSession {
    serial: String,
    program: PathBuf,
    child: Child,
}

impl MirrorSession {
    /// Spawn the mirroring tool against `serial` and start streaming its
    /// stderr into the event channel. `MirrorExited` is sent once the feed
    /// closes.
    pub async fn start(
        program: &Path,
        serial: &str,
        settings: &MirrorSettings,
        tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Result<Self> {
        let args = settings.to_args(serial);
        log::info!("starting mirror: {} {}", program.display(), args.join(" "));

        let mut child = Command::new(program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .with_context(|| format!("failed to start {}", program.display()))?;

        let stderr = child.stderr.take().unwrap();
        tokio::spawn(async move {
            let mut reader = BufReader::new(stderr);
            let mut buffer = String::new();
            while reader.read_line(&mut buffer).await.unwrap_or(0) > 0 {
                let line = buffer.trim().to_string();
                if !line.is_empty() {
                    let _ = tx.send(AppEvent::MirrorOutput(line));
                }
                buffer.clear();
            }
            let _ = tx.send(AppEvent::MirrorExited);
        });

        Ok(Self {
            serial: serial.to_string(),
            program: program.to_path_buf(),
            child,
        })
    }

    pub fn serial(&self) -> &str {
        &self.serial
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Non-blocking liveness poll
    pub fn is_running(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(None))
    }

    /// Reap an already-exited process without blocking
    pub fn exit_code(&mut self) -> Option<i32> {
        match self.child.try_wait() {
            Ok(Some(status)) => status.code(),
            _ => None,
        }
    }

    /// Wait for the session to end on its own (CLI mode)
    pub async fn wait(mut self) -> Result<Option<i32>> {
        let status = self
            .child
            .wait()
            .await
            .context("failed to wait for mirroring process")?;
        Ok(status.code())
    }

    /// Terminate the process and wait out the grace period
    pub async fn stop(mut self) -> Result<()> {
        log::info!("stopping mirror session for {}", self.serial);
        self.child
            .start_kill()
            .context("failed to signal mirroring process")?;

        match tokio::time::timeout(STOP_GRACE_PERIOD, self.child.wait()).await {
            Ok(status) => {
                status.context("failed to wait for mirroring process")?;
                Ok(())
            }
            Err(_) => anyhow::bail!(
                "mirroring process did not exit within {}s",
                STOP_GRACE_PERIOD.as_secs()
            ),
        }
    }
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Fake mirroring tool: ignores its arguments, prints one stderr line
    /// and sleeps until killed.
    fn fake_mirror_tool(dir: &Path) -> PathBuf {
        let path = dir.join("fake-scrcpy");
        std::fs::write(&path, "#!/bin/sh\necho 'INFO: session up' >&2\nsleep 30\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[tokio::test]
    async fn session_streams_stderr_and_stops_within_grace() {
        let dir = tempfile::tempdir().unwrap();
        let program = fake_mirror_tool(dir.path());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let mut session =
            MirrorSession::start(&program, "serial-1", &MirrorSettings::default(), tx)
                .await
                .unwrap();
        assert_eq!(session.serial(), "serial-1");

        match rx.recv().await {
            Some(AppEvent::MirrorOutput(line)) => assert_eq!(line, "INFO: session up"),
            other => panic!("expected MirrorOutput, got {:?}", other),
        }

        assert!(session.is_running());
        session.stop().await.unwrap();

        // The stderr feed closes once the process dies
        match rx.recv().await {
            Some(AppEvent::MirrorExited) => {}
            other => panic!("expected MirrorExited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn short_lived_session_reports_exit() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake-scrcpy-exits");
        std::fs::write(&path, "#!/bin/sh\nexit 0\n").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut session = MirrorSession::start(&path, "x", &MirrorSettings::default(), tx)
            .await
            .unwrap();

        match rx.recv().await {
            Some(AppEvent::MirrorExited) => {}
            other => panic!("expected MirrorExited, got {:?}", other),
        }
        // Process has been reaped or is reapable without blocking
        assert!(!session.is_running());
    }
}
