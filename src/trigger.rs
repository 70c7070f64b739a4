use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};

use anyhow::Context;

use crate::core::{BarEvent, EventEmitter};

/// Fires events at the bar process by running `<bar> --trigger <event>`.
pub struct BarTrigger {
    executable: PathBuf,
    running: Vec<Child>,
}

impl BarTrigger {
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            running: Vec::new(),
        }
    }

    fn command(&self, event: BarEvent) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(["--trigger", event.name()])
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    /// Runs the trigger to completion. Used from the command line, where the caller wants to
    /// know whether it worked.
    pub fn send(&self, event: BarEvent) -> anyhow::Result<ExitStatus> {
        self.command(event)
            .status()
            .with_context(|| format!("failed to run {}", self.executable.display()))
    }

    /// Collects finished triggers so they don't linger as zombies.
    fn reap(&mut self) {
        self.running.retain_mut(|child| match child.try_wait() {
            Ok(Some(status)) => {
                if !status.success() {
                    tracing::debug!(%status, "Bar trigger failed");
                }
                false
            }
            Ok(None) => true,
            Err(e) => {
                tracing::debug!("Failed to poll bar trigger: {e}");
                false
            }
        });
    }

    #[cfg(test)]
    fn in_flight(&self) -> usize {
        self.running.len()
    }
}

impl EventEmitter for BarTrigger {
    fn emit(&mut self, event: BarEvent) {
        self.reap();
        match self.command(event).spawn() {
            Ok(child) => self.running.push(child),
            Err(e) => tracing::debug!(
                %event,
                executable = %self.executable.display(),
                "Failed to trigger bar event: {e}"
            ),
        }
    }
}
