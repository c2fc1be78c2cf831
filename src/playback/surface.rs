use std::io::BufRead as _;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread::JoinHandle;

use super::driver::Command;
use crate::draw::{FrameRGBA, Hud, write_png};
use crate::foundation::error::{RainError, RainResult};

/// What is being shown, passed along with the pixels.
#[derive(Clone, Debug, PartialEq)]
pub struct PresentInfo {
    /// Timeline position.
    pub index: usize,
    /// Year or period label.
    pub label: String,
    /// Controls drawn into the frame.
    pub hud: Hud,
    /// `true` when the same index is shown again after a control change.
    pub redraw: bool,
}

/// Where playback frames go.
pub trait DisplaySurface {
    /// Show one frame.
    fn present(&mut self, frame: &FrameRGBA, info: &PresentInfo) -> RainResult<()>;

    /// Controls raised by the surface itself since the last call.
    fn poll_commands(&mut self) -> Vec<Command> {
        Vec::new()
    }

    /// `false` once the user closed the surface.
    fn is_open(&self) -> bool {
        true
    }
}

/// Headless surface that keeps a PNG file up to date with the current frame.
pub struct PreviewSurface {
    path: PathBuf,
    tmp_path: PathBuf,
}

impl PreviewSurface {
    /// Surface writing to `path` (replaced atomically on each present).
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        Self {
            path,
            tmp_path: PathBuf::from(tmp),
        }
    }

    /// Destination PNG.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplaySurface for PreviewSurface {
    fn present(&mut self, frame: &FrameRGBA, info: &PresentInfo) -> RainResult<()> {
        // Readers never observe a half-written file.
        write_png(frame, &self.tmp_path)?;
        std::fs::rename(&self.tmp_path, &self.path).map_err(|e| {
            RainError::export(format!("update preview '{}': {e}", self.path.display()))
        })?;
        tracing::debug!(
            index = info.index,
            label = %info.label,
            speed = info.hud.speed,
            paused = info.hud.paused,
            "preview updated"
        );
        Ok(())
    }
}

/// Forward control lines from stdin to `tx` until stdin closes or the receiver is gone.
pub fn spawn_stdin_controls(tx: Sender<Command>) -> JoinHandle<()> {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match Command::parse_control(&line) {
                Some(cmd) => {
                    if tx.send(cmd).is_err() {
                        break;
                    }
                }
                None => tracing::warn!(input = %line.trim(), "unknown control (use 1/2/3, p, q)"),
            }
        }
        tracing::debug!("control input closed");
    })
}
