//! Interactive playback.
//!
//! [`play`] is the only owner of the [`AnimationDriver`]. Controls reach it as [`Command`]
//! messages, either over a channel (stdin thread, Ctrl-C handler) or from the display
//! surface itself, and are applied between ticks.

/// Playback state machine and control messages.
pub mod driver;
/// Display surfaces and the stdin control reader.
pub mod surface;
/// Native window surface.
#[cfg(feature = "window")]
pub mod window;

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

pub use driver::{AnimationDriver, Command, DriverState};
pub use surface::{DisplaySurface, PresentInfo, PreviewSurface, spawn_stdin_controls};
#[cfg(feature = "window")]
pub use window::WindowSurface;

use crate::draw::Hud;
use crate::foundation::error::RainResult;
use crate::session::RenderSession;

/// Play loop settings.
#[derive(Clone, Copy, Debug)]
pub struct PlayOpts {
    /// Interval between frames at 1x speed.
    pub base_interval: Duration,
    /// Longest wait before checking for controls again.
    pub poll_slice: Duration,
    /// Stop after this many ticks. `None` plays until stopped.
    pub max_frames: Option<u64>,
}

impl PlayOpts {
    /// Options with a 50 ms control poll and no frame limit.
    pub fn new(base_interval: Duration) -> Self {
        Self {
            base_interval,
            poll_slice: Duration::from_millis(50),
            max_frames: None,
        }
    }
}

/// Summary of a finished playback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackReport {
    /// Frames shown by timer ticks.
    pub frames_presented: u64,
    /// Extra presentations of the current frame after a control change.
    pub redraws: u64,
    /// Last timeline position shown.
    pub final_index: Option<usize>,
}

fn hud_of(driver: &AnimationDriver) -> Hud {
    Hud {
        speed: driver.speed(),
        paused: driver.state() == DriverState::Paused,
    }
}

fn present(
    session: &RenderSession,
    surface: &mut dyn DisplaySurface,
    driver: &AnimationDriver,
    index: usize,
    redraw: bool,
) -> RainResult<()> {
    let hud = hud_of(driver);
    let pixels = session.render_frame(index, Some(hud))?;
    let info = PresentInfo {
        index,
        label: session.renderer().label(index).unwrap_or_default(),
        hud,
        redraw,
    };
    surface.present(&pixels, &info)
}

/// Loop over the session's timeline until a stop command arrives, the surface closes, or
/// `max_frames` ticks have been shown.
///
/// A control change restarts the tick timer and redraws the current frame; the timeline
/// position is kept. Invalid commands are logged and ignored.
#[tracing::instrument(skip_all, fields(frames = session.len()))]
pub fn play(
    session: &RenderSession,
    surface: &mut dyn DisplaySurface,
    commands: &Receiver<Command>,
    opts: PlayOpts,
) -> RainResult<PlaybackReport> {
    let mut driver = AnimationDriver::new(opts.base_interval)?;
    driver.start(session.len())?;
    let mut report = PlaybackReport::default();
    let poll_slice = opts.poll_slice.max(Duration::from_millis(1));
    let mut deadline = Instant::now();

    loop {
        if !surface.is_open() {
            tracing::info!("display closed");
            driver.stop();
        }
        if driver.state() == DriverState::Stopped {
            break;
        }

        if driver.state() == DriverState::Playing && Instant::now() >= deadline {
            if opts.max_frames.is_some_and(|max| report.frames_presented >= max) {
                driver.stop();
                break;
            }
            if let Some(index) = driver.tick() {
                present(session, surface, &driver, index, false)?;
                report.frames_presented += 1;
                report.final_index = Some(index);
            }
            deadline = Instant::now() + driver.interval();
        }

        let mut pending = surface.poll_commands();
        let wait = match driver.state() {
            DriverState::Playing => deadline
                .saturating_duration_since(Instant::now())
                .min(poll_slice),
            _ => poll_slice,
        };
        match commands.recv_timeout(wait) {
            Ok(cmd) => pending.push(cmd),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => std::thread::sleep(wait),
        }
        pending.extend(commands.try_iter());
        if pending.is_empty() {
            continue;
        }

        let mut changed = false;
        for cmd in pending {
            match driver.apply(cmd) {
                Ok(()) => {
                    tracing::info!(?cmd, state = ?driver.state(), speed = driver.speed(), "control applied");
                    changed = true;
                }
                Err(e) => tracing::warn!(?cmd, error = %e, "control ignored"),
            }
        }
        if changed && driver.state() != DriverState::Stopped {
            if let Some(index) = driver.position() {
                present(session, surface, &driver, index, true)?;
                report.redraws += 1;
            }
            deadline = Instant::now() + driver.interval();
        }
    }

    tracing::info!(
        frames = report.frames_presented,
        final_index = ?report.final_index,
        "playback stopped"
    );
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/playback/play.rs"]
mod tests;
