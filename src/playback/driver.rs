use std::time::Duration;

use crate::foundation::error::{RainError, RainResult};

/// Shortest effective tick interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Longest effective tick interval; very small speeds saturate here.
pub const MAX_INTERVAL: Duration = Duration::from_secs(3600);

/// Playback lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    /// Not started.
    Idle,
    /// Advancing one frame per interval.
    Playing,
    /// Holding the current frame.
    Paused,
    /// Terminal.
    Stopped,
}

/// Control messages for the play loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Replace the speed multiplier.
    SetSpeed(f64),
    /// Hold the current frame.
    Pause,
    /// Continue from the held frame.
    Resume,
    /// Pause when playing, resume when paused.
    TogglePause,
    /// End playback.
    Stop,
}

impl Command {
    /// Parse one line of the text control input.
    ///
    /// `1`/`2`/`3` set the speed, `p` or a space toggles pause, `q` stops.
    pub fn parse_control(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return line.contains(' ').then_some(Self::TogglePause);
        }
        match trimmed.to_ascii_lowercase().as_str() {
            "1" => Some(Self::SetSpeed(1.0)),
            "2" => Some(Self::SetSpeed(2.0)),
            "3" => Some(Self::SetSpeed(3.0)),
            "p" | "pause" => Some(Self::TogglePause),
            "q" | "quit" | "stop" => Some(Self::Stop),
            _ => None,
        }
    }
}

/// Position, speed and state of an endlessly looping playback.
///
/// `tick` hands out timeline indices `0, 1, …, len-1, 0, …`. Speed changes only affect the
/// interval; the position is never reset.
#[derive(Clone, Debug)]
pub struct AnimationDriver {
    state: DriverState,
    base_interval: Duration,
    speed: f64,
    len: usize,
    next: usize,
    current: Option<usize>,
}

impl AnimationDriver {
    /// Idle driver with the 1x interval `base_interval`.
    pub fn new(base_interval: Duration) -> RainResult<Self> {
        if base_interval.is_zero() {
            return Err(RainError::validation("playback interval must be > 0"));
        }
        Ok(Self {
            state: DriverState::Idle,
            base_interval,
            speed: 1.0,
            len: 0,
            next: 0,
            current: None,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Current speed multiplier.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Index of the last frame handed out by `tick`.
    pub fn position(&self) -> Option<usize> {
        self.current
    }

    /// `base_interval / speed`, clamped to [`MIN_INTERVAL`]..=[`MAX_INTERVAL`].
    pub fn interval(&self) -> Duration {
        let secs = self.base_interval.as_secs_f64() / self.speed;
        if !secs.is_finite() || secs >= MAX_INTERVAL.as_secs_f64() {
            return MAX_INTERVAL;
        }
        self.base_interval.div_f64(self.speed).clamp(MIN_INTERVAL, MAX_INTERVAL)
    }

    /// Idle → Playing over a timeline of `len` frames.
    pub fn start(&mut self, len: usize) -> RainResult<()> {
        if self.state != DriverState::Idle {
            return Err(RainError::validation(format!(
                "cannot start playback from {:?}",
                self.state
            )));
        }
        if len == 0 {
            return Err(RainError::validation("cannot play an empty timeline"));
        }
        self.len = len;
        self.next = 0;
        self.current = None;
        self.state = DriverState::Playing;
        Ok(())
    }

    /// Advance one frame. Returns `None` unless playing.
    pub fn tick(&mut self) -> Option<usize> {
        if self.state != DriverState::Playing {
            return None;
        }
        let index = self.next;
        self.current = Some(index);
        self.next = (index + 1) % self.len;
        Some(index)
    }

    /// Change the speed multiplier, keeping the position.
    pub fn set_speed(&mut self, multiplier: f64) -> RainResult<()> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(RainError::validation(format!(
                "speed multiplier must be a positive number, got {multiplier}"
            )));
        }
        self.require_active("set speed")?;
        self.speed = multiplier;
        Ok(())
    }

    /// Playing → Paused. Pausing while paused is a no-op.
    pub fn pause(&mut self) -> RainResult<()> {
        self.require_active("pause")?;
        self.state = DriverState::Paused;
        Ok(())
    }

    /// Paused → Playing. Resuming while playing is a no-op.
    pub fn resume(&mut self) -> RainResult<()> {
        self.require_active("resume")?;
        self.state = DriverState::Playing;
        Ok(())
    }

    /// Any state → Stopped.
    pub fn stop(&mut self) {
        self.state = DriverState::Stopped;
    }

    /// Apply a control message.
    pub fn apply(&mut self, command: Command) -> RainResult<()> {
        match command {
            Command::SetSpeed(m) => self.set_speed(m),
            Command::Pause => self.pause(),
            Command::Resume => self.resume(),
            Command::TogglePause => match self.state {
                DriverState::Paused => self.resume(),
                _ => self.pause(),
            },
            Command::Stop => {
                self.stop();
                Ok(())
            }
        }
    }

    fn require_active(&self, what: &str) -> RainResult<()> {
        match self.state {
            DriverState::Playing | DriverState::Paused => Ok(()),
            other => Err(RainError::validation(format!(
                "cannot {what} while {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
