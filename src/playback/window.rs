use minifb::{Key, KeyRepeat, Window, WindowOptions};

use super::driver::Command;
use super::surface::{DisplaySurface, PresentInfo};
use crate::draw::FrameRGBA;
use crate::foundation::core::Canvas;
use crate::foundation::error::{RainError, RainResult};

/// Native window surface. Keys: `1`/`2`/`3` speed, space pause, escape or `q` stop.
pub struct WindowSurface {
    window: Window,
    buffer: Vec<u32>,
    canvas: Canvas,
}

impl WindowSurface {
    /// Open a window sized to `canvas`.
    pub fn open(title: &str, canvas: Canvas) -> RainResult<Self> {
        let window = Window::new(
            title,
            canvas.width as usize,
            canvas.height as usize,
            WindowOptions::default(),
        )
        .map_err(|e| RainError::render(format!("open window: {e}")))?;
        Ok(Self {
            window,
            buffer: vec![0; canvas.width as usize * canvas.height as usize],
            canvas,
        })
    }
}

impl DisplaySurface for WindowSurface {
    fn present(&mut self, frame: &FrameRGBA, _info: &PresentInfo) -> RainResult<()> {
        if frame.width != self.canvas.width || frame.height != self.canvas.height {
            return Err(RainError::validation("frame size does not match window"));
        }
        for (dst, px) in self.buffer.iter_mut().zip(frame.data.chunks_exact(4)) {
            *dst = (u32::from(px[0]) << 16) | (u32::from(px[1]) << 8) | u32::from(px[2]);
        }
        self.window
            .update_with_buffer(
                &self.buffer,
                self.canvas.width as usize,
                self.canvas.height as usize,
            )
            .map_err(|e| RainError::render(format!("update window: {e}")))
    }

    fn poll_commands(&mut self) -> Vec<Command> {
        self.window.update();
        self.window
            .get_keys_pressed(KeyRepeat::No)
            .into_iter()
            .filter_map(|key| match key {
                Key::Key1 | Key::NumPad1 => Some(Command::SetSpeed(1.0)),
                Key::Key2 | Key::NumPad2 => Some(Command::SetSpeed(2.0)),
                Key::Key3 | Key::NumPad3 => Some(Command::SetSpeed(3.0)),
                Key::Space | Key::P => Some(Command::TogglePause),
                Key::Escape | Key::Q => Some(Command::Stop),
                _ => None,
            })
            .collect()
    }

    fn is_open(&self) -> bool {
        self.window.is_open()
    }
}
