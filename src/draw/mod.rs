//! Stateless drawing of frame descriptors.
//!
//! A [`Frame`] is turned into an SVG document by [`draw_svg`] and rasterized by
//! [`Rasterizer`]. Nothing here keeps state between frames, so a frame always draws the
//! same way no matter what was drawn before it.

mod bar;
mod raster;
mod scatter;
pub(crate) mod svg;

pub use raster::{FrameRGBA, Rasterizer, write_png};

use crate::foundation::core::{Canvas, Rgb8};
use crate::frame::Frame;
use svg::{Anchor, SvgWriter, TextStyle};

/// Playback speeds offered by the on-screen controls.
pub const SPEED_CHOICES: [f64; 3] = [1.0, 2.0, 3.0];

/// On-screen playback controls drawn under the chart.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hud {
    /// Current speed multiplier; the matching button is highlighted.
    pub speed: f64,
    /// Draws a pause marker.
    pub paused: bool,
}

impl Default for Hud {
    fn default() -> Self {
        Self {
            speed: 1.0,
            paused: false,
        }
    }
}

const HUD_ACTIVE: Rgb8 = Rgb8::from_hex(0x90EE90);
const HUD_IDLE: Rgb8 = Rgb8::from_hex(0xD3D3D3);

/// Build the SVG document for `frame`. `hud` adds the speed buttons.
pub fn draw_svg(frame: &Frame, canvas: Canvas, hud: Option<Hud>) -> String {
    let mut w = SvgWriter::new(canvas.width, canvas.height);
    let dark = match frame {
        Frame::Bar(f) => {
            bar::draw(&mut w, f, canvas);
            true
        }
        Frame::Scatter(f) => {
            scatter::draw(&mut w, f, canvas);
            false
        }
    };
    if let Some(hud) = hud {
        draw_hud(&mut w, canvas, hud, dark);
    }
    w.finish()
}

fn draw_hud(w: &mut SvgWriter, canvas: Canvas, hud: Hud, dark: bool) {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let (bw, bh) = (0.08 * cw, 0.04 * ch);
    let y = 0.91 * ch;
    let text = if dark {
        Rgb8::from_hex(0x000000)
    } else {
        Rgb8::from_hex(0x202020)
    };

    for (i, speed) in SPEED_CHOICES.iter().enumerate() {
        let x = (0.35 + 0.11 * i as f64) * cw;
        let active = (hud.speed - speed).abs() < 1e-9;
        w.rounded_rect(x, y, bw, bh, if active { HUD_ACTIVE } else { HUD_IDLE }, 1.0);
        w.text(
            x + bw / 2.0,
            y + bh * 0.7,
            &format!("{speed:.0}x Speed"),
            TextStyle::new((bh * 0.45).max(8.0), text).anchor(Anchor::Middle),
        );
    }

    if hud.paused {
        let color = if dark {
            Rgb8::from_hex(0xFFFFFF)
        } else {
            Rgb8::from_hex(0x000000)
        };
        w.text(
            0.70 * cw,
            y + bh * 0.7,
            "PAUSED",
            TextStyle::new((bh * 0.5).max(8.0), color).bold(),
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/draw/svg.rs"]
mod tests;
