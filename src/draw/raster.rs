use std::path::Path;
use std::sync::Arc;

use crate::foundation::core::Canvas;
use crate::foundation::error::{RainError, RainResult};

/// Rendered frame pixels, row-major RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `width * height * 4` bytes.
    pub data: Vec<u8>,
    /// Whether `data` carries premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Copy with straight (non-premultiplied) alpha, as image encoders expect.
    pub fn to_straight_alpha(&self) -> Vec<u8> {
        if !self.premultiplied {
            return self.data.clone();
        }
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

/// SVG rasterizer holding the font database used for text.
pub struct Rasterizer {
    opts: usvg::Options<'static>,
}

impl Rasterizer {
    /// Load system fonts once. Text is skipped if no fonts are found.
    pub fn new() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        if db.len() == 0 {
            tracing::warn!("no system fonts found; chart text will not be drawn");
        } else {
            tracing::debug!(faces = db.len(), "loaded system fonts");
        }
        Self::with_fontdb(db)
    }

    /// Rasterizer with an empty font database.
    pub fn without_fonts() -> Self {
        Self::with_fontdb(usvg::fontdb::Database::new())
    }

    fn with_fontdb(db: usvg::fontdb::Database) -> Self {
        Self {
            opts: usvg::Options {
                fontdb: Arc::new(db),
                ..Default::default()
            },
        }
    }

    /// Number of font faces available for text.
    pub fn font_faces(&self) -> usize {
        self.opts.fontdb.len()
    }

    /// Parse `svg` and render it at `canvas` size.
    pub fn rasterize(&self, svg: &str, canvas: Canvas) -> RainResult<FrameRGBA> {
        let tree = usvg::Tree::from_str(svg, &self.opts)
            .map_err(|e| RainError::render(format!("parse frame svg: {e}")))?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(canvas.width, canvas.height)
            .ok_or_else(|| RainError::render("failed to allocate frame pixmap"))?;

        let sx = canvas.width as f32 / tree.size().width();
        let sy = canvas.height as f32 / tree.size().height();
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(sx, sy),
            &mut pixmap.as_mut(),
        );

        Ok(FrameRGBA {
            width: canvas.width,
            height: canvas.height,
            data: pixmap.take(),
            premultiplied: true,
        })
    }
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `frame` as a PNG, creating parent directories as needed.
pub fn write_png(frame: &FrameRGBA, path: &Path) -> RainResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            RainError::export(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight_alpha(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| RainError::export(format!("write png '{}': {e}", path.display())))
}
