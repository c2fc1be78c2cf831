//! Render session: frames → pixels → sinks.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::draw::{FrameRGBA, Hud, Rasterizer, draw_svg};
use crate::encode::{FrameSink, SinkConfig, sink_for_path};
use crate::foundation::core::{Canvas, Fps, FrameIndex};
use crate::foundation::error::RainResult;
use crate::frame::{Frame, FrameKey, FrameRenderer};

/// Export statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportStats {
    /// Frames handed to the sink.
    pub frames_written: u64,
    /// A stop request ended the export before the last frame.
    pub interrupted: bool,
}

/// Owns a [`FrameRenderer`] and the rasterizer that turns its frames into pixels.
///
/// The session never changes the renderer, so an export failure leaves it usable.
pub struct RenderSession {
    renderer: FrameRenderer,
    rasterizer: Rasterizer,
    canvas: Canvas,
}

impl RenderSession {
    /// Session with system fonts.
    pub fn new(renderer: FrameRenderer, canvas: Canvas) -> Self {
        Self::with_rasterizer(renderer, canvas, Rasterizer::new())
    }

    /// Session with an explicit rasterizer.
    pub fn with_rasterizer(renderer: FrameRenderer, canvas: Canvas, rasterizer: Rasterizer) -> Self {
        Self {
            renderer,
            rasterizer,
            canvas,
        }
    }

    /// Frame descriptors behind this session.
    pub fn renderer(&self) -> &FrameRenderer {
        &self.renderer
    }

    /// Output size.
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Timeline length.
    pub fn len(&self) -> usize {
        self.renderer.len()
    }

    /// `true` when the timeline has no frames.
    pub fn is_empty(&self) -> bool {
        self.renderer.is_empty()
    }

    /// Frame descriptor at timeline position `index`.
    pub fn frame(&self, index: usize) -> RainResult<Frame> {
        self.renderer.render_index(index)
    }

    /// Rasterize the frame at `index`, optionally with playback controls.
    pub fn render_frame(&self, index: usize, hud: Option<Hud>) -> RainResult<FrameRGBA> {
        let frame = self.renderer.render_index(index)?;
        self.rasterize(&frame, hud)
    }

    /// Rasterize the frame for `key`.
    pub fn render_key(&self, key: FrameKey, hud: Option<Hud>) -> RainResult<FrameRGBA> {
        let frame = self.renderer.render_key(key)?;
        self.rasterize(&frame, hud)
    }

    fn rasterize(&self, frame: &Frame, hud: Option<Hud>) -> RainResult<FrameRGBA> {
        let svg = draw_svg(frame, self.canvas, hud);
        self.rasterizer.rasterize(&svg, self.canvas)
    }

    /// Render the whole timeline into `sink` at `fps`.
    ///
    /// `stop` is checked before each frame; when set, the sink is finalized with the frames
    /// written so far and the result is marked interrupted.
    #[tracing::instrument(skip(self, sink, stop), fields(frames = self.len()))]
    pub fn export(
        &self,
        sink: &mut dyn FrameSink,
        fps: Fps,
        stop: Option<&AtomicBool>,
    ) -> RainResult<ExportStats> {
        sink.begin(SinkConfig {
            width: self.canvas.width,
            height: self.canvas.height,
            fps,
        })?;

        let mut stats = ExportStats::default();
        if let Err(err) = self.export_frames(sink, stop, &mut stats) {
            // Finalize the sink anyway and report the frame error.
            if let Err(end_err) = sink.end() {
                tracing::warn!(error = %end_err, "sink cleanup after failed export");
            }
            return Err(err);
        }

        sink.end()?;
        Ok(stats)
    }

    fn export_frames(
        &self,
        sink: &mut dyn FrameSink,
        stop: Option<&AtomicBool>,
        stats: &mut ExportStats,
    ) -> RainResult<()> {
        for index in 0..self.len() {
            if stop.is_some_and(|s| s.load(Ordering::Relaxed)) {
                stats.interrupted = true;
                tracing::info!(written = stats.frames_written, "export interrupted");
                break;
            }
            let pixels = self.render_frame(index, None)?;
            sink.push_frame(FrameIndex(index as u64), &pixels)?;
            stats.frames_written += 1;
            tracing::debug!(
                index,
                label = %self.renderer.label(index).unwrap_or_default(),
                "frame exported"
            );
        }
        Ok(())
    }

    /// Export to `path`, picking the format from its extension.
    ///
    /// Returns the resolved destination (`.gif` is appended when there is no extension).
    pub fn export_to_path(
        &self,
        path: &Path,
        fps: Fps,
        stop: Option<&AtomicBool>,
    ) -> RainResult<(ExportStats, PathBuf)> {
        let (mut sink, path) = sink_for_path(path)?;
        let stats = self.export(sink.as_mut(), fps, stop)?;
        tracing::info!(
            path = %path.display(),
            frames = stats.frames_written,
            interrupted = stats.interrupted,
            "export finished"
        );
        Ok((stats, path))
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
