use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};

use super::ensure_parent_dir;
use super::sink::{FrameSink, SinkConfig};
use crate::draw::FrameRGBA;
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{RainError, RainResult};

/// Growable byte buffer the encoder writes into.
///
/// The encoder only emits the GIF trailer when dropped, so the bytes are kept outside of it
/// and copied to disk afterwards, where write errors can still be reported.
#[derive(Clone, Default)]
struct EncodedBytes(Arc<Mutex<Vec<u8>>>);

impl EncodedBytes {
    fn take(&self) -> RainResult<Vec<u8>> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| RainError::export("gif buffer lock poisoned"))?;
        Ok(std::mem::take(&mut *guard))
    }
}

impl Write for EncodedBytes {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("gif buffer lock poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Looping animated GIF written with the `image` crate.
///
/// The destination is opened in `begin` so unwritable paths fail before any rendering.
/// The encoded animation is written out in `end`.
pub struct GifSink {
    out_path: PathBuf,
    file: Option<File>,
    bytes: EncodedBytes,
    encoder: Option<GifEncoder<EncodedBytes>>,
    cfg: Option<SinkConfig>,
    delay_ms: u32,
    last_idx: Option<FrameIndex>,
}

impl GifSink {
    /// Sink writing to `out_path` (created or truncated in `begin`).
    pub fn new(out_path: impl Into<PathBuf>) -> Self {
        Self {
            out_path: out_path.into(),
            file: None,
            bytes: EncodedBytes::default(),
            encoder: None,
            cfg: None,
            delay_ms: 0,
            last_idx: None,
        }
    }

    fn write_err(&self, e: impl std::fmt::Display) -> RainError {
        RainError::export(format!("write gif '{}': {e}", self.out_path.display()))
    }
}

impl FrameSink for GifSink {
    fn begin(&mut self, cfg: SinkConfig) -> RainResult<()> {
        if cfg.width == 0 || cfg.height == 0 {
            return Err(RainError::validation(
                "gif sink width/height must be non-zero",
            ));
        }
        if cfg.width > u32::from(u16::MAX) || cfg.height > u32::from(u16::MAX) {
            return Err(RainError::validation(format!(
                "gif frames are limited to {max}x{max}",
                max = u16::MAX
            )));
        }

        ensure_parent_dir(&self.out_path)?;
        let file = File::create(&self.out_path).map_err(|e| {
            RainError::export(format!(
                "create gif '{}': {e}",
                self.out_path.display()
            ))
        })?;

        let bytes = EncodedBytes::default();
        let mut encoder = GifEncoder::new_with_speed(bytes.clone(), 10);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| RainError::export(format!("configure gif: {e}")))?;

        self.delay_ms = cfg.fps.frame_duration_ms();
        self.file = Some(file);
        self.bytes = bytes;
        self.encoder = Some(encoder);
        self.cfg = Some(cfg);
        self.last_idx = None;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> RainResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| RainError::export("gif sink not started"))?;
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(RainError::export(
                "gif sink received out-of-order frame index",
            ));
        }
        if frame.width != cfg.width || frame.height != cfg.height {
            return Err(RainError::validation(format!(
                "frame size mismatch: got {}x{}, expected {}x{}",
                frame.width, frame.height, cfg.width, cfg.height
            )));
        }

        let image = RgbaImage::from_raw(frame.width, frame.height, frame.to_straight_alpha())
            .ok_or_else(|| RainError::validation("frame.data size mismatch with width*height*4"))?;
        let encoder = self
            .encoder
            .as_mut()
            .ok_or_else(|| RainError::export("gif sink is already finalized"))?;
        let pushed = encoder.encode_frame(Frame::from_parts(
            image,
            0,
            0,
            Delay::from_numer_denom_ms(self.delay_ms, 1),
        ));
        pushed.map_err(|e| self.write_err(e))?;
        self.last_idx = Some(idx);
        Ok(())
    }

    fn end(&mut self) -> RainResult<()> {
        let encoder = self
            .encoder
            .take()
            .ok_or_else(|| RainError::export("gif sink not started"))?;
        self.cfg = None;
        // Dropping the encoder appends the trailer to the buffer.
        drop(encoder);
        let bytes = self.bytes.take()?;
        let mut file = self
            .file
            .take()
            .ok_or_else(|| RainError::export("gif sink not started"))?;
        file.write_all(&bytes).map_err(|e| self.write_err(e))?;
        file.flush().map_err(|e| self.write_err(e))?;
        tracing::debug!(path = %self.out_path.display(), bytes = bytes.len(), "gif finalized");
        Ok(())
    }
}
