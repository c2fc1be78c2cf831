//! Export sinks.
//!
//! Sinks receive rendered frames in timeline order from
//! [`RenderSession::export`](crate::session::RenderSession::export). The format is picked
//! from the destination extension.

/// Animated GIF output.
pub mod gif;
/// Sink trait and the in-memory sink.
pub mod sink;

use std::path::{Path, PathBuf};

use crate::foundation::error::{RainError, RainResult};

pub use gif::GifSink;
pub use sink::{FrameSink, InMemorySink, SinkConfig};

/// Supported animation containers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportFormat {
    /// Looping animated GIF.
    Gif,
}

impl ExportFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Gif => "gif",
        }
    }
}

/// Resolve the export destination and its format.
///
/// A path without an extension gets `.gif` appended. Unknown extensions are rejected.
pub fn resolve_export_path(path: &Path) -> RainResult<(PathBuf, ExportFormat)> {
    let Some(ext) = path.extension() else {
        return Ok((path.with_extension(ExportFormat::Gif.extension()), ExportFormat::Gif));
    };
    match ext.to_string_lossy().to_ascii_lowercase().as_str() {
        "gif" => Ok((path.to_path_buf(), ExportFormat::Gif)),
        other => Err(RainError::validation(format!(
            "unsupported export format '.{other}' (expected .gif)"
        ))),
    }
}

/// Build the sink for `path`, returning the resolved destination alongside it.
pub fn sink_for_path(path: &Path) -> RainResult<(Box<dyn FrameSink>, PathBuf)> {
    let (path, format) = resolve_export_path(path)?;
    let sink: Box<dyn FrameSink> = match format {
        ExportFormat::Gif => Box::new(GifSink::new(&path)),
    };
    Ok((sink, path))
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_dir(path: &Path) -> RainResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            RainError::export(format!(
                "failed to create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/mod.rs"]
mod tests;
