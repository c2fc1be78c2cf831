//! Animated monthly rainfall charts.
//!
//! Daily station records or per-site monthly records are cleaned ([`data`]), summed per month
//! ([`aggregate`]), mapped to colors and sizes ([`colormap`]) and turned into frame descriptors
//! ([`frame`]). Frames are drawn statelessly ([`draw`]) and either played back in a loop
//! ([`playback`]) or exported as an animation ([`encode`], [`session`]).
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod aggregate;
pub mod colormap;
pub mod config;
pub mod data;
pub mod draw;
pub mod encode;
pub mod frame;
pub mod pipeline;
pub mod playback;
pub mod session;

mod foundation;

pub use aggregate::{DatasetStats, Grouping, MonthlySeries, PeriodSummary, aggregate};
pub use colormap::{Band, Colormap, LegendEntry, ValueMapper};
pub use config::{ResolvedConfig, VizConfig};
pub use data::{DataOrigin, Dataset, MissingDataPolicy, load_or_synthesize};
pub use draw::{FrameRGBA, Hud, Rasterizer, draw_svg, write_png};
pub use encode::{ExportFormat, FrameSink, GifSink, InMemorySink, SinkConfig};
pub use foundation::core::{Canvas, Fps, FrameIndex, MONTH_NAMES, PeriodKey, Point, Rgb8};
pub use foundation::error::{RainError, RainResult};
pub use frame::{Frame, FrameKey, FrameRenderer, RenderMode};
pub use pipeline::{Prepared, prepare};
pub use playback::{AnimationDriver, Command, DisplaySurface, DriverState, PlayOpts, play};
pub use session::{ExportStats, RenderSession};
