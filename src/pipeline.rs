//! Load → aggregate → renderer wiring shared by every command.

use crate::aggregate::{DatasetStats, MonthlySeries};
use crate::config::ResolvedConfig;
use crate::data::{Dataset, load_or_synthesize};
use crate::foundation::error::RainResult;
use crate::frame::FrameRenderer;
use crate::session::RenderSession;

/// Data prepared for rendering.
#[derive(Clone, Debug)]
pub struct Prepared {
    /// Loaded (or synthesized) records and where they came from.
    pub dataset: Dataset,
    /// Monthly aggregates over the configured years.
    pub series: MonthlySeries,
}

impl Prepared {
    /// Summary statistics; `None` when nothing survived cleaning.
    pub fn stats(&self) -> Option<DatasetStats> {
        DatasetStats::compute(&self.series)
    }

    /// Frame renderer over the configured year window.
    pub fn renderer(&self, cfg: &ResolvedConfig) -> RainResult<FrameRenderer> {
        FrameRenderer::new(
            cfg.mode,
            self.series.clone(),
            cfg.years.clone(),
            cfg.title.clone(),
        )
    }

    /// Render session with system fonts.
    pub fn session(&self, cfg: &ResolvedConfig) -> RainResult<RenderSession> {
        Ok(RenderSession::new(self.renderer(cfg)?, cfg.canvas))
    }
}

/// Load (or synthesize) and aggregate the data described by `cfg`.
#[tracing::instrument(skip(cfg), fields(mode = ?cfg.mode, data = %cfg.data.display()))]
pub fn prepare(cfg: &ResolvedConfig) -> RainResult<Prepared> {
    let dataset = load_or_synthesize(
        &cfg.data,
        cfg.load_options(),
        cfg.on_missing,
        &cfg.synth_options(),
    )?;
    let series = MonthlySeries::from_records(&dataset.records, cfg.mode.grouping());
    tracing::info!(
        records = dataset.records.len(),
        summaries = series.len(),
        origin = ?dataset.origin,
        "data prepared"
    );
    Ok(Prepared { dataset, series })
}
