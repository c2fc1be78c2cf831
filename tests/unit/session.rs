use super::*;
use crate::aggregate::{MonthlySeries, PeriodSummary};
use crate::encode::InMemorySink;
use crate::foundation::core::PeriodKey;
use crate::frame::RenderMode;

fn session() -> RenderSession {
    let series = MonthlySeries::from_summaries(
        [(2000, 1, 20.0), (2000, 7, 350.0), (2001, 4, 90.0), (2003, 12, 800.0)]
            .into_iter()
            .map(|(y, m, v)| PeriodSummary {
                period: PeriodKey::new(y, m).unwrap(),
                value: v,
                record_count: 1,
                location: None,
            })
            .collect(),
    );
    let renderer = FrameRenderer::new(RenderMode::Bar, series, None, "Rain").unwrap();
    RenderSession::with_rasterizer(
        renderer,
        Canvas::new(120, 70).unwrap(),
        Rasterizer::without_fonts(),
    )
}

#[test]
fn export_pushes_every_timeline_frame_in_order() {
    let s = session();
    let mut sink = InMemorySink::new();
    let stats = s.export(&mut sink, Fps::new(5, 1).unwrap(), None).unwrap();

    assert_eq!(s.len(), 3);
    assert_eq!(
        stats,
        ExportStats {
            frames_written: 3,
            interrupted: false
        }
    );
    assert!(sink.is_finished());
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2]);
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (120, 70));
}

#[test]
fn stop_flag_finishes_early_without_error() {
    let s = session();
    let stop = AtomicBool::new(true);
    let mut sink = InMemorySink::new();
    let stats = s
        .export(&mut sink, Fps::new(5, 1).unwrap(), Some(&stop))
        .unwrap();
    assert!(stats.interrupted);
    assert_eq!(stats.frames_written, 0);
    assert!(sink.is_finished());
}

#[test]
fn rendered_frames_match_canvas_and_are_deterministic() {
    let s = session();
    let a = s.render_frame(1, None).unwrap();
    let b = s.render_key(FrameKey::Year(2001), None).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.data.len(), 120 * 70 * 4);
    assert!(s.render_frame(3, None).is_err());
}

#[test]
fn hud_changes_pixels_but_not_the_frame() {
    let s = session();
    let plain = s.render_frame(0, None).unwrap();
    let hud = s
        .render_frame(
            0,
            Some(Hud {
                speed: 3.0,
                paused: false,
            }),
        )
        .unwrap();
    assert_ne!(plain.data, hud.data);
    assert_eq!(s.frame(0).unwrap(), s.frame(0).unwrap());
}

#[derive(Default)]
struct RejectingSink {
    pushed: usize,
    ended: bool,
}

impl FrameSink for RejectingSink {
    fn begin(&mut self, _cfg: SinkConfig) -> RainResult<()> {
        Ok(())
    }

    fn push_frame(&mut self, _idx: FrameIndex, _frame: &FrameRGBA) -> RainResult<()> {
        self.pushed += 1;
        if self.pushed == 2 {
            return Err(crate::foundation::error::RainError::export("disk full"));
        }
        Ok(())
    }

    fn end(&mut self) -> RainResult<()> {
        self.ended = true;
        Ok(())
    }
}

#[test]
fn failed_push_still_finalizes_the_sink() {
    let s = session();
    let mut sink = RejectingSink::default();
    let err = s
        .export(&mut sink, Fps::new(5, 1).unwrap(), None)
        .unwrap_err();
    assert!(err.to_string().contains("disk full"));
    assert_eq!(sink.pushed, 2);
    assert!(sink.ended);
}
