use std::sync::mpsc;

use super::*;
use crate::aggregate::{MonthlySeries, PeriodSummary};
use crate::data::record::Location;
use crate::draw::{FrameRGBA, Rasterizer};
use crate::foundation::core::{Canvas, PeriodKey};
use crate::frame::{FrameRenderer, RenderMode};

/// Records presentations and raises scripted commands once a given number of frames
/// (ticks and redraws) has been shown.
#[derive(Default)]
struct ScriptedSurface {
    log: Vec<PresentInfo>,
    script: Vec<(usize, Command)>,
    close_after: Option<usize>,
}

impl DisplaySurface for ScriptedSurface {
    fn present(&mut self, frame: &FrameRGBA, info: &PresentInfo) -> RainResult<()> {
        assert_eq!((frame.width, frame.height), (48, 32));
        self.log.push(info.clone());
        Ok(())
    }

    fn poll_commands(&mut self) -> Vec<Command> {
        let shown = self.log.len();
        let (due, rest): (Vec<_>, Vec<_>) = self.script.drain(..).partition(|(at, _)| *at == shown);
        self.script = rest;
        due.into_iter().map(|(_, c)| c).collect()
    }

    fn is_open(&self) -> bool {
        self.close_after.is_none_or(|n| self.log.len() < n)
    }
}

fn scatter_session() -> RenderSession {
    let at = |year, month| PeriodSummary {
        period: PeriodKey::new(year, month).unwrap(),
        value: 120.0,
        record_count: 1,
        location: Some(Location::new(22.3, 114.2)),
    };
    let series = MonthlySeries::from_summaries(vec![at(2000, 1), at(2004, 12)]);
    let renderer = FrameRenderer::new(RenderMode::Scatter, series, None, "Rain").unwrap();
    RenderSession::with_rasterizer(
        renderer,
        Canvas::new(48, 32).unwrap(),
        Rasterizer::without_fonts(),
    )
}

fn fast(max_frames: Option<u64>) -> PlayOpts {
    PlayOpts {
        base_interval: Duration::from_millis(1),
        poll_slice: Duration::from_millis(1),
        max_frames,
    }
}

fn idle_channel() -> Receiver<Command> {
    let (_tx, rx) = mpsc::channel();
    rx
}

#[test]
fn speed_change_at_47_continues_with_48() {
    let session = scatter_session();
    assert_eq!(session.len(), 60);
    let mut surface = ScriptedSurface {
        script: vec![(48, Command::SetSpeed(2.0))],
        ..Default::default()
    };

    let report = play(&session, &mut surface, &idle_channel(), fast(Some(50))).unwrap();

    let redraw_at = surface.log.iter().position(|i| i.redraw).unwrap();
    let redraw = &surface.log[redraw_at];
    assert_eq!(redraw.index, 47);
    assert_eq!(redraw.hud.speed, 2.0);

    let next = &surface.log[redraw_at + 1];
    assert_eq!((next.index, next.redraw), (48, false));
    assert_eq!(next.hud.speed, 2.0);
    assert_eq!(report.frames_presented, 50);
    assert_eq!(report.redraws, 1);
    assert_eq!(report.final_index, Some(49));
}

#[test]
fn playback_loops_past_the_last_frame() {
    let session = scatter_session();
    let mut surface = ScriptedSurface::default();
    let report = play(&session, &mut surface, &idle_channel(), fast(Some(62))).unwrap();

    let indices: Vec<usize> = surface.log.iter().map(|i| i.index).collect();
    assert_eq!(&indices[58..], &[58, 59, 0, 1]);
    assert_eq!(report.final_index, Some(1));
    assert_eq!(surface.log[60].label, "2000-01");
}

#[test]
fn pause_holds_position_until_resumed() {
    let session = scatter_session();
    let mut surface = ScriptedSurface {
        script: vec![(2, Command::TogglePause), (3, Command::TogglePause)],
        ..Default::default()
    };
    play(&session, &mut surface, &idle_channel(), fast(Some(4))).unwrap();

    let seen: Vec<(usize, bool, bool)> = surface
        .log
        .iter()
        .map(|i| (i.index, i.redraw, i.hud.paused))
        .collect();
    assert_eq!(
        seen,
        vec![
            (0, false, false),
            (1, false, false),
            (1, true, true),
            (1, true, false),
            (2, false, false),
            (3, false, false),
        ]
    );
}

#[test]
fn stop_command_ends_playback_cleanly() {
    let session = scatter_session();
    let (tx, rx) = mpsc::channel();
    tx.send(Command::Stop).unwrap();
    let mut surface = ScriptedSurface::default();

    let report = play(&session, &mut surface, &rx, fast(None)).unwrap();
    assert_eq!(report.frames_presented, 1);
    assert_eq!(report.redraws, 0);
}

#[test]
fn invalid_commands_are_ignored() {
    let session = scatter_session();
    let (tx, rx) = mpsc::channel();
    tx.send(Command::SetSpeed(-2.0)).unwrap();
    let mut surface = ScriptedSurface::default();

    let report = play(&session, &mut surface, &rx, fast(Some(3))).unwrap();
    assert_eq!(report.frames_presented, 3);
    assert_eq!(report.redraws, 0);
    assert!(surface.log.iter().all(|i| i.hud.speed == 1.0));
}

#[test]
fn closing_the_surface_stops_playback() {
    let session = scatter_session();
    let mut surface = ScriptedSurface {
        close_after: Some(5),
        ..Default::default()
    };
    let report = play(&session, &mut surface, &idle_channel(), fast(None)).unwrap();
    assert_eq!(report.frames_presented, 5);
    assert_eq!(report.final_index, Some(4));
}
