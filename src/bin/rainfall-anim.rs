use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use rainfall_anim::{
    Command as Control, DataOrigin, DatasetStats, DisplaySurface, Frame, FrameKey, MissingDataPolicy,
    PeriodKey, PlayOpts, Prepared, RenderMode, ResolvedConfig, VizConfig, playback, prepare,
};

#[derive(Parser, Debug)]
#[command(name = "rainfall-anim", version, about = "Animated monthly rainfall charts")]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Loop the animation in a preview file or window.
    Play(PlayArgs),
    /// Render a single year (bar) or month (scatter).
    Frame(FrameArgs),
    /// Write the whole timeline to a GIF or MP4.
    Export(ExportArgs),
    /// Print data and load statistics.
    Stats(StatsArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ChartChoice {
    Bar,
    Scatter,
}

impl From<ChartChoice> for RenderMode {
    fn from(c: ChartChoice) -> Self {
        match c {
            ChartChoice::Bar => RenderMode::Bar,
            ChartChoice::Scatter => RenderMode::Scatter,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum MissingChoice {
    Fail,
    Synthesize,
}

impl From<MissingChoice> for MissingDataPolicy {
    fn from(c: MissingChoice) -> Self {
        match c {
            MissingChoice::Fail => MissingDataPolicy::Fail,
            MissingChoice::Synthesize => MissingDataPolicy::Synthesize,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum DisplayChoice {
    /// Keep a PNG file updated with the current frame.
    Preview,
    /// Native window (requires the `window` feature).
    Window,
}

#[derive(Parser, Debug)]
struct DataArgs {
    /// Input CSV (defaults depend on --chart).
    #[arg(long)]
    data: Option<PathBuf>,

    /// Chart type.
    #[arg(long, value_enum, default_value_t = ChartChoice::Bar)]
    chart: ChartChoice,

    /// Lines to skip before the CSV rows.
    #[arg(long)]
    skip_rows: Option<usize>,

    /// JSON config file; flags override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Behaviour when the data file does not exist.
    #[arg(long, value_enum)]
    on_missing: Option<MissingChoice>,

    /// Seed for synthetic data.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    start_year: Option<i32>,

    #[arg(long)]
    end_year: Option<i32>,

    /// Title prefix.
    #[arg(long)]
    title: Option<String>,
}

impl DataArgs {
    fn config(&self) -> anyhow::Result<VizConfig> {
        let mut cfg = match &self.config {
            Some(path) => VizConfig::from_path(path)?,
            None => VizConfig::default(),
        };
        if let Some(data) = &self.data {
            cfg.data = Some(data.clone());
        }
        if let Some(title) = &self.title {
            cfg.title = Some(title.clone());
        }
        cfg.skip_rows = self.skip_rows.or(cfg.skip_rows);
        cfg.on_missing = self.on_missing.map(Into::into).or(cfg.on_missing);
        cfg.seed = self.seed.or(cfg.seed);
        cfg.start_year = self.start_year.or(cfg.start_year);
        cfg.end_year = self.end_year.or(cfg.end_year);
        Ok(cfg)
    }

    fn resolve(&self, tweak: impl FnOnce(&mut VizConfig)) -> anyhow::Result<ResolvedConfig> {
        let mut cfg = self.config()?;
        tweak(&mut cfg);
        Ok(cfg.resolve(self.chart.into())?)
    }
}

#[derive(Parser, Debug)]
struct PlayArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Interval between frames at 1x speed.
    #[arg(long)]
    interval_ms: Option<u64>,

    #[arg(long, value_enum, default_value_t = DisplayChoice::Preview)]
    display: DisplayChoice,

    /// Preview file for `--display preview`.
    #[arg(long, default_value = "rainfall_preview.png")]
    preview: PathBuf,

    /// Stop after this many frames.
    #[arg(long)]
    frames: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    data: DataArgs,

    #[arg(long)]
    year: i32,

    /// Month (scatter chart only).
    #[arg(long)]
    month: Option<u8>,

    /// Output PNG path.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the frame descriptor as JSON.
    #[arg(long, default_value_t = false)]
    json: bool,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    data: DataArgs,

    /// Output path (.gif; no extension means .gif).
    #[arg(long)]
    out: PathBuf,

    #[arg(long)]
    fps: Option<u32>,
}

#[derive(Parser, Debug)]
struct StatsArgs {
    #[command(flatten)]
    data: DataArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Export(args) => cmd_export(args),
        Command::Stats(args) => cmd_stats(args),
    }
}

fn load(cfg: &ResolvedConfig) -> anyhow::Result<Prepared> {
    let prepared = prepare(cfg)
        .with_context(|| format!("prepare {:?} chart data", cfg.mode))?;
    print_data_summary(&prepared);
    Ok(prepared)
}

fn print_data_summary(prepared: &Prepared) {
    match (&prepared.dataset.origin, &prepared.dataset.report) {
        (DataOrigin::File(path), Some(r)) => {
            println!(
                "loaded {} records from {} ({} rows, {} dropped: {} missing, {} flagged, {} malformed; {} trace)",
                r.kept,
                path.display(),
                r.rows_seen,
                r.dropped(),
                r.missing_values,
                r.flagged_values,
                r.malformed_rows,
                r.trace_values,
            );
        }
        _ => println!(
            "using {} synthetic records",
            prepared.dataset.records.len()
        ),
    }
}

fn print_stats(stats: &DatasetStats) {
    println!(
        "{} monthly totals over {} location(s), {} to {}",
        stats.summaries, stats.locations, stats.first, stats.last
    );
    println!("mean monthly rainfall: {:.1}mm", stats.mean);
    println!("wettest: {} ({:.1}mm)", stats.wettest.0, stats.wettest.1);
    println!("driest:  {} ({:.1}mm)", stats.driest.0, stats.driest.1);
}

fn cmd_stats(args: StatsArgs) -> anyhow::Result<()> {
    let cfg = args.data.resolve(|_| {})?;
    let prepared = load(&cfg)?;
    match prepared.stats() {
        Some(stats) => print_stats(&stats),
        None => println!("no data"),
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = args.data.resolve(|_| {})?;
    let key = match (cfg.mode, args.month) {
        (RenderMode::Bar, None) => FrameKey::Year(args.year),
        (RenderMode::Bar, Some(_)) => anyhow::bail!("--month only applies to --chart scatter"),
        (RenderMode::Scatter, Some(month)) => FrameKey::Period(PeriodKey::new(args.year, month)?),
        (RenderMode::Scatter, None) => anyhow::bail!("--chart scatter needs --month"),
    };

    let prepared = load(&cfg)?;
    let session = prepared.session(&cfg)?;
    let frame = session.renderer().render_key(key)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&frame)?);
    } else {
        match &frame {
            Frame::Bar(f) => println!("{}\n{}", f.title, f.stats_line),
            Frame::Scatter(f) => println!("{} ({} sites)", f.title, f.points.len()),
        }
    }

    if let Some(out) = &args.out {
        let pixels = session.render_key(key, None)?;
        rainfall_anim::write_png(&pixels, out)?;
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let cfg = args.data.resolve(|c| {
        if args.fps.is_some() {
            c.export_fps = args.fps;
        }
    })?;
    let prepared = load(&cfg)?;
    let session = prepared.session(&cfg)?;

    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        ctrlc::set_handler(move || stop.store(true, Ordering::Relaxed))
            .context("install Ctrl-C handler")?;
    }

    let (stats, path) = session
        .export_to_path(&args.out, cfg.export_fps, Some(&stop))
        .with_context(|| format!("export to '{}'", args.out.display()))?;
    if stats.interrupted {
        println!(
            "interrupted: wrote {} of {} frames to {}",
            stats.frames_written,
            session.len(),
            path.display()
        );
    } else {
        println!("wrote {} frames to {}", stats.frames_written, path.display());
    }
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let cfg = args.data.resolve(|c| {
        if args.interval_ms.is_some() {
            c.interval_ms = args.interval_ms;
        }
    })?;
    let prepared = load(&cfg)?;
    let session = prepared.session(&cfg)?;

    let (tx, rx) = mpsc::channel();
    {
        let tx = tx.clone();
        ctrlc::set_handler(move || {
            let _ = tx.send(Control::Stop);
        })
        .context("install Ctrl-C handler")?;
    }

    let mut surface: Box<dyn DisplaySurface> = match args.display {
        DisplayChoice::Preview => {
            playback::spawn_stdin_controls(tx);
            eprintln!(
                "previewing {} frames in {} (1/2/3 = speed, p = pause, q = quit)",
                session.len(),
                args.preview.display()
            );
            Box::new(playback::PreviewSurface::new(&args.preview))
        }
        DisplayChoice::Window => open_window(&cfg, tx)?,
    };

    let opts = PlayOpts {
        max_frames: args.frames,
        ..PlayOpts::new(cfg.interval)
    };
    let report = playback::play(&session, surface.as_mut(), &rx, opts)?;
    println!(
        "played {} frames ({} redraws)",
        report.frames_presented, report.redraws
    );
    Ok(())
}

#[cfg(feature = "window")]
fn open_window(
    cfg: &ResolvedConfig,
    tx: mpsc::Sender<Control>,
) -> anyhow::Result<Box<dyn DisplaySurface>> {
    // Keys arrive through the window; the sender only serves Ctrl-C.
    drop(tx);
    Ok(Box::new(playback::WindowSurface::open(&cfg.title, cfg.canvas)?))
}

#[cfg(not(feature = "window"))]
fn open_window(
    _cfg: &ResolvedConfig,
    _tx: mpsc::Sender<Control>,
) -> anyhow::Result<Box<dyn DisplaySurface>> {
    anyhow::bail!("this build has no window support; rebuild with `--features window` or use `--display preview`")
}
