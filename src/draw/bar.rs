use super::svg::{Anchor, SvgWriter, TextStyle};
use crate::foundation::core::{Canvas, MONTH_NAMES, Rect, Rgb8};
use crate::frame::BarFrame;

const FIGURE_BG: Rgb8 = Rgb8::from_hex(0x0A0A0A);
const AXES_BG: Rgb8 = Rgb8::from_hex(0x1A1A1A);
const LEGEND_BG: Rgb8 = Rgb8::from_hex(0x2A2A2A);
const WHITE: Rgb8 = Rgb8::from_hex(0xFFFFFF);
const GRID: Rgb8 = Rgb8::from_hex(0x808080);
const STATS_TEXT: Rgb8 = Rgb8::from_hex(0xD3D3D3);
const LABEL_BG: Rgb8 = Rgb8::from_hex(0x000000);

const Y_TICK_STEP: f64 = 200.0;
const BAR_OPACITY: f64 = 0.85;

fn plot_area(canvas: Canvas) -> Rect {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    Rect::new(0.08 * w, 0.15 * h, 0.95 * w, 0.82 * h)
}

pub(super) fn draw(w: &mut SvgWriter, frame: &BarFrame, canvas: Canvas) {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let plot = plot_area(canvas);
    let y_of = |v: f64| plot.y1 - (v.clamp(0.0, frame.y_max) / frame.y_max) * plot.height();

    w.rect(0.0, 0.0, cw, ch, FIGURE_BG, 1.0);
    w.rect(plot.x0, plot.y0, plot.width(), plot.height(), AXES_BG, 1.0);

    let tick_font = (ch * 0.015).max(8.0);
    let mut tick = 0.0;
    while tick <= frame.y_max + 1e-9 {
        let y = y_of(tick);
        w.line(plot.x0, y, plot.x1, y, GRID, 0.6, 0.3);
        w.text(
            plot.x0 - 6.0,
            y + tick_font * 0.35,
            &format!("{tick:.0}"),
            TextStyle::new(tick_font, WHITE).anchor(Anchor::End),
        );
        tick += Y_TICK_STEP;
    }
    w.vertical_text(
        0.025 * cw,
        plot.center().y,
        "Rainfall (mm)",
        TextStyle::new(tick_font * 1.2, WHITE)
            .bold()
            .anchor(Anchor::Middle),
    );

    let slot = plot.width() / 12.0;
    let bar_w = slot * 0.7;
    let label_font = (ch * 0.014).max(7.0);
    for bar in &frame.bars {
        let i = f64::from(bar.month - 1);
        let cx = plot.x0 + slot * (i + 0.5);
        let top = y_of(bar.value);
        w.stroked_rect(
            cx - bar_w / 2.0,
            top,
            bar_w,
            plot.y1 - top,
            bar.color,
            BAR_OPACITY,
            WHITE,
            0.5,
        );

        let ly = y_of(bar.label_y);
        let lw = label_font * (0.6 * bar.label.len() as f64 + 0.8);
        w.rounded_rect(
            cx - lw / 2.0,
            ly - label_font * 1.1,
            lw,
            label_font * 1.4,
            LABEL_BG,
            0.7,
        );
        w.text(
            cx,
            ly,
            &bar.label,
            TextStyle::new(label_font, WHITE).bold().anchor(Anchor::Middle),
        );

        w.text(
            cx,
            plot.y1 + tick_font * 1.5,
            MONTH_NAMES[usize::from(bar.month - 1)],
            TextStyle::new(tick_font, WHITE).anchor(Anchor::Middle),
        );
    }
    w.line(plot.x0, plot.y1, plot.x1, plot.y1, WHITE, 1.0, 1.0);
    w.line(plot.x0, plot.y0, plot.x0, plot.y1, WHITE, 1.0, 1.0);

    w.text(
        cw / 2.0,
        0.06 * ch,
        &frame.title,
        TextStyle::new((ch * 0.034).max(12.0), WHITE)
            .bold()
            .anchor(Anchor::Middle),
    );

    w.text(
        0.93 * cw,
        0.12 * ch,
        &frame.stats_line,
        TextStyle::new((ch * 0.016).max(8.0), STATS_TEXT).anchor(Anchor::End),
    );

    draw_legend(w, frame, cw, ch);
}

fn draw_legend(w: &mut SvgWriter, frame: &BarFrame, cw: f64, ch: f64) {
    let font = (ch * 0.014).max(7.0);
    let swatch = font;
    let row_h = font * 1.5;
    let box_x = 0.09 * cw;
    let box_y = 0.155 * ch;
    let box_w = 0.17 * cw;
    let box_h = row_h * frame.legend.len() as f64 + font * 0.8;

    w.rect(box_x, box_y, box_w, box_h, LEGEND_BG, 0.9);
    for (i, entry) in frame.legend.iter().enumerate() {
        let y = box_y + font * 0.4 + row_h * i as f64;
        w.stroked_rect(box_x + font * 0.5, y, swatch, swatch, entry.color, 1.0, WHITE, 0.3);
        w.text(
            box_x + font * 2.0,
            y + swatch * 0.85,
            &entry.label,
            TextStyle::new(font, WHITE),
        );
    }
}
