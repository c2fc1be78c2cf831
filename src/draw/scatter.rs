use super::svg::{Anchor, SvgWriter, TextStyle};
use crate::colormap::RAINFALL_STOPS;
use crate::foundation::core::{Canvas, Point, Rect, Rgb8};
use crate::frame::ScatterFrame;

const PAPER: Rgb8 = Rgb8::from_hex(0xFFFFFF);
const OCEAN: Rgb8 = Rgb8::from_hex(0xADD8E6);
const INK: Rgb8 = Rgb8::from_hex(0x000000);
const GRATICULE: Rgb8 = Rgb8::from_hex(0x808080);

const GRATICULE_STEP_DEG: f64 = 30.0;
const COLORBAR_TICK_MM: f64 = 50.0;
const POINT_OPACITY: f64 = 0.7;

/// Equirectangular map rectangle: 2:1, centred, limited by either canvas dimension.
fn map_area(canvas: Canvas) -> Rect {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let map_w = (0.9 * cw).min(2.0 * 0.6 * ch);
    let map_h = map_w / 2.0;
    let x0 = (cw - map_w) / 2.0;
    let y0 = 0.1 * ch;
    Rect::new(x0, y0, x0 + map_w, y0 + map_h)
}

fn project(map: Rect, lon_lat: Point) -> Point {
    let x = map.x0 + (lon_lat.x + 180.0) / 360.0 * map.width();
    let y = map.y0 + (90.0 - lon_lat.y) / 180.0 * map.height();
    Point::new(x, y)
}

/// Marker area is in pt²; radius in px at 100 dpi.
fn marker_radius(size: f64) -> f64 {
    size.max(0.0).sqrt() * 100.0 / 72.0 / 2.0
}

pub(super) fn draw(w: &mut SvgWriter, frame: &ScatterFrame, canvas: Canvas) {
    let cw = f64::from(canvas.width);
    let ch = f64::from(canvas.height);
    let map = map_area(canvas);

    w.rect(0.0, 0.0, cw, ch, PAPER, 1.0);
    w.rect(map.x0, map.y0, map.width(), map.height(), OCEAN, 0.5);

    let mut lon = -180.0;
    while lon <= 180.0 {
        let p = project(map, Point::new(lon, 0.0));
        w.line(p.x, map.y0, p.x, map.y1, GRATICULE, 0.5, 0.5);
        lon += GRATICULE_STEP_DEG;
    }
    let mut lat = -90.0;
    while lat <= 90.0 {
        let p = project(map, Point::new(0.0, lat));
        w.line(map.x0, p.y, map.x1, p.y, GRATICULE, 0.5, 0.5);
        lat += GRATICULE_STEP_DEG;
    }
    w.stroked_rect(map.x0, map.y0, map.width(), map.height(), OCEAN, 0.0, INK, 0.8);

    for point in &frame.points {
        let p = project(map, point.position);
        w.circle(p.x, p.y, marker_radius(point.size), point.color, POINT_OPACITY);
    }

    if frame.points.is_empty() {
        w.text(
            map.center().x,
            map.center().y,
            "no data for this period",
            TextStyle::new((ch * 0.02).max(9.0), GRATICULE).anchor(Anchor::Middle),
        );
    }

    w.text(
        cw / 2.0,
        0.06 * ch,
        &frame.title,
        TextStyle::new((ch * 0.03).max(12.0), INK)
            .bold()
            .anchor(Anchor::Middle),
    );

    draw_colorbar(w, frame.value_range, map, ch);
}

fn draw_colorbar(w: &mut SvgWriter, (vmin, vmax): (f64, f64), map: Rect, ch: f64) {
    let bar_w = 0.8 * map.width();
    let bar_h = bar_w / 30.0;
    let x0 = map.center().x - bar_w / 2.0;
    let y0 = map.y1 + 0.04 * ch;
    let font = (ch * 0.015).max(8.0);

    w.linear_gradient("rainfall", &RAINFALL_STOPS);
    w.gradient_rect(x0, y0, bar_w, bar_h, "rainfall");

    let span = (vmax - vmin).max(f64::EPSILON);
    let mut tick = vmin;
    while tick <= vmax + 1e-9 {
        let x = x0 + (tick - vmin) / span * bar_w;
        w.line(x, y0 + bar_h, x, y0 + bar_h + 4.0, INK, 0.8, 1.0);
        w.text(
            x,
            y0 + bar_h + 4.0 + font,
            &format!("{tick:.0}"),
            TextStyle::new(font, INK).anchor(Anchor::Middle),
        );
        tick += COLORBAR_TICK_MM;
    }
    w.text(
        x0 + bar_w / 2.0,
        y0 + bar_h + 4.0 + font * 2.4,
        "Monthly Rainfall (mm)",
        TextStyle::new(font, INK).anchor(Anchor::Middle),
    );
}
