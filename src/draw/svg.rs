use crate::foundation::core::Rgb8;

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Anchor {
    Start,
    Middle,
    End,
}

impl Anchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Text styling for [`SvgWriter::text`].
#[derive(Clone, Copy, Debug)]
pub(crate) struct TextStyle {
    pub(crate) size: f64,
    pub(crate) color: Rgb8,
    pub(crate) bold: bool,
    pub(crate) anchor: Anchor,
}

impl TextStyle {
    pub(crate) fn new(size: f64, color: Rgb8) -> Self {
        Self {
            size,
            color,
            bold: false,
            anchor: Anchor::Start,
        }
    }

    pub(crate) fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub(crate) fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Append-only SVG document builder.
pub(crate) struct SvgWriter {
    buf: String,
}

impl SvgWriter {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        let mut buf = String::with_capacity(16 * 1024);
        buf.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}" font-family="sans-serif">"#
        ));
        Self { buf }
    }

    pub(crate) fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Rgb8, opacity: f64) {
        self.buf.push_str(&format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{opacity:.3}"/>"#,
            w.max(0.0),
            h.max(0.0),
            fill.to_hex_string()
        ));
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn stroked_rect(
        &mut self,
        x: f64,
        y: f64,
        w: f64,
        h: f64,
        fill: Rgb8,
        opacity: f64,
        stroke: Rgb8,
        stroke_width: f64,
    ) {
        self.buf.push_str(&format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{:.2}" height="{:.2}" fill="{}" fill-opacity="{opacity:.3}" stroke="{}" stroke-width="{stroke_width:.2}"/>"#,
            w.max(0.0),
            h.max(0.0),
            fill.to_hex_string(),
            stroke.to_hex_string()
        ));
    }

    pub(crate) fn rounded_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: Rgb8, opacity: f64) {
        self.buf.push_str(&format!(
            r#"<rect x="{x:.2}" y="{y:.2}" width="{:.2}" height="{:.2}" rx="3" fill="{}" fill-opacity="{opacity:.3}"/>"#,
            w.max(0.0),
            h.max(0.0),
            fill.to_hex_string()
        ));
    }

    #[allow(clippy::too_many_arguments)]
    pub(crate) fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: Rgb8, width: f64, opacity: f64) {
        self.buf.push_str(&format!(
            r#"<line x1="{x1:.2}" y1="{y1:.2}" x2="{x2:.2}" y2="{y2:.2}" stroke="{}" stroke-width="{width:.2}" stroke-opacity="{opacity:.3}"/>"#,
            color.to_hex_string()
        ));
    }

    pub(crate) fn circle(&mut self, cx: f64, cy: f64, r: f64, fill: Rgb8, opacity: f64) {
        self.buf.push_str(&format!(
            r#"<circle cx="{cx:.2}" cy="{cy:.2}" r="{:.2}" fill="{}" fill-opacity="{opacity:.3}"/>"#,
            r.max(0.0),
            fill.to_hex_string()
        ));
    }

    pub(crate) fn text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        self.buf.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" font-size="{:.1}" fill="{}" text-anchor="{}"{}>{}</text>"#,
            style.size,
            style.color.to_hex_string(),
            style.anchor.as_str(),
            if style.bold { r#" font-weight="bold""# } else { "" },
            escape_xml(content)
        ));
    }

    /// Text rotated -90° about its anchor (reads bottom to top).
    pub(crate) fn vertical_text(&mut self, x: f64, y: f64, content: &str, style: TextStyle) {
        self.buf
            .push_str(&format!(r#"<g transform="rotate(-90 {x:.2} {y:.2})">"#));
        self.text(x, y, content, style);
        self.buf.push_str("</g>");
    }

    /// Horizontal linear gradient definition with evenly spaced stops.
    pub(crate) fn linear_gradient(&mut self, id: &str, stops: &[Rgb8]) {
        self.buf.push_str(&format!(
            r#"<defs><linearGradient id="{id}" x1="0" y1="0" x2="1" y2="0">"#
        ));
        let last = stops.len().saturating_sub(1).max(1) as f64;
        for (i, c) in stops.iter().enumerate() {
            self.buf.push_str(&format!(
                r#"<stop offset="{:.4}" stop-color="{}"/>"#,
                i as f64 / last,
                c.to_hex_string()
            ));
        }
        self.buf.push_str("</linearGradient></defs>");
    }

    pub(crate) fn gradient_rect(&mut self, x: f64, y: f64, w: f64, h: f64, gradient_id: &str) {
        self.buf.push_str(&format!(
            r##"<rect x="{x:.2}" y="{y:.2}" width="{:.2}" height="{:.2}" fill="url(#{gradient_id})" stroke="#333333" stroke-width="0.8"/>"##,
            w.max(0.0),
            h.max(0.0)
        ));
    }

    pub(crate) fn finish(mut self) -> String {
        self.buf.push_str("</svg>");
        self.buf
    }
}

pub(crate) fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}
