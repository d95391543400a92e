use crate::util::{escape_xml, fmt};
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// A filled, outlined circle for bubble `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMark<'a> {
    pub index: usize,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub fill: &'a str,
    pub fill_opacity: f64,
    pub stroke: &'a str,
    pub stroke_width: f64,
}

/// A label centered on bubble `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextMark<'a> {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub text: &'a str,
    pub font_size: f64,
    pub color: &'a str,
    pub weight: &'a str,
}

/// Something the chart can be drawn onto. Marks arrive in bubble index order, each circle
/// before its label.
pub trait Surface {
    fn circle(&mut self, mark: &CircleMark<'_>);

    fn text(&mut self, mark: &TextMark<'_>);
}

/// An owned copy of a mark, as kept by [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum Mark {
    Circle {
        index: usize,
        cx: f64,
        cy: f64,
        r: f64,
        fill: String,
        fill_opacity: f64,
    },
    Text {
        index: usize,
        text: String,
        font_size: f64,
        color: String,
    },
}

/// Records every mark it receives. Handy for tests and for custom backends that want to replay
/// the chart later.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    pub marks: Vec<Mark>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn circles(&self) -> impl Iterator<Item = &Mark> {
        self.marks
            .iter()
            .filter(|m| matches!(m, Mark::Circle { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &Mark> {
        self.marks.iter().filter(|m| matches!(m, Mark::Text { .. }))
    }
}

impl Surface for Recorder {
    fn circle(&mut self, mark: &CircleMark<'_>) {
        self.marks.push(Mark::Circle {
            index: mark.index,
            cx: mark.cx,
            cy: mark.cy,
            r: mark.r,
            fill: mark.fill.to_string(),
            fill_opacity: mark.fill_opacity,
        });
    }

    fn text(&mut self, mark: &TextMark<'_>) {
        self.marks.push(Mark::Text {
            index: mark.index,
            text: mark.text.to_string(),
            font_size: mark.font_size,
            color: mark.color.to_string(),
        });
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SvgOptions {
    /// Extra space around the circles' bounding box.
    pub padding: f64,
    /// Chart title, turned into the root `id` attribute.
    pub diagram_id: Option<String>,
    /// Optional background fill painted under the chart.
    pub background: Option<String>,
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self {
            padding: 8.0,
            diagram_id: None,
            background: None,
        }
    }
}

/// Root `viewBox` of an [`SvgSurface`], in chart units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Accumulates marks into an SVG document. Coordinates are used as-is, so y grows downward.
#[derive(Debug, Clone)]
pub struct SvgSurface {
    options: SvgOptions,
    body: String,
    extent: Option<(f64, f64, f64, f64)>,
}

impl SvgSurface {
    pub fn new(options: SvgOptions) -> Self {
        Self {
            options,
            body: String::new(),
            extent: None,
        }
    }

    fn grow(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        self.extent = Some(match self.extent {
            None => (min_x, min_y, max_x, max_y),
            Some((a, b, c, d)) => (a.min(min_x), b.min(min_y), c.max(max_x), d.max(max_y)),
        });
    }

    /// The region the finished document will show: everything drawn so far, grown by the
    /// padding, never thinner than one unit.
    pub fn view_box(&self) -> ViewBox {
        let pad = self.options.padding.max(0.0);
        let (min_x, min_y, max_x, max_y) = self.extent.unwrap_or((0.0, 0.0, 0.0, 0.0));
        ViewBox {
            x: min_x - pad,
            y: min_y - pad,
            width: (max_x - min_x + 2.0 * pad).max(1.0),
            height: (max_y - min_y + 2.0 * pad).max(1.0),
        }
    }

    /// Wraps the accumulated marks in a root `<svg>` whose viewBox covers everything drawn.
    pub fn finish(self) -> String {
        let vb = self.view_box();
        let id = root_id(self.options.diagram_id.as_deref());
        let mut out = String::with_capacity(self.body.len() + 256);
        let _ = write!(
            &mut out,
            r#"<svg id="{id}" width="100%" xmlns="http://www.w3.org/2000/svg" viewBox="{x} {y} {w} {h}" style="max-width: {w}px;" role="graphics-document document" aria-roledescription="bubble">"#,
            id = id,
            x = fmt(vb.x),
            y = fmt(vb.y),
            w = fmt(vb.width),
            h = fmt(vb.height),
        );
        if let Some(bg) = self.options.background.as_deref() {
            let _ = write!(
                &mut out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{fill}"/>"#,
                x = fmt(vb.x),
                y = fmt(vb.y),
                w = fmt(vb.width),
                h = fmt(vb.height),
                fill = escape_xml(bg),
            );
        }
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }
}

const DEFAULT_ID: &str = "bubblechart";

/// Turns a chart title into an `id` token. Each run of characters other than ASCII letters,
/// digits and `_` becomes one `-`; ids that would not start with a letter get a `bubblechart-`
/// prefix.
fn root_id(title: Option<&str>) -> String {
    let Some(title) = title else {
        return DEFAULT_ID.to_string();
    };
    let mut id = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' {
            id.push(ch);
        } else if !id.is_empty() && !id.ends_with('-') {
            id.push('-');
        }
    }
    let id = id.trim_end_matches('-');
    match id.chars().next() {
        None => DEFAULT_ID.to_string(),
        Some(c) if c.is_ascii_alphabetic() => id.to_string(),
        Some(_) => format!("{DEFAULT_ID}-{id}"),
    }
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(SvgOptions::default())
    }
}

impl Surface for SvgSurface {
    fn circle(&mut self, mark: &CircleMark<'_>) {
        let half = mark.stroke_width.max(0.0) / 2.0;
        let reach = mark.r + half;
        self.grow(
            mark.cx - reach,
            mark.cy - reach,
            mark.cx + reach,
            mark.cy + reach,
        );
        let _ = write!(
            &mut self.body,
            r#"<circle class="bubble" data-index="{index}" cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" fill-opacity="{opacity}" stroke="{stroke}" stroke-width="{sw}"/>"#,
            index = mark.index,
            cx = fmt(mark.cx),
            cy = fmt(mark.cy),
            r = fmt(mark.r),
            fill = escape_xml(mark.fill),
            opacity = fmt(mark.fill_opacity),
            stroke = escape_xml(mark.stroke),
            sw = fmt(mark.stroke_width),
        );
    }

    fn text(&mut self, mark: &TextMark<'_>) {
        self.grow(mark.x, mark.y, mark.x, mark.y);
        let _ = write!(
            &mut self.body,
            r#"<text class="bubble-label" data-index="{index}" x="{x}" y="{y}" font-size="{size}" fill="{color}" font-weight="{weight}" text-anchor="middle" dominant-baseline="central">{text}</text>"#,
            index = mark.index,
            x = fmt(mark.x),
            y = fmt(mark.y),
            size = fmt(mark.font_size),
            color = escape_xml(mark.color),
            weight = escape_xml(mark.weight),
            text = escape_xml(mark.text),
        );
    }
}
