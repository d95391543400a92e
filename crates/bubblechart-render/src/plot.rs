//! Chart drawing: colors, label sizing and the highlight variant.

use crate::color::{Colormap, Normalize};
use crate::font::{FontScale, label_visible};
use crate::surface::{CircleMark, Surface, TextMark};
use crate::view::BubbleView;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlotOptions {
    pub min_font: f64,
    pub max_font: f64,
    /// Labels whose interpolated size falls below this are not drawn.
    pub label_font_threshold: f64,
    /// Colormap used when no explicit colors are given.
    pub colormap: String,
    pub fill_alpha: f64,
    pub stroke: String,
    pub stroke_width: f64,
    pub label_color: String,
    pub label_weight: String,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            min_font: 8.0,
            max_font: 28.0,
            label_font_threshold: 10.0,
            colormap: "viridis".to_string(),
            fill_alpha: 0.7,
            stroke: "black".to_string(),
            stroke_width: 2.0,
            label_color: "white".to_string(),
            label_weight: "bold".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightOptions {
    pub color: String,
    /// Opacity of highlighted bubbles.
    pub alpha: f64,
    /// Opacity of everything else.
    pub low_alpha: f64,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            color: "firebrick".to_string(),
            alpha: 0.9,
            low_alpha: 0.2,
        }
    }
}

/// Draws every bubble with its color and, when large enough, its label.
///
/// `colors`, when given, must hold one CSS color per bubble; otherwise each bubble's radius is
/// normalized into the set's radius range and mapped through `options.colormap`.
pub fn plot<V, S, L>(
    view: &V,
    labels: &[L],
    colors: Option<&[String]>,
    options: &PlotOptions,
    surface: &mut S,
) -> Result<()>
where
    V: BubbleView + ?Sized,
    S: Surface + ?Sized,
    L: AsRef<str>,
{
    let prepared = Prepared::new(view, labels, colors, options)?;
    let mut drawn = 0usize;
    for i in 0..view.len() {
        let (x, y) = view.center(i);
        let r = view.radius(i);
        surface.circle(&CircleMark {
            index: i,
            cx: x,
            cy: y,
            r,
            fill: &prepared.fills[i],
            fill_opacity: options.fill_alpha,
            stroke: &options.stroke,
            stroke_width: options.stroke_width,
        });

        let font_size = prepared.fonts.size_for(r);
        if label_visible(font_size, options.label_font_threshold) {
            surface.text(&TextMark {
                index: i,
                x,
                y,
                text: labels[i].as_ref(),
                font_size,
                color: &options.label_color,
                weight: &options.label_weight,
            });
            drawn += 1;
        }
    }
    tracing::debug!(bubbles = view.len(), labels = drawn, "plotted bubble chart");
    Ok(())
}

/// Draws the chart with `indices` emphasized: those bubbles are painted in the highlight color
/// and always labelled, the rest keep their normal color at `low_alpha` with no label.
pub fn highlight<V, S, L>(
    view: &V,
    indices: &[usize],
    labels: &[L],
    colors: Option<&[String]>,
    options: &PlotOptions,
    style: &HighlightOptions,
    surface: &mut S,
) -> Result<()>
where
    V: BubbleView + ?Sized,
    S: Surface + ?Sized,
    L: AsRef<str>,
{
    let n = view.len();
    let mut emphasized = vec![false; n];
    for &index in indices {
        if index >= n {
            return Err(Error::HighlightOutOfRange { index, len: n });
        }
        emphasized[index] = true;
    }
    let prepared = Prepared::new(view, labels, colors, options)?;

    for i in 0..n {
        let (x, y) = view.center(i);
        let r = view.radius(i);
        let (fill, fill_opacity) = if emphasized[i] {
            (style.color.as_str(), style.alpha)
        } else {
            (prepared.fills[i].as_str(), style.low_alpha)
        };
        surface.circle(&CircleMark {
            index: i,
            cx: x,
            cy: y,
            r,
            fill,
            fill_opacity,
            stroke: &options.stroke,
            stroke_width: options.stroke_width,
        });

        if emphasized[i] {
            surface.text(&TextMark {
                index: i,
                x,
                y,
                text: labels[i].as_ref(),
                font_size: prepared.fonts.size_for(r),
                color: &options.label_color,
                weight: &options.label_weight,
            });
        }
    }
    tracing::debug!(
        bubbles = n,
        highlighted = emphasized.iter().filter(|e| **e).count(),
        "plotted highlighted bubble chart"
    );
    Ok(())
}

/// Validated per-bubble inputs shared by both drawing modes.
struct Prepared {
    fills: Vec<String>,
    fonts: FontScale,
}

impl Prepared {
    fn new<V, L>(
        view: &V,
        labels: &[L],
        colors: Option<&[String]>,
        options: &PlotOptions,
    ) -> Result<Self>
    where
        V: BubbleView + ?Sized,
        L: AsRef<str>,
    {
        let n = view.len();
        if labels.len() != n {
            return Err(Error::LengthMismatch {
                what: "labels",
                expected: n,
                actual: labels.len(),
            });
        }
        if !options.min_font.is_finite()
            || !options.max_font.is_finite()
            || options.min_font > options.max_font
        {
            return Err(Error::InvalidFontRange {
                min: options.min_font,
                max: options.max_font,
            });
        }

        let (r_min, r_max) = view.radius_range().unwrap_or((0.0, 0.0));
        let fills = match colors {
            Some(colors) => {
                if colors.len() != n {
                    return Err(Error::LengthMismatch {
                        what: "colors",
                        expected: n,
                        actual: colors.len(),
                    });
                }
                colors.to_vec()
            }
            None => {
                let cmap = Colormap::from_name(&options.colormap)?;
                let norm = Normalize::new(r_min, r_max);
                (0..n)
                    .map(|i| cmap.sample(norm.apply(view.radius(i))).to_hex())
                    .collect()
            }
        };

        Ok(Self {
            fills,
            fonts: FontScale::new(options.min_font, options.max_font, r_min, r_max),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{Mark, Recorder};
    use crate::view::Circle;

    fn circles(radii: &[f64]) -> Vec<Circle> {
        radii
            .iter()
            .enumerate()
            .map(|(i, &r)| Circle {
                x: i as f64 * 100.0,
                y: 0.0,
                r,
            })
            .collect()
    }

    #[test]
    fn colormap_spans_smallest_to_largest() {
        let view = circles(&[1.0, 3.0]);
        let mut rec = Recorder::new();
        plot(&view[..], &["a", "b"], None, &PlotOptions::default(), &mut rec).unwrap();
        let fills: Vec<&str> = rec
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Circle { fill, .. } => Some(fill.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(fills, vec!["#440154", "#fde725"]);
    }

    #[test]
    fn explicit_colors_pass_through() {
        let view = circles(&[1.0, 3.0]);
        let colors = vec!["#5A69AF".to_string(), "tomato".to_string()];
        let mut rec = Recorder::new();
        plot(
            &view[..],
            &["a", "b"],
            Some(colors.as_slice()),
            &PlotOptions::default(),
            &mut rec,
        )
        .unwrap();
        assert!(matches!(
            &rec.marks[0],
            Mark::Circle { fill, fill_opacity, .. } if fill == "#5A69AF" && *fill_opacity == 0.7
        ));
    }

    #[test]
    fn small_labels_are_dropped_at_the_threshold() {
        // Fonts 0..100 over radii 0..100 make the font size equal to the radius.
        let view = circles(&[0.0, 9.9, 10.0, 100.0]);
        let options = PlotOptions {
            min_font: 0.0,
            max_font: 100.0,
            label_font_threshold: 10.0,
            ..PlotOptions::default()
        };
        let mut rec = Recorder::new();
        plot(&view[..], &["a", "b", "c", "d"], None, &options, &mut rec).unwrap();
        let labelled: Vec<usize> = rec
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Text { index, .. } => Some(*index),
                _ => None,
            })
            .collect();
        assert_eq!(labelled, vec![2, 3]);
    }

    #[test]
    fn length_mismatches_are_rejected() {
        let view = circles(&[1.0, 2.0]);
        let mut rec = Recorder::new();
        let err = plot(&view[..], &["a"], None, &PlotOptions::default(), &mut rec).unwrap_err();
        assert_eq!(
            err,
            Error::LengthMismatch {
                what: "labels",
                expected: 2,
                actual: 1
            }
        );
        let colors = vec!["red".to_string()];
        let err = plot(
            &view[..],
            &["a", "b"],
            Some(colors.as_slice()),
            &PlotOptions::default(),
            &mut rec,
        )
        .unwrap_err();
        assert!(matches!(err, Error::LengthMismatch { what: "colors", .. }));
        assert!(rec.marks.is_empty());
    }

    #[test]
    fn unknown_colormap_is_an_error() {
        let view = circles(&[1.0]);
        let options = PlotOptions {
            colormap: "rainbow".to_string(),
            ..PlotOptions::default()
        };
        let err = plot(&view[..], &["a"], None, &options, &mut Recorder::new()).unwrap_err();
        assert!(matches!(err, Error::UnknownColormap { .. }));
    }

    #[test]
    fn highlight_dims_everything_else() {
        let view = circles(&[1.0, 2.0, 3.0]);
        let mut rec = Recorder::new();
        highlight(
            &view[..],
            &[1],
            &["a", "b", "c"],
            None,
            &PlotOptions::default(),
            &HighlightOptions::default(),
            &mut rec,
        )
        .unwrap();

        let circles: Vec<(String, f64)> = rec
            .marks
            .iter()
            .filter_map(|m| match m {
                Mark::Circle {
                    fill, fill_opacity, ..
                } => Some((fill.clone(), *fill_opacity)),
                _ => None,
            })
            .collect();
        assert_eq!(circles[1], ("firebrick".to_string(), 0.9));
        assert_eq!(circles[0].1, 0.2);
        assert_eq!(circles[2].1, 0.2);
        assert_eq!(circles[0].0, "#440154");

        let texts: Vec<&Mark> = rec.texts().collect();
        assert_eq!(texts.len(), 1);
        assert!(matches!(texts[0], Mark::Text { index: 1, text, .. } if text == "b"));
    }

    #[test]
    fn highlight_labels_ignore_the_threshold() {
        let view = circles(&[1.0, 50.0]);
        let mut rec = Recorder::new();
        highlight(
            &view[..],
            &[0],
            &["tiny", "big"],
            None,
            &PlotOptions::default(),
            &HighlightOptions::default(),
            &mut rec,
        )
        .unwrap();
        assert!(matches!(
            rec.texts().next(),
            Some(Mark::Text { index: 0, font_size, .. }) if *font_size == 8.0
        ));
    }

    #[test]
    fn highlight_rejects_out_of_range_indices() {
        let view = circles(&[1.0, 2.0]);
        let err = highlight(
            &view[..],
            &[0, 2],
            &["a", "b"],
            None,
            &PlotOptions::default(),
            &HighlightOptions::default(),
            &mut Recorder::new(),
        )
        .unwrap_err();
        assert_eq!(err, Error::HighlightOutOfRange { index: 2, len: 2 });
    }

    #[test]
    fn options_fill_defaults_from_partial_json() {
        let opts: PlotOptions =
            serde_json::from_str(r#"{"labelFontThreshold": 12, "colormap": "magma"}"#).unwrap();
        assert_eq!(opts.label_font_threshold, 12.0);
        assert_eq!(opts.colormap, "magma");
        assert_eq!(opts.max_font, 28.0);
    }
}
