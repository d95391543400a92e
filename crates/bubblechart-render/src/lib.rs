#![forbid(unsafe_code)]

//! Drawing for packed bubble charts.
//!
//! Everything here reads a [`BubbleView`] (center and radius by index) and never touches the
//! packing engine's state. Colors come from an explicit per-index list or a named colormap,
//! label font sizes are interpolated from the radius, and marks go to any [`Surface`]; the
//! bundled [`SvgSurface`] writes a standalone SVG document.

pub mod color;
pub mod font;
pub mod plot;
pub mod surface;
pub mod view;

mod util;

pub use color::{Colormap, Normalize, Rgb};
pub use font::FontScale;
pub use plot::{HighlightOptions, PlotOptions, highlight, plot};
pub use surface::{
    CircleMark, Mark, Recorder, Surface, SvgOptions, SvgSurface, TextMark, ViewBox,
};
pub use view::{BubbleView, Circle};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("expected {expected} {what}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("highlight index {index} is out of range for {len} bubbles")]
    HighlightOutOfRange { index: usize, len: usize },
    #[error("unknown colormap: {name}")]
    UnknownColormap { name: String },
    #[error("invalid font size range: {min}..{max}")]
    InvalidFontRange { min: f64, max: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;
