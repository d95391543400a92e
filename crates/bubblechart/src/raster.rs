//! PNG output for finished charts.
//!
//! The SVG produced by [`SvgSurface`](crate::SvgSurface) is parsed with `usvg` and painted with
//! `resvg`. Pixel size comes from the surface's [`ViewBox`] times [`RasterOptions::scale`], so the
//! document never has to be re-read for its dimensions. A background, when wanted, is the
//! `<rect>` that [`SvgOptions::background`](crate::SvgOptions) already emits.

use bubblechart_render::ViewBox;

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error(transparent)]
    Chart(#[from] crate::Error),
    #[error("raster scale must be a positive finite number, got {scale}")]
    InvalidScale { scale: f32 },
    #[error("background {color:?} is not a color the rasterizer understands")]
    InvalidBackground { color: String },
    #[error("failed to parse chart SVG: {0}")]
    Svg(#[from] usvg::Error),
    #[error("cannot allocate a {width}x{height} pixmap")]
    PixmapAlloc { width: u32, height: u32 },
    #[error("failed to encode PNG: {0}")]
    PngEncode(String),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RasterOptions {
    /// Pixels per chart unit.
    pub scale: f32,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self { scale: 1.0 }
    }
}

/// Parses a background fill with the same CSS color rules `usvg` applies to the SVG, so a color
/// the rasterizer would drop is reported instead.
pub fn parse_background(color: &str) -> Result<svgtypes::Color> {
    color
        .trim()
        .parse::<svgtypes::Color>()
        .map_err(|_| RasterError::InvalidBackground {
            color: color.to_string(),
        })
}

/// Renders a chart document covering `view_box` to PNG bytes.
pub fn svg_to_png(svg: &str, view_box: ViewBox, options: &RasterOptions) -> Result<Vec<u8>> {
    let pixmap = rasterize(svg, view_box, options)?;
    pixmap
        .encode_png()
        .map_err(|e| RasterError::PngEncode(e.to_string()))
}

fn rasterize(svg: &str, view_box: ViewBox, options: &RasterOptions) -> Result<tiny_skia::Pixmap> {
    let scale = options.scale;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RasterError::InvalidScale { scale });
    }
    let width = (view_box.width as f32 * scale).ceil().max(1.0) as u32;
    let height = (view_box.height as f32 * scale).ceil().max(1.0) as u32;

    let mut usvg_options = usvg::Options::default();
    usvg_options.fontdb_mut().load_system_fonts();
    usvg_options.font_family = "sans-serif".to_string();
    let tree = usvg::Tree::from_str(svg, &usvg_options)?;

    // `width="100%"` leaves the intrinsic size to usvg; map whatever it chose onto the viewBox.
    let size = tree.size();
    let sx = scale * view_box.width as f32 / size.width();
    let sy = scale * view_box.height as f32 / size.height();

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(RasterError::PixmapAlloc { width, height })?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(sx, sy),
        &mut pixmap.as_mut(),
    );
    tracing::debug!(width, height, scale, "rasterized bubble chart");
    Ok(pixmap)
}
