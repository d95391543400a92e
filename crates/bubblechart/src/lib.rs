#![forbid(unsafe_code)]

//! `bubblechart` lays out weighted values as a packed cluster of circles and draws them.
//!
//! Radii come from the areas (`r = sqrt(area / π)`), bubbles start on a grid and are then
//! collapsed toward their area-weighted centroid by `bubblepack`. Drawing lives in
//! `bubblechart-render`; this crate bundles the two behind [`BubbleChart`].
//!
//! # Features
//!
//! - `raster`: enable PNG output via pure-Rust SVG rasterization (`bubblechart::raster`)

pub mod config;
pub mod demo;
#[cfg(feature = "raster")]
pub mod raster;

pub use bubblechart_render::{
    BubbleView, Circle, Colormap, HighlightOptions, PlotOptions, Recorder, Surface, SvgOptions,
    SvgSurface, ViewBox,
};
pub use bubblepack::{Bubble, BubbleSet, CollapseOptions, CollapseStats, Overlap};
pub use config::ChartConfig;

use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Pack(#[from] bubblepack::Error),
    #[error(transparent)]
    Render(#[from] bubblechart_render::Error),
    #[error("invalid chart config: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// One bubble of a finished layout, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlacedBubble {
    pub index: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub area: f64,
}

/// A bubble set plus the options used to collapse and draw it.
#[derive(Debug, Clone)]
pub struct BubbleChart {
    set: BubbleSet,
    config: ChartConfig,
}

impl BubbleChart {
    /// Seeds `areas` on a grid with the given outline spacing and default drawing options.
    pub fn new(areas: &[f64], spacing: f64) -> Result<Self> {
        Self::with_config(
            areas,
            ChartConfig {
                spacing,
                ..ChartConfig::default()
            },
        )
    }

    pub fn with_config(areas: &[f64], config: ChartConfig) -> Result<Self> {
        let set = BubbleSet::new(areas, config.spacing)?;
        Ok(Self { set, config })
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    pub fn bubbles(&self) -> &BubbleSet {
        &self.set
    }

    /// Runs `n_iterations` relaxation passes.
    pub fn collapse(&mut self, n_iterations: usize) {
        self.set.collapse(n_iterations);
    }

    /// Runs the relaxation configured in [`ChartConfig::collapse`].
    pub fn collapse_configured(&mut self) -> CollapseStats {
        self.set.collapse_with(&self.config.collapse)
    }

    pub fn layout(&self) -> Vec<PlacedBubble> {
        self.set
            .bubbles()
            .iter()
            .enumerate()
            .map(|(index, b)| PlacedBubble {
                index,
                x: b.x(),
                y: b.y(),
                radius: b.radius(),
                area: b.area(),
            })
            .collect()
    }

    pub fn layout_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.layout())?)
    }

    pub fn draw<S, L>(
        &self,
        labels: &[L],
        colors: Option<&[String]>,
        surface: &mut S,
    ) -> Result<()>
    where
        S: Surface + ?Sized,
        L: AsRef<str>,
    {
        bubblechart_render::plot(&self.set, labels, colors, &self.config.plot, surface)?;
        Ok(())
    }

    pub fn draw_highlight<S, L>(
        &self,
        indices: &[usize],
        labels: &[L],
        colors: Option<&[String]>,
        surface: &mut S,
    ) -> Result<()>
    where
        S: Surface + ?Sized,
        L: AsRef<str>,
    {
        bubblechart_render::highlight(
            &self.set,
            indices,
            labels,
            colors,
            &self.config.plot,
            &self.config.highlight,
            surface,
        )?;
        Ok(())
    }

    pub fn render_svg<L: AsRef<str>>(
        &self,
        labels: &[L],
        colors: Option<&[String]>,
    ) -> Result<String> {
        let mut surface = self.svg_surface();
        self.draw(labels, colors, &mut surface)?;
        Ok(surface.finish())
    }

    pub fn render_highlight_svg<L: AsRef<str>>(
        &self,
        indices: &[usize],
        labels: &[L],
        colors: Option<&[String]>,
    ) -> Result<String> {
        let mut surface = self.svg_surface();
        self.draw_highlight(indices, labels, colors, &mut surface)?;
        Ok(surface.finish())
    }

    #[cfg(feature = "raster")]
    pub fn render_png<L: AsRef<str>>(
        &self,
        labels: &[L],
        colors: Option<&[String]>,
        options: &raster::RasterOptions,
    ) -> raster::Result<Vec<u8>> {
        self.check_background()?;
        let mut surface = self.svg_surface();
        self.draw(labels, colors, &mut surface)?;
        let view_box = surface.view_box();
        raster::svg_to_png(&surface.finish(), view_box, options)
    }

    #[cfg(feature = "raster")]
    pub fn render_highlight_png<L: AsRef<str>>(
        &self,
        indices: &[usize],
        labels: &[L],
        colors: Option<&[String]>,
        options: &raster::RasterOptions,
    ) -> raster::Result<Vec<u8>> {
        self.check_background()?;
        let mut surface = self.svg_surface();
        self.draw_highlight(indices, labels, colors, &mut surface)?;
        let view_box = surface.view_box();
        raster::svg_to_png(&surface.finish(), view_box, options)
    }

    #[cfg(feature = "raster")]
    fn check_background(&self) -> raster::Result<()> {
        match self.config.svg.background.as_deref() {
            Some(color) => raster::parse_background(color).map(|_| ()),
            None => Ok(()),
        }
    }

    fn svg_surface(&self) -> SvgSurface {
        SvgSurface::new(self.config.svg.clone())
    }
}
