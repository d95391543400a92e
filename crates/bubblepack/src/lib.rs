#![forbid(unsafe_code)]

//! Headless bubble packing for bubble charts.
//!
//! Bubbles start on a square grid whose pitch fits the largest circle, then [`collapse`] pulls
//! them toward the area-weighted centroid one at a time, sidestepping around whatever they bump
//! into. The result is a tight, roughly circular cluster with (near) zero overlap. Rendering is
//! left to consumers; see `bubblechart-render`.

pub mod error;
pub mod geometry;
pub mod grid;
pub mod relax;
pub mod set;

pub use error::{Error, Result};
pub use geometry::{
    Candidate, center_distances, collision_count, nearest_colliding, outline_distances,
};
pub use relax::{CollapseOptions, CollapseStats, collapse};
pub use set::{Bounds, Bubble, BubbleSet, Overlap};

/// Builds a grid-seeded bubble set and collapses it with default options.
pub fn pack(areas: &[f64], spacing: f64) -> Result<BubbleSet> {
    let mut set = BubbleSet::new(areas, spacing)?;
    collapse(&mut set, &CollapseOptions::default());
    Ok(set)
}
