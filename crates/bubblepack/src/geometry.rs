//! Stateless collision queries between a candidate circle and a set of reference bubbles.
//!
//! References are taken as an iterator so the engine can pass "everyone but me" without copying
//! the set. Indices returned here are positions within that iterator, not set indices.

use crate::set::Bubble;
use nalgebra::Point2;

/// A circle that may or may not be part of the set, typically a bubble at a trial position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub position: Point2<f64>,
    pub radius: f64,
}

impl Candidate {
    pub fn new(position: Point2<f64>, radius: f64) -> Self {
        Self { position, radius }
    }
}

impl From<&Bubble> for Candidate {
    fn from(b: &Bubble) -> Self {
        Self {
            position: b.position(),
            radius: b.radius(),
        }
    }
}

pub(crate) fn outline_distance(candidate: &Candidate, other: &Bubble, spacing: f64) -> f64 {
    nalgebra::distance(&candidate.position, &other.position())
        - candidate.radius
        - other.radius()
        - spacing
}

pub fn center_distances<'a>(
    candidate: &Candidate,
    refs: impl IntoIterator<Item = &'a Bubble>,
) -> Vec<f64> {
    refs.into_iter()
        .map(|b| nalgebra::distance(&candidate.position, &b.position()))
        .collect()
}

/// Gap between outlines after reserving `spacing`; negative means the circles overlap.
pub fn outline_distances<'a>(
    candidate: &Candidate,
    refs: impl IntoIterator<Item = &'a Bubble>,
    spacing: f64,
) -> Vec<f64> {
    refs.into_iter()
        .map(|b| outline_distance(candidate, b, spacing))
        .collect()
}

pub fn collision_count<'a>(
    candidate: &Candidate,
    refs: impl IntoIterator<Item = &'a Bubble>,
    spacing: f64,
) -> usize {
    refs.into_iter()
        .filter(|b| outline_distance(candidate, b, spacing) < 0.0)
        .count()
}

/// Position of the reference with the smallest outline distance (the deepest overlap, or the
/// closest neighbour when nothing overlaps). Ties keep the first occurrence. `None` for an
/// empty reference set.
pub fn nearest_colliding<'a>(
    candidate: &Candidate,
    refs: impl IntoIterator<Item = &'a Bubble>,
    spacing: f64,
) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (k, b) in refs.into_iter().enumerate() {
        let d = outline_distance(candidate, b, spacing);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((k, d)),
        }
    }
    best.map(|(k, _)| k)
}
