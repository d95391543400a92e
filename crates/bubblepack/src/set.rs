use crate::error::Result;
use crate::geometry;
use crate::relax::{self, CollapseOptions, CollapseStats};
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

/// One circle of the chart. Radius and area are fixed once the set is built; only the engine
/// moves the center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bubble {
    pub(crate) position: Point2<f64>,
    radius: f64,
    area: f64,
}

impl Bubble {
    pub(crate) fn new(position: Point2<f64>, area: f64) -> Self {
        Self {
            position,
            radius: (area / std::f64::consts::PI).sqrt(),
            area,
        }
    }

    pub fn position(&self) -> Point2<f64> {
        self.position
    }

    pub fn x(&self) -> f64 {
        self.position.x
    }

    pub fn y(&self) -> f64 {
        self.position.y
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// The input area, which doubles as the centroid weight.
    pub fn area(&self) -> f64 {
        self.area
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// A pair of bubbles whose outlines (plus spacing) intersect.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Overlap {
    pub a: usize,
    pub b: usize,
    /// How far the outlines interpenetrate; always positive.
    pub depth: f64,
}

/// The aggregate the relaxation engine mutates: the bubbles in input order, the running
/// centroid, and the current step distance.
///
/// Indices are stable for the lifetime of the set, so callers can keep labels and colors in
/// parallel slices.
#[derive(Debug, Clone, PartialEq)]
pub struct BubbleSet {
    pub(crate) bubbles: Vec<Bubble>,
    pub(crate) spacing: f64,
    pub(crate) center_of_mass: Point2<f64>,
    pub(crate) step_distance: f64,
}

impl BubbleSet {
    /// Derives radii from `areas` and seeds them on a square grid.
    pub fn new(areas: &[f64], spacing: f64) -> Result<Self> {
        crate::grid::seed(areas, spacing)
    }

    /// Uses the given starting centers instead of the grid.
    pub fn with_positions(
        areas: &[f64],
        positions: &[Point2<f64>],
        spacing: f64,
    ) -> Result<Self> {
        crate::grid::seed_at(areas, positions, spacing)
    }

    pub(crate) fn from_parts(bubbles: Vec<Bubble>, spacing: f64, step_distance: f64) -> Self {
        let center_of_mass = weighted_centroid(&bubbles);
        Self {
            bubbles,
            spacing,
            center_of_mass,
            step_distance,
        }
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }

    pub fn get(&self, index: usize) -> Option<&Bubble> {
        self.bubbles.get(index)
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn center_of_mass(&self) -> Point2<f64> {
        self.center_of_mass
    }

    pub fn step_distance(&self) -> f64 {
        self.step_distance
    }

    /// Runs `n_iterations` relaxation passes with the default stall ratio.
    pub fn collapse(&mut self, n_iterations: usize) {
        let options = CollapseOptions {
            iterations: n_iterations,
            ..CollapseOptions::default()
        };
        relax::collapse(self, &options);
    }

    pub fn collapse_with(&mut self, options: &CollapseOptions) -> CollapseStats {
        relax::collapse(self, options)
    }

    /// Every bubble except `index`, in index order.
    pub fn others(&self, index: usize) -> impl Iterator<Item = &Bubble> + Clone {
        self.bubbles
            .iter()
            .enumerate()
            .filter(move |(j, _)| *j != index)
            .map(|(_, b)| b)
    }

    pub fn overlapping_pairs(&self) -> Vec<Overlap> {
        let mut out = Vec::new();
        for (a, ba) in self.bubbles.iter().enumerate() {
            let candidate = geometry::Candidate::from(ba);
            for (b, bb) in self.bubbles.iter().enumerate().skip(a + 1) {
                let d = geometry::outline_distance(&candidate, bb, self.spacing);
                if d < 0.0 {
                    out.push(Overlap { a, b, depth: -d });
                }
            }
        }
        out
    }

    /// Depth of the worst overlap, or `0.0` when the layout is clean.
    pub fn max_overlap(&self) -> f64 {
        self.overlapping_pairs()
            .iter()
            .map(|o| o.depth)
            .fold(0.0, f64::max)
    }

    /// Axis-aligned box enclosing every circle.
    pub fn bounds(&self) -> Bounds {
        let mut it = self.bubbles.iter();
        let Some(first) = it.next() else {
            return Bounds {
                min_x: 0.0,
                min_y: 0.0,
                max_x: 0.0,
                max_y: 0.0,
            };
        };
        let mut b = Bounds {
            min_x: first.x() - first.radius,
            min_y: first.y() - first.radius,
            max_x: first.x() + first.radius,
            max_y: first.y() + first.radius,
        };
        for bubble in it {
            b.min_x = b.min_x.min(bubble.x() - bubble.radius);
            b.min_y = b.min_y.min(bubble.y() - bubble.radius);
            b.max_x = b.max_x.max(bubble.x() + bubble.radius);
            b.max_y = b.max_y.max(bubble.y() + bubble.radius);
        }
        b
    }

    /// Moves one bubble and refreshes the centroid before anything else can observe the set.
    pub(crate) fn move_bubble(&mut self, index: usize, position: Point2<f64>) {
        self.bubbles[index].position = position;
        self.center_of_mass = weighted_centroid(&self.bubbles);
    }

    pub(crate) fn halve_step(&mut self) {
        self.step_distance /= 2.0;
    }
}

/// Area-weighted mean of the bubble centers. Callers guarantee a non-empty slice with positive
/// areas and a finite total.
pub(crate) fn weighted_centroid(bubbles: &[Bubble]) -> Point2<f64> {
    let total: f64 = bubbles.iter().map(|b| b.area).sum();
    // Weights are normalized first so huge areas cannot overflow the weighted sum.
    let acc = bubbles
        .iter()
        .fold(Vector2::zeros(), |acc, b| acc + b.position.coords * (b.area / total));
    Point2::from(acc)
}
