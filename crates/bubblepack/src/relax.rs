//! The collapse procedure: repeated sequential passes that pull each bubble toward the running
//! centroid, sidestepping around the bubble it would hit.
//!
//! Passes are strictly sequential and index-ordered. Every accepted move refreshes the centroid
//! before the next bubble is considered, so later bubbles in the same pass aim at the updated
//! target. Do not parallelize the inner loop; the result would change.

use crate::geometry::{Candidate, collision_count, nearest_colliding};
use crate::set::BubbleSet;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CollapseOptions {
    /// Number of full passes over the set. There is no early exit.
    pub iterations: usize,
    /// The step distance is halved after a pass whose share of direct moves falls below this.
    pub stall_ratio: f64,
}

impl Default for CollapseOptions {
    fn default() -> Self {
        Self {
            iterations: 50,
            stall_ratio: 0.1,
        }
    }
}

/// Per-pass bookkeeping from one [`collapse`] run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollapseStats {
    /// Bubbles that moved straight toward the centroid, per pass.
    pub direct_moves: Vec<usize>,
    /// Bubbles that sidestepped around a collision, per pass.
    pub sidesteps: Vec<usize>,
    /// Step distance in effect after each pass (after cooling).
    pub step_distances: Vec<f64>,
}

impl CollapseStats {
    pub fn passes(&self) -> usize {
        self.step_distances.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Direct,
    Sidestep,
    Blocked,
    /// A zero-length direction vector; the bubble sits out this pass.
    Degenerate,
}

/// Runs `options.iterations` relaxation passes over `set`, mutating it in place.
///
/// Non-convergence is not an error: whatever state the last pass leaves is the result.
pub fn collapse(set: &mut BubbleSet, options: &CollapseOptions) -> CollapseStats {
    let n = set.len();
    let mut stats = CollapseStats::default();
    if n == 0 {
        return stats;
    }

    for iteration in 0..options.iterations {
        let mut direct = 0usize;
        let mut sidesteps = 0usize;
        for i in 0..n {
            match relax_one(set, i) {
                Outcome::Direct => direct += 1,
                Outcome::Sidestep => sidesteps += 1,
                Outcome::Blocked | Outcome::Degenerate => {}
            }
        }

        // Only direct moves count as progress; sidesteps alone can circle forever.
        let cooled = (direct as f64) / (n as f64) < options.stall_ratio;
        if cooled {
            set.halve_step();
        }

        tracing::debug!(
            iteration,
            direct,
            sidesteps,
            cooled,
            step_distance = set.step_distance,
            "relaxation pass"
        );

        stats.direct_moves.push(direct);
        stats.sidesteps.push(sidesteps);
        stats.step_distances.push(set.step_distance);
    }

    stats
}

fn relax_one(set: &mut BubbleSet, i: usize) -> Outcome {
    let bubble = set.bubbles[i];
    let step = set.step_distance;
    let spacing = set.spacing;

    let Some(direction) = unit(set.center_of_mass - bubble.position) else {
        tracing::trace!(index = i, "bubble sits on the centroid, skipping");
        return Outcome::Degenerate;
    };
    let candidate = Candidate::new(bubble.position + direction * step, bubble.radius());
    if collision_count(&candidate, set.others(i), spacing) == 0 {
        set.move_bubble(i, candidate.position);
        return Outcome::Direct;
    }

    let Some(k) = nearest_colliding(&candidate, set.others(i), spacing) else {
        return Outcome::Blocked;
    };
    // `others` skips `i`, so positions at or past it shift by one.
    let c = if k < i { k } else { k + 1 };
    let Some(toward) = unit(set.bubbles[c].position - bubble.position) else {
        tracing::trace!(index = i, colliding = c, "bubble shares a center, skipping");
        return Outcome::Degenerate;
    };

    let orth = Vector2::new(toward.y, -toward.x);
    let plus = bubble.position + orth * step;
    let minus = bubble.position - orth * step;
    let target = closer_to(set.center_of_mass, plus, minus);

    let candidate = Candidate::new(target, bubble.radius());
    if collision_count(&candidate, set.others(i), spacing) == 0 {
        set.move_bubble(i, target);
        Outcome::Sidestep
    } else {
        Outcome::Blocked
    }
}

fn unit(v: Vector2<f64>) -> Option<Vector2<f64>> {
    v.try_normalize(0.0)
}

/// Picks whichever point lies closer to `target`; `first` wins ties.
fn closer_to(target: Point2<f64>, first: Point2<f64>, second: Point2<f64>) -> Point2<f64> {
    if nalgebra::distance(&target, &first) <= nalgebra::distance(&target, &second) {
        first
    } else {
        second
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIT: f64 = std::f64::consts::PI;

    #[test]
    fn unit_rejects_zero_vectors() {
        assert_eq!(unit(Vector2::zeros()), None);
        let u = unit(Vector2::new(3.0, 4.0)).unwrap();
        assert!((u.x - 0.6).abs() < 1e-12 && (u.y - 0.8).abs() < 1e-12);
    }

    #[test]
    fn closer_to_prefers_first_on_ties() {
        let target = Point2::new(0.0, 0.0);
        let a = Point2::new(1.0, 0.0);
        let b = Point2::new(-1.0, 0.0);
        assert_eq!(closer_to(target, a, b), a);
        assert_eq!(closer_to(target, Point2::new(2.0, 0.0), b), b);
    }

    #[test]
    fn free_bubble_moves_one_step_toward_the_centroid() {
        let mut set = BubbleSet::new(&[UNIT, UNIT], 0.0).unwrap();
        set.move_bubble(1, Point2::new(10.0, 0.0));
        assert_eq!(relax_one(&mut set, 0), Outcome::Direct);
        // Step starts at half the pitch, i.e. the unit radius.
        assert_eq!(set.bubbles()[0].position(), Point2::new(1.0, 0.0));
        let com = set.center_of_mass();
        assert!((com.x - 5.5).abs() < 1e-12 && com.y == 0.0);
    }

    #[test]
    fn blocked_bubble_sidesteps_toward_the_plus_orthogonal() {
        let mut set = BubbleSet::new(&[UNIT, UNIT], 0.0).unwrap();
        set.move_bubble(0, Point2::new(4.0, 0.0));
        set.move_bubble(1, Point2::new(6.0, 0.0));
        // Direct move would land at (5, 0) inside bubble 1; both sidesteps are equidistant from
        // the centroid at (5, 0), so (+orth) = (4, -1) wins.
        assert_eq!(relax_one(&mut set, 0), Outcome::Sidestep);
        assert_eq!(set.bubbles()[0].position(), Point2::new(4.0, -1.0));
        let com = set.center_of_mass();
        assert!((com.x - 5.0).abs() < 1e-12 && (com.y + 0.5).abs() < 1e-12);
    }

    #[test]
    fn lone_bubble_never_moves_and_stays_finite() {
        let mut set = BubbleSet::new(&[4.0], 0.0).unwrap();
        let stats = collapse(&mut set, &CollapseOptions::default());
        let p = set.bubbles()[0].position();
        assert_eq!(p, Point2::new(0.0, 0.0));
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!(stats.direct_moves.iter().all(|&m| m == 0));
    }

    #[test]
    fn stalled_passes_halve_the_step() {
        let mut set = BubbleSet::new(&[4.0], 0.0).unwrap();
        let start = set.step_distance();
        let stats = collapse(
            &mut set,
            &CollapseOptions {
                iterations: 3,
                ..CollapseOptions::default()
            },
        );
        assert_eq!(stats.step_distances, vec![start / 2.0, start / 4.0, start / 8.0]);
    }

    #[test]
    fn zero_iterations_leave_the_set_untouched() {
        let mut set = BubbleSet::new(&[1.0, 2.0, 3.0], 0.0).unwrap();
        let before = set.clone();
        let stats = collapse(
            &mut set,
            &CollapseOptions {
                iterations: 0,
                ..CollapseOptions::default()
            },
        );
        assert_eq!(set, before);
        assert_eq!(stats.passes(), 0);
    }

    #[test]
    fn options_deserialize_from_partial_json() {
        let opts: CollapseOptions = serde_json::from_str(r#"{"iterations": 7}"#).unwrap();
        assert_eq!(opts.iterations, 7);
        assert_eq!(opts.stall_ratio, 0.1);
    }
}
