use crate::error::{Error, Result};
use crate::set::{Bubble, BubbleSet};
use nalgebra::Point2;

/// Validates `areas`/`spacing` and lays the bubbles out row-major on a square grid.
///
/// The grid pitch is the largest diameter plus `spacing`, so the seeded layout never overlaps.
/// The initial step distance is half a pitch.
pub fn seed(areas: &[f64], spacing: f64) -> Result<BubbleSet> {
    let pitch = validate(areas, spacing)?;
    let columns = columns_for(areas.len());

    let bubbles: Vec<Bubble> = areas
        .iter()
        .enumerate()
        .map(|(k, &area)| Bubble::new(cell_center(k, columns, pitch), area))
        .collect();

    tracing::debug!(
        bubbles = bubbles.len(),
        columns,
        pitch,
        step_distance = pitch / 2.0,
        "seeded bubble grid"
    );

    Ok(BubbleSet::from_parts(bubbles, spacing, pitch / 2.0))
}

/// Like [`seed`], but with caller-chosen starting centers. The step distance still starts at
/// half the grid pitch so the collapse schedule matches a grid-seeded run.
pub fn seed_at(areas: &[f64], positions: &[Point2<f64>], spacing: f64) -> Result<BubbleSet> {
    let pitch = validate(areas, spacing)?;
    if positions.len() != areas.len() {
        return Err(Error::PositionCountMismatch {
            expected: areas.len(),
            actual: positions.len(),
        });
    }
    if let Some(index) = positions
        .iter()
        .position(|p| !p.x.is_finite() || !p.y.is_finite())
    {
        return Err(Error::InvalidPosition { index });
    }

    let bubbles: Vec<Bubble> = areas
        .iter()
        .zip(positions)
        .map(|(&area, &p)| Bubble::new(p, area))
        .collect();
    Ok(BubbleSet::from_parts(bubbles, spacing, pitch / 2.0))
}

/// Checks the inputs and returns the grid pitch (largest diameter plus spacing).
fn validate(areas: &[f64], spacing: f64) -> Result<f64> {
    if areas.is_empty() {
        return Err(Error::Empty);
    }
    if !spacing.is_finite() || spacing < 0.0 {
        return Err(Error::InvalidSpacing { spacing });
    }
    if let Some((index, &area)) = areas
        .iter()
        .enumerate()
        .find(|(_, a)| !a.is_finite() || **a <= 0.0)
    {
        return Err(Error::InvalidArea { index, area });
    }
    // The centroid divides by the total area, so it has to stay representable too.
    let mut total = 0.0;
    for (index, &area) in areas.iter().enumerate() {
        total += area;
        if !total.is_finite() {
            return Err(Error::InvalidArea { index, area });
        }
    }

    let max_radius = areas
        .iter()
        .map(|a| (a / std::f64::consts::PI).sqrt())
        .fold(0.0, f64::max);
    Ok(2.0 * max_radius + spacing)
}

/// `ceil(sqrt(n))`, computed exactly for perfect squares.
fn columns_for(n: usize) -> usize {
    let mut c = (n as f64).sqrt().floor() as usize;
    while c * c < n {
        c += 1;
    }
    c.max(1)
}

fn cell_center(k: usize, columns: usize, pitch: f64) -> Point2<f64> {
    let col = k % columns;
    let row = k / columns;
    Point2::new(col as f64 * pitch, row as f64 * pitch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_round_up_to_the_next_square() {
        assert_eq!(columns_for(1), 1);
        assert_eq!(columns_for(4), 2);
        assert_eq!(columns_for(5), 3);
        assert_eq!(columns_for(9), 3);
        assert_eq!(columns_for(10), 4);
    }

    #[test]
    fn cells_fill_row_major() {
        let p = cell_center(4, 3, 2.0);
        assert_eq!((p.x, p.y), (2.0, 2.0));
        let p = cell_center(2, 3, 2.0);
        assert_eq!((p.x, p.y), (4.0, 0.0));
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(seed(&[], 0.0).unwrap_err(), Error::Empty);
    }

    #[test]
    fn rejects_non_positive_areas() {
        assert_eq!(
            seed(&[1.0, 0.0], 0.0).unwrap_err(),
            Error::InvalidArea {
                index: 1,
                area: 0.0
            }
        );
        assert!(matches!(
            seed(&[-2.0], 0.0),
            Err(Error::InvalidArea { index: 0, .. })
        ));
        assert!(matches!(
            seed(&[1.0, f64::NAN], 0.0),
            Err(Error::InvalidArea { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_areas_whose_total_overflows() {
        assert_eq!(
            seed(&[1.0, 1e308, 1e308], 0.0).unwrap_err(),
            Error::InvalidArea {
                index: 2,
                area: 1e308
            }
        );
        assert!(seed(&[1e308, 1.0], 0.0).is_ok());
    }

    #[test]
    fn rejects_negative_spacing() {
        assert!(matches!(
            seed(&[1.0], -0.5),
            Err(Error::InvalidSpacing { .. })
        ));
    }

    #[test]
    fn pitch_accounts_for_spacing() {
        let set = seed(&[std::f64::consts::PI, 1.0], 0.5).unwrap();
        // Largest radius is 1, so the pitch is 2.5 and the first step half of it.
        assert_eq!(set.step_distance(), 1.25);
        assert_eq!(set.bubbles()[1].x(), 2.5);
        assert_eq!(set.bubbles()[1].y(), 0.0);
    }

    #[test]
    fn seed_at_keeps_caller_positions() {
        let positions = [Point2::new(-5.0, 1.0), Point2::new(7.0, 3.0)];
        let set = seed_at(&[1.0, 4.0], &positions, 0.0).unwrap();
        assert_eq!(set.bubbles()[0].position(), positions[0]);
        assert_eq!(set.bubbles()[1].position(), positions[1]);
    }

    #[test]
    fn seed_at_rejects_mismatched_positions() {
        assert_eq!(
            seed_at(&[1.0, 4.0], &[Point2::origin()], 0.0).unwrap_err(),
            Error::PositionCountMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert_eq!(
            seed_at(&[1.0], &[Point2::new(f64::INFINITY, 0.0)], 0.0).unwrap_err(),
            Error::InvalidPosition { index: 0 }
        );
    }
}
