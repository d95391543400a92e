use serde::{Deserialize, Serialize};

/// Read-only access to finished bubble geometry, indexed like the caller's labels and colors.
pub trait BubbleView {
    fn len(&self) -> usize;

    fn center(&self, index: usize) -> (f64, f64);

    fn radius(&self, index: usize) -> f64;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Smallest and largest radius, or `None` for an empty view.
    fn radius_range(&self) -> Option<(f64, f64)> {
        (0..self.len()).map(|i| self.radius(i)).fold(None, |acc, r| {
            Some(match acc {
                None => (r, r),
                Some((lo, hi)) => (lo.min(r), hi.max(r)),
            })
        })
    }
}

/// A plain circle, for callers that already have geometry from elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub r: f64,
}

impl BubbleView for [Circle] {
    fn len(&self) -> usize {
        <[Circle]>::len(self)
    }

    fn center(&self, index: usize) -> (f64, f64) {
        (self[index].x, self[index].y)
    }

    fn radius(&self, index: usize) -> f64 {
        self[index].r
    }
}

impl BubbleView for bubblepack::BubbleSet {
    fn len(&self) -> usize {
        bubblepack::BubbleSet::len(self)
    }

    fn center(&self, index: usize) -> (f64, f64) {
        let b = &self.bubbles()[index];
        (b.x(), b.y())
    }

    fn radius(&self, index: usize) -> f64 {
        self.bubbles()[index].radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_range_spans_all_circles() {
        let circles = [
            Circle {
                x: 0.0,
                y: 0.0,
                r: 2.0,
            },
            Circle {
                x: 5.0,
                y: 0.0,
                r: 0.5,
            },
            Circle {
                x: 9.0,
                y: 1.0,
                r: 3.0,
            },
        ];
        assert_eq!(circles[..].radius_range(), Some((0.5, 3.0)));
        assert_eq!(circles[..].center(2), (9.0, 1.0));
        let empty: [Circle; 0] = [];
        assert_eq!(empty[..].radius_range(), None);
    }

    #[test]
    fn bubble_set_is_a_view() {
        let set = bubblepack::BubbleSet::new(&[std::f64::consts::PI, 4.0], 0.0).unwrap();
        assert_eq!(BubbleView::len(&set), 2);
        assert_eq!(BubbleView::radius(&set, 0), 1.0);
        assert_eq!(BubbleView::center(&set, 0), (0.0, 0.0));
    }
}
