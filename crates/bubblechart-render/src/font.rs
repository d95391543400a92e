use crate::color::Normalize;

/// Linear label sizing: the smallest bubble gets `min_font`, the largest `max_font`. When every
/// bubble has the same radius there is nothing to scale against, so all labels sit halfway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontScale {
    pub min_font: f64,
    pub max_font: f64,
    pub radii: Normalize,
}

impl FontScale {
    pub fn new(min_font: f64, max_font: f64, r_min: f64, r_max: f64) -> Self {
        Self {
            min_font,
            max_font,
            radii: Normalize::new(r_min, r_max),
        }
    }

    pub fn size_for(&self, radius: f64) -> f64 {
        if self.radii.vmax > self.radii.vmin {
            self.min_font + self.radii.apply(radius) * (self.max_font - self.min_font)
        } else {
            (self.min_font + self.max_font) / 2.0
        }
    }
}

/// Labels are drawn at or above the threshold.
pub fn label_visible(font_size: f64, threshold: f64) -> bool {
    font_size >= threshold
}
