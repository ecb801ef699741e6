//! Index lookup and two-point interpolation along a height column.

/// Index of the element closest to `target` by absolute difference.
///
/// Ties resolve to the lowest index. NaN elements are never selected;
/// returns None for an empty column, an all-NaN column or a NaN target.
pub fn nearest_index(column: &[f64], target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &value) in column.iter().enumerate() {
        let diff = (value - target).abs();
        if diff.is_nan() {
            continue;
        }
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((i, diff)),
        }
    }
    best.map(|(i, _)| i)
}

/// Straight line through two points, evaluated anywhere (extrapolation
/// included).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearInterpolant {
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl LinearInterpolant {
    /// None if the two abscissae coincide.
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Option<Self> {
        if x0 == x1 {
            return None;
        }
        Some(Self { x0, y0, x1, y1 })
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.y0 + (self.y1 - self.y0) * (x - self.x0) / (self.x1 - self.x0)
    }
}
