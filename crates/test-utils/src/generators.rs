//! Synthetic atmosphere data for tests.
//!
//! Columns are plain `Vec<f64>` in depth order; fields are flat row-major
//! `(time, x, y, depth)` data with a single `(x, y)` column, matching how
//! the store lays them out.

/// Five-point reference column, heights in meters, stored top-down.
pub const EXAMPLE_HEIGHTS: [f64; 5] = [5.0e6, 4.0e6, 3.0e6, 2.0e6, 1.0e6];

/// Temperatures (K) matching [`EXAMPLE_HEIGHTS`].
pub const EXAMPLE_TEMPERATURE: [f64; 5] = [6000.0, 5500.0, 5000.0, 4500.0, 4000.0];

/// Evenly spaced values from `first` to `last` inclusive.
///
/// ```
/// use test_utils::linear_profile;
///
/// assert_eq!(linear_profile(3, 0.0, 1.0), vec![0.0, 0.5, 1.0]);
/// ```
pub fn linear_profile(depth: usize, first: f64, last: f64) -> Vec<f64> {
    match depth {
        0 => Vec::new(),
        1 => vec![first],
        _ => {
            let step = (last - first) / (depth - 1) as f64;
            (0..depth).map(|i| first + step * i as f64).collect()
        }
    }
}

/// Height column decreasing from `top` to `bottom` (meters), the usual
/// layout of atmosphere grids.
pub fn decreasing_heights(depth: usize, top: f64, bottom: f64) -> Vec<f64> {
    assert!(top > bottom, "top must be above bottom");
    linear_profile(depth, top, bottom)
}

/// Repeat one column for every time step.
pub fn repeat_column(column: &[f64], time_steps: usize) -> Vec<f64> {
    column
        .iter()
        .copied()
        .cycle()
        .take(column.len() * time_steps)
        .collect()
}

/// Field with predictable values: sample `(t, z)` holds `t * 1000 + z`.
///
/// ```
/// use test_utils::create_test_field;
///
/// let field = create_test_field(2, 3);
/// assert_eq!(field, vec![0.0, 1.0, 2.0, 1000.0, 1001.0, 1002.0]);
/// ```
pub fn create_test_field(time_steps: usize, depth: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(time_steps * depth);
    for t in 0..time_steps {
        for z in 0..depth {
            data.push((t * 1000 + z) as f64);
        }
    }
    data
}

/// Temperature-like column: hot at the top, cooling toward the bottom, with
/// a shallow minimum two thirds of the way down.
pub fn create_temperature_column(depth: usize) -> Vec<f64> {
    (0..depth)
        .map(|z| {
            let frac = z as f64 / depth.max(2).saturating_sub(1) as f64;
            let dip = (frac - 0.66).powi(2);
            4200.0 + 6000.0 * dip + 2000.0 * (1.0 - frac)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decreasing_heights() {
        let heights = decreasing_heights(5, 5.0e6, 1.0e6);
        assert_eq!(heights, EXAMPLE_HEIGHTS.to_vec());
    }

    #[test]
    fn test_repeat_column() {
        assert_eq!(repeat_column(&[1.0, 2.0], 3), vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn test_temperature_column_is_finite() {
        let column = create_temperature_column(82);
        assert_eq!(column.len(), 82);
        assert!(column.iter().all(|t| t.is_finite() && *t > 0.0));
    }

    #[test]
    fn test_single_point_profile() {
        assert_eq!(linear_profile(1, 7.0, 9.0), vec![7.0]);
        assert!(linear_profile(0, 7.0, 9.0).is_empty());
    }
}
