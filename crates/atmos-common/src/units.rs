//! Height unit conversion at the display boundary.
//!
//! Heights are stored in meters; controls and plots use megameters.

/// Meters per display unit.
pub const METERS_PER_MEGAMETER: f64 = 1.0e6;

pub fn to_megameters(meters: f64) -> f64 {
    meters / METERS_PER_MEGAMETER
}

pub fn to_meters(megameters: f64) -> f64 {
    megameters * METERS_PER_MEGAMETER
}

/// Convert a whole height column to display units.
pub fn column_to_megameters(column: &[f64]) -> Vec<f64> {
    column.iter().map(|&h| to_megameters(h)).collect()
}
