//! In-memory copy of an atmosphere file.

use atmos_common::{AtmosError, AtmosResult, Quantity, Shape4};

/// Spatial column addressed by the editor. Supported files carry a single
/// `(x, y)` column, so both indices are always zero.
pub const COLUMN_X: usize = 0;
pub const COLUMN_Y: usize = 0;

/// A dense 4-D array of `f64` in row-major `(time, x, y, depth)` order.
#[derive(Debug, Clone, PartialEq)]
pub struct Field4 {
    shape: Shape4,
    data: Vec<f64>,
}

impl Field4 {
    /// Wrap flat data. Fails if the length doesn't match the shape.
    pub fn new(shape: Shape4, data: Vec<f64>) -> AtmosResult<Self> {
        if data.len() != shape.len() {
            return Err(AtmosError::ShapeMismatch {
                expected: shape.len(),
                actual: data.len(),
            });
        }
        Ok(Self { shape, data })
    }

    /// A field with every sample set to `value`.
    pub fn filled(shape: Shape4, value: f64) -> Self {
        Self {
            shape,
            data: vec![value; shape.len()],
        }
    }

    pub fn shape(&self) -> Shape4 {
        self.shape
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Depth column at `(t, x, y)`. Indices must already be validated.
    pub fn column(&self, t: usize, x: usize, y: usize) -> &[f64] {
        let start = self.shape.column_start(t, x, y);
        &self.data[start..start + self.shape.depth]
    }

    pub fn column_mut(&mut self, t: usize, x: usize, y: usize) -> &mut [f64] {
        let start = self.shape.column_start(t, x, y);
        &mut self.data[start..start + self.shape.depth]
    }
}

/// The five datasets of one atmosphere file.
///
/// The editable quantities are kept in [`Quantity::ALL`] order so dispatch is
/// a plain index instead of one branch per quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct AtmosphereSnapshot {
    height: Field4,
    quantities: [Field4; 4],
}

impl AtmosphereSnapshot {
    /// Assemble a snapshot, checking that all five datasets share one
    /// non-empty shape.
    pub fn new(
        height: Field4,
        temperature: Field4,
        electron_density: Field4,
        velocity_z: Field4,
        turbulence: Field4,
    ) -> AtmosResult<Self> {
        let shape = height.shape();
        if shape.is_empty() {
            return Err(AtmosError::file_format(format!(
                "height dataset has an empty extent {}",
                shape
            )));
        }

        let quantities = [temperature, electron_density, velocity_z, turbulence];
        for (quantity, field) in Quantity::ALL.iter().zip(quantities.iter()) {
            if field.shape() != shape {
                return Err(AtmosError::file_format(format!(
                    "dataset '{}' has shape {}, expected {} to match '{}'",
                    quantity.dataset_name(),
                    field.shape(),
                    shape,
                    atmos_common::HEIGHT_DATASET
                )));
            }
        }

        Ok(Self { height, quantities })
    }

    pub fn shape(&self) -> Shape4 {
        self.height.shape()
    }

    /// Number of time steps (T).
    pub fn time_steps(&self) -> usize {
        self.shape().time
    }

    /// Number of samples per column (Z).
    pub fn depth(&self) -> usize {
        self.shape().depth
    }

    pub fn height_field(&self) -> &Field4 {
        &self.height
    }

    pub fn quantity(&self, quantity: Quantity) -> &Field4 {
        &self.quantities[quantity.index()]
    }

    pub fn check_time_index(&self, time_index: usize) -> AtmosResult<()> {
        if time_index >= self.time_steps() {
            return Err(AtmosError::invalid_index(format!(
                "time index {} out of range [0, {}]",
                time_index,
                self.time_steps() - 1
            )));
        }
        Ok(())
    }

    /// Height column (meters) at the given time step.
    pub fn heights(&self, time_index: usize) -> AtmosResult<&[f64]> {
        self.check_time_index(time_index)?;
        Ok(self.height.column(time_index, COLUMN_X, COLUMN_Y))
    }

    /// Depth profile of one quantity at the given time step.
    pub fn column(&self, quantity: Quantity, time_index: usize) -> AtmosResult<&[f64]> {
        self.check_time_index(time_index)?;
        Ok(self.quantities[quantity.index()].column(time_index, COLUMN_X, COLUMN_Y))
    }

    pub fn column_mut(&mut self, quantity: Quantity, time_index: usize) -> AtmosResult<&mut [f64]> {
        self.check_time_index(time_index)?;
        Ok(self.quantities[quantity.index()].column_mut(time_index, COLUMN_X, COLUMN_Y))
    }

    /// Whether the height column is monotonic along depth (either direction).
    pub fn is_monotonic(&self, time_index: usize) -> AtmosResult<bool> {
        let heights = self.heights(time_index)?;
        let increasing = heights.windows(2).all(|w| w[0] <= w[1]);
        let decreasing = heights.windows(2).all(|w| w[0] >= w[1]);
        Ok(increasing || decreasing)
    }

    /// Min and max of a quantity column, ignoring NaN. None if all NaN.
    pub fn value_range(&self, quantity: Quantity, time_index: usize) -> AtmosResult<Option<(f64, f64)>> {
        Ok(finite_range(self.column(quantity, time_index)?))
    }
}

/// Min/max over the non-NaN values of a slice.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
