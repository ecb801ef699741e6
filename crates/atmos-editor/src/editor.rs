//! Range edits of a single quantity along the height column.
//!
//! An edit names two boundary points `(height, value)`. Both heights snap to
//! the nearest grid index. Samples strictly between the two indices are
//! replaced by the straight line through the boundary points, evaluated at
//! each sample's own height. The boundary samples keep their values.
//!
//! When both heights and both values are identical the edit is a point
//! write at the nearest index instead. The comparison is exact.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use tracing::debug;

use atmos_common::{units, AtmosError, AtmosResult, Quantity};
use atmos_store::{AtmosSource, AtmosphereStore};

use crate::interpolation::{nearest_index, LinearInterpolant};

/// One edit, heights in meters (the stored unit).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EditRequest {
    pub quantity: Quantity,
    pub time_index: usize,
    pub lower_height: f64,
    pub lower_value: f64,
    pub upper_height: f64,
    pub upper_value: f64,
}

impl EditRequest {
    pub fn new(
        quantity: Quantity,
        time_index: usize,
        (lower_height, lower_value): (f64, f64),
        (upper_height, upper_value): (f64, f64),
    ) -> Self {
        Self {
            quantity,
            time_index,
            lower_height,
            lower_value,
            upper_height,
            upper_value,
        }
    }

    /// Build from heights in megameters, as entered in the controls.
    pub fn from_display(
        quantity: Quantity,
        time_index: usize,
        (lower_height, lower_value): (f64, f64),
        (upper_height, upper_value): (f64, f64),
    ) -> Self {
        Self::new(
            quantity,
            time_index,
            (units::to_meters(lower_height), lower_value),
            (units::to_meters(upper_height), upper_value),
        )
    }

    /// Both boundary points identical: write one sample.
    #[allow(clippy::float_cmp)]
    pub fn is_point_edit(&self) -> bool {
        self.lower_height == self.upper_height && self.lower_value == self.upper_value
    }
}

/// What an edit wrote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EditOutcome {
    /// Single sample overwritten.
    Point { index: usize },
    /// Samples `start..end` overwritten; empty when the boundaries snapped
    /// to the same or adjacent indices.
    Range { start: usize, end: usize },
}

impl EditOutcome {
    /// Depth indices that were written.
    pub fn indices(&self) -> Range<usize> {
        match *self {
            EditOutcome::Point { index } => index..index + 1,
            EditOutcome::Range { start, end } => start..end,
        }
    }

    /// Number of samples written.
    pub fn len(&self) -> usize {
        self.indices().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Applies [`EditRequest`]s to a store.
#[derive(Debug, Clone, Copy, Default)]
pub struct RangeEditor;

impl RangeEditor {
    /// Apply one edit at column `(time_index, 0, 0)`.
    ///
    /// Only the named quantity at the named time step changes. All checks run
    /// before anything is written.
    pub fn apply_edit<S: AtmosSource>(
        store: &mut AtmosphereStore<S>,
        request: &EditRequest,
    ) -> AtmosResult<EditOutcome> {
        let quantity = request.quantity;
        let time_index = request.time_index;
        let heights = store.heights(time_index)?;

        let idx_lower = snap(heights, request.lower_height)?;
        let idx_upper = snap(heights, request.upper_height)?;

        if request.is_point_edit() {
            store.set_quantity_value(quantity, time_index, idx_lower, request.lower_value)?;
            debug!(%quantity, time_index, index = idx_lower, "Applied point edit");
            return Ok(EditOutcome::Point { index: idx_lower });
        }

        // Strictly between the two snapped indices, whichever order the
        // column is stored in.
        let start = idx_lower.min(idx_upper) + 1;
        let end = idx_lower.max(idx_upper).max(start);
        let range = start..end;

        let values: Vec<f64> = match LinearInterpolant::new(
            request.lower_height,
            request.lower_value,
            request.upper_height,
            request.upper_value,
        ) {
            Some(line) => heights[range.clone()].iter().map(|&h| line.eval(h)).collect(),
            // Equal heights with different values select nothing.
            None => Vec::new(),
        };

        store.set_quantity_range(quantity, time_index, range.clone(), &values)?;
        debug!(
            %quantity,
            time_index,
            start = range.start,
            end = range.end,
            "Applied range edit"
        );
        Ok(EditOutcome::Range {
            start: range.start,
            end: range.end,
        })
    }
}

fn snap(heights: &[f64], target: f64) -> AtmosResult<usize> {
    nearest_index(heights, target).ok_or_else(|| {
        AtmosError::invalid_index(format!(
            "no height sample near {} m (column has no finite heights)",
            target
        ))
    })
}
