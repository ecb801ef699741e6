//! Displayed time step, height window and y-limits.
//!
//! The viewport holds the state a plotting front end needs: the selected
//! time step, the edit target, the visible height window (megameters), and
//! for each quantity the profile curve plus y-limits padded around the values
//! inside the window.

use std::ops::Range;

use serde::Serialize;
use tracing::{debug, warn};

use atmos_common::{units, AtmosResult, Quantity};
use atmos_store::{snapshot::finite_range, AtmosSource, AtmosphereStore};

use crate::config::EditorConfig;
use crate::interpolation::nearest_index;

/// Visible height range in megameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeightWindow {
    pub min: f64,
    pub max: f64,
}

impl HeightWindow {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, height: f64) -> bool {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        height >= lo && height <= hi
    }

    /// Depth indices whose values set the y-limits: half-open between the
    /// nearest indices of the two bounds. None when both bounds snap to the
    /// same index.
    pub fn index_range(&self, heights: &[f64]) -> Option<Range<usize>> {
        let a = nearest_index(heights, self.min)?;
        let b = nearest_index(heights, self.max)?;
        let range = a.min(b)..a.max(b);
        if range.is_empty() {
            None
        } else {
            Some(range)
        }
    }
}

/// Lower and upper y-axis bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YLimits {
    pub lower: f64,
    pub upper: f64,
}

/// Pad `[qmin, qmax]` by `padding` times the span on each side.
///
/// With the default padding of 0.2 this is
/// `(1.2*qmin - 0.2*qmax, 1.2*qmax - 0.2*qmin)`.
pub fn padded_limits(qmin: f64, qmax: f64, padding: f64) -> YLimits {
    YLimits {
        lower: (1.0 + padding) * qmin - padding * qmax,
        upper: (1.0 + padding) * qmax - padding * qmin,
    }
}

/// One quantity's curve at the current time step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub quantity: Quantity,
    /// Heights in megameters.
    pub heights: Vec<f64>,
    pub values: Vec<f64>,
    /// None until a non-empty window has been applied.
    pub y_limits: Option<YLimits>,
}

impl Profile {
    /// `(height, value)` pairs inside the window.
    pub fn visible(&self, window: &HeightWindow) -> Vec<(f64, f64)> {
        self.heights
            .iter()
            .zip(self.values.iter())
            .filter(|(h, _)| window.contains(**h))
            .map(|(&h, &v)| (h, v))
            .collect()
    }
}

/// Selection state shared with the front end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewState {
    pub time_index: usize,
    pub edit_target: Quantity,
    pub window: HeightWindow,
}

/// Current curves and limits for all four quantities.
#[derive(Debug, Clone)]
pub struct Viewport {
    state: ViewState,
    padding: f64,
    profiles: Vec<Profile>,
}

impl Viewport {
    /// Viewport at time step 0 with the configured window.
    pub fn new<S: AtmosSource>(store: &AtmosphereStore<S>, config: &EditorConfig) -> AtmosResult<Self> {
        let mut viewport = Self {
            state: ViewState {
                time_index: 0,
                edit_target: Quantity::Temperature,
                window: HeightWindow::new(config.height_min, config.height_max),
            },
            padding: config.y_padding,
            profiles: Vec::with_capacity(Quantity::ALL.len()),
        };
        viewport.refresh(store)?;
        Ok(viewport)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn time_index(&self) -> usize {
        self.state.time_index
    }

    pub fn window(&self) -> HeightWindow {
        self.state.window
    }

    pub fn edit_target(&self) -> Quantity {
        self.state.edit_target
    }

    pub fn set_edit_target(&mut self, quantity: Quantity) {
        self.state.edit_target = quantity;
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn profile(&self, quantity: Quantity) -> &Profile {
        &self.profiles[quantity.index()]
    }

    /// Switch time step and redraw all curves, keeping the current window.
    pub fn set_time_index<S: AtmosSource>(
        &mut self,
        store: &AtmosphereStore<S>,
        time_index: usize,
    ) -> AtmosResult<()> {
        store.snapshot()?.check_time_index(time_index)?;
        self.state.time_index = time_index;
        self.refresh(store)
    }

    /// Set both window bounds (megameters) and recompute y-limits from the
    /// curves already loaded.
    pub fn set_height_window(&mut self, min: f64, max: f64) {
        self.state.window = HeightWindow::new(min, max);
        self.update_limits();
    }

    /// Move only the lower window bound.
    pub fn set_height_min(&mut self, min: f64) {
        let max = self.state.window.max;
        self.set_height_window(min, max);
    }

    /// Move only the upper window bound.
    pub fn set_height_max(&mut self, max: f64) {
        let min = self.state.window.min;
        self.set_height_window(min, max);
    }

    /// Re-read all four curves at the current time step, then recompute
    /// y-limits. Call after any edit.
    pub fn refresh<S: AtmosSource>(&mut self, store: &AtmosphereStore<S>) -> AtmosResult<()> {
        let time_index = self.state.time_index;
        let heights = units::column_to_megameters(store.heights(time_index)?);

        let mut profiles = Vec::with_capacity(Quantity::ALL.len());
        for quantity in Quantity::ALL {
            let previous = self.profiles.get(quantity.index()).and_then(|p| p.y_limits);
            profiles.push(Profile {
                quantity,
                heights: heights.clone(),
                values: store.get_quantity(quantity, time_index)?.to_vec(),
                y_limits: previous,
            });
        }
        self.profiles = profiles;
        debug!(time_index, "Refreshed profiles");

        self.update_limits();
        Ok(())
    }

    /// Recompute y-limits from the cached curves. A window that selects no
    /// samples leaves the previous limits in place.
    fn update_limits(&mut self) {
        let window = self.state.window;
        for profile in &mut self.profiles {
            let Some(range) = window.index_range(&profile.heights) else {
                warn!(
                    min = window.min,
                    max = window.max,
                    "Height window selects no samples, keeping previous y-limits"
                );
                return;
            };
            if let Some((qmin, qmax)) = finite_range(&profile.values[range]) {
                profile.y_limits = Some(padded_limits(qmin, qmax, self.padding));
            }
        }
    }
}
