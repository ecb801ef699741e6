//! One interactive editing session over an atmosphere.
//!
//! Front ends hold an [`EditSession`] and call one method per user action:
//! moving a slider, choosing the edit target, pressing apply, save or close.
//! Heights passed in here are in megameters.

use tracing::info;

use atmos_common::{AtmosResult, Quantity};
use atmos_store::{AtmosSource, AtmosphereStore};

use crate::config::EditorConfig;
use crate::editor::{EditOutcome, EditRequest, RangeEditor};
use crate::viewport::Viewport;

/// Store plus the view onto it.
#[derive(Debug)]
pub struct EditSession<S: AtmosSource> {
    store: AtmosphereStore<S>,
    viewport: Viewport,
}

impl<S: AtmosSource> EditSession<S> {
    /// Load the atmosphere and build the initial view.
    pub fn open(source: S, config: &EditorConfig) -> AtmosResult<Self> {
        let store = AtmosphereStore::load(source)?;
        let viewport = Viewport::new(&store, config)?;
        Ok(Self { store, viewport })
    }

    pub fn store(&self) -> &AtmosphereStore<S> {
        &self.store
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn set_time_index(&mut self, time_index: usize) -> AtmosResult<()> {
        self.viewport.set_time_index(&self.store, time_index)
    }

    pub fn set_height_window(&mut self, min: f64, max: f64) {
        self.viewport.set_height_window(min, max);
    }

    pub fn set_height_min(&mut self, min: f64) {
        self.viewport.set_height_min(min);
    }

    pub fn set_height_max(&mut self, max: f64) {
        self.viewport.set_height_max(max);
    }

    pub fn set_edit_target(&mut self, quantity: Quantity) {
        self.viewport.set_edit_target(quantity);
    }

    /// Edit the selected quantity at the selected time step, then redraw.
    pub fn apply_edit(
        &mut self,
        lower_height: f64,
        lower_value: f64,
        upper_height: f64,
        upper_value: f64,
    ) -> AtmosResult<EditOutcome> {
        let request = EditRequest::from_display(
            self.viewport.edit_target(),
            self.viewport.time_index(),
            (lower_height, lower_value),
            (upper_height, upper_value),
        );
        self.apply_request(&request)
    }

    /// Apply a fully specified edit (heights in meters), then redraw.
    pub fn apply_request(&mut self, request: &EditRequest) -> AtmosResult<EditOutcome> {
        let outcome = RangeEditor::apply_edit(&mut self.store, request)?;
        self.viewport.refresh(&self.store)?;
        Ok(outcome)
    }

    /// Write the current quantities back. Can be repeated until close.
    pub fn save(&mut self) -> AtmosResult<()> {
        self.store.commit()
    }

    pub fn close(&mut self) {
        self.store.close();
        info!("Edit session closed");
    }

    pub fn into_store(self) -> AtmosphereStore<S> {
        self.store
    }
}
