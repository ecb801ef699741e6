//! Editing and viewing atmosphere height profiles.
//!
//! - [`editor`]: replace a height range of one quantity with a two-point
//!   linear interpolation, or overwrite a single sample.
//! - [`viewport`]: the displayed time step and height window, and the padded
//!   y-limits of each quantity within that window.
//! - [`session`]: ties a store and a viewport together for a front end.
//!
//! # Example
//!
//! ```ignore
//! use atmos_common::Quantity;
//! use atmos_editor::{EditSession, EditorConfig};
//! use atmos_store::NetCdfSource;
//!
//! let mut session = EditSession::open(NetCdfSource::open("atmos.nc")?, &EditorConfig::default())?;
//! session.set_edit_target(Quantity::Temperature);
//! // Heights in megameters, as typed into the controls.
//! session.apply_edit(0.5, 6000.0, 1.5, 4200.0)?;
//! session.save()?;
//! session.close();
//! ```

pub mod config;
pub mod editor;
pub mod interpolation;
pub mod session;
pub mod viewport;

pub use config::EditorConfig;
pub use editor::{EditOutcome, EditRequest, RangeEditor};
pub use interpolation::{nearest_index, LinearInterpolant};
pub use session::EditSession;
pub use viewport::{padded_limits, HeightWindow, Profile, ViewState, Viewport, YLimits};
