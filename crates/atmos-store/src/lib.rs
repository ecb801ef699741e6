//! Atmosphere storage for the editor.
//!
//! An atmosphere file holds five 4-D `(time, x, y, depth)` datasets: the
//! height grid `z` plus temperature, electron density, vertical velocity and
//! turbulent velocity. This crate loads them fully into memory, hands out
//! mutable depth columns, and writes the four editable quantities back on an
//! explicit commit.
//!
//! # Lifecycle
//!
//! ```text
//! AtmosphereStore::load(source)   read all five datasets
//!      │
//!      ├─► get_quantity / set_quantity_value / set_quantity_range
//!      │
//!      ├─► commit()               overwrite the four quantities (repeatable)
//!      │
//!      └─► close()                release the source; nothing else is allowed
//! ```
//!
//! The backing file is only opened for the duration of a read or a write.
//!
//! # Example
//!
//! ```ignore
//! use atmos_common::Quantity;
//! use atmos_store::{AtmosphereStore, NetCdfSource};
//!
//! let mut store = AtmosphereStore::load(NetCdfSource::open("atmos.nc")?)?;
//! store.set_quantity_value(Quantity::Temperature, 0, 10, 6500.0)?;
//! store.commit()?;
//! store.close();
//! ```

pub mod netcdf_source;
pub mod snapshot;
pub mod source;
pub mod store;

pub use atmos_common::{AtmosError, AtmosResult};
pub use netcdf_source::{silence_hdf5_errors, NetCdfSource};
pub use snapshot::{AtmosphereSnapshot, Field4, COLUMN_X, COLUMN_Y};
pub use source::{AtmosSource, MemorySource};
pub use store::AtmosphereStore;
