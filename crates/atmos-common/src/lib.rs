//! Common types shared by the atmosphere editor crates.

pub mod error;
pub mod quantity;
pub mod shape;
pub mod units;

pub use error::{AtmosError, AtmosResult};
pub use quantity::{Quantity, HEIGHT_DATASET};
pub use shape::Shape4;
