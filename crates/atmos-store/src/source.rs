//! Backing sources an [`AtmosphereStore`](crate::AtmosphereStore) loads from
//! and commits to.

use atmos_common::{AtmosError, AtmosResult};

use crate::snapshot::AtmosphereSnapshot;

/// Durable location of an atmosphere.
///
/// `write` replaces the four editable quantities wholesale; the height
/// dataset is never rewritten.
pub trait AtmosSource {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    /// Read all five datasets.
    fn read(&self) -> AtmosResult<AtmosphereSnapshot>;

    /// Overwrite the stored quantities with the snapshot's.
    fn write(&mut self, snapshot: &AtmosphereSnapshot) -> AtmosResult<()>;
}

/// Source kept in process memory. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    stored: Option<AtmosphereSnapshot>,
    writes: usize,
}

impl MemorySource {
    pub fn new(snapshot: AtmosphereSnapshot) -> Self {
        Self {
            stored: Some(snapshot),
            writes: 0,
        }
    }

    /// Currently persisted snapshot.
    pub fn stored(&self) -> Option<&AtmosphereSnapshot> {
        self.stored.as_ref()
    }

    /// Number of completed writes.
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl AtmosSource for MemorySource {
    fn describe(&self) -> String {
        "memory".to_string()
    }

    fn read(&self) -> AtmosResult<AtmosphereSnapshot> {
        self.stored
            .clone()
            .ok_or_else(|| AtmosError::file_format("no atmosphere stored in memory source"))
    }

    fn write(&mut self, snapshot: &AtmosphereSnapshot) -> AtmosResult<()> {
        if let Some(stored) = &self.stored {
            if stored.shape() != snapshot.shape() {
                return Err(AtmosError::file_format(format!(
                    "stored shape {} differs from snapshot shape {}",
                    stored.shape(),
                    snapshot.shape()
                )));
            }
        }
        self.stored = Some(snapshot.clone());
        self.writes += 1;
        Ok(())
    }
}
