//! The editable atmosphere: snapshot plus the source it came from.

use std::ops::Range;

use tracing::{debug, info};

use atmos_common::{AtmosError, AtmosResult, Quantity, Shape4};

use crate::snapshot::AtmosphereSnapshot;
use crate::source::AtmosSource;

/// Loaded atmosphere with in-place edit access.
///
/// The store is open from `load` until `close`. Every operation other than
/// `close` fails with [`AtmosError::ClosedStore`] afterwards.
#[derive(Debug)]
pub struct AtmosphereStore<S: AtmosSource> {
    source: Option<S>,
    snapshot: AtmosphereSnapshot,
    commits: usize,
}

impl<S: AtmosSource> AtmosphereStore<S> {
    /// Read all five datasets from `source` into memory.
    pub fn load(source: S) -> AtmosResult<Self> {
        let snapshot = source.read()?;
        info!(
            source = %source.describe(),
            shape = %snapshot.shape(),
            "Loaded atmosphere"
        );
        Ok(Self {
            source: Some(source),
            snapshot,
            commits: 0,
        })
    }

    pub fn is_open(&self) -> bool {
        self.source.is_some()
    }

    fn ensure_open(&self) -> AtmosResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(AtmosError::ClosedStore)
        }
    }

    /// Read access to the whole in-memory atmosphere.
    pub fn snapshot(&self) -> AtmosResult<&AtmosphereSnapshot> {
        self.ensure_open()?;
        Ok(&self.snapshot)
    }

    pub fn shape(&self) -> Shape4 {
        self.snapshot.shape()
    }

    pub fn time_steps(&self) -> usize {
        self.snapshot.time_steps()
    }

    /// Number of successful commits since load.
    pub fn commit_count(&self) -> usize {
        self.commits
    }

    /// Depth profile of `quantity` at `time_index`.
    pub fn get_quantity(&self, quantity: Quantity, time_index: usize) -> AtmosResult<&[f64]> {
        self.ensure_open()?;
        self.snapshot.column(quantity, time_index)
    }

    /// Height column (meters) at `time_index`.
    pub fn heights(&self, time_index: usize) -> AtmosResult<&[f64]> {
        self.ensure_open()?;
        self.snapshot.heights(time_index)
    }

    /// Overwrite a single sample.
    pub fn set_quantity_value(
        &mut self,
        quantity: Quantity,
        time_index: usize,
        depth_index: usize,
        value: f64,
    ) -> AtmosResult<()> {
        self.ensure_open()?;
        let column = self.snapshot.column_mut(quantity, time_index)?;
        let depth = column.len();
        let slot = column.get_mut(depth_index).ok_or_else(|| {
            AtmosError::invalid_index(format!(
                "depth index {} out of range [0, {}]",
                depth_index,
                depth - 1
            ))
        })?;
        *slot = value;
        debug!(%quantity, time_index, depth_index, value, "Set sample");
        Ok(())
    }

    /// Overwrite a contiguous depth range. Nothing is written unless the
    /// range fits the column and `values` has exactly its length.
    pub fn set_quantity_range(
        &mut self,
        quantity: Quantity,
        time_index: usize,
        depth_range: Range<usize>,
        values: &[f64],
    ) -> AtmosResult<()> {
        self.ensure_open()?;
        let column = self.snapshot.column_mut(quantity, time_index)?;
        if depth_range.start > depth_range.end || depth_range.end > column.len() {
            return Err(AtmosError::invalid_index(format!(
                "depth range {}..{} outside column of length {}",
                depth_range.start,
                depth_range.end,
                column.len()
            )));
        }
        if values.len() != depth_range.len() {
            return Err(AtmosError::ShapeMismatch {
                expected: depth_range.len(),
                actual: values.len(),
            });
        }
        column[depth_range.clone()].copy_from_slice(values);
        debug!(
            %quantity,
            time_index,
            start = depth_range.start,
            end = depth_range.end,
            "Set sample range"
        );
        Ok(())
    }

    /// Persist the four quantities to the source, replacing what it held.
    /// May be called repeatedly while the store is open.
    pub fn commit(&mut self) -> AtmosResult<()> {
        let source = self.source.as_mut().ok_or(AtmosError::ClosedStore)?;
        source.write(&self.snapshot)?;
        self.commits += 1;
        info!(source = %source.describe(), commits = self.commits, "Committed atmosphere");
        Ok(())
    }

    /// Release the source. Closing an already closed store does nothing.
    pub fn close(&mut self) {
        if let Some(source) = self.source.take() {
            info!(source = %source.describe(), "Closed atmosphere");
        }
    }

    /// Release the source and hand it back, e.g. to inspect what was written.
    pub fn into_source(mut self) -> Option<S> {
        self.source.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Field4;
    use crate::source::MemorySource;

    fn column_snapshot(heights: &[f64], temperature: &[f64], time_steps: usize) -> AtmosphereSnapshot {
        let shape = Shape4::new(time_steps, 1, 1, heights.len());
        let repeat = |column: &[f64]| -> Vec<f64> {
            column.iter().copied().cycle().take(shape.len()).collect()
        };
        AtmosphereSnapshot::new(
            Field4::new(shape, repeat(heights)).unwrap(),
            Field4::new(shape, repeat(temperature)).unwrap(),
            Field4::filled(shape, 1.0e18),
            Field4::filled(shape, 0.0),
            Field4::filled(shape, 1500.0),
        )
        .unwrap()
    }

    fn store() -> AtmosphereStore<MemorySource> {
        let snap = column_snapshot(
            &[5e6, 4e6, 3e6, 2e6, 1e6],
            &[6000.0, 5500.0, 5000.0, 4500.0, 4000.0],
            2,
        );
        AtmosphereStore::load(MemorySource::new(snap)).unwrap()
    }

    #[test]
    fn test_get_quantity_matches_source() {
        let store = store();
        assert_eq!(
            store.get_quantity(Quantity::Temperature, 1).unwrap(),
            &[6000.0, 5500.0, 5000.0, 4500.0, 4000.0]
        );
        assert_eq!(store.heights(0).unwrap()[0], 5e6);
    }

    #[test]
    fn test_get_quantity_bad_time_index() {
        let store = store();
        let err = store.get_quantity(Quantity::Temperature, 2).unwrap_err();
        assert!(matches!(err, AtmosError::InvalidIndex(_)));
    }

    #[test]
    fn test_set_value_only_touches_target() {
        let mut store = store();
        store
            .set_quantity_value(Quantity::Temperature, 0, 2, 7000.0)
            .unwrap();
        assert_eq!(
            store.get_quantity(Quantity::Temperature, 0).unwrap(),
            &[6000.0, 5500.0, 7000.0, 4500.0, 4000.0]
        );
        assert_eq!(store.get_quantity(Quantity::Temperature, 1).unwrap()[2], 5000.0);
    }

    #[test]
    fn test_set_value_bad_depth_index() {
        let mut store = store();
        let err = store
            .set_quantity_value(Quantity::Turbulence, 0, 5, 1.0)
            .unwrap_err();
        assert!(matches!(err, AtmosError::InvalidIndex(_)));
    }

    #[test]
    fn test_set_range_length_mismatch_leaves_data() {
        let mut store = store();
        let err = store
            .set_quantity_range(Quantity::VelocityZ, 0, 1..3, &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(err, AtmosError::ShapeMismatch { expected: 2, actual: 3 }));
        assert_eq!(store.get_quantity(Quantity::VelocityZ, 0).unwrap(), &[0.0; 5]);
    }

    #[test]
    fn test_set_range_out_of_column() {
        let mut store = store();
        let err = store
            .set_quantity_range(Quantity::VelocityZ, 0, 3..6, &[1.0, 2.0, 3.0])
            .unwrap_err();
        assert!(matches!(err, AtmosError::InvalidIndex(_)));
    }

    #[test]
    fn test_set_range_writes_slice() {
        let mut store = store();
        store
            .set_quantity_range(Quantity::VelocityZ, 1, 1..3, &[-2.0, -3.0])
            .unwrap();
        assert_eq!(
            store.get_quantity(Quantity::VelocityZ, 1).unwrap(),
            &[0.0, -2.0, -3.0, 0.0, 0.0]
        );
        assert_eq!(store.get_quantity(Quantity::VelocityZ, 0).unwrap(), &[0.0; 5]);
    }

    #[test]
    fn test_commit_persists_and_reload_reproduces() {
        let mut store = store();
        store
            .set_quantity_value(Quantity::ElectronDensity, 1, 0, 3.5e19)
            .unwrap();
        store.commit().unwrap();
        store.commit().unwrap();
        assert_eq!(store.commit_count(), 2);

        let expected = store.snapshot().unwrap().clone();
        let source = store.into_source().unwrap();
        assert_eq!(source.write_count(), 2);

        let reloaded = AtmosphereStore::load(source).unwrap();
        assert_eq!(reloaded.snapshot().unwrap(), &expected);
    }

    #[test]
    fn test_closed_store_rejects_operations() {
        let mut store = store();
        store.close();
        assert!(!store.is_open());
        assert!(matches!(store.commit(), Err(AtmosError::ClosedStore)));
        assert!(matches!(
            store.get_quantity(Quantity::Temperature, 0),
            Err(AtmosError::ClosedStore)
        ));
        assert!(matches!(
            store.set_quantity_value(Quantity::Temperature, 0, 0, 1.0),
            Err(AtmosError::ClosedStore)
        ));
        // Second close is a no-op.
        store.close();
    }
}
