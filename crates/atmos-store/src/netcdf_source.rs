//! NetCDF-4 / HDF5 atmosphere files.
//!
//! The file is opened for each read or write and closed again when the
//! `netcdf::File` handle drops, so no handle is held across edits.
//!
//! Values are read and written as `f64`; the netcdf library converts from
//! and to the stored variable type.

use std::path::{Path, PathBuf};
use std::sync::Once;

use chrono::Utc;
use tracing::{debug, info};

use atmos_common::{AtmosError, AtmosResult, Quantity, Shape4, HEIGHT_DATASET};

use crate::snapshot::{AtmosphereSnapshot, Field4};
use crate::source::AtmosSource;

/// Dimension names used when creating new files.
const DIMENSION_NAMES: [&str; 4] = ["nt", "nx", "ny", "nz"];

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints diagnostics even when errors are handled on the
/// Rust side (e.g. probing for an optional `history` attribute). Call early in
/// `main()`; safe to call more than once.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and null handlers are a
        // documented way to disable automatic error printing.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// An atmosphere file on disk.
#[derive(Debug, Clone)]
pub struct NetCdfSource {
    path: PathBuf,
}

impl NetCdfSource {
    /// Point at an existing file. Fails if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> AtmosResult<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(AtmosError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("atmosphere file not found: {}", path.display()),
            )));
        }
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    /// Create a new file holding all five datasets of `snapshot`.
    pub fn create(path: impl AsRef<Path>, snapshot: &AtmosphereSnapshot) -> AtmosResult<Self> {
        silence_hdf5_errors();
        let path = path.as_ref();
        let mut file = netcdf::create(path).map_err(|e| {
            AtmosError::backend(format!("failed to create {}: {}", path.display(), e))
        })?;

        for (name, len) in DIMENSION_NAMES.iter().zip(snapshot.shape().as_array()) {
            file.add_dimension(name, len)
                .map_err(|e| AtmosError::backend(format!("failed to add dimension {}: {}", name, e)))?;
        }

        let mut datasets = vec![(HEIGHT_DATASET, snapshot.height_field())];
        datasets.extend(Quantity::ALL.iter().map(|q| (q.dataset_name(), snapshot.quantity(*q))));

        for (name, field) in datasets {
            let mut var = file
                .add_variable::<f64>(name, &DIMENSION_NAMES)
                .map_err(|e| AtmosError::backend(format!("failed to add variable {}: {}", name, e)))?;
            var.put_values(field.data(), ..)
                .map_err(|e| AtmosError::backend(format!("failed to write {}: {}", name, e)))?;
        }

        info!(path = %path.display(), shape = %snapshot.shape(), "Created atmosphere file");
        Ok(Self {
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AtmosSource for NetCdfSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> AtmosResult<AtmosphereSnapshot> {
        silence_hdf5_errors();
        let file = netcdf::open(&self.path).map_err(|e| {
            AtmosError::file_format(format!("failed to open {}: {}", self.path.display(), e))
        })?;

        let height = read_field(&file, HEIGHT_DATASET)?;
        let [temperature, electron_density, velocity_z, turbulence] = [
            read_field(&file, Quantity::Temperature.dataset_name())?,
            read_field(&file, Quantity::ElectronDensity.dataset_name())?,
            read_field(&file, Quantity::VelocityZ.dataset_name())?,
            read_field(&file, Quantity::Turbulence.dataset_name())?,
        ];

        AtmosphereSnapshot::new(height, temperature, electron_density, velocity_z, turbulence)
    }

    fn write(&mut self, snapshot: &AtmosphereSnapshot) -> AtmosResult<()> {
        silence_hdf5_errors();
        let mut file = netcdf::append(&self.path).map_err(|e| {
            AtmosError::backend(format!(
                "failed to open {} for writing: {}",
                self.path.display(),
                e
            ))
        })?;

        // Validate every target before touching any of them.
        for quantity in Quantity::ALL {
            let name = quantity.dataset_name();
            let var = file
                .variable(name)
                .ok_or_else(|| AtmosError::file_format(format!("missing dataset '{}'", name)))?;
            let shape = variable_shape(&var, name)?;
            if shape != snapshot.shape() {
                return Err(AtmosError::file_format(format!(
                    "dataset '{}' on disk has shape {}, in-memory shape is {}",
                    name,
                    shape,
                    snapshot.shape()
                )));
            }
        }

        for quantity in Quantity::ALL {
            let name = quantity.dataset_name();
            let mut var = file
                .variable_mut(name)
                .ok_or_else(|| AtmosError::file_format(format!("missing dataset '{}'", name)))?;
            var.put_values(snapshot.quantity(quantity).data(), ..)
                .map_err(|e| AtmosError::backend(format!("failed to write {}: {}", name, e)))?;
            debug!(dataset = name, "Wrote dataset");
        }

        append_history(&mut file)?;
        Ok(())
    }
}

fn variable_shape(var: &netcdf::Variable, name: &str) -> AtmosResult<Shape4> {
    let dims: Vec<usize> = var.dimensions().iter().map(|d| d.len()).collect();
    Shape4::from_dims(&dims).ok_or_else(|| {
        AtmosError::file_format(format!(
            "dataset '{}' has {} dimensions, expected 4 (time, x, y, depth)",
            name,
            dims.len()
        ))
    })
}

fn read_field(file: &netcdf::File, name: &str) -> AtmosResult<Field4> {
    let var = file
        .variable(name)
        .ok_or_else(|| AtmosError::file_format(format!("missing dataset '{}'", name)))?;
    let shape = variable_shape(&var, name)?;

    let data: Vec<f64> = var
        .get_values::<f64, _>(..)
        .map_err(|e| AtmosError::backend(format!("failed to read {}: {}", name, e)))?;

    debug!(dataset = name, shape = %shape, "Read dataset");
    Field4::new(shape, data)
}

/// Append a timestamped line to the global `history` attribute.
fn append_history(file: &mut netcdf::FileMut) -> AtmosResult<()> {
    let previous = file
        .attribute("history")
        .and_then(|attr| attr.value().ok())
        .and_then(|value| match value {
            netcdf::AttributeValue::Str(s) => Some(s),
            _ => None,
        });

    let line = format!(
        "{}: quantities edited with atmos-edit",
        Utc::now().format("%Y-%m-%dT%H:%M:%SZ")
    );
    let history = match previous {
        Some(prev) if !prev.is_empty() => format!("{}\n{}", prev, line),
        _ => line,
    };

    file.add_attribute("history", history)
        .map_err(|e| AtmosError::backend(format!("failed to update history: {}", e)))?;
    Ok(())
}
