//! The four editable physical quantities of an atmosphere model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AtmosError;

/// Dataset holding geometric height (meters). Read-only for the editor.
pub const HEIGHT_DATASET: &str = "z";

/// An editable quantity, stored as its own 4-D dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Quantity {
    Temperature,
    ElectronDensity,
    VelocityZ,
    #[serde(alias = "velocity_turbulent")]
    Turbulence,
}

impl Quantity {
    /// All quantities in display order.
    pub const ALL: [Quantity; 4] = [
        Quantity::Temperature,
        Quantity::ElectronDensity,
        Quantity::VelocityZ,
        Quantity::Turbulence,
    ];

    /// Short identifier used on the command line and in edit scripts.
    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::ElectronDensity => "electron_density",
            Quantity::VelocityZ => "velocity_z",
            Quantity::Turbulence => "turbulence",
        }
    }

    /// Name of the dataset in the atmosphere file.
    pub fn dataset_name(&self) -> &'static str {
        match self {
            Quantity::Turbulence => "velocity_turbulent",
            other => other.name(),
        }
    }

    /// Physical units of the stored values.
    pub fn units(&self) -> &'static str {
        match self {
            Quantity::Temperature => "K",
            Quantity::ElectronDensity => "m^-3",
            Quantity::VelocityZ | Quantity::Turbulence => "m/s",
        }
    }

    /// Plot title.
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::Temperature => "T (K)",
            Quantity::ElectronDensity => "n_e (m^-3)",
            Quantity::VelocityZ => "v_z (m/s)",
            Quantity::Turbulence => "v_turb (m/s)",
        }
    }

    /// Position in [`Quantity::ALL`].
    pub fn index(&self) -> usize {
        match self {
            Quantity::Temperature => 0,
            Quantity::ElectronDensity => 1,
            Quantity::VelocityZ => 2,
            Quantity::Turbulence => 3,
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Quantity {
    type Err = AtmosError;

    /// Accepts the short name, the dataset name or the selector index (0-3).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Quantity::ALL
            .into_iter()
            .find(|q| {
                key == q.name() || key == q.dataset_name() || key == q.index().to_string()
            })
            .ok_or_else(|| {
                AtmosError::invalid_index(format!(
                    "unknown quantity '{}', expected one of temperature, electron_density, velocity_z, turbulence",
                    s
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names_and_aliases() {
        assert_eq!("temperature".parse::<Quantity>().unwrap(), Quantity::Temperature);
        assert_eq!("Electron_Density".parse::<Quantity>().unwrap(), Quantity::ElectronDensity);
        assert_eq!("velocity_turbulent".parse::<Quantity>().unwrap(), Quantity::Turbulence);
        assert_eq!("2".parse::<Quantity>().unwrap(), Quantity::VelocityZ);
    }

    #[test]
    fn test_parse_unknown_is_invalid_index() {
        let err = "pressure".parse::<Quantity>().unwrap_err();
        assert!(matches!(err, AtmosError::InvalidIndex(_)));
        assert!(err.to_string().contains("pressure"));
    }

    #[test]
    fn test_dataset_names() {
        let names: Vec<_> = Quantity::ALL.iter().map(|q| q.dataset_name()).collect();
        assert_eq!(
            names,
            vec!["temperature", "electron_density", "velocity_z", "velocity_turbulent"]
        );
    }

    #[test]
    fn test_index_matches_order() {
        for (i, q) in Quantity::ALL.iter().enumerate() {
            assert_eq!(q.index(), i);
        }
    }

    #[test]
    fn test_serde_alias() {
        let q: Quantity = serde_json::from_str("\"velocity_turbulent\"").unwrap();
        assert_eq!(q, Quantity::Turbulence);
        assert_eq!(serde_json::to_string(&Quantity::VelocityZ).unwrap(), "\"velocity_z\"");
    }
}
