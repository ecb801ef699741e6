//! YAML edit scripts: a list of edits applied in order, then saved once.
//!
//! ```yaml
//! edits:
//!   - quantity: temperature
//!     time: 0
//!     lower_height: 4.0   # Mm
//!     lower_value: 5000.0
//!     upper_height: 2.0
//!     upper_value: 4000.0
//! ```

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use tracing::debug;

use atmos_common::Quantity;
use atmos_editor::EditRequest;

#[derive(Debug, Clone, Deserialize)]
pub struct EditScript {
    pub edits: Vec<ScriptEdit>,
}

/// One edit with heights in megameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ScriptEdit {
    pub quantity: Quantity,
    #[serde(default)]
    pub time: usize,
    pub lower_height: f64,
    pub lower_value: f64,
    pub upper_height: f64,
    pub upper_value: f64,
}

impl ScriptEdit {
    pub fn to_request(&self) -> EditRequest {
        EditRequest::from_display(
            self.quantity,
            self.time,
            (self.lower_height, self.lower_value),
            (self.upper_height, self.upper_value),
        )
    }
}

impl EditScript {
    /// Load an edit script from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read edit script: {}", path.display()))?;

        let script = Self::parse(&content)
            .with_context(|| format!("Failed to parse edit script: {}", path.display()))?;

        debug!(edits = script.edits.len(), path = %path.display(), "Loaded edit script");
        Ok(script)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let script: EditScript = serde_yaml::from_str(content)?;
        if script.edits.is_empty() {
            bail!("edit script contains no edits");
        }
        Ok(script)
    }

    pub fn requests(&self) -> Vec<EditRequest> {
        self.edits.iter().map(ScriptEdit::to_request).collect()
    }
}
