// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{LabError, LabResult};
use crate::state::LabKind;

/// A saved laboratory preset.
///
/// The simulation core only sees `params` as the lab's parameter struct;
/// where the document is stored is up to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDocument {
    pub lab: LabKind,
    #[serde(default = "default_preset_name")]
    pub name: String,
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub params: serde_json::Value,
}

fn default_preset_name() -> String {
    "untitled".to_string()
}

fn default_schema_version() -> u32 {
    1
}

impl PresetDocument {
    /// Wrap a parameter struct into a document for `lab`.
    pub fn from_params<P: Serialize>(lab: LabKind, name: &str, params: &P) -> LabResult<Self> {
        Ok(PresetDocument {
            lab,
            name: name.to_string(),
            schema_version: default_schema_version(),
            params: serde_json::to_value(params)?,
        })
    }

    /// Recover the parameter struct, refusing documents saved for another lab.
    pub fn into_params<P: DeserializeOwned>(self, expected: LabKind) -> LabResult<P> {
        if self.lab != expected {
            return Err(LabError::PresetMismatch {
                expected: expected.to_string(),
                found: self.lab.to_string(),
            });
        }
        Ok(serde_json::from_value(self.params)?)
    }

    pub fn from_json(contents: &str) -> LabResult<Self> {
        let doc: Self = serde_json::from_str(contents)?;
        if doc.schema_version == 0 {
            return Err(LabError::ConfigError(
                "preset schema_version must be >= 1".to_string(),
            ));
        }
        Ok(doc)
    }

    pub fn to_json(&self) -> LabResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
