// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Errors
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use thiserror::Error;

/// Failures that stop a simulation call outright.
///
/// Risky parameter combinations are never errors; engines report them as
/// advisory messages next to a [`crate::state::RiskLevel`].
#[derive(Error, Debug)]
pub enum LabError {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Voxel count mismatch: expected {expected} (width*height*depth), got {actual}")]
    VoxelCountMismatch { expected: usize, actual: usize },

    #[error("Invalid tissue stack: {0}")]
    InvalidStack(String),

    #[error("Slice index {index} out of range for volume depth {depth}")]
    SliceOutOfRange { index: usize, depth: usize },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Preset is for the {found} lab, expected {expected}")]
    PresetMismatch { expected: String, found: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Array shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub type LabResult<T> = Result<T, LabError>;
