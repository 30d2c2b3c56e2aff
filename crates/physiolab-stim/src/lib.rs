// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Stimulation Lab
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Electrical stimulation lab: field, activation, comfort and risk.
//!
//! The engine is a pure function of [`FieldParams`] and a
//! [`physiolab_tissue::TissueStack`]; it never fails for out-of-range
//! numbers and clamps bounded outputs instead.

pub mod activation;
pub mod electrode;
pub mod engine;
pub mod field;
pub mod heatmap;
pub mod params;
pub mod risk;

pub use electrode::{ElectrodeConfig, ElectrodeShape, PlacementPreset};
pub use engine::{simulate_field, simulate_field_traced, FieldResult};
pub use heatmap::{FieldGrid, FieldSample};
pub use params::{FieldParams, WaveformMode};
