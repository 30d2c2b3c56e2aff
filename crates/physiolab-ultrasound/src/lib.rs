// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Ultrasound Lab
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Therapeutic ultrasound lab: attenuation, beam, heating, dose and risk.

pub mod attenuation;
pub mod beam;
pub mod bone;
pub mod dose;
pub mod engine;
pub mod params;
pub mod risk;
pub mod thermal;

pub use bone::{BoneInteraction, BoundaryKind};
pub use engine::{
    simulate_thermal, simulate_thermal_traced, simulate_thermal_with_stack,
    simulate_thermal_with_stack_traced, DepthSample, ThermalResult,
};
pub use params::{CouplingQuality, DoseCategory, EmissionMode, ThermalParams, TransducerMotion};
