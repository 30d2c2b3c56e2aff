// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Beam Geometry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_types::constants::{
    MOVING_AREA_FACTOR, NEAR_FIELD_NARROWING_PER_MHZ, SOUND_SPEED_CM_US,
};
use serde::{Deserialize, Serialize};

use crate::params::{ThermalParams, TransducerMotion};

/// Near-field / far-field footprint of a plane circular transducer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamProfile {
    pub diameter_cm: f64,
    pub wavelength_cm: f64,
    /// Fresnel distance D²/4λ.
    pub near_field_length_cm: f64,
    pub near_field_width_cm: f64,
    /// Far-field half-angle.
    pub divergence_deg: f64,
}

impl BeamProfile {
    pub fn new(era_cm2: f64, frequency_mhz: f64) -> Self {
        let diameter = 2.0 * (era_cm2.max(0.0) / std::f64::consts::PI).sqrt();
        let wavelength = SOUND_SPEED_CM_US / frequency_mhz;
        let near_length = diameter * diameter / (4.0 * wavelength);
        let narrowing = (1.0 - NEAR_FIELD_NARROWING_PER_MHZ * (frequency_mhz - 1.0)).clamp(0.5, 1.0);
        let sin_theta = if diameter > 0.0 {
            (1.22 * wavelength / diameter).min(1.0)
        } else {
            1.0
        };
        BeamProfile {
            diameter_cm: diameter,
            wavelength_cm: wavelength,
            near_field_length_cm: near_length,
            near_field_width_cm: diameter * narrowing,
            divergence_deg: sin_theta.asin().to_degrees(),
        }
    }

    pub fn width_at(&self, depth_cm: f64) -> f64 {
        let beyond = depth_cm - self.near_field_length_cm;
        if beyond <= 0.0 {
            return self.near_field_width_cm;
        }
        self.near_field_width_cm + 2.0 * beyond * self.divergence_deg.to_radians().tan()
    }

    pub fn footprint_cm2(&self, depth_cm: f64) -> f64 {
        let r = 0.5 * self.width_at(depth_cm);
        std::f64::consts::PI * r * r
    }
}

/// Tissue area covered at `depth_cm`, widened by strokes when moving.
pub fn treated_area_cm2(beam: &BeamProfile, params: &ThermalParams, depth_cm: f64) -> f64 {
    let footprint = beam.footprint_cm2(depth_cm);
    match params.motion {
        TransducerMotion::Moving => footprint * MOVING_AREA_FACTOR,
        TransducerMotion::Stationary => footprint,
    }
}
