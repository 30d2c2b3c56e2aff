// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Bioheat Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Steady-state bioheat balance evolved toward equilibrium in time.
//!
//! Absorbed acoustic power is balanced against a perfusion sink to give a
//! steady-state rise, softly saturated at [`MAX_STEADY_RISE_C`]. The rise
//! is approached with a first-order time constant scaled by the local heat
//! capacity. Every temperature leaving this module is clamped to
//! `[BODY_TEMPERATURE_C, TEMPERATURE_CEILING_C]`.

use physiolab_tissue::{TissueLayer, TissueStack};
use physiolab_types::constants::{
    BODY_TEMPERATURE_C, COUPLING_LOSS_DEPTH_CM, COUPLING_LOSS_HEATING_C, HEATING_TIME_CONSTANT_S,
    MAX_STEADY_RISE_C, MOVING_HEATING_FACTOR, PERFUSION_SINK_W_CM3_C, TEMPERATURE_CEILING_C,
};

use crate::attenuation::{frequency_factor, relative_intensity};
use crate::params::{ThermalParams, TransducerMotion};

const NEPER_PER_DB: f64 = 1.0 / 8.686;

/// Perfusion factors below this are treated as this, so avascular layers
/// still shed some heat.
const MIN_PERFUSION: f64 = 0.05;

pub fn clamp_temperature(t: f64) -> f64 {
    if t.is_nan() {
        return BODY_TEMPERATURE_C;
    }
    t.clamp(BODY_TEMPERATURE_C, TEMPERATURE_CEILING_C)
}

/// Absorbed power density [W/cm³] for a local intensity [W/cm²].
pub fn heat_generation_w_cm3(layer: &TissueLayer, frequency_mhz: f64, local_w_cm2: f64) -> f64 {
    let alpha_np = layer.attenuation_coefficient * frequency_factor(frequency_mhz) * NEPER_PER_DB;
    2.0 * alpha_np * local_w_cm2.max(0.0)
}

/// Equilibrium rise above body temperature [°C].
pub fn steady_state_rise_c(layer: &TissueLayer, heat_w_cm3: f64) -> f64 {
    let sink = PERFUSION_SINK_W_CM3_C * layer.perfusion_factor.max(MIN_PERFUSION);
    let raw = heat_w_cm3.max(0.0) / sink;
    MAX_STEADY_RISE_C * raw / (raw + MAX_STEADY_RISE_C)
}

/// Fraction of the steady-state rise reached after `seconds`.
pub fn time_response(layer: &TissueLayer, seconds: f64) -> f64 {
    let tau = HEATING_TIME_CONSTANT_S * layer.heat_capacity_factor.max(f64::EPSILON);
    1.0 - (-seconds.max(0.0) / tau).exp()
}

/// Heating model bound to one parameter set and stack.
#[derive(Debug, Clone, Copy)]
pub struct ThermalModel<'a> {
    stack: &'a TissueStack,
    frequency_mhz: f64,
    entering_w_cm2: f64,
    seconds: f64,
    /// Duty fraction times the motion factor.
    exposure: f64,
    coupling_loss_c: f64,
}

impl<'a> ThermalModel<'a> {
    pub fn new(params: &ThermalParams, stack: &'a TissueStack) -> Self {
        let motion = match params.motion {
            TransducerMotion::Moving => MOVING_HEATING_FACTOR,
            TransducerMotion::Stationary => 1.0,
        };
        let lost = (1.0 - params.coupling.efficiency()).max(0.0);
        ThermalModel {
            stack,
            frequency_mhz: params.frequency(),
            entering_w_cm2: params.coupled_intensity(),
            seconds: params.duration_seconds(),
            exposure: params.effective_duty_fraction() * motion,
            coupling_loss_c: COUPLING_LOSS_HEATING_C * lost * params.intensity(),
        }
    }

    pub fn relative_intensity(&self, depth_cm: f64) -> f64 {
        relative_intensity(self.stack, self.frequency_mhz, depth_cm)
    }

    /// Rise from absorbed acoustic energy alone, before clamping.
    pub fn acoustic_rise_c(&self, depth_cm: f64) -> f64 {
        let layer = self.stack.layer_at(depth_cm);
        let local = self.entering_w_cm2 * self.relative_intensity(depth_cm);
        let q = heat_generation_w_cm3(layer, self.frequency_mhz, local);
        steady_state_rise_c(layer, q) * time_response(layer, self.seconds) * self.exposure
    }

    /// Rise from energy lost at a poorly coupled transducer face, fading
    /// just below the skin.
    pub fn coupling_rise_c(&self, depth_cm: f64) -> f64 {
        let surface = self.stack.layer_at(0.0);
        let fade = (-depth_cm.max(0.0) / COUPLING_LOSS_DEPTH_CM).exp();
        self.coupling_loss_c * fade * time_response(surface, self.seconds) * self.exposure
    }

    pub fn temperature_at(&self, depth_cm: f64) -> f64 {
        clamp_temperature(
            BODY_TEMPERATURE_C + self.acoustic_rise_c(depth_cm) + self.coupling_rise_c(depth_cm),
        )
    }

    pub fn surface_temperature(&self) -> f64 {
        self.temperature_at(0.0)
    }
}
