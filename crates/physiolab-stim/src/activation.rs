// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Neural Activation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Activation depth and area, sensory/motor split and comfort.

use physiolab_tissue::{TissueKind, TissueStack};
use physiolab_types::state::{clamp_score, clamp_unit};

use crate::electrode::ElectrodeConfig;
use crate::field::field_spread_cm;
use crate::params::FieldParams;

/// Activation depth reached at full drive over 1 cm-equivalent spacing [cm].
const MAX_ACTIVATION_DEPTH_CM: f64 = 4.0;

/// Fat penalty on activation [1/cm].
const FAT_ACTIVATION_PENALTY: f64 = 0.35;

/// Share of the squared field spread added to the contact footprint.
const SPREAD_AREA_SHARE: f64 = 0.5;

/// Inter-electrode distance treated as neutral for the sensory/motor bias [cm].
const NEUTRAL_DISTANCE_CM: f64 = 7.0;

/// Sensory/motor weight shift per unit of distance bias.
const DISTANCE_BIAS_WEIGHT: f64 = 0.15;

/// Contact area under which small electrodes become uncomfortable [cm²].
const COMFORT_AREA_CM2: f64 = 9.0;

/// Distance under which electrodes sit uncomfortably close [cm].
const COMFORT_DISTANCE_CM: f64 = 4.0;

/// Skin thinner than this is treated as thin [cm].
pub const THIN_SKIN_CM: f64 = 0.15;

/// Bone shallower than this is treated as shallow [cm].
pub const SHALLOW_BONE_CM: f64 = 1.5;

/// Combined stimulation drive in [0, 1] from intensity and pulse width.
pub fn drive(params: &FieldParams) -> f64 {
    params.normalized_intensity() * (0.6 + 0.4 * params.normalized_pulse_width())
}

/// Deeper penetration with wider spacing.
pub fn depth_multiplier(electrode: &ElectrodeConfig) -> f64 {
    0.7 + 0.06 * electrode.distance_cm()
}

/// Wider activation footprint with wider spacing.
pub fn area_multiplier(electrode: &ElectrodeConfig) -> f64 {
    0.6 + 0.1 * electrode.distance_cm()
}

pub fn fat_penalty(stack: &TissueStack) -> f64 {
    (-FAT_ACTIVATION_PENALTY * stack.thickness_of(TissueKind::Fat)).exp()
}

/// Estimated depth of neural activation [cm], never past the stack.
pub fn activation_depth_cm(params: &FieldParams, stack: &TissueStack) -> f64 {
    let depth = MAX_ACTIVATION_DEPTH_CM
        * drive(params)
        * depth_multiplier(&params.electrode)
        * fat_penalty(stack);
    depth.clamp(0.0, stack.total_depth())
}

/// Estimated surface extent of activation [cm²].
pub fn activation_area_cm2(params: &FieldParams, stack: &TissueStack) -> f64 {
    let spread = field_spread_cm(&params.electrode);
    let footprint = params.electrode.contact_area_cm2() + SPREAD_AREA_SHARE * spread * spread;
    footprint * drive(params) * area_multiplier(&params.electrode) * fat_penalty(stack)
}

/// Signed distance bias in [-1, 1]: negative favours superficial sensory
/// fibres, positive favours deep motor fibres.
pub fn distance_bias(electrode: &ElectrodeConfig) -> f64 {
    ((electrode.distance_cm() - NEUTRAL_DISTANCE_CM) / 5.0).clamp(-1.0, 1.0)
}

/// (sensory, motor) activation scores in [0, 100].
pub fn sensory_motor_scores(params: &FieldParams, stack: &TissueStack) -> (f64, f64) {
    let (sensory_base, motor_base) = params.mode.base_weights();
    let bias = distance_bias(&params.electrode);
    let sensory_w = (sensory_base - DISTANCE_BIAS_WEIGHT * bias).max(0.0);
    let motor_w = (motor_base + DISTANCE_BIAS_WEIGHT * bias).max(0.0);

    let d = drive(params);
    let sensory = 100.0 * sensory_w * clamp_unit(2.0 * d);
    let motor = 160.0 * motor_w * clamp_unit(1.5 * d - 0.1) * fat_penalty(stack);
    (clamp_score(sensory), clamp_score(motor))
}

/// Comfort in [0, 100]: 100 minus accumulated discomfort.
pub fn comfort_score(params: &FieldParams, stack: &TissueStack) -> f64 {
    let n_i = params.normalized_intensity();
    let n_pw = params.normalized_pulse_width();
    let electrode = &params.electrode;

    let mut local = 0.0;
    local += (COMFORT_AREA_CM2 - electrode.contact_area_cm2()).max(0.0) * 2.0;
    local += (COMFORT_DISTANCE_CM - electrode.distance_cm()).max(0.0) * 6.0;
    if stack.thickness_of(TissueKind::Skin) < THIN_SKIN_CM {
        local += 10.0;
    }
    if let Some(bone) = stack.depth_of(TissueKind::Bone) {
        local += (SHALLOW_BONE_CM - bone).max(0.0) * 12.0;
    }

    // Local factors only hurt once current is flowing.
    let discomfort = 35.0 * n_i + 15.0 * n_pw + local * (0.3 + 0.7 * n_i);
    clamp_score(100.0 - discomfort)
}
