// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Electric Field
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Surface current density, skin and target fields, lateral spread.
//!
//! `E = J / σ` at the skin, then an exponential decay along the depth
//! path in which fat is the dominant attenuator.

use physiolab_tissue::{TissueKind, TissueStack};

use crate::electrode::ElectrodeConfig;

/// Lateral spread gained per cm of electrode distance.
const SPREAD_PER_DISTANCE: f64 = 0.5;

/// Lateral spread gained per cm of electrode size.
const SPREAD_PER_SIZE: f64 = 0.6;

/// Field decay constant of each tissue [1/cm].
pub fn decay_per_cm(kind: TissueKind) -> f64 {
    match kind {
        TissueKind::Skin => 0.3,
        TissueKind::Fat => 0.8,
        TissueKind::Muscle => 0.25,
        TissueKind::Bone => 1.2,
        TissueKind::Implant => 0.0,
    }
}

/// Current density under one electrode [A/m²] for `intensity_ma` spread
/// over `area_cm2`.
pub fn surface_current_density_a_m2(intensity_ma: f64, area_cm2: f64) -> f64 {
    let area = area_cm2.max(1e-6);
    (intensity_ma * 1e-3) / (area * 1e-4)
}

/// Conductivity of the first layer of `kind`, or the kind default.
pub fn layer_conductivity(stack: &TissueStack, kind: TissueKind) -> f64 {
    stack
        .layers()
        .iter()
        .find(|l| l.kind == kind)
        .map_or_else(|| kind.conductivity_s_m(), |l| l.conductivity)
}

/// Skin-surface field [V/m].
pub fn skin_field_v_m(current_density_a_m2: f64, stack: &TissueStack) -> f64 {
    current_density_a_m2 / stack.conductivity_at(0.0).max(1e-9)
}

/// Stimulation target: middle of the muscle layer, or the top of the
/// terminal layer when the stack has no muscle.
pub fn target_depth_cm(stack: &TissueStack) -> f64 {
    let skin = stack.thickness_of(TissueKind::Skin);
    let fat = stack.thickness_of(TissueKind::Fat);
    let muscle = stack.thickness_of(TissueKind::Muscle);
    skin + fat + 0.5 * muscle
}

/// Integrated decay exponent from the surface down to `depth_cm`.
pub fn path_decay(stack: &TissueStack, depth_cm: f64) -> f64 {
    stack.path_integral(depth_cm, |layer| decay_per_cm(layer.kind))
}

/// Field at the target depth [V/m].
pub fn target_field_v_m(skin_field: f64, stack: &TissueStack, target_cm: f64) -> f64 {
    let sigma_skin = layer_conductivity(stack, TissueKind::Skin);
    let sigma_muscle = layer_conductivity(stack, TissueKind::Muscle);
    let ratio = sigma_skin / sigma_muscle.max(1e-9);
    skin_field * ratio * (-path_decay(stack, target_cm)).exp()
}

/// Lateral extent of the field [cm]; grows with spacing and with size.
pub fn field_spread_cm(electrode: &ElectrodeConfig) -> f64 {
    SPREAD_PER_DISTANCE * electrode.distance_cm() + SPREAD_PER_SIZE * electrode.size_cm()
}
