// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Bone Interaction
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Reflection and periosteal heating at the first hard boundary.

use physiolab_tissue::{TissueKind, TissueStack};
use physiolab_types::constants::{
    NEGLIGIBLE_INTENSITY, PERIOSTEAL_HOT_C, PERIOSTEAL_HOT_GAIN, PERIOSTEAL_PROXIMITY_CM,
};
use physiolab_types::state::clamp_unit;
use serde::{Deserialize, Serialize};

use crate::thermal::ThermalModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    Bone,
    Implant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoneInteraction {
    pub boundary: BoundaryKind,
    pub boundary_depth_cm: f64,
    /// Relative intensity arriving at the boundary.
    pub incident_intensity: f64,
    /// Intensity reflection fraction.
    pub reflection_fraction: f64,
    pub boundary_temperature_c: f64,
    /// 0–1
    pub periosteal_factor: f64,
}

/// Intensity reflection coefficient between two acoustic impedances.
pub fn reflection_coefficient(z1: f64, z2: f64) -> f64 {
    let sum = z1 + z2;
    if sum <= 0.0 {
        return 0.0;
    }
    let r = (z2 - z1) / sum;
    r * r
}

/// Shallowest bone top or implant, with its reflection fraction.
fn first_boundary(stack: &TissueStack) -> Option<(BoundaryKind, f64, f64)> {
    let layers = stack.layers();
    let bone = layers
        .iter()
        .position(|l| l.kind == TissueKind::Bone)
        .map(|i| {
            let above = if i == 0 {
                TissueKind::Skin.acoustic_impedance_mrayl()
            } else {
                layers[i - 1].acoustic_impedance
            };
            let r = reflection_coefficient(above, layers[i].acoustic_impedance);
            (BoundaryKind::Bone, layers[i].depth_from_surface_cm, r)
        });
    let implant = stack
        .implant()
        .map(|insert| (BoundaryKind::Implant, insert.depth_cm, clamp_unit(insert.reflectivity)));
    match (bone, implant) {
        (Some(b), Some(i)) => Some(if i.1 < b.1 { i } else { b }),
        (b, i) => b.or(i),
    }
}

/// Evaluate the boundary, if one is reached by non-negligible intensity.
pub fn bone_interaction(
    stack: &TissueStack,
    model: &ThermalModel<'_>,
    peak_depth_cm: f64,
) -> Option<BoneInteraction> {
    let (boundary, depth, reflection) = first_boundary(stack)?;
    let incident = model.relative_intensity(depth);
    if incident < NEGLIGIBLE_INTENSITY {
        return None;
    }
    let temperature = model.temperature_at(depth);
    let proximity = (-(peak_depth_cm - depth).abs() / PERIOSTEAL_PROXIMITY_CM).exp();
    let mut factor = incident * (0.5 + 0.5 * reflection) * proximity;
    if temperature > PERIOSTEAL_HOT_C {
        factor *= PERIOSTEAL_HOT_GAIN;
    }
    Some(BoneInteraction {
        boundary,
        boundary_depth_cm: depth,
        incident_intensity: incident,
        reflection_fraction: reflection,
        boundary_temperature_c: temperature,
        periosteal_factor: clamp_unit(factor),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ThermalParams;
    use physiolab_tissue::{CustomStack, ImplantInsert, Scenario};
    use physiolab_types::constants::BLOCK_DEPTH_CM;

    #[test]
    fn test_muscle_bone_reflection() {
        let r = reflection_coefficient(1.7, 7.8);
        assert!((r - (6.1f64 / 9.5).powi(2)).abs() < 1e-12);
        assert_eq!(reflection_coefficient(1.5, 1.5), 0.0);
    }

    #[test]
    fn test_forearm_bone_is_reached() {
        let stack = Scenario::Forearm.build(BLOCK_DEPTH_CM).unwrap();
        let params = ThermalParams::default();
        let model = ThermalModel::new(&params, &stack);
        let hit = bone_interaction(&stack, &model, 2.55).unwrap();
        assert_eq!(hit.boundary, BoundaryKind::Bone);
        assert!((hit.boundary_depth_cm - 2.55).abs() < 1e-9);
        assert!(hit.incident_intensity > 0.5);
        assert!(hit.periosteal_factor > 0.3);
        assert!(hit.periosteal_factor <= 1.0);
    }

    #[test]
    fn test_distant_hotspot_lowers_factor() {
        let stack = Scenario::Forearm.build(BLOCK_DEPTH_CM).unwrap();
        let params = ThermalParams::default();
        let model = ThermalModel::new(&params, &stack);
        let near = bone_interaction(&stack, &model, 2.55).unwrap();
        let far = bone_interaction(&stack, &model, 0.5).unwrap();
        assert!(far.periosteal_factor < near.periosteal_factor);
    }

    #[test]
    fn test_shallow_implant_wins() {
        let stack = Scenario::Custom(CustomStack {
            implant: Some(ImplantInsert::metal(1.0, 0.2)),
            ..CustomStack::default()
        })
        .build(BLOCK_DEPTH_CM)
        .unwrap();
        let params = ThermalParams::default();
        let model = ThermalModel::new(&params, &stack);
        let hit = bone_interaction(&stack, &model, 1.0).unwrap();
        assert_eq!(hit.boundary, BoundaryKind::Implant);
        assert!((hit.reflection_fraction - 0.86).abs() < 1e-12);
    }

    #[test]
    fn test_deep_bone_unreached() {
        let stack = Scenario::Custom(CustomStack {
            skin_cm: 0.2,
            fat_cm: 1.0,
            muscle_cm: 4.0,
            bone_cm: Some(0.5),
            implant: None,
        })
        .build(BLOCK_DEPTH_CM)
        .unwrap();
        let params = ThermalParams {
            frequency_mhz: 3.0,
            ..ThermalParams::default()
        };
        let model = ThermalModel::new(&params, &stack);
        assert!(bone_interaction(&stack, &model, 1.0).is_none());
    }

    #[test]
    fn test_no_bone_no_interaction() {
        let stack = Scenario::Custom(CustomStack {
            bone_cm: None,
            ..CustomStack::default()
        })
        .build(BLOCK_DEPTH_CM)
        .unwrap();
        let model = ThermalModel::new(&ThermalParams::default(), &stack);
        assert!(bone_interaction(&stack, &model, 1.0).is_none());
    }
}
