// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Acoustic Attenuation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Depth attenuation of the acoustic beam through a layered stack.

use physiolab_tissue::TissueStack;
use physiolab_types::constants::{
    ATTENUATION_FREQUENCY_EXPONENT, DEPTH_STEP_CM, EFFECTIVE_FRACTION, PENETRATION_FRACTION,
};

/// Super-linear frequency factor applied to every attenuation coefficient.
pub fn frequency_factor(frequency_mhz: f64) -> f64 {
    frequency_mhz.max(0.0).powf(ATTENUATION_FREQUENCY_EXPONENT)
}

/// Accumulated loss from the surface to `depth_cm` [dB].
pub fn attenuation_db(stack: &TissueStack, frequency_mhz: f64, depth_cm: f64) -> f64 {
    let ff = frequency_factor(frequency_mhz);
    stack.path_integral(depth_cm, |layer| layer.attenuation_coefficient * ff)
}

/// Intensity at `depth_cm` relative to what entered the skin.
///
/// Past the top of an implant only the transmitted share survives.
pub fn relative_intensity(stack: &TissueStack, frequency_mhz: f64, depth_cm: f64) -> f64 {
    let db = attenuation_db(stack, frequency_mhz, depth_cm);
    let mut rel = 10f64.powf(-db / 10.0);
    if let Some(insert) = stack.implant() {
        if depth_cm > insert.depth_cm {
            rel *= (1.0 - insert.reflectivity).clamp(0.0, 1.0);
        }
    }
    rel
}

/// Scan depths on the fixed grid `0, step, 2·step, …, max_depth_cm`.
pub fn depth_grid(max_depth_cm: f64) -> impl Iterator<Item = f64> {
    let steps = if max_depth_cm.is_finite() && max_depth_cm > 0.0 {
        (max_depth_cm / DEPTH_STEP_CM).round() as usize
    } else {
        0
    };
    (0..=steps).map(|i| i as f64 * DEPTH_STEP_CM)
}

/// First scanned depth where the relative intensity has fallen to `fraction`.
/// Returns `max_depth_cm` when the beam never decays that far.
pub fn landmark_depth(
    stack: &TissueStack,
    frequency_mhz: f64,
    max_depth_cm: f64,
    fraction: f64,
) -> f64 {
    depth_grid(max_depth_cm)
        .find(|&d| relative_intensity(stack, frequency_mhz, d) <= fraction)
        .unwrap_or(max_depth_cm)
}

/// Depth where intensity drops to 10 % of the surface value.
pub fn penetration_depth_cm(stack: &TissueStack, frequency_mhz: f64, max_depth_cm: f64) -> f64 {
    landmark_depth(stack, frequency_mhz, max_depth_cm, PENETRATION_FRACTION)
}

/// Depth where intensity drops to 50 %: the therapeutic target.
pub fn effective_depth_cm(stack: &TissueStack, frequency_mhz: f64, max_depth_cm: f64) -> f64 {
    landmark_depth(stack, frequency_mhz, max_depth_cm, EFFECTIVE_FRACTION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use physiolab_tissue::{CustomStack, ImplantInsert, Scenario};
    use physiolab_types::constants::BLOCK_DEPTH_CM;

    fn forearm() -> TissueStack {
        Scenario::Forearm.build(BLOCK_DEPTH_CM).unwrap()
    }

    #[test]
    fn test_surface_is_unattenuated() {
        assert_eq!(relative_intensity(&forearm(), 1.0, 0.0), 1.0);
    }

    #[test]
    fn test_forearm_loss_at_bone_surface() {
        let stack = forearm();
        let db = attenuation_db(&stack, 1.0, 2.55);
        // skin 0.15·0.8 + fat 0.4·0.6 + muscle 2.0·1.0
        assert!((db - 2.36).abs() < 1e-9);
    }

    #[test]
    fn test_frequency_is_super_linear() {
        let stack = forearm();
        let low = attenuation_db(&stack, 1.0, 2.0);
        let high = attenuation_db(&stack, 3.0, 2.0);
        assert!(high > 3.0 * low);
    }

    #[test]
    fn test_landmarks_ordered() {
        let stack = forearm();
        let eff = effective_depth_cm(&stack, 1.0, BLOCK_DEPTH_CM);
        let pen = penetration_depth_cm(&stack, 1.0, BLOCK_DEPTH_CM);
        assert!(eff > 0.0);
        assert!(eff <= pen);
        assert!(pen <= BLOCK_DEPTH_CM);
        assert!(relative_intensity(&stack, 1.0, eff) <= 0.5);
    }

    #[test]
    fn test_higher_frequency_is_shallower() {
        let stack = Scenario::Shoulder.build(BLOCK_DEPTH_CM).unwrap();
        let one = effective_depth_cm(&stack, 1.0, BLOCK_DEPTH_CM);
        let three = effective_depth_cm(&stack, 3.0, BLOCK_DEPTH_CM);
        assert!(three < one);
    }

    #[test]
    fn test_implant_blocks_transmission() {
        let stack = Scenario::Custom(CustomStack {
            implant: Some(ImplantInsert::metal(1.0, 0.2)),
            ..CustomStack::default()
        })
        .build(BLOCK_DEPTH_CM)
        .unwrap();
        let before = relative_intensity(&stack, 1.0, 0.99);
        let after = relative_intensity(&stack, 1.0, 1.01);
        assert!(after < 0.2 * before);
    }

    #[test]
    fn test_depth_grid_spacing() {
        let grid: Vec<f64> = depth_grid(BLOCK_DEPTH_CM).collect();
        assert_eq!(grid.len(), 121);
        assert_eq!(grid[0], 0.0);
        assert!((grid[120] - BLOCK_DEPTH_CM).abs() < 1e-9);
    }
}
