// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Property-Based Tests (proptest) for physiolab-mri
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the MRI engine.
//!
//! Covers: voxel-count invariant, signal bounds, slice bounds,
//! window mapping monotonicity.

use physiolab_mri::phantom::generate_phantom_with_dimensions;
use physiolab_mri::{
    evaluate_signal, extract_slice, AcquisitionParams, MriTissue, PhantomKind, SequenceKind,
    Volume, Voxel, WindowLevel,
};
use physiolab_types::error::LabError;
use proptest::prelude::*;

fn kind_strategy() -> impl Strategy<Value = PhantomKind> {
    prop_oneof![
        Just(PhantomKind::Brain),
        Just(PhantomKind::Knee),
        Just(PhantomKind::Abdomen),
    ]
}

fn sequence_strategy() -> impl Strategy<Value = SequenceKind> {
    prop_oneof![
        Just(SequenceKind::SpinEcho),
        Just(SequenceKind::GradientEcho),
        Just(SequenceKind::InversionRecovery),
    ]
}

proptest! {
    /// A volume is built only when the voxel count matches exactly.
    #[test]
    fn volume_requires_exact_voxel_count(
        w in 0usize..6,
        h in 0usize..6,
        d in 0usize..6,
        count in 0usize..250,
    ) {
        let result = Volume::from_voxels(w, h, d, vec![Voxel::new(MriTissue::Muscle); count]);
        let valid = w > 0 && h > 0 && d > 0 && count == w * h * d;
        match result {
            Ok(volume) => {
                prop_assert!(valid);
                prop_assert_eq!(volume.len(), w * h * d);
            }
            Err(LabError::InvalidGeometry(_)) => prop_assert!(w == 0 || h == 0 || d == 0),
            Err(LabError::VoxelCountMismatch { expected, actual }) => {
                prop_assert_eq!(expected, w * h * d);
                prop_assert_eq!(actual, count);
                prop_assert!(!valid);
            }
            Err(other) => prop_assert!(false, "unexpected error {}", other),
        }
    }

    /// Every generated phantom labels every voxel.
    #[test]
    fn phantoms_fill_their_grid(
        kind in kind_strategy(),
        w in 1usize..24,
        h in 1usize..24,
        d in 1usize..8,
    ) {
        let volume = generate_phantom_with_dimensions(kind, w, h, d).unwrap();
        prop_assert_eq!(volume.len(), w * h * d);
        let labelled: usize = volume.label_histogram().values().sum();
        prop_assert_eq!(labelled, w * h * d);
    }

    /// Signal is within [0, 1] and the image within one slice per depth.
    #[test]
    fn signal_and_slices_stay_bounded(
        kind in kind_strategy(),
        tr in -100.0f64..6000.0,
        te in -10.0f64..300.0,
        flip in -180.0f64..360.0,
        sequence in sequence_strategy(),
    ) {
        let volume = generate_phantom_with_dimensions(kind, 16, 16, 4).unwrap();
        let params = AcquisitionParams { tr_ms: tr, te_ms: te, flip_angle_deg: flip, sequence };
        let result = evaluate_signal(&volume, &params);
        prop_assert!(result.min >= 0.0);
        prop_assert!(result.max <= 1.0);
        prop_assert!(result.mean >= result.min && result.mean <= result.max);
        for z in 0..result.depth() {
            let image = extract_slice(&result.signal, z, result.auto_window()).unwrap();
            prop_assert_eq!(image.to_luma_alpha().len(), 2 * 16 * 16);
        }
        prop_assert!(extract_slice(&result.signal, result.depth(), result.auto_window()).is_err());
    }

    /// Brighter signal never maps to a darker pixel.
    #[test]
    fn window_mapping_is_monotone(
        window in -1.0f64..2.0,
        level in -0.5f64..1.5,
        a in 0.0f64..1.0,
        b in 0.0f64..1.0,
    ) {
        let wl = WindowLevel::new(window, level);
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(wl.map(lo) <= wl.map(hi));
    }
}
