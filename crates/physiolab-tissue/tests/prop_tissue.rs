// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Property-Based Tests (proptest) for physiolab-tissue
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the stacked-with-clamped-overflow builder.

use physiolab_tissue::{StackBuilder, TissueKind};
use proptest::prelude::*;

proptest! {
    /// Whatever thicknesses are requested, the stack fills the block exactly,
    /// stays contiguous, and the terminal layer closes it.
    #[test]
    fn stack_fills_block_and_ends_in_terminal(
        skin in -1.0f64..3.0,
        fat in -1.0f64..5.0,
        muscle in -1.0f64..12.0,
        bone in 0.0f64..8.0,
        block in 0.5f64..10.0,
    ) {
        let stack = StackBuilder::new(block)
            .layer(TissueKind::Skin, skin)
            .layer(TissueKind::Fat, fat)
            .layer(TissueKind::Muscle, muscle)
            .terminal(TissueKind::Bone, bone)
            .build()
            .unwrap();

        let layers = stack.layers();
        prop_assert_eq!(layers.last().unwrap().kind, TissueKind::Bone);
        prop_assert!((stack.total_depth() - block).abs() < 1e-9);

        let mut top = 0.0;
        for layer in layers {
            prop_assert!(layer.thickness_cm >= 0.0);
            prop_assert!((layer.depth_from_surface_cm - top).abs() < 1e-9);
            top = layer.end_depth_cm();
        }

        let terminal = layers.last().unwrap().thickness_cm;
        prop_assert!(terminal + 1e-9 >= bone.min(block));
    }

    /// `layer_at` always returns a layer that covers the query depth or the terminal one.
    #[test]
    fn layer_at_covers_depth(depth in 0.0f64..8.0) {
        let stack = StackBuilder::new(6.0)
            .layer(TissueKind::Skin, 0.2)
            .layer(TissueKind::Fat, 0.8)
            .layer(TissueKind::Muscle, 2.0)
            .build()
            .unwrap();
        let layer = stack.layer_at(depth);
        let is_terminal = layer.kind == TissueKind::Bone;
        prop_assert!(layer.contains(depth) || is_terminal);
    }
}
