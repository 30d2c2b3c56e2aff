// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Property-Based Tests (proptest) for physiolab-stim
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for the stimulation engine.
//!
//! Covers: score clamping, determinism, distance monotonicity,
//! electrode clamping.

use physiolab_stim::{
    simulate_field, ElectrodeConfig, ElectrodeShape, FieldParams, PlacementPreset, WaveformMode,
};
use physiolab_tissue::{CustomStack, Scenario};
use proptest::prelude::*;

fn mode_strategy() -> impl Strategy<Value = WaveformMode> {
    prop_oneof![
        Just(WaveformMode::Conventional),
        Just(WaveformMode::AcupunctureLike),
        Just(WaveformMode::Burst),
        Just(WaveformMode::Modulated),
    ]
}

proptest! {
    /// Bounded outputs stay inside [0, 100] for arbitrary, even absurd, inputs.
    #[test]
    fn scores_stay_bounded(
        intensity in -50.0f64..500.0,
        pulse in -100.0f64..2000.0,
        freq in 0.0f64..500.0,
        distance in -5.0f64..30.0,
        size in -1.0f64..20.0,
        skin in 0.0f64..0.5,
        fat in 0.0f64..3.0,
        muscle in 0.0f64..5.0,
        mode in mode_strategy(),
    ) {
        let params = FieldParams {
            frequency_hz: freq,
            pulse_width_us: pulse,
            intensity_ma: intensity,
            mode,
            electrode: ElectrodeConfig::new(distance, size, ElectrodeShape::Circular, PlacementPreset::Forearm),
        };
        let stack = Scenario::Custom(CustomStack {
            skin_cm: skin,
            fat_cm: fat,
            muscle_cm: muscle,
            bone_cm: Some(0.5),
            implant: None,
        })
        .build(6.0)
        .unwrap();
        let r = simulate_field(&params, &stack);
        for v in [r.comfort, r.risk_score, r.sensory_activation, r.motor_activation] {
            prop_assert!((0.0..=100.0).contains(&v), "score out of range: {}", v);
        }
        prop_assert!(r.heatmap.values.iter().all(|v| (0.0..=1.0).contains(v)));
        prop_assert!(r.risk.messages.len() <= 3);
        prop_assert!(r.activation_depth_cm >= 0.0);
    }

    /// Identical inputs produce identical results.
    #[test]
    fn simulation_is_deterministic(intensity in 0.0f64..100.0, distance in 2.0f64..12.0) {
        let mut params = FieldParams { intensity_ma: intensity, ..FieldParams::default() };
        params.electrode = params.electrode.with_distance(distance);
        let stack = Scenario::Forearm.build(6.0).unwrap();
        prop_assert_eq!(simulate_field(&params, &stack), simulate_field(&params, &stack));
    }

    /// Wider spacing strictly enlarges the activated area and moves the
    /// sensory/motor balance towards motor.
    #[test]
    fn distance_increases_area_and_motor_bias(
        intensity in 20.0f64..60.0,
        d1 in 2.0f64..11.0,
        gap in 0.2f64..4.0,
    ) {
        let d2 = (d1 + gap).min(12.0);
        prop_assume!(d2 > d1);
        let stack = Scenario::Forearm.build(6.0).unwrap();
        let mut near = FieldParams { intensity_ma: intensity, ..FieldParams::default() };
        near.electrode = near.electrode.with_distance(d1);
        let mut far = near.clone();
        far.electrode = far.electrode.with_distance(d2);

        let rn = simulate_field(&near, &stack);
        let rf = simulate_field(&far, &stack);
        prop_assert!(rf.activation_area_cm2 > rn.activation_area_cm2);
        prop_assert!(rf.motor_activation > rn.motor_activation);
        prop_assert!(rf.sensory_activation < rn.sensory_activation);
    }
}
