// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Stimulation Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_tissue::TissueStack;
use physiolab_types::constants::BLOCK_DEPTH_CM;
use physiolab_types::state::RiskAssessment;
use physiolab_types::trace::{NullTrace, TraceEvent, TraceSink};
use serde::{Deserialize, Serialize};

use crate::activation::{
    activation_area_cm2, activation_depth_cm, comfort_score, drive, sensory_motor_scores,
};
use crate::field::{
    field_spread_cm, skin_field_v_m, surface_current_density_a_m2, target_depth_cm,
    target_field_v_m,
};
use crate::heatmap::{field_grid, FieldGrid};
use crate::params::FieldParams;
use crate::risk::assess_risk;

/// Everything the stimulation lab displays for one parameter set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResult {
    pub surface_current_density_a_m2: f64,
    pub field_skin_v_m: f64,
    pub field_target_v_m: f64,
    pub target_depth_cm: f64,
    pub field_spread_cm: f64,
    pub activation_depth_cm: f64,
    pub activation_area_cm2: f64,
    /// 0–100
    pub sensory_activation: f64,
    /// 0–100
    pub motor_activation: f64,
    /// 0–100
    pub comfort: f64,
    /// 0–100
    pub risk_score: f64,
    pub risk: RiskAssessment,
    pub charge_per_pulse_uc: f64,
    pub average_current_ma: f64,
    pub heatmap: FieldGrid,
}

/// Run the stimulation model.
pub fn simulate_field(params: &FieldParams, stack: &TissueStack) -> FieldResult {
    simulate_field_traced(params, stack, &NullTrace)
}

/// Run the stimulation model, reporting intermediate values to `trace`.
pub fn simulate_field_traced(
    params: &FieldParams,
    stack: &TissueStack,
    trace: &dyn TraceSink,
) -> FieldResult {
    let area = params.electrode.contact_area_cm2();
    let j = surface_current_density_a_m2(params.intensity(), area);
    let e_skin = skin_field_v_m(j, stack);
    let target = target_depth_cm(stack);
    let e_target = target_field_v_m(e_skin, stack, target);
    let spread = field_spread_cm(&params.electrode);
    trace.record(
        TraceEvent::new("stim.field")
            .with("contact_area_cm2", area)
            .with("current_density_a_m2", j)
            .with("field_skin_v_m", e_skin)
            .with("target_depth_cm", target)
            .with("field_target_v_m", e_target),
    );

    let act_depth = activation_depth_cm(params, stack);
    let act_area = activation_area_cm2(params, stack);
    let (sensory, motor) = sensory_motor_scores(params, stack);
    let comfort = comfort_score(params, stack);
    trace.record(
        TraceEvent::new("stim.activation")
            .with("drive", drive(params))
            .with("activation_depth_cm", act_depth)
            .with("activation_area_cm2", act_area)
            .with("sensory", sensory)
            .with("motor", motor)
            .with("comfort", comfort),
    );

    let risk = assess_risk(params, stack);
    trace.record(
        TraceEvent::new("stim.risk")
            .with("score", risk.score)
            .with("factors", risk.factors.len() as f64),
    );

    let heatmap = field_grid(params, stack, BLOCK_DEPTH_CM);

    FieldResult {
        surface_current_density_a_m2: j,
        field_skin_v_m: e_skin,
        field_target_v_m: e_target,
        target_depth_cm: target,
        field_spread_cm: spread,
        activation_depth_cm: act_depth,
        activation_area_cm2: act_area,
        sensory_activation: sensory,
        motor_activation: motor,
        comfort,
        risk_score: risk.score,
        risk: risk.assessment,
        charge_per_pulse_uc: params.charge_per_pulse_uc(),
        average_current_ma: params.average_current_ma(),
        heatmap,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::electrode::{ElectrodeConfig, ElectrodeShape, PlacementPreset};
    use physiolab_tissue::{CustomStack, Scenario};
    use physiolab_types::state::RiskLevel;
    use physiolab_types::trace::CollectingTrace;

    #[test]
    fn test_thin_skin_shallow_bone_high_intensity_is_high_risk() {
        let params = FieldParams {
            intensity_ma: 80.0,
            pulse_width_us: 400.0,
            frequency_hz: 50.0,
            electrode: ElectrodeConfig::new(
                2.0,
                5.0,
                ElectrodeShape::Rectangular,
                PlacementPreset::Forearm,
            ),
            ..FieldParams::default()
        };
        let stack = Scenario::Custom(CustomStack {
            skin_cm: 0.1,
            fat_cm: 0.3,
            muscle_cm: 0.6,
            bone_cm: Some(1.0),
            implant: None,
        })
        .build(BLOCK_DEPTH_CM)
        .unwrap();

        let result = simulate_field(&params, &stack);
        assert_eq!(result.risk.level, RiskLevel::High);
        assert!(result
            .risk
            .messages
            .iter()
            .any(|m| m.contains("periosteal")));
        assert!(result.risk.messages.len() <= 3);
    }

    #[test]
    fn test_results_are_deterministic() {
        let stack = Scenario::Knee.build(BLOCK_DEPTH_CM).unwrap();
        let params = FieldParams::default();
        let a = simulate_field(&params, &stack);
        let b = simulate_field(&params, &stack);
        assert_eq!(a, b);
    }

    #[test]
    fn test_target_field_below_skin_field() {
        let stack = Scenario::Shoulder.build(BLOCK_DEPTH_CM).unwrap();
        let result = simulate_field(&FieldParams::default(), &stack);
        assert!(result.field_target_v_m < result.field_skin_v_m);
        assert!(result.field_target_v_m > 0.0);
    }

    #[test]
    fn test_trace_does_not_change_result() {
        let stack = Scenario::Forearm.build(BLOCK_DEPTH_CM).unwrap();
        let params = FieldParams::default();
        let sink = CollectingTrace::new();
        let traced = simulate_field_traced(&params, &stack, &sink);
        assert_eq!(traced, simulate_field(&params, &stack));
        let stages: Vec<_> = sink.events().iter().map(|e| e.stage).collect();
        assert_eq!(stages, vec!["stim.field", "stim.activation", "stim.risk"]);
        let field = sink.stage("stim.field").unwrap();
        assert_eq!(field.value("field_skin_v_m"), Some(traced.field_skin_v_m));
    }

    #[test]
    fn test_result_serialises() {
        let stack = Scenario::Forearm.build(BLOCK_DEPTH_CM).unwrap();
        let result = simulate_field(&FieldParams::default(), &stack);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"risk_score\""));
    }
}
