// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Ultrasound Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_tissue::TissueStack;
use physiolab_types::constants::BLOCK_DEPTH_CM;
use physiolab_types::error::LabResult;
use physiolab_types::state::RiskAssessment;
use physiolab_types::trace::{NullTrace, TraceEvent, TraceSink};
use serde::{Deserialize, Serialize};

use crate::attenuation::{depth_grid, effective_depth_cm, penetration_depth_cm};
use crate::beam::{treated_area_cm2, BeamProfile};
use crate::bone::{bone_interaction, BoneInteraction};
use crate::dose::{cem43, cumulative_cem43};
use crate::params::{DoseCategory, ThermalParams};
use crate::risk::{assess_risk, RiskInputs};
use crate::thermal::ThermalModel;

/// One point of the depth profile chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthSample {
    pub depth_cm: f64,
    pub relative_intensity: f64,
    pub temperature_c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThermalResult {
    /// Intensity entering the skin after coupling losses [W/cm²].
    pub effective_intensity_w_cm2: f64,
    pub power_w: f64,
    pub dose_j_cm2: f64,
    pub energy_j: f64,
    pub dose_category: DoseCategory,
    pub penetration_depth_cm: f64,
    pub effective_depth_cm: f64,
    pub beam: BeamProfile,
    pub treated_area_cm2: f64,
    pub surface_temperature_c: f64,
    pub target_temperature_c: f64,
    pub peak_temperature_c: f64,
    pub peak_depth_cm: f64,
    pub thermal_dose_cem43: f64,
    pub cumulative_dose_cem43: f64,
    pub bone: Option<BoneInteraction>,
    pub risk: RiskAssessment,
    pub profile: Vec<DepthSample>,
}

/// Run the ultrasound model on the scenario named in `params`.
pub fn simulate_thermal(params: &ThermalParams) -> LabResult<ThermalResult> {
    simulate_thermal_traced(params, &NullTrace)
}

pub fn simulate_thermal_traced(
    params: &ThermalParams,
    trace: &dyn TraceSink,
) -> LabResult<ThermalResult> {
    let stack = params.scenario.build(BLOCK_DEPTH_CM)?;
    Ok(simulate_thermal_with_stack_traced(params, &stack, trace))
}

/// Run the ultrasound model on an explicit stack, ignoring `params.scenario`.
pub fn simulate_thermal_with_stack(params: &ThermalParams, stack: &TissueStack) -> ThermalResult {
    simulate_thermal_with_stack_traced(params, stack, &NullTrace)
}

pub fn simulate_thermal_with_stack_traced(
    params: &ThermalParams,
    stack: &TissueStack,
    trace: &dyn TraceSink,
) -> ThermalResult {
    let frequency = params.frequency();
    let power = params.power_w();
    let dose = params.dose_j_cm2();
    let category = DoseCategory::from_dose(dose);
    trace.record(
        TraceEvent::new("ultrasound.output")
            .with("coupled_intensity_w_cm2", params.coupled_intensity())
            .with("power_w", power)
            .with("dose_j_cm2", dose)
            .with("duty", params.effective_duty_fraction()),
    );

    let penetration = penetration_depth_cm(stack, frequency, BLOCK_DEPTH_CM);
    let effective = effective_depth_cm(stack, frequency, BLOCK_DEPTH_CM);
    let beam = BeamProfile::new(params.era(), frequency);
    let area = treated_area_cm2(&beam, params, effective);
    trace.record(
        TraceEvent::new("ultrasound.beam")
            .with("penetration_depth_cm", penetration)
            .with("effective_depth_cm", effective)
            .with("near_field_length_cm", beam.near_field_length_cm)
            .with("treated_area_cm2", area),
    );

    let model = ThermalModel::new(params, stack);
    let profile: Vec<DepthSample> = depth_grid(BLOCK_DEPTH_CM)
        .map(|depth_cm| DepthSample {
            depth_cm,
            relative_intensity: model.relative_intensity(depth_cm),
            temperature_c: model.temperature_at(depth_cm),
        })
        .collect();
    let surface = model.surface_temperature();
    let target = model.temperature_at(effective);
    let (peak_depth, peak) = profile
        .iter()
        .fold((0.0, f64::NEG_INFINITY), |(d, t), s| {
            if s.temperature_c > t {
                (s.depth_cm, s.temperature_c)
            } else {
                (d, t)
            }
        });
    trace.record(
        TraceEvent::new("ultrasound.thermal")
            .with("surface_c", surface)
            .with("target_c", target)
            .with("peak_c", peak)
            .with("peak_depth_cm", peak_depth),
    );

    let minutes = params.duration_minutes();
    let peak_dose = cem43(peak, minutes);
    let cumulative = cumulative_cem43(peak_dose, cem43(surface, minutes));
    let bone = bone_interaction(stack, &model, peak_depth);
    trace.record(
        TraceEvent::new("ultrasound.dose")
            .with("cem43", peak_dose)
            .with("cumulative_cem43", cumulative)
            .with(
                "periosteal_factor",
                bone.as_ref().map_or(0.0, |b| b.periosteal_factor),
            ),
    );

    let risk = assess_risk(&RiskInputs {
        params,
        peak_temperature_c: peak,
        surface_temperature_c: surface,
        cumulative_cem43: cumulative,
        dose_category: category,
        bone: bone.as_ref(),
    });

    ThermalResult {
        effective_intensity_w_cm2: params.coupled_intensity(),
        power_w: power,
        dose_j_cm2: dose,
        energy_j: params.energy_j(),
        dose_category: category,
        penetration_depth_cm: penetration,
        effective_depth_cm: effective,
        beam,
        treated_area_cm2: area,
        surface_temperature_c: surface,
        target_temperature_c: target,
        peak_temperature_c: peak,
        peak_depth_cm: peak_depth,
        thermal_dose_cem43: peak_dose,
        cumulative_dose_cem43: cumulative,
        bone,
        risk,
        profile,
    }
}
