// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Ultrasound Risk
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thermal and periosteal risk, combined by taking the worse of the two.

use physiolab_types::constants::{
    CUMULATIVE_DOSE_RISK_MIN, ESCALATE_DURATION_MIN, ESCALATE_STATIONARY_W_CM2,
    ESCALATE_SURFACE_C, PERIOSTEAL_RISK, THERMAL_RISK_C, ULTRASOUND_MAX_MESSAGES,
};
use physiolab_types::state::{RiskAssessment, RiskLevel};

use crate::bone::{BoneInteraction, BoundaryKind};
use crate::params::{CouplingQuality, DoseCategory, ThermalParams, TransducerMotion};

/// Values the risk rules look at.
#[derive(Debug, Clone, Copy)]
pub struct RiskInputs<'a> {
    pub params: &'a ThermalParams,
    pub peak_temperature_c: f64,
    pub surface_temperature_c: f64,
    pub cumulative_cem43: f64,
    pub dose_category: DoseCategory,
    pub bone: Option<&'a BoneInteraction>,
}

fn thermal_risk(inputs: &RiskInputs<'_>) -> (RiskLevel, Vec<String>) {
    let t = inputs.peak_temperature_c;
    let [advisory, moderate, high, critical] = THERMAL_RISK_C;
    let mut messages = Vec::new();
    let by_temperature = if t >= critical {
        messages.push(format!(
            "Peak temperature {t:.1} °C reached the model ceiling: tissue damage likely."
        ));
        RiskLevel::High
    } else if t >= high {
        messages.push(format!(
            "Peak temperature {t:.1} °C exceeds {high:.0} °C: reduce intensity or duration."
        ));
        RiskLevel::High
    } else if t >= moderate {
        messages.push(format!(
            "Peak temperature {t:.1} °C is above {moderate:.0} °C: monitor the patient closely."
        ));
        RiskLevel::Moderate
    } else if t >= advisory {
        messages.push(format!(
            "Vigorous heating ({t:.1} °C) within the therapeutic range."
        ));
        RiskLevel::Low
    } else {
        RiskLevel::Low
    };

    let dose = inputs.cumulative_cem43;
    let [dose_moderate, dose_high] = CUMULATIVE_DOSE_RISK_MIN;
    let by_dose = if dose >= dose_high {
        messages.push(format!(
            "Cumulative thermal dose {dose:.0} CEM43 min exceeds {dose_high:.0}."
        ));
        RiskLevel::High
    } else if dose >= dose_moderate {
        messages.push(format!(
            "Cumulative thermal dose {dose:.0} CEM43 min exceeds {dose_moderate:.0}."
        ));
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };
    (by_temperature.max(by_dose), messages)
}

fn periosteal_risk(bone: Option<&BoneInteraction>) -> (RiskLevel, Vec<String>) {
    let Some(bone) = bone else {
        return (RiskLevel::Low, Vec::new());
    };
    let what = match bone.boundary {
        BoundaryKind::Bone => "bone surface",
        BoundaryKind::Implant => "implant",
    };
    let f = bone.periosteal_factor;
    let [advisory, moderate, high] = PERIOSTEAL_RISK;
    if f >= high {
        (
            RiskLevel::High,
            vec![format!(
                "High periosteal risk: hotspot at the {what} (factor {f:.2}). Move the head or lower the intensity."
            )],
        )
    } else if f >= moderate {
        (
            RiskLevel::Moderate,
            vec![format!(
                "Moderate periosteal risk near the {what} (factor {f:.2})."
            )],
        )
    } else if f >= advisory {
        (
            RiskLevel::Low,
            vec![format!(
                "Energy reaches the {what} at {:.0} % of surface intensity (periosteal factor {f:.2}).",
                100.0 * bone.incident_intensity
            )],
        )
    } else {
        (RiskLevel::Low, Vec::new())
    }
}

/// Contextual warnings that only lift an otherwise low assessment.
fn escalators(inputs: &RiskInputs<'_>) -> Vec<String> {
    let p = inputs.params;
    let mut messages = Vec::new();
    if inputs.dose_category == DoseCategory::High
        && p.duration_minutes() > ESCALATE_DURATION_MIN
    {
        messages.push("High energy dose over a long session.".to_string());
    }
    if p.motion == TransducerMotion::Stationary && p.intensity() >= ESCALATE_STATIONARY_W_CM2 {
        messages.push("High intensity with a stationary transducer.".to_string());
    }
    if p.coupling == CouplingQuality::Poor && inputs.surface_temperature_c >= ESCALATE_SURFACE_C {
        messages.push("Poor coupling is heating the skin surface.".to_string());
    }
    messages
}

pub fn assess_risk(inputs: &RiskInputs<'_>) -> RiskAssessment {
    let (thermal_level, mut messages) = thermal_risk(inputs);
    let (periosteal_level, periosteal_messages) = periosteal_risk(inputs.bone);
    messages.extend(periosteal_messages);
    let mut level = thermal_level.max(periosteal_level);
    if level == RiskLevel::Low {
        let extra = escalators(inputs);
        if !extra.is_empty() {
            level = RiskLevel::Moderate;
            messages.extend(extra);
        }
    }
    RiskAssessment::new(level, messages, ULTRASOUND_MAX_MESSAGES)
}
