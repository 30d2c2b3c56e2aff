// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Stimulation Risk
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Additive risk score with prioritised explanations.

use physiolab_tissue::{TissueKind, TissueStack};
use physiolab_types::constants::STIM_MAX_MESSAGES;
use physiolab_types::state::{clamp_score, RiskAssessment, RiskLevel};

use crate::activation::{SHALLOW_BONE_CM, THIN_SKIN_CM};
use crate::params::FieldParams;

/// Charge per pulse above which tissue irritation becomes likely [µC].
const CHARGE_LIMIT_UC: f64 = 20.0;

/// Current density above which small contacts are flagged [mA/cm²].
const CURRENT_DENSITY_LIMIT_MA_CM2: f64 = 2.0;

/// Short-distance flag: closer than this [cm] ...
const SHORT_DISTANCE_CM: f64 = 3.0;

/// ... while stronger than this [mA].
const SHORT_DISTANCE_INTENSITY_MA: f64 = 50.0;

/// Contributing factors, declared in message priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskFactor {
    MetalImplant,
    ShallowBone,
    ChargePerPulse,
    CurrentDensity,
    ShortDistance,
    ThinSkin,
}

/// Risk score in [0, 100] and its assessment.
#[derive(Debug, Clone, PartialEq)]
pub struct StimRisk {
    pub score: f64,
    pub factors: Vec<RiskFactor>,
    pub assessment: RiskAssessment,
}

pub fn assess_risk(params: &FieldParams, stack: &TissueStack) -> StimRisk {
    let n_i = params.normalized_intensity();
    let intensity = params.intensity();
    let electrode = &params.electrode;

    let mut score = 0.0;
    let mut hits: Vec<(RiskFactor, String)> = Vec::new();

    if stack.has_implant() {
        score += 15.0 + 40.0 * n_i;
        hits.push((
            RiskFactor::MetalImplant,
            "Metal implant in the current path concentrates current; avoid stimulating over it"
                .to_string(),
        ));
    }

    if let Some(bone) = stack.depth_of(TissueKind::Bone) {
        if bone < SHALLOW_BONE_CM {
            score += 15.0 + 10.0 * n_i;
            hits.push((
                RiskFactor::ShallowBone,
                format!("Bone lies {bone:.1} cm below the surface: periosteal pain is likely"),
            ));
        }
    }

    let charge = params.charge_per_pulse_uc();
    if charge > CHARGE_LIMIT_UC {
        score += (15.0 + 0.5 * (charge - CHARGE_LIMIT_UC)).min(30.0);
        hits.push((
            RiskFactor::ChargePerPulse,
            format!("High charge per pulse ({charge:.1} µC): reduce intensity or pulse width"),
        ));
    }

    let density = intensity / electrode.contact_area_cm2().max(1e-6);
    if density > CURRENT_DENSITY_LIMIT_MA_CM2 {
        score += (10.0 + 5.0 * (density - CURRENT_DENSITY_LIMIT_MA_CM2)).min(25.0);
        hits.push((
            RiskFactor::CurrentDensity,
            format!("Current density {density:.2} mA/cm² is high for this electrode size"),
        ));
    }

    if electrode.distance_cm() < SHORT_DISTANCE_CM && intensity > SHORT_DISTANCE_INTENSITY_MA {
        score += 20.0;
        hits.push((
            RiskFactor::ShortDistance,
            "Electrodes are very close together at high intensity".to_string(),
        ));
    }

    if stack.thickness_of(TissueKind::Skin) < THIN_SKIN_CM {
        score += 10.0;
        hits.push((
            RiskFactor::ThinSkin,
            "Thin skin offers little protection against surface burns".to_string(),
        ));
    }

    hits.sort_by_key(|(factor, _)| *factor);
    let score = clamp_score(score);
    let factors = hits.iter().map(|(f, _)| *f).collect();
    let messages = hits.into_iter().map(|(_, m)| m).collect();

    StimRisk {
        score,
        factors,
        assessment: RiskAssessment::new(RiskLevel::from_score(score), messages, STIM_MAX_MESSAGES),
    }
}
