// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Acquisition Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Repetition time under which recovery is too short for usable SNR [ms].
pub const SHORT_TR_MS: f64 = 300.0;
/// Echo time over which most tissue signal has decayed [ms].
pub const LONG_TE_MS: f64 = 120.0;
pub const MAX_FLIP_DEG: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SequenceKind {
    #[default]
    SpinEcho,
    GradientEcho,
    InversionRecovery,
}

impl SequenceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SequenceKind::SpinEcho => "spin echo",
            SequenceKind::GradientEcho => "gradient echo",
            SequenceKind::InversionRecovery => "inversion recovery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionParams {
    pub tr_ms: f64,
    pub te_ms: f64,
    pub flip_angle_deg: f64,
    pub sequence: SequenceKind,
}

impl Default for AcquisitionParams {
    fn default() -> Self {
        AcquisitionParams::t1_weighted()
    }
}

impl AcquisitionParams {
    pub fn t1_weighted() -> Self {
        AcquisitionParams {
            tr_ms: 500.0,
            te_ms: 20.0,
            flip_angle_deg: 90.0,
            sequence: SequenceKind::SpinEcho,
        }
    }

    pub fn t2_weighted() -> Self {
        AcquisitionParams {
            tr_ms: 4000.0,
            te_ms: 100.0,
            flip_angle_deg: 90.0,
            sequence: SequenceKind::SpinEcho,
        }
    }

    pub fn proton_density() -> Self {
        AcquisitionParams {
            tr_ms: 3000.0,
            te_ms: 15.0,
            flip_angle_deg: 90.0,
            sequence: SequenceKind::SpinEcho,
        }
    }

    pub fn gradient_echo() -> Self {
        AcquisitionParams {
            tr_ms: 400.0,
            te_ms: 10.0,
            flip_angle_deg: 30.0,
            sequence: SequenceKind::GradientEcho,
        }
    }

    pub fn tr(&self) -> f64 {
        non_negative(self.tr_ms)
    }

    pub fn te(&self) -> f64 {
        non_negative(self.te_ms)
    }

    pub fn flip_radians(&self) -> f64 {
        if self.flip_angle_deg.is_finite() {
            self.flip_angle_deg.to_radians()
        } else {
            0.0
        }
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

/// Warnings for acquisition settings that give poor signal or contrast.
pub fn advisories(params: &AcquisitionParams) -> Vec<String> {
    let mut messages = Vec::new();
    let (tr, te) = (params.tr(), params.te());
    if tr < SHORT_TR_MS {
        messages.push(format!(
            "TR {tr:.0} ms is short: longitudinal recovery is incomplete and SNR will be low."
        ));
    }
    if te > LONG_TE_MS {
        messages.push(format!(
            "TE {te:.0} ms is long: most tissues will have decayed, expect a dark image."
        ));
    }
    if params.flip_angle_deg > MAX_FLIP_DEG {
        messages.push(format!(
            "Flip angle {:.0}° exceeds 90°: signal falls off again past the optimum.",
            params.flip_angle_deg
        ));
    }
    if te >= tr {
        messages.push("TE must be shorter than TR.".to_string());
    }
    messages
}
