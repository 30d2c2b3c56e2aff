// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{RISK_HIGH_SCORE, RISK_MODERATE_SCORE};

/// The three virtual laboratories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabKind {
    Stimulation,
    Ultrasound,
    Mri,
}

impl LabKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LabKind::Stimulation => "stimulation",
            LabKind::Ultrasound => "ultrasound",
            LabKind::Mri => "mri",
        }
    }
}

impl fmt::Display for LabKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered categorical risk. `Low < Moderate < High`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Map a 0–100 score: low < 25, moderate < 60, high ≥ 60.
    pub fn from_score(score: f64) -> Self {
        if score >= RISK_HIGH_SCORE {
            RiskLevel::High
        } else if score >= RISK_MODERATE_SCORE {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Categorical risk plus the ordered explanation the UI displays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub messages: Vec<String>,
}

impl RiskAssessment {
    pub fn new(level: RiskLevel, mut messages: Vec<String>, cap: usize) -> Self {
        messages.truncate(cap);
        RiskAssessment { level, messages }
    }

    pub fn is_high(&self) -> bool {
        self.level == RiskLevel::High
    }
}

/// Clamp a score-like quantity into [0, 100]. NaN maps to 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

/// Clamp a fraction into [0, 1]. NaN maps to 0.
pub fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}
