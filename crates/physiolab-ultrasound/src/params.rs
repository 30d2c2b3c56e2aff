// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Ultrasound Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_tissue::Scenario;
use physiolab_types::constants::{COUPLING_EFFICIENCY, DOSE_CATEGORY_J_CM2};
use serde::{Deserialize, Serialize};

/// Frequencies the simulated transducer can emit [MHz].
pub const FREQUENCY_RANGE_MHZ: (f64, f64) = (0.5, 3.5);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmissionMode {
    #[default]
    Continuous,
    Pulsed {
        duty_percent: f64,
    },
}

impl EmissionMode {
    /// Fraction of time the transducer emits. Exactly 1 when continuous.
    pub fn duty_fraction(&self) -> f64 {
        match self {
            EmissionMode::Continuous => 1.0,
            EmissionMode::Pulsed { duty_percent } => {
                if duty_percent.is_nan() {
                    0.0
                } else {
                    (duty_percent / 100.0).clamp(0.0, 1.0)
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CouplingQuality {
    #[default]
    Good,
    Fair,
    Poor,
}

impl CouplingQuality {
    pub fn efficiency(&self) -> f64 {
        match self {
            CouplingQuality::Good => COUPLING_EFFICIENCY[0],
            CouplingQuality::Fair => COUPLING_EFFICIENCY[1],
            CouplingQuality::Poor => COUPLING_EFFICIENCY[2],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TransducerMotion {
    Stationary,
    /// Slow circular strokes over a treatment area.
    #[default]
    Moving,
}

/// Energy dose classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoseCategory {
    Low,
    Moderate,
    High,
}

impl DoseCategory {
    pub fn from_dose(dose_j_cm2: f64) -> Self {
        let (low, high) = DOSE_CATEGORY_J_CM2;
        if dose_j_cm2 > high {
            DoseCategory::High
        } else if dose_j_cm2 >= low {
            DoseCategory::Moderate
        } else {
            DoseCategory::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DoseCategory::Low => "low dose (<5 J/cm²)",
            DoseCategory::Moderate => "moderate dose (5–20 J/cm²)",
            DoseCategory::High => "high dose (>20 J/cm²)",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalParams {
    pub frequency_mhz: f64,
    pub intensity_w_cm2: f64,
    /// Effective radiating area [cm²].
    pub era_cm2: f64,
    pub emission: EmissionMode,
    pub duration_min: f64,
    pub coupling: CouplingQuality,
    pub motion: TransducerMotion,
    pub scenario: Scenario,
}

impl Default for ThermalParams {
    fn default() -> Self {
        ThermalParams {
            frequency_mhz: 1.0,
            intensity_w_cm2: 1.0,
            era_cm2: 5.0,
            emission: EmissionMode::Continuous,
            duration_min: 5.0,
            coupling: CouplingQuality::Good,
            motion: TransducerMotion::Moving,
            scenario: Scenario::Forearm,
        }
    }
}

impl ThermalParams {
    pub fn frequency(&self) -> f64 {
        if self.frequency_mhz.is_nan() {
            return FREQUENCY_RANGE_MHZ.0;
        }
        self.frequency_mhz
            .clamp(FREQUENCY_RANGE_MHZ.0, FREQUENCY_RANGE_MHZ.1)
    }

    /// Nominal output intensity [W/cm²].
    pub fn intensity(&self) -> f64 {
        non_negative(self.intensity_w_cm2)
    }

    pub fn era(&self) -> f64 {
        non_negative(self.era_cm2)
    }

    pub fn duration_seconds(&self) -> f64 {
        non_negative(self.duration_min) * 60.0
    }

    pub fn duration_minutes(&self) -> f64 {
        non_negative(self.duration_min)
    }

    pub fn effective_duty_fraction(&self) -> f64 {
        self.emission.duty_fraction()
    }

    /// Intensity that actually enters the skin [W/cm²].
    pub fn coupled_intensity(&self) -> f64 {
        self.intensity() * self.coupling.efficiency()
    }

    /// Acoustic output power [W].
    pub fn power_w(&self) -> f64 {
        self.intensity() * self.era()
    }

    /// Energy dose per unit area [J/cm²].
    pub fn dose_j_cm2(&self) -> f64 {
        self.intensity() * self.duration_seconds() * self.effective_duty_fraction()
    }

    /// Total delivered energy [J].
    pub fn energy_j(&self) -> f64 {
        self.power_w() * self.duration_seconds() * self.effective_duty_fraction()
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continuous_five_minute_session() {
        let params = ThermalParams {
            intensity_w_cm2: 1.0,
            era_cm2: 5.0,
            emission: EmissionMode::Continuous,
            duration_min: 5.0,
            ..ThermalParams::default()
        };
        assert_eq!(params.power_w(), 5.0);
        assert_eq!(params.dose_j_cm2(), 300.0);
        assert_eq!(params.energy_j(), 1500.0);
        let category = DoseCategory::from_dose(params.dose_j_cm2());
        assert_eq!(category, DoseCategory::High);
        assert_eq!(category.label(), "high dose (>20 J/cm²)");
    }

    #[test]
    fn test_pulsed_duty_scales_dose() {
        let params = ThermalParams {
            emission: EmissionMode::Pulsed { duty_percent: 20.0 },
            ..ThermalParams::default()
        };
        assert!((params.effective_duty_fraction() - 0.2).abs() < 1e-12);
        assert!((params.dose_j_cm2() - 60.0).abs() < 1e-9);
        let wild = EmissionMode::Pulsed { duty_percent: 250.0 };
        assert_eq!(wild.duty_fraction(), 1.0);
    }

    #[test]
    fn test_dose_category_bounds() {
        assert_eq!(DoseCategory::from_dose(4.9), DoseCategory::Low);
        assert_eq!(DoseCategory::from_dose(5.0), DoseCategory::Moderate);
        assert_eq!(DoseCategory::from_dose(20.0), DoseCategory::Moderate);
        assert_eq!(DoseCategory::from_dose(20.1), DoseCategory::High);
    }

    #[test]
    fn test_coupling_reduces_entering_intensity() {
        let params = ThermalParams {
            coupling: CouplingQuality::Poor,
            ..ThermalParams::default()
        };
        assert!((params.coupled_intensity() - 0.5).abs() < 1e-12);
        assert_eq!(params.power_w(), 5.0);
    }

    #[test]
    fn test_frequency_clamped() {
        let params = ThermalParams {
            frequency_mhz: 12.0,
            ..ThermalParams::default()
        };
        assert_eq!(params.frequency(), 3.5);
    }

    #[test]
    fn test_json_shape() {
        let params: ThermalParams = serde_json::from_str(
            r#"{ "emission": { "pulsed": { "duty_percent": 50.0 } }, "scenario": "knee" }"#,
        )
        .unwrap();
        assert_eq!(params.emission.duty_fraction(), 0.5);
        assert_eq!(params.scenario, Scenario::Knee);
        assert_eq!(params.era_cm2, 5.0);
    }
}
