// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Stimulation Parameters
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

use crate::electrode::ElectrodeConfig;

/// Output current ceiling of the simulated stimulator [mA].
pub const MAX_INTENSITY_MA: f64 = 100.0;

/// Longest pulse the simulated stimulator emits [µs].
pub const MAX_PULSE_WIDTH_US: f64 = 400.0;

/// Stimulation waveform families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WaveformMode {
    /// High-frequency, short-pulse sensory stimulation.
    #[default]
    Conventional,
    /// Low-frequency, wide-pulse stimulation aimed at motor response.
    AcupunctureLike,
    Burst,
    Modulated,
}

impl WaveformMode {
    /// Base (sensory, motor) weighting.
    pub fn base_weights(&self) -> (f64, f64) {
        match self {
            WaveformMode::Conventional => (0.8, 0.2),
            WaveformMode::AcupunctureLike => (0.4, 0.6),
            WaveformMode::Burst => (0.5, 0.5),
            WaveformMode::Modulated => (0.7, 0.3),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    pub frequency_hz: f64,
    pub pulse_width_us: f64,
    pub intensity_ma: f64,
    pub mode: WaveformMode,
    pub electrode: ElectrodeConfig,
}

impl Default for FieldParams {
    fn default() -> Self {
        FieldParams {
            frequency_hz: 80.0,
            pulse_width_us: 200.0,
            intensity_ma: 20.0,
            mode: WaveformMode::Conventional,
            electrode: ElectrodeConfig::default(),
        }
    }
}

impl FieldParams {
    /// Intensity as a fraction of the device maximum, in [0, 1].
    pub fn normalized_intensity(&self) -> f64 {
        unit(self.intensity_ma / MAX_INTENSITY_MA)
    }

    /// Pulse width as a fraction of the device maximum, in [0, 1].
    pub fn normalized_pulse_width(&self) -> f64 {
        unit(self.pulse_width_us / MAX_PULSE_WIDTH_US)
    }

    /// Intensity with negatives and NaN mapped to zero [mA].
    pub fn intensity(&self) -> f64 {
        non_negative(self.intensity_ma)
    }

    pub fn pulse_width(&self) -> f64 {
        non_negative(self.pulse_width_us)
    }

    /// Charge delivered per pulse [µC].
    pub fn charge_per_pulse_uc(&self) -> f64 {
        self.intensity() * self.pulse_width() * 1e-3
    }

    /// Time-averaged current [mA].
    pub fn average_current_ma(&self) -> f64 {
        self.intensity() * self.pulse_width() * 1e-6 * non_negative(self.frequency_hz)
    }
}

fn non_negative(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
