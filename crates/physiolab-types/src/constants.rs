// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Tunables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Calibration constants for the laboratory models.
//!
//! These are heuristic calibration choices for a teaching simulator, not
//! values derived from first principles. They are declared here so every
//! engine reads the same numbers.

// ── Shared ───────────────────────────────────────────────────────────

/// Depth of the simulated tissue block [cm].
pub const BLOCK_DEPTH_CM: f64 = 6.0;

/// Score below which risk is reported as low.
pub const RISK_MODERATE_SCORE: f64 = 25.0;

/// Score at or above which risk is reported as high.
pub const RISK_HIGH_SCORE: f64 = 60.0;

/// Core body temperature [°C].
pub const BODY_TEMPERATURE_C: f64 = 37.0;

/// Upper bound any reported tissue temperature may take [°C].
pub const TEMPERATURE_CEILING_C: f64 = 48.0;

/// Outer band every thermal output must respect [°C].
pub const TEMPERATURE_BAND_C: (f64, f64) = (37.0, 50.0);

// ── Ultrasound: acoustics ────────────────────────────────────────────

/// Exponent applied to frequency [MHz] in the layer attenuation sum.
pub const ATTENUATION_FREQUENCY_EXPONENT: f64 = 1.3;

/// Speed of sound in soft tissue [cm/µs].
pub const SOUND_SPEED_CM_US: f64 = 0.154;

/// Depth step used by the outward scans [cm].
pub const DEPTH_STEP_CM: f64 = 0.05;

/// Relative intensity that marks the penetration depth.
pub const PENETRATION_FRACTION: f64 = 0.1;

/// Relative intensity that marks the effective (therapeutic) depth.
pub const EFFECTIVE_FRACTION: f64 = 0.5;

/// Near-field width reduction per MHz above 1 MHz.
pub const NEAR_FIELD_NARROWING_PER_MHZ: f64 = 0.05;

/// Treated-area multiplier when the transducer is kept moving.
pub const MOVING_AREA_FACTOR: f64 = 2.0;

/// Relative intensity under which a boundary is considered unreached.
pub const NEGLIGIBLE_INTENSITY: f64 = 0.05;

// ── Ultrasound: heating ──────────────────────────────────────────────

/// Perfusion heat sink per unit perfusion factor [W/cm³/°C].
pub const PERFUSION_SINK_W_CM3_C: f64 = 0.04;

/// Soft saturation level of the steady-state rise [°C].
pub const MAX_STEADY_RISE_C: f64 = 10.0;

/// Heating time constant per unit heat-capacity factor [s].
pub const HEATING_TIME_CONSTANT_S: f64 = 240.0;

/// Fraction of local heating retained when the transducer is moving.
pub const MOVING_HEATING_FACTOR: f64 = 0.6;

/// Surface heating per W/cm² lost at a poorly coupled transducer face [°C].
pub const COUPLING_LOSS_HEATING_C: f64 = 4.0;

/// Depth over which coupling-loss heating fades below the skin [cm].
pub const COUPLING_LOSS_DEPTH_CM: f64 = 0.1;

/// Coupling efficiency for good / fair / poor gel contact.
pub const COUPLING_EFFICIENCY: [f64; 3] = [1.0, 0.8, 0.5];

// ── Ultrasound: dose ─────────────────────────────────────────────────

/// CEM43 base above the breakpoint.
pub const CEM43_R_ABOVE: f64 = 0.5;

/// CEM43 base below the breakpoint.
pub const CEM43_R_BELOW: f64 = 0.25;

/// CEM43 breakpoint temperature [°C].
pub const CEM43_BREAKPOINT_C: f64 = 43.0;

/// Fraction of the surface dose folded into the cumulative dose.
pub const SURFACE_DOSE_FRACTION: f64 = 0.25;

/// Energy dose boundaries [J/cm²]: low below the first, high above the second.
pub const DOSE_CATEGORY_J_CM2: (f64, f64) = (5.0, 20.0);

// ── Ultrasound: risk ─────────────────────────────────────────────────

/// Peak temperature thresholds [°C]: advisory, moderate, high, critical.
pub const THERMAL_RISK_C: [f64; 4] = [42.0, 43.0, 45.0, 48.0];

/// Cumulative CEM43 thresholds [min]: moderate, high.
pub const CUMULATIVE_DOSE_RISK_MIN: [f64; 2] = [60.0, 120.0];

/// Periosteal factor thresholds: advisory, moderate, high.
pub const PERIOSTEAL_RISK: [f64; 3] = [0.3, 0.5, 0.7];

/// Length scale of the hotspot-to-bone proximity falloff [cm].
pub const PERIOSTEAL_PROXIMITY_CM: f64 = 0.5;

/// Temperature at the bone above which the periosteal factor is amplified [°C].
pub const PERIOSTEAL_HOT_C: f64 = 42.0;

/// Amplification applied above [`PERIOSTEAL_HOT_C`].
pub const PERIOSTEAL_HOT_GAIN: f64 = 1.5;

/// Session length above which a high energy dose escalates low risk [min].
pub const ESCALATE_DURATION_MIN: f64 = 10.0;

/// Stationary intensity that escalates low risk [W/cm²].
pub const ESCALATE_STATIONARY_W_CM2: f64 = 2.0;

/// Surface temperature that escalates low risk under poor coupling [°C].
pub const ESCALATE_SURFACE_C: f64 = 40.0;

/// Maximum number of advisory messages returned by the ultrasound engine.
pub const ULTRASOUND_MAX_MESSAGES: usize = 5;

// ── Stimulation ──────────────────────────────────────────────────────

/// Maximum number of advisory messages returned by the stimulation engine.
pub const STIM_MAX_MESSAGES: usize = 3;

// ── MRI ──────────────────────────────────────────────────────────────

/// Floor applied to window ranges before normalisation.
pub const WINDOW_EPSILON: f64 = 1e-6;
