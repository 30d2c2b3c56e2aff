// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Thermal Dose
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_types::constants::{
    CEM43_BREAKPOINT_C, CEM43_R_ABOVE, CEM43_R_BELOW, SURFACE_DOSE_FRACTION,
};

/// Cumulative equivalent minutes at 43 °C for a constant temperature held
/// for `minutes`.
pub fn cem43(temperature_c: f64, minutes: f64) -> f64 {
    let r = if temperature_c >= CEM43_BREAKPOINT_C {
        CEM43_R_ABOVE
    } else {
        CEM43_R_BELOW
    };
    minutes.max(0.0) * r.powf(CEM43_BREAKPOINT_C - temperature_c)
}

/// Dose at the hotspot plus a share of the surface dose.
pub fn cumulative_cem43(peak_dose: f64, surface_dose: f64) -> f64 {
    peak_dose + SURFACE_DOSE_FRACTION * surface_dose
}
