// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Signal Evaluation
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Per-voxel MR signal and summary statistics.
//!
//! `S = PD · (1 − e^(−TR/T1)) · e^(−TE/T2) · sin(flip)`, clamped at zero.
//! The same expression is used for every sequence kind.

use ndarray::Array3;
use physiolab_types::trace::{NullTrace, TraceEvent, TraceSink};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::acquisition::{advisories, AcquisitionParams};
use crate::slice::WindowLevel;
use crate::tissue::{MriTissue, RelaxationProps};
use crate::volume::Volume;

pub fn voxel_signal(props: &RelaxationProps, params: &AcquisitionParams) -> f64 {
    let recovery = 1.0 - (-params.tr() / props.t1_ms).exp();
    let decay = (-params.te() / props.t2_ms).exp();
    let s = props.proton_density * recovery * decay * params.flip_radians().sin();
    if s.is_nan() {
        0.0
    } else {
        s.max(0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalResult {
    /// Indexed `[z, y, x]` like the source volume.
    pub signal: Array3<f64>,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub tissue_means: BTreeMap<MriTissue, f64>,
    pub messages: Vec<String>,
}

impl SignalResult {
    pub fn width(&self) -> usize {
        self.signal.dim().2
    }

    pub fn height(&self) -> usize {
        self.signal.dim().1
    }

    pub fn depth(&self) -> usize {
        self.signal.dim().0
    }

    /// Window spanning the full signal range.
    pub fn auto_window(&self) -> WindowLevel {
        WindowLevel::auto(self.min, self.max)
    }
}

pub fn evaluate_signal(volume: &Volume, params: &AcquisitionParams) -> SignalResult {
    evaluate_signal_traced(volume, params, &NullTrace)
}

pub fn evaluate_signal_traced(
    volume: &Volume,
    params: &AcquisitionParams,
    trace: &dyn TraceSink,
) -> SignalResult {
    let signal = volume.voxels().map(|v| voxel_signal(&v.props, params));

    let mut sums: BTreeMap<MriTissue, (f64, usize)> = BTreeMap::new();
    for (voxel, s) in volume.voxels().iter().zip(signal.iter()) {
        let entry = sums.entry(voxel.tissue).or_insert((0.0, 0));
        entry.0 += s;
        entry.1 += 1;
    }
    let tissue_means: BTreeMap<MriTissue, f64> = sums
        .into_iter()
        .map(|(tissue, (sum, n))| (tissue, sum / n as f64))
        .collect();

    let min = signal.iter().copied().fold(f64::INFINITY, f64::min);
    let max = signal.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let mean = signal.mean().unwrap_or(0.0);
    let messages = advisories(params);

    trace.record(
        TraceEvent::new("mri.signal")
            .with("tr_ms", params.tr())
            .with("te_ms", params.te())
            .with("flip_deg", params.flip_angle_deg)
            .with("mean", mean)
            .with("min", min)
            .with("max", max)
            .with("tissues", tissue_means.len() as f64),
    );

    SignalResult {
        signal,
        mean,
        min,
        max,
        tissue_means,
        messages,
    }
}

/// Michelson contrast between the mean signals of two tissues, or `None`
/// when either is absent from the volume.
pub fn tissue_contrast(result: &SignalResult, a: MriTissue, b: MriTissue) -> Option<f64> {
    let sa = *result.tissue_means.get(&a)?;
    let sb = *result.tissue_means.get(&b)?;
    let sum = sa + sb;
    if sum <= f64::EPSILON {
        return Some(0.0);
    }
    Some((sa - sb).abs() / sum)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phantom::{generate_phantom, PhantomKind, PhantomResolution};
    use crate::volume::Voxel;
    use physiolab_types::trace::CollectingTrace;

    fn brain() -> Volume {
        generate_phantom(PhantomKind::Brain, PhantomResolution::Standard).unwrap()
    }

    #[test]
    fn test_t1_weighted_brain_separates_white_matter_and_csf() {
        let volume = brain();
        assert!(volume.distinct_tissues() >= 4);
        let result = evaluate_signal(&volume, &AcquisitionParams::t1_weighted());
        let wm = result.tissue_means[&MriTissue::WhiteMatter];
        let csf = result.tissue_means[&MriTissue::Csf];
        assert!((wm - 0.308).abs() < 1e-3);
        assert!((csf - 0.116).abs() < 1e-3);
        assert!(wm - csf > 0.1);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn test_t2_weighting_inverts_csf_contrast() {
        let volume = brain();
        let result = evaluate_signal(&volume, &AcquisitionParams::t2_weighted());
        assert!(
            result.tissue_means[&MriTissue::Csf] > result.tissue_means[&MriTissue::WhiteMatter]
        );
    }

    #[test]
    fn test_background_is_dark() {
        let result = evaluate_signal(&brain(), &AcquisitionParams::proton_density());
        assert_eq!(result.tissue_means[&MriTissue::Background], 0.0);
        assert_eq!(result.min, 0.0);
        assert!(result.max <= 1.0);
        assert!(result.mean > result.min && result.mean < result.max);
    }

    #[test]
    fn test_signal_never_negative() {
        let props = MriTissue::Fat.props();
        let params = AcquisitionParams {
            flip_angle_deg: 270.0,
            ..AcquisitionParams::t1_weighted()
        };
        assert_eq!(voxel_signal(&props, &params), 0.0);
    }

    #[test]
    fn test_contrast_helper() {
        let volume = Volume::from_voxels(
            2,
            1,
            1,
            vec![Voxel::new(MriTissue::Fat), Voxel::new(MriTissue::Csf)],
        )
        .unwrap();
        let result = evaluate_signal(&volume, &AcquisitionParams::t1_weighted());
        let c = tissue_contrast(&result, MriTissue::Fat, MriTissue::Csf).unwrap();
        assert!(c > 0.5 && c <= 1.0);
        assert!(tissue_contrast(&result, MriTissue::Fat, MriTissue::Bone).is_none());
    }

    #[test]
    fn test_trace_reports_stats() {
        let volume = brain();
        let trace = CollectingTrace::new();
        let traced = evaluate_signal_traced(&volume, &AcquisitionParams::t1_weighted(), &trace);
        assert_eq!(traced, evaluate_signal(&volume, &AcquisitionParams::t1_weighted()));
        let event = trace.stage("mri.signal").unwrap();
        assert_eq!(event.value("max"), Some(traced.max));
    }
}
