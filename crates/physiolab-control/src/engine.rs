// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Lab Engines
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_mri::{
    evaluate_signal_traced, extract_slice, AcquisitionParams, PhantomKind, PhantomResolution,
    SignalResult, SliceImage, Volume, WindowLevel,
};
use physiolab_stim::{simulate_field_traced, FieldParams, FieldResult};
use physiolab_tissue::Scenario;
use physiolab_types::constants::BLOCK_DEPTH_CM;
use physiolab_types::error::LabResult;
use physiolab_types::state::LabKind;
use physiolab_types::trace::TraceSink;
use physiolab_ultrasound::{simulate_thermal_traced, ThermalParams, ThermalResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::cache::PhantomCache;

/// One laboratory as seen by the controller.
pub trait LabEngine {
    type Params: Clone + Serialize + DeserializeOwned;
    type Output;

    fn lab(&self) -> LabKind;

    fn run(&self, params: &Self::Params, trace: &dyn TraceSink) -> LabResult<Self::Output>;
}

/// Stimulation parameters plus the tissue the electrodes sit on.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StimSetup {
    pub field: FieldParams,
    /// Falls back to the electrode placement's usual scenario.
    pub scenario: Option<Scenario>,
}

impl StimSetup {
    pub fn scenario(&self) -> Scenario {
        self.scenario
            .clone()
            .unwrap_or_else(|| self.field.electrode.placement().default_scenario())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StimEngine;

impl LabEngine for StimEngine {
    type Params = StimSetup;
    type Output = FieldResult;

    fn lab(&self) -> LabKind {
        LabKind::Stimulation
    }

    fn run(&self, params: &StimSetup, trace: &dyn TraceSink) -> LabResult<FieldResult> {
        let stack = params.scenario().build(BLOCK_DEPTH_CM)?;
        Ok(simulate_field_traced(&params.field, &stack, trace))
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UltrasoundEngine;

impl LabEngine for UltrasoundEngine {
    type Params = ThermalParams;
    type Output = ThermalResult;

    fn lab(&self) -> LabKind {
        LabKind::Ultrasound
    }

    fn run(&self, params: &ThermalParams, trace: &dyn TraceSink) -> LabResult<ThermalResult> {
        simulate_thermal_traced(params, trace)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MriSetup {
    pub phantom: PhantomKind,
    pub resolution: PhantomResolution,
    pub acquisition: AcquisitionParams,
    /// Depth index of the displayed slice; the middle slice when unset.
    pub slice: Option<usize>,
    /// Display window; the full signal range when unset.
    pub window: Option<WindowLevel>,
}

#[derive(Debug, Clone)]
pub struct MriOutput {
    pub volume: Arc<Volume>,
    pub signal: SignalResult,
    pub slice: SliceImage,
}

/// MRI lab with a geometry cache shared across runs.
#[derive(Debug, Default)]
pub struct MriEngine {
    cache: PhantomCache,
}

impl MriEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cache(&self) -> &PhantomCache {
        &self.cache
    }
}

impl LabEngine for MriEngine {
    type Params = MriSetup;
    type Output = MriOutput;

    fn lab(&self) -> LabKind {
        LabKind::Mri
    }

    fn run(&self, params: &MriSetup, trace: &dyn TraceSink) -> LabResult<MriOutput> {
        let volume = self
            .cache
            .get_or_generate(params.phantom, params.resolution)?;
        let signal = evaluate_signal_traced(&volume, &params.acquisition, trace);
        let z = params.slice.unwrap_or(volume.depth() / 2);
        let window = params.window.unwrap_or_else(|| signal.auto_window());
        let slice = extract_slice(&signal.signal, z, window)?;
        Ok(MriOutput {
            volume,
            signal,
            slice,
        })
    }
}
