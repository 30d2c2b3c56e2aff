// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Preset Documents
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_types::config::PresetDocument;
use physiolab_types::error::LabResult;
use tracing::debug;

use crate::controller::{LabController, Submission};
use crate::engine::LabEngine;

/// Wrap `params` as a preset for `engine`'s lab.
pub fn save_preset<E: LabEngine>(
    engine: &E,
    name: &str,
    params: &E::Params,
) -> LabResult<PresetDocument> {
    let doc = PresetDocument::from_params(engine.lab(), name, params)?;
    debug!(lab = %doc.lab, name, "preset saved");
    Ok(doc)
}

/// Recover `engine`'s parameters from a preset saved for the same lab.
pub fn load_preset<E: LabEngine>(engine: &E, doc: PresetDocument) -> LabResult<E::Params> {
    debug!(lab = %doc.lab, name = %doc.name, "loading preset");
    doc.into_params(engine.lab())
}

impl<E: LabEngine> LabController<E> {
    /// Load a preset and submit it.
    pub fn submit_preset(&self, doc: PresetDocument) -> LabResult<Submission> {
        let params = load_preset(self.engine(), doc)?;
        self.submit(params)
    }
}
