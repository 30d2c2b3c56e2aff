// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Anatomical Scenarios
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_types::error::LabResult;
use serde::{Deserialize, Serialize};

use crate::layer::{ImplantInsert, TissueKind};
use crate::stack::{StackBuilder, TissueStack};

/// Minimum bone slab kept at the bottom of a preset [cm].
const PRESET_BONE_MIN_CM: f64 = 0.5;

/// Caller-driven thicknesses for the custom scenario [cm].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomStack {
    pub skin_cm: f64,
    pub fat_cm: f64,
    pub muscle_cm: f64,
    /// When absent the stack ends in deep muscle and no bone is reached.
    pub bone_cm: Option<f64>,
    pub implant: Option<ImplantInsert>,
}

impl Default for CustomStack {
    fn default() -> Self {
        CustomStack {
            skin_cm: 0.2,
            fat_cm: 0.5,
            muscle_cm: 2.5,
            bone_cm: Some(1.0),
            implant: None,
        }
    }
}

/// Named tissue scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    #[default]
    Forearm,
    Shoulder,
    /// Thin soft-tissue cover over superficial bone.
    Knee,
    Custom(CustomStack),
}

impl Scenario {
    pub fn label(&self) -> &'static str {
        match self {
            Scenario::Forearm => "forearm",
            Scenario::Shoulder => "shoulder",
            Scenario::Knee => "knee",
            Scenario::Custom(_) => "custom",
        }
    }

    /// Materialise the scenario inside a block of `max_depth_cm`.
    pub fn build(&self, max_depth_cm: f64) -> LabResult<TissueStack> {
        match self {
            Scenario::Forearm => preset(max_depth_cm, 0.15, 0.4, 2.0),
            Scenario::Shoulder => preset(max_depth_cm, 0.2, 1.0, 3.5),
            Scenario::Knee => preset(max_depth_cm, 0.2, 0.5, 0.6),
            Scenario::Custom(custom) => {
                let builder = StackBuilder::new(max_depth_cm)
                    .layer(TissueKind::Skin, custom.skin_cm)
                    .layer(TissueKind::Fat, custom.fat_cm)
                    .implant(custom.implant.clone());
                let builder = match custom.bone_cm {
                    Some(bone) => builder
                        .layer(TissueKind::Muscle, custom.muscle_cm)
                        .terminal(TissueKind::Bone, bone),
                    None => builder.terminal(TissueKind::Muscle, custom.muscle_cm),
                };
                builder.build()
            }
        }
    }
}

fn preset(max_depth_cm: f64, skin: f64, fat: f64, muscle: f64) -> LabResult<TissueStack> {
    StackBuilder::new(max_depth_cm)
        .layer(TissueKind::Skin, skin)
        .layer(TissueKind::Fat, fat)
        .layer(TissueKind::Muscle, muscle)
        .terminal(TissueKind::Bone, PRESET_BONE_MIN_CM)
        .build()
}
