// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Electrodes
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_tissue::{CustomStack, Scenario};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Device-realistic inter-electrode distance [cm].
pub const DISTANCE_RANGE_CM: (f64, f64) = (2.0, 12.0);

/// Device-realistic electrode edge length or diameter [cm].
pub const SIZE_RANGE_CM: (f64, f64) = (1.5, 10.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ElectrodeShape {
    #[default]
    Rectangular,
    Circular,
}

/// Anatomical placement presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlacementPreset {
    #[default]
    Forearm,
    Quadriceps,
    LowerBack,
    Shoulder,
}

impl PlacementPreset {
    /// (distance, size) in cm.
    pub fn default_geometry(&self) -> (f64, f64) {
        match self {
            PlacementPreset::Forearm => (6.0, 4.0),
            PlacementPreset::Quadriceps => (10.0, 5.0),
            PlacementPreset::LowerBack => (8.0, 5.0),
            PlacementPreset::Shoulder => (6.0, 5.0),
        }
    }

    pub fn default_scenario(&self) -> Scenario {
        match self {
            PlacementPreset::Forearm => Scenario::Forearm,
            PlacementPreset::Shoulder => Scenario::Shoulder,
            PlacementPreset::Quadriceps => Scenario::Custom(CustomStack {
                skin_cm: 0.2,
                fat_cm: 1.0,
                muscle_cm: 4.0,
                bone_cm: Some(0.5),
                implant: None,
            }),
            PlacementPreset::LowerBack => Scenario::Custom(CustomStack {
                skin_cm: 0.25,
                fat_cm: 1.5,
                muscle_cm: 3.5,
                bone_cm: Some(0.5),
                implant: None,
            }),
        }
    }
}

/// Electrode pair geometry. Distance and size are always inside the
/// device ranges; every constructor (including deserialisation) clamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawElectrode", into = "RawElectrode")]
pub struct ElectrodeConfig {
    distance_cm: f64,
    size_cm: f64,
    shape: ElectrodeShape,
    placement: PlacementPreset,
}

/// Unchecked wire form of [`ElectrodeConfig`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct RawElectrode {
    distance_cm: f64,
    size_cm: f64,
    shape: ElectrodeShape,
    placement: PlacementPreset,
}

impl Default for RawElectrode {
    fn default() -> Self {
        let placement = PlacementPreset::default();
        let (distance_cm, size_cm) = placement.default_geometry();
        RawElectrode {
            distance_cm,
            size_cm,
            shape: ElectrodeShape::default(),
            placement,
        }
    }
}

impl From<RawElectrode> for ElectrodeConfig {
    fn from(raw: RawElectrode) -> Self {
        ElectrodeConfig::new(raw.distance_cm, raw.size_cm, raw.shape, raw.placement)
    }
}

impl From<ElectrodeConfig> for RawElectrode {
    fn from(cfg: ElectrodeConfig) -> Self {
        RawElectrode {
            distance_cm: cfg.distance_cm,
            size_cm: cfg.size_cm,
            shape: cfg.shape,
            placement: cfg.placement,
        }
    }
}

impl ElectrodeConfig {
    pub fn new(
        distance_cm: f64,
        size_cm: f64,
        shape: ElectrodeShape,
        placement: PlacementPreset,
    ) -> Self {
        ElectrodeConfig {
            distance_cm: clamp_or_low(distance_cm, DISTANCE_RANGE_CM),
            size_cm: clamp_or_low(size_cm, SIZE_RANGE_CM),
            shape,
            placement,
        }
    }

    pub fn from_preset(placement: PlacementPreset) -> Self {
        let (distance, size) = placement.default_geometry();
        ElectrodeConfig::new(distance, size, ElectrodeShape::Rectangular, placement)
    }

    pub fn distance_cm(&self) -> f64 {
        self.distance_cm
    }

    pub fn size_cm(&self) -> f64 {
        self.size_cm
    }

    pub fn shape(&self) -> ElectrodeShape {
        self.shape
    }

    pub fn placement(&self) -> PlacementPreset {
        self.placement
    }

    pub fn with_distance(&self, distance_cm: f64) -> Self {
        ElectrodeConfig::new(distance_cm, self.size_cm, self.shape, self.placement)
    }

    pub fn with_size(&self, size_cm: f64) -> Self {
        ElectrodeConfig::new(self.distance_cm, size_cm, self.shape, self.placement)
    }

    /// Contact area of one electrode [cm²].
    pub fn contact_area_cm2(&self) -> f64 {
        match self.shape {
            ElectrodeShape::Rectangular => self.size_cm * self.size_cm,
            ElectrodeShape::Circular => PI * (0.5 * self.size_cm).powi(2),
        }
    }
}

impl Default for ElectrodeConfig {
    fn default() -> Self {
        ElectrodeConfig::from_preset(PlacementPreset::default())
    }
}

fn clamp_or_low(value: f64, (lo, hi): (f64, f64)) -> f64 {
    if value.is_nan() {
        lo
    } else {
        value.clamp(lo, hi)
    }
}
