// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — MR Tissue Classes
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relaxation constants of one tissue class at 1.5 T.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelaxationProps {
    pub t1_ms: f64,
    pub t2_ms: f64,
    /// Relative to pure water.
    pub proton_density: f64,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum MriTissue {
    Background,
    /// Cortical bone; almost no mobile protons.
    Bone,
    WhiteMatter,
    GrayMatter,
    Csf,
    Fat,
    Muscle,
    Cartilage,
    Fluid,
    /// Parenchymal organ (liver, kidney).
    Organ,
}

impl MriTissue {
    pub const ALL: [MriTissue; 10] = [
        MriTissue::Background,
        MriTissue::Bone,
        MriTissue::WhiteMatter,
        MriTissue::GrayMatter,
        MriTissue::Csf,
        MriTissue::Fat,
        MriTissue::Muscle,
        MriTissue::Cartilage,
        MriTissue::Fluid,
        MriTissue::Organ,
    ];

    pub fn props(&self) -> RelaxationProps {
        let (t1_ms, t2_ms, proton_density) = match self {
            MriTissue::Background => (1.0, 1.0, 0.0),
            MriTissue::Bone => (1000.0, 1.0, 0.05),
            MriTissue::WhiteMatter => (600.0, 80.0, 0.7),
            MriTissue::GrayMatter => (950.0, 100.0, 0.8),
            MriTissue::Csf => (4000.0, 2000.0, 1.0),
            MriTissue::Fat => (250.0, 70.0, 0.9),
            MriTissue::Muscle => (900.0, 50.0, 0.75),
            MriTissue::Cartilage => (1000.0, 40.0, 0.7),
            MriTissue::Fluid => (3000.0, 1500.0, 0.95),
            MriTissue::Organ => (500.0, 45.0, 0.75),
        };
        RelaxationProps {
            t1_ms,
            t2_ms,
            proton_density,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MriTissue::Background => "background",
            MriTissue::Bone => "bone",
            MriTissue::WhiteMatter => "white matter",
            MriTissue::GrayMatter => "gray matter",
            MriTissue::Csf => "CSF",
            MriTissue::Fat => "fat",
            MriTissue::Muscle => "muscle",
            MriTissue::Cartilage => "cartilage",
            MriTissue::Fluid => "fluid",
            MriTissue::Organ => "organ",
        }
    }
}

impl fmt::Display for MriTissue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
