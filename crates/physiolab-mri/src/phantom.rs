// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Procedural Phantoms
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Procedural labelling of voxel phantoms.
//!
//! Every voxel centre is mapped to normalised coordinates in (−1, 1) on
//! each axis and classified against nested analytic regions. `y` grows
//! downward, matching image row order.

use physiolab_types::error::LabResult;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::tissue::MriTissue;
use crate::volume::{voxel_count, Volume, Voxel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhantomKind {
    #[default]
    Brain,
    Knee,
    Abdomen,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PhantomResolution {
    /// 64 × 64 × 32
    #[default]
    Standard,
    /// 128 × 128 × 64
    High,
}

impl PhantomResolution {
    /// `(width, height, depth)`
    pub fn dimensions(&self) -> (usize, usize, usize) {
        match self {
            PhantomResolution::Standard => (64, 64, 32),
            PhantomResolution::High => (128, 128, 64),
        }
    }
}

// Brain shells, as fractions of the head ellipsoid radius.
const SKULL_INNER: f64 = 0.92;
const CSF_RIM_INNER: f64 = 0.87;
const CORTEX_INNER: f64 = 0.68;
const FOLD_AMPLITUDE: f64 = 0.05;
const FOLD_LOBES: f64 = 9.0;

impl PhantomKind {
    pub fn label(&self) -> &'static str {
        match self {
            PhantomKind::Brain => "brain",
            PhantomKind::Knee => "knee",
            PhantomKind::Abdomen => "abdomen",
        }
    }

    /// Tissue at normalised position `(x, y, z)`.
    pub fn tissue_at(&self, x: f64, y: f64, z: f64) -> MriTissue {
        match self {
            PhantomKind::Brain => brain(x, y, z),
            PhantomKind::Knee => knee(x, y, z),
            PhantomKind::Abdomen => abdomen(x, y, z),
        }
    }
}

fn ellipsoid(x: f64, y: f64, z: f64, a: f64, b: f64, c: f64) -> f64 {
    ((x / a).powi(2) + (y / b).powi(2) + (z / c).powi(2)).sqrt()
}

fn disk(x: f64, y: f64, cx: f64, cy: f64, r: f64) -> bool {
    (x - cx).powi(2) + (y - cy).powi(2) < r * r
}

fn brain(x: f64, y: f64, z: f64) -> MriTissue {
    let r = ellipsoid(x, y, z, 0.85, 0.95, 0.8);
    if r > 1.0 {
        return MriTissue::Background;
    }
    if r > SKULL_INNER {
        return MriTissue::Bone;
    }
    if r > CSF_RIM_INNER {
        return MriTissue::Csf;
    }
    let theta = y.atan2(x);
    let fold = FOLD_AMPLITUDE * (FOLD_LOBES * theta).sin() * (3.0 * PI * z).cos();
    if r > CORTEX_INNER + fold {
        return MriTissue::GrayMatter;
    }
    // lateral ventricles
    if ellipsoid(x, y, z, 0.18, 0.3, 0.25) < 1.0 {
        return MriTissue::Csf;
    }
    MriTissue::WhiteMatter
}

fn knee(x: f64, y: f64, z: f64) -> MriTissue {
    let half_width = 0.75 - 0.1 * z * z;
    if x.abs() > half_width {
        return MriTissue::Background;
    }
    if x.abs() > half_width - 0.1 {
        return MriTissue::Fat;
    }
    let up = -y;
    if x.abs() > 0.45 {
        return MriTissue::Muscle;
    }
    match up {
        u if u > 0.12 => MriTissue::Bone,
        u if u > 0.06 => MriTissue::Cartilage,
        u if u > -0.02 => MriTissue::Fluid,
        u if u > -0.08 => MriTissue::Cartilage,
        _ => MriTissue::Bone,
    }
}

fn abdomen(x: f64, y: f64, z: f64) -> MriTissue {
    let e = ellipsoid(x, y, 0.0, 0.9, 0.7, 1.0);
    if e > 1.0 {
        return MriTissue::Background;
    }
    if e > 0.85 {
        return MriTissue::Fat;
    }
    if e > 0.75 {
        return MriTissue::Muscle;
    }
    // y grows downward: negative y is anterior.
    if disk(x, y, 0.0, 0.45, 0.12) {
        return MriTissue::Bone;
    }
    if disk(x, y, 0.0, 0.28, 0.06) {
        return MriTissue::Fluid;
    }
    if disk(x, y, -0.16, 0.42, 0.08) || disk(x, y, 0.16, 0.42, 0.08) {
        return MriTissue::Muscle;
    }
    if z.abs() < 0.5 && (disk(x, y, -0.36, 0.3, 0.1) || disk(x, y, 0.36, 0.3, 0.1)) {
        return MriTissue::Organ;
    }
    if ellipsoid(x + 0.3, y + 0.05, 0.0, 0.38, 0.32, 1.0) < 1.0 {
        return MriTissue::Organ;
    }
    MriTissue::Fat
}

fn normalised(i: usize, n: usize) -> f64 {
    (i as f64 + 0.5) / n as f64 * 2.0 - 1.0
}

/// Label a `width × height × depth` grid for `kind`.
pub fn generate_phantom_with_dimensions(
    kind: PhantomKind,
    width: usize,
    height: usize,
    depth: usize,
) -> LabResult<Volume> {
    let count = voxel_count(width, height, depth)?;
    let mut voxels = Vec::with_capacity(count);
    for z in 0..depth {
        let nz = normalised(z, depth);
        for y in 0..height {
            let ny = normalised(y, height);
            for x in 0..width {
                voxels.push(Voxel::new(kind.tissue_at(normalised(x, width), ny, nz)));
            }
        }
    }
    Volume::from_voxels(width, height, depth, voxels)
}

pub fn generate_phantom(kind: PhantomKind, resolution: PhantomResolution) -> LabResult<Volume> {
    let (width, height, depth) = resolution.dimensions();
    generate_phantom_with_dimensions(kind, width, height, depth)
}
