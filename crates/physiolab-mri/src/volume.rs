// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Voxel Volume
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::Array3;
use physiolab_types::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tissue::{MriTissue, RelaxationProps};

/// A labelled voxel carrying its tissue's relaxation constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Voxel {
    pub tissue: MriTissue,
    pub props: RelaxationProps,
}

impl Voxel {
    pub fn new(tissue: MriTissue) -> Self {
        Voxel {
            tissue,
            props: tissue.props(),
        }
    }
}

impl Default for Voxel {
    fn default() -> Self {
        Voxel::new(MriTissue::Background)
    }
}

/// Fixed-size voxel grid indexed `[z, y, x]`.
///
/// The only way to build one is [`Volume::from_voxels`], which refuses
/// empty grids and voxel counts that do not match the dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    width: usize,
    height: usize,
    depth: usize,
    voxels: Array3<Voxel>,
}

/// Voxel count of a `width × height × depth` grid.
///
/// Empty grids and grids whose storage would not fit in memory are
/// rejected as invalid geometry.
pub fn voxel_count(width: usize, height: usize, depth: usize) -> LabResult<usize> {
    if width == 0 || height == 0 || depth == 0 {
        return Err(LabError::InvalidGeometry(format!(
            "volume dimensions must be positive, got {width}x{height}x{depth}"
        )));
    }
    width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(depth))
        .filter(|n| {
            n.checked_mul(std::mem::size_of::<Voxel>())
                .map_or(false, |bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            LabError::InvalidGeometry(format!(
                "volume {width}x{height}x{depth} overflows the voxel count"
            ))
        })
}

impl Volume {
    /// `voxels` is read x-fastest, then y, then z.
    pub fn from_voxels(
        width: usize,
        height: usize,
        depth: usize,
        voxels: Vec<Voxel>,
    ) -> LabResult<Self> {
        let expected = voxel_count(width, height, depth)?;
        if voxels.len() != expected {
            return Err(LabError::VoxelCountMismatch {
                expected,
                actual: voxels.len(),
            });
        }
        let voxels = Array3::from_shape_vec((depth, height, width), voxels)?;
        Ok(Volume {
            width,
            height,
            depth,
            voxels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.voxels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voxels.is_empty()
    }

    pub fn voxels(&self) -> &Array3<Voxel> {
        &self.voxels
    }

    pub fn voxel(&self, x: usize, y: usize, z: usize) -> Option<&Voxel> {
        self.voxels.get((z, y, x))
    }

    /// Voxel count per tissue label.
    pub fn label_histogram(&self) -> BTreeMap<MriTissue, usize> {
        let mut counts = BTreeMap::new();
        for voxel in self.voxels.iter() {
            *counts.entry(voxel.tissue).or_insert(0) += 1;
        }
        counts
    }

    /// Number of distinct tissue labels present.
    pub fn distinct_tissues(&self) -> usize {
        self.label_histogram().len()
    }
}
