// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Field Heatmap
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Depth × lateral intensity grid for the heatmap renderer.

use ndarray::Array2;
use physiolab_tissue::TissueStack;
use serde::{Deserialize, Serialize};

use crate::field::path_decay;
use crate::params::FieldParams;

/// Lateral samples across [-LATERAL_HALF_CM, LATERAL_HALF_CM].
pub const GRID_NX: usize = 41;

/// Depth samples across [0, block depth].
pub const GRID_NY: usize = 31;

const LATERAL_HALF_CM: f64 = 8.0;

/// Lateral widening of each electrode lobe per cm of depth.
const LOBE_WIDENING_PER_CM: f64 = 0.4;

/// Multiplicative boost inside the implant band.
const IMPLANT_BOOST: f64 = 1.8;

/// Half width of the implant hotspot [cm].
const IMPLANT_HALF_WIDTH_CM: f64 = 2.0;

/// One heatmap cell: lateral position, depth, relative intensity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldSample {
    pub x: f64,
    pub y: f64,
    pub intensity: f64,
}

/// Regular sample grid. `values` is indexed `[depth_row, lateral_col]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGrid {
    pub x_cm: Vec<f64>,
    pub y_cm: Vec<f64>,
    pub values: Array2<f64>,
}

impl FieldGrid {
    pub fn nx(&self) -> usize {
        self.x_cm.len()
    }

    pub fn ny(&self) -> usize {
        self.y_cm.len()
    }

    /// Row-major `{x, y, intensity}` list.
    pub fn samples(&self) -> Vec<FieldSample> {
        let mut out = Vec::with_capacity(self.nx() * self.ny());
        for (iy, &y) in self.y_cm.iter().enumerate() {
            for (ix, &x) in self.x_cm.iter().enumerate() {
                out.push(FieldSample {
                    x,
                    y,
                    intensity: self.values[[iy, ix]],
                });
            }
        }
        out
    }

    pub fn max_value(&self) -> f64 {
        self.values.iter().cloned().fold(0.0, f64::max)
    }

    /// Mean intensity of one depth row.
    pub fn row_mean(&self, iy: usize) -> f64 {
        self.values.row(iy).mean().unwrap_or(0.0)
    }
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![lo; n];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

fn lobe(x: f64, center: f64, sigma: f64) -> f64 {
    let dx = x - center;
    (-(dx * dx) / (2.0 * sigma * sigma)).exp()
}

/// Evaluate the depth/lateral decay over the fixed grid.
///
/// Each electrode contributes a Gaussian lobe centred under it; the lobes
/// widen with depth and merge between the electrodes. Depth decay follows
/// the tissue path; amplitude follows normalised intensity.
pub fn field_grid(params: &FieldParams, stack: &TissueStack, block_depth_cm: f64) -> FieldGrid {
    let x_cm = linspace(-LATERAL_HALF_CM, LATERAL_HALF_CM, GRID_NX);
    let y_cm = linspace(0.0, block_depth_cm.max(0.0), GRID_NY);
    let dy = if GRID_NY > 1 { y_cm[1] - y_cm[0] } else { 0.0 };

    let amplitude = params.normalized_intensity();
    let half_gap = 0.5 * params.electrode.distance_cm();
    let sigma0 = 0.5 * params.electrode.size_cm();
    let surface_peak = 0.5 * (1.0 + lobe(half_gap, -half_gap, sigma0));

    let implant_band = stack.implant().map(|insert| {
        let half = (0.5 * insert.thickness_cm).max(0.5 * dy);
        (insert.center_cm(), half)
    });

    let mut values = Array2::zeros((GRID_NY, GRID_NX));
    for (iy, &y) in y_cm.iter().enumerate() {
        let depth_factor = (-path_decay(stack, y)).exp();
        let sigma = sigma0 + LOBE_WIDENING_PER_CM * y;
        let boosted = implant_band.map_or(false, |(center, half)| (y - center).abs() <= half);
        for (ix, &x) in x_cm.iter().enumerate() {
            let lateral = 0.5 * (lobe(x, -half_gap, sigma) + lobe(x, half_gap, sigma));
            let mut v = amplitude * depth_factor * lateral / surface_peak;
            if boosted && x.abs() <= IMPLANT_HALF_WIDTH_CM {
                v *= IMPLANT_BOOST;
            }
            values[[iy, ix]] = v.clamp(0.0, 1.0);
        }
    }

    FieldGrid { x_cm, y_cm, values }
}

#[cfg(test)]
mod tests {
    use super::*;
    use physiolab_tissue::{CustomStack, ImplantInsert, Scenario};

    fn params(intensity: f64) -> FieldParams {
        FieldParams {
            intensity_ma: intensity,
            ..FieldParams::default()
        }
    }

    #[test]
    fn test_grid_shape_and_bounds() {
        let stack = Scenario::Forearm.build(6.0).unwrap();
        let grid = field_grid(&params(60.0), &stack, 6.0);
        assert_eq!(grid.values.shape(), &[GRID_NY, GRID_NX]);
        assert_eq!(grid.samples().len(), GRID_NX * GRID_NY);
        assert!(grid.values.iter().all(|v| (0.0..=1.0).contains(v)));
        assert!((grid.x_cm[0] + 8.0).abs() < 1e-12);
        assert!((grid.y_cm[GRID_NY - 1] - 6.0).abs() < 1e-12);
    }

    #[test]
    fn test_intensity_decays_with_depth() {
        let stack = Scenario::Forearm.build(6.0).unwrap();
        let grid = field_grid(&params(60.0), &stack, 6.0);
        for iy in 1..grid.ny() {
            assert!(grid.row_mean(iy) < grid.row_mean(iy - 1));
        }
    }

    #[test]
    fn test_zero_intensity_gives_empty_map() {
        let stack = Scenario::Forearm.build(6.0).unwrap();
        let grid = field_grid(&params(0.0), &stack, 6.0);
        assert_eq!(grid.max_value(), 0.0);
    }

    #[test]
    fn test_implant_boosts_its_band() {
        let custom = CustomStack {
            implant: Some(ImplantInsert::metal(1.9, 0.2)),
            ..CustomStack::default()
        };
        let with = Scenario::Custom(custom.clone()).build(6.0).unwrap();
        let without = Scenario::Custom(CustomStack {
            implant: None,
            ..custom
        })
        .build(6.0)
        .unwrap();
        let p = params(40.0);
        let g_with = field_grid(&p, &with, 6.0);
        let g_without = field_grid(&p, &without, 6.0);
        // Row 10 sits at 2.0 cm, inside the implant band.
        let center = GRID_NX / 2;
        assert!(g_with.values[[10, center]] > g_without.values[[10, center]]);
        assert_eq!(g_with.values[[25, center]], g_without.values[[25, center]]);
    }
}
