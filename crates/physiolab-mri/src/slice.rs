// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Slice Rendering
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use ndarray::{s, Array2, Array3};
use physiolab_types::constants::WINDOW_EPSILON;
use physiolab_types::error::{LabError, LabResult};
use serde::{Deserialize, Serialize};

/// Display window: signals in `level ± window/2` map onto 0–255.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowLevel {
    pub window: f64,
    pub level: f64,
}

impl WindowLevel {
    pub fn new(window: f64, level: f64) -> Self {
        WindowLevel { window, level }
    }

    pub fn auto(min: f64, max: f64) -> Self {
        WindowLevel {
            window: max - min,
            level: 0.5 * (max + min),
        }
    }

    /// Window width with the degenerate-range floor applied.
    pub fn width(&self) -> f64 {
        if self.window.is_finite() {
            self.window.max(WINDOW_EPSILON)
        } else {
            WINDOW_EPSILON
        }
    }

    pub fn map(&self, signal: f64) -> u8 {
        let width = self.width();
        let lo = self.level - 0.5 * width;
        let t = ((signal - lo) / width).clamp(0.0, 1.0);
        if t.is_nan() {
            return 0;
        }
        (t * 255.0).round() as u8
    }
}

/// One 8-bit grayscale slice, indexed `[y, x]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliceImage {
    pub z: usize,
    pub pixels: Array2<u8>,
}

impl SliceImage {
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    pub fn pixel(&self, x: usize, y: usize) -> Option<u8> {
        self.pixels.get((y, x)).copied()
    }

    /// Row-major `[luma, alpha]` pairs, fully opaque.
    pub fn to_luma_alpha(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&v| [v, u8::MAX]).collect()
    }

    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|&v| [v, v, v, u8::MAX]).collect()
    }
}

/// Window the slice at depth index `z`.
pub fn extract_slice(signal: &Array3<f64>, z: usize, window: WindowLevel) -> LabResult<SliceImage> {
    let depth = signal.dim().0;
    if z >= depth {
        return Err(LabError::SliceOutOfRange { index: z, depth });
    }
    let pixels = signal.slice(s![z, .., ..]).mapv(|v| window.map(v));
    Ok(SliceImage { z, pixels })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp() -> Array3<f64> {
        Array3::from_shape_fn((2, 2, 3), |(z, y, x)| (z * 6 + y * 3 + x) as f64 / 11.0)
    }

    #[test]
    fn test_auto_window_spans_full_range() {
        let signal = ramp();
        let image = extract_slice(&signal, 1, WindowLevel::auto(0.0, 1.0)).unwrap();
        assert_eq!((image.width(), image.height()), (3, 2));
        assert_eq!(image.pixel(2, 1), Some(255));
        let first = extract_slice(&signal, 0, WindowLevel::auto(0.0, 1.0)).unwrap();
        assert_eq!(first.pixel(0, 0), Some(0));
    }

    #[test]
    fn test_narrow_window_saturates() {
        let image = extract_slice(&ramp(), 0, WindowLevel::new(0.1, 0.2)).unwrap();
        assert_eq!(image.pixel(0, 0), Some(0));
        assert_eq!(image.pixel(2, 1), Some(255));
    }

    #[test]
    fn test_flat_signal_does_not_divide_by_zero() {
        let flat = Array3::from_elem((1, 2, 2), 0.4);
        let image = extract_slice(&flat, 0, WindowLevel::auto(0.4, 0.4)).unwrap();
        let first = image.pixels[[0, 0]];
        assert!(first == 127 || first == 128);
        assert!(image.pixels.iter().all(|&v| v == first));
    }

    #[test]
    fn test_out_of_range_slice() {
        let err = extract_slice(&ramp(), 2, WindowLevel::auto(0.0, 1.0)).unwrap_err();
        assert!(matches!(err, LabError::SliceOutOfRange { index: 2, depth: 2 }));
    }

    #[test]
    fn test_buffers_are_opaque() {
        let image = extract_slice(&ramp(), 0, WindowLevel::auto(0.0, 1.0)).unwrap();
        let la = image.to_luma_alpha();
        assert_eq!(la.len(), 2 * 6);
        assert!(la.chunks(2).all(|p| p[1] == 255));
        let rgba = image.to_rgba();
        assert_eq!(rgba.len(), 4 * 6);
        assert_eq!(rgba[4..8], [la[2], la[2], la[2], 255]);
    }
}
