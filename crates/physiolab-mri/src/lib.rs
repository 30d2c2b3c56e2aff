// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — MRI Lab
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! MR relaxation lab: procedural voxel phantoms, signal evaluation and
//! windowed slice images.
//!
//! Geometry generation depends only on the phantom archetype and is kept
//! separate from signal evaluation, so acquisition changes can reuse a
//! generated [`Volume`].

pub mod acquisition;
pub mod phantom;
pub mod signal;
pub mod slice;
pub mod tissue;
pub mod volume;

pub use acquisition::{advisories, AcquisitionParams, SequenceKind};
pub use phantom::{generate_phantom, PhantomKind, PhantomResolution};
pub use signal::{evaluate_signal, evaluate_signal_traced, tissue_contrast, SignalResult};
pub use slice::{extract_slice, SliceImage, WindowLevel};
pub use tissue::{MriTissue, RelaxationProps};
pub use volume::{voxel_count, Volume, Voxel};
