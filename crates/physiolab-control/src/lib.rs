// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Lab Orchestration
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Orchestration of the three laboratories.
//!
//! The engines in the sibling crates are pure functions. This crate owns
//! what they deliberately leave out: the published "current result",
//! serialisation of overlapping requests, the MRI geometry cache, preset
//! documents and logging.

pub mod cache;
pub mod controller;
pub mod engine;
pub mod preset;

pub use cache::PhantomCache;
pub use controller::{LabController, Phase, Submission};
pub use engine::{LabEngine, MriEngine, MriOutput, MriSetup, StimEngine, StimSetup, UltrasoundEngine};
pub use preset::{load_preset, save_preset};
