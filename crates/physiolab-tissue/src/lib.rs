// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Tissue Model
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Layered tissue description shared by the stimulation and ultrasound labs.
//!
//! A stack runs from the skin surface downwards; the deepest layer
//! (bone or background muscle) is treated as extending indefinitely.

pub mod layer;
pub mod scenario;
pub mod stack;

pub use layer::{ImplantInsert, TissueKind, TissueLayer};
pub use scenario::{CustomStack, Scenario};
pub use stack::{StackBuilder, TissueStack};
