// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Phantom Geometry Cache
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_mri::{generate_phantom, PhantomKind, PhantomResolution, Volume};
use physiolab_types::error::LabResult;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

type Key = (PhantomKind, PhantomResolution);

/// Generated phantoms keyed by archetype and resolution.
///
/// Geometry depends only on the key, so acquisition changes reuse the
/// stored volume instead of relabelling every voxel.
#[derive(Debug, Default)]
pub struct PhantomCache {
    volumes: Mutex<HashMap<Key, Arc<Volume>>>,
    generated: AtomicUsize,
}

impl PhantomCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn volumes(&self) -> MutexGuard<'_, HashMap<Key, Arc<Volume>>> {
        self.volumes.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn get_or_generate(
        &self,
        kind: PhantomKind,
        resolution: PhantomResolution,
    ) -> LabResult<Arc<Volume>> {
        if let Some(volume) = self.volumes().get(&(kind, resolution)) {
            return Ok(Arc::clone(volume));
        }
        let (w, h, d) = resolution.dimensions();
        debug!(phantom = kind.label(), w, h, d, "generating phantom geometry");
        let volume = Arc::new(generate_phantom(kind, resolution)?);
        self.generated.fetch_add(1, Ordering::Relaxed);
        let stored = self
            .volumes()
            .entry((kind, resolution))
            .or_insert(volume)
            .clone();
        Ok(stored)
    }

    /// How many times geometry has been generated.
    pub fn generated(&self) -> usize {
        self.generated.load(Ordering::Relaxed)
    }

    pub fn len(&self) -> usize {
        self.volumes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes().is_empty()
    }

    pub fn clear(&self) {
        self.volumes().clear();
    }
}
