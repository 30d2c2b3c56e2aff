// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Tissue Stack
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use physiolab_types::error::{LabError, LabResult};
use serde::Serialize;

use crate::layer::{ImplantInsert, TissueKind, TissueLayer};

/// Tolerance on layer boundaries [cm].
const CONTIGUITY_TOL: f64 = 1e-9;

/// Depth-ordered, contiguous tissue stack.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TissueStack {
    layers: Vec<TissueLayer>,
    implant: Option<ImplantInsert>,
}

impl TissueStack {
    /// Validate and wrap a surface-first list of layers.
    pub fn new(layers: Vec<TissueLayer>, implant: Option<ImplantInsert>) -> LabResult<Self> {
        if layers.is_empty() {
            return Err(LabError::InvalidStack("stack has no layers".to_string()));
        }
        let mut expected_top = 0.0;
        for (i, layer) in layers.iter().enumerate() {
            if !layer.thickness_cm.is_finite() || layer.thickness_cm < 0.0 {
                return Err(LabError::InvalidStack(format!(
                    "layer {i} ({}) has invalid thickness {}",
                    layer.kind.label(),
                    layer.thickness_cm
                )));
            }
            if !layer.depth_from_surface_cm.is_finite()
                || (layer.depth_from_surface_cm - expected_top).abs() > CONTIGUITY_TOL
            {
                return Err(LabError::InvalidStack(format!(
                    "layer {i} ({}) starts at {} cm, expected {} cm",
                    layer.kind.label(),
                    layer.depth_from_surface_cm,
                    expected_top
                )));
            }
            expected_top = layer.end_depth_cm();
        }
        if let Some(insert) = &implant {
            if !insert.depth_cm.is_finite()
                || insert.depth_cm < 0.0
                || !insert.thickness_cm.is_finite()
                || insert.thickness_cm <= 0.0
                || insert.depth_cm >= expected_top
            {
                return Err(LabError::InvalidStack(format!(
                    "implant at {} cm with thickness {} cm is not placeable",
                    insert.depth_cm, insert.thickness_cm
                )));
            }
        }
        Ok(TissueStack { layers, implant })
    }

    pub fn layers(&self) -> &[TissueLayer] {
        &self.layers
    }

    pub fn implant(&self) -> Option<&ImplantInsert> {
        self.implant.as_ref()
    }

    pub fn has_implant(&self) -> bool {
        self.implant.is_some()
    }

    /// Depth where the terminal layer begins plus its nominal thickness.
    pub fn total_depth(&self) -> f64 {
        self.layers.last().map_or(0.0, TissueLayer::end_depth_cm)
    }

    /// Layer active at `depth_cm`. Depths past the stack fall into the
    /// terminal layer; negative depths into the surface layer.
    pub fn layer_at(&self, depth_cm: f64) -> &TissueLayer {
        self.layers
            .iter()
            .find(|l| depth_cm < l.end_depth_cm())
            .unwrap_or_else(|| &self.layers[self.layers.len() - 1])
    }

    /// Summed thickness of every layer of `kind`.
    pub fn thickness_of(&self, kind: TissueKind) -> f64 {
        self.layers
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.thickness_cm)
            .sum()
    }

    /// Top depth of the first layer of `kind`.
    pub fn depth_of(&self, kind: TissueKind) -> Option<f64> {
        self.layers
            .iter()
            .find(|l| l.kind == kind)
            .map(|l| l.depth_from_surface_cm)
    }

    /// Integrate a per-layer coefficient along the path from the surface to
    /// `depth_cm`. The terminal layer extends past the stack.
    pub fn path_integral<F>(&self, depth_cm: f64, coefficient: F) -> f64
    where
        F: Fn(&TissueLayer) -> f64,
    {
        let depth = depth_cm.max(0.0);
        let last = self.layers.len() - 1;
        self.layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let bottom = if i == last {
                    f64::INFINITY
                } else {
                    layer.end_depth_cm()
                };
                let traversed = (depth.min(bottom) - layer.depth_from_surface_cm).max(0.0);
                coefficient(layer) * traversed
            })
            .sum()
    }

    /// Conductivity at depth with the implant override applied.
    pub fn conductivity_at(&self, depth_cm: f64) -> f64 {
        match &self.implant {
            Some(insert) if insert.contains(depth_cm) => insert.conductivity,
            _ => self.layer_at(depth_cm).conductivity,
        }
    }
}

/// Builds a stack under the clamped-overflow rule.
///
/// Thicknesses are summed from the surface down. If they exceed the block
/// depth, the deeper layers are clamped so that the terminal layer still
/// closes the stack with at least its minimum thickness. Zero-thickness
/// upper layers are dropped.
#[derive(Debug, Clone)]
pub struct StackBuilder {
    upper: Vec<(TissueKind, f64)>,
    terminal: TissueKind,
    terminal_min_cm: f64,
    max_depth_cm: f64,
    implant: Option<ImplantInsert>,
}

impl StackBuilder {
    pub fn new(max_depth_cm: f64) -> Self {
        StackBuilder {
            upper: Vec::new(),
            terminal: TissueKind::Bone,
            terminal_min_cm: 0.0,
            max_depth_cm,
            implant: None,
        }
    }

    pub fn layer(mut self, kind: TissueKind, thickness_cm: f64) -> Self {
        self.upper.push((kind, thickness_cm));
        self
    }

    pub fn terminal(mut self, kind: TissueKind, min_thickness_cm: f64) -> Self {
        self.terminal = kind;
        self.terminal_min_cm = min_thickness_cm;
        self
    }

    pub fn implant(mut self, implant: Option<ImplantInsert>) -> Self {
        self.implant = implant;
        self
    }

    pub fn build(self) -> LabResult<TissueStack> {
        if !self.max_depth_cm.is_finite() || self.max_depth_cm <= 0.0 {
            return Err(LabError::InvalidStack(format!(
                "block depth must be finite and > 0, got {}",
                self.max_depth_cm
            )));
        }
        let terminal_min = sanitize(self.terminal_min_cm).min(self.max_depth_cm);
        let budget = self.max_depth_cm - terminal_min;

        let mut layers = Vec::with_capacity(self.upper.len() + 1);
        let mut used = 0.0;
        for (kind, desired) in self.upper {
            let thickness = sanitize(desired).min(budget - used).max(0.0);
            if thickness > 0.0 {
                layers.push(TissueLayer::new(kind, used, thickness));
                used += thickness;
            }
        }
        let terminal_thickness = (self.max_depth_cm - used).max(0.0);
        layers.push(TissueLayer::new(self.terminal, used, terminal_thickness));

        TissueStack::new(layers, self.implant)
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}
