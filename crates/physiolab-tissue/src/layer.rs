// ─────────────────────────────────────────────────────────────────────
// PhysioLab Sim Core — Tissue Layers
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use serde::{Deserialize, Serialize};

/// Biological layer types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TissueKind {
    Skin,
    Fat,
    Muscle,
    Bone,
    Implant,
}

impl TissueKind {
    /// Acoustic attenuation [dB/cm/MHz].
    pub fn attenuation_db_cm_mhz(&self) -> f64 {
        match self {
            TissueKind::Skin => 0.8,
            TissueKind::Fat => 0.6,
            TissueKind::Muscle => 1.0,
            TissueKind::Bone => 20.0,
            TissueKind::Implant => 0.2,
        }
    }

    /// Relative volumetric heat capacity (muscle ≈ 1).
    pub fn heat_capacity_factor(&self) -> f64 {
        match self {
            TissueKind::Skin => 1.0,
            TissueKind::Fat => 0.7,
            TissueKind::Muscle => 1.1,
            TissueKind::Bone => 0.5,
            TissueKind::Implant => 0.3,
        }
    }

    /// Relative blood perfusion (heat removal).
    pub fn perfusion_factor(&self) -> f64 {
        match self {
            TissueKind::Skin => 1.0,
            TissueKind::Fat => 0.4,
            TissueKind::Muscle => 1.5,
            TissueKind::Bone => 0.4,
            TissueKind::Implant => 0.05,
        }
    }

    /// Low-frequency electrical conductivity [S/m].
    pub fn conductivity_s_m(&self) -> f64 {
        match self {
            TissueKind::Skin => 0.1,
            TissueKind::Fat => 0.04,
            TissueKind::Muscle => 0.35,
            TissueKind::Bone => 0.02,
            TissueKind::Implant => 1.0e6,
        }
    }

    /// Characteristic acoustic impedance [MRayl].
    pub fn acoustic_impedance_mrayl(&self) -> f64 {
        match self {
            TissueKind::Skin => 1.6,
            TissueKind::Fat => 1.38,
            TissueKind::Muscle => 1.7,
            TissueKind::Bone => 7.8,
            TissueKind::Implant => 45.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TissueKind::Skin => "skin",
            TissueKind::Fat => "fat",
            TissueKind::Muscle => "muscle",
            TissueKind::Bone => "bone",
            TissueKind::Implant => "implant",
        }
    }
}

/// One contiguous slab of tissue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueLayer {
    pub kind: TissueKind,
    pub depth_from_surface_cm: f64,
    pub thickness_cm: f64,
    /// dB/cm/MHz
    pub attenuation_coefficient: f64,
    pub heat_capacity_factor: f64,
    pub perfusion_factor: f64,
    /// S/m
    pub conductivity: f64,
    /// MRayl
    pub acoustic_impedance: f64,
}

impl TissueLayer {
    /// Layer with the default coefficients of `kind`.
    pub fn new(kind: TissueKind, depth_from_surface_cm: f64, thickness_cm: f64) -> Self {
        TissueLayer {
            kind,
            depth_from_surface_cm,
            thickness_cm,
            attenuation_coefficient: kind.attenuation_db_cm_mhz(),
            heat_capacity_factor: kind.heat_capacity_factor(),
            perfusion_factor: kind.perfusion_factor(),
            conductivity: kind.conductivity_s_m(),
            acoustic_impedance: kind.acoustic_impedance_mrayl(),
        }
    }

    pub fn end_depth_cm(&self) -> f64 {
        self.depth_from_surface_cm + self.thickness_cm
    }

    pub fn contains(&self, depth_cm: f64) -> bool {
        depth_cm >= self.depth_from_surface_cm && depth_cm < self.end_depth_cm()
    }
}

/// Metal insert embedded inside the stack.
///
/// It does not displace the layer it sits in; it only overrides that
/// layer's conductivity and acoustic reflectivity over its depth band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplantInsert {
    pub depth_cm: f64,
    pub thickness_cm: f64,
    /// S/m
    pub conductivity: f64,
    /// Intensity reflection fraction in [0, 1].
    pub reflectivity: f64,
}

impl ImplantInsert {
    /// Titanium/steel plate defaults.
    pub fn metal(depth_cm: f64, thickness_cm: f64) -> Self {
        ImplantInsert {
            depth_cm,
            thickness_cm,
            conductivity: TissueKind::Implant.conductivity_s_m(),
            reflectivity: 0.86,
        }
    }

    pub fn center_cm(&self) -> f64 {
        self.depth_cm + 0.5 * self.thickness_cm
    }

    pub fn contains(&self, depth_cm: f64) -> bool {
        depth_cm >= self.depth_cm && depth_cm <= self.depth_cm + self.thickness_cm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_uses_kind_defaults() {
        let layer = TissueLayer::new(TissueKind::Muscle, 0.5, 2.0);
        assert_eq!(layer.attenuation_coefficient, 1.0);
        assert_eq!(layer.conductivity, 0.35);
        assert!((layer.end_depth_cm() - 2.5).abs() < 1e-12);
        assert!(layer.contains(0.5));
        assert!(!layer.contains(2.5));
    }

    #[test]
    fn test_fat_conducts_less_than_muscle() {
        assert!(TissueKind::Fat.conductivity_s_m() < TissueKind::Skin.conductivity_s_m());
        assert!(TissueKind::Skin.conductivity_s_m() < TissueKind::Muscle.conductivity_s_m());
    }

    #[test]
    fn test_bone_is_acoustically_mismatched() {
        let z_muscle = TissueKind::Muscle.acoustic_impedance_mrayl();
        let z_bone = TissueKind::Bone.acoustic_impedance_mrayl();
        assert!(z_bone > 4.0 * z_muscle);
    }

    #[test]
    fn test_implant_band() {
        let implant = ImplantInsert::metal(1.0, 0.3);
        assert!(implant.contains(1.15));
        assert!(!implant.contains(1.5));
        assert!((implant.center_cm() - 1.15).abs() < 1e-12);
    }
}
