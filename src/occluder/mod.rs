// src/occluder/mod.rs
// Occluder strategies: how a light answers "how much light reaches this
// point" queries. Variants trade bake cost against per-call cost.

use glam::Vec3;
use serde::{Deserialize, Serialize};

pub mod map;
pub mod otf;
pub mod raymarch;
pub mod voxel;

pub use map::TransmittanceMapOccluder;
pub use otf::OnDemandTransmittanceMapOccluder;
pub use raymarch::RaymarchOccluder;
pub use voxel::VoxelSampleOccluder;

/// Answers occlusion queries for one light.
///
/// Implementations are called concurrently from shading workers during the
/// primary pass and must be safe under concurrent invocation. Conceptually
/// pure after construction; the on-demand variant's first-call cache fill is
/// the only mutation point.
pub trait Occluder: Send + Sync {
    /// Fraction of the light's output surviving to `ws_p`, in [0, 1].
    fn transmittance(&self, ws_p: Vec3) -> f32;
}

/// Occluder strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OccluderKind {
    Null,
    TransmittanceMap,
    /// The default strategy: full map quality, cost deferred to first use.
    #[default]
    OnDemandTransmittanceMap,
    VoxelSample,
    Raymarch,
}

impl OccluderKind {
    pub fn name(&self) -> &'static str {
        match self {
            OccluderKind::Null => "null",
            OccluderKind::TransmittanceMap => "transmittance_map",
            OccluderKind::OnDemandTransmittanceMap => "on_demand_transmittance_map",
            OccluderKind::VoxelSample => "voxel_sample",
            OccluderKind::Raymarch => "raymarch",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "null" => Some(OccluderKind::Null),
            "transmittance_map" => Some(OccluderKind::TransmittanceMap),
            "on_demand_transmittance_map" => Some(OccluderKind::OnDemandTransmittanceMap),
            "voxel_sample" => Some(OccluderKind::VoxelSample),
            "raymarch" => Some(OccluderKind::Raymarch),
            _ => None,
        }
    }

    /// Whether configuration must run a full bake before the light is
    /// usable.
    pub fn requires_eager_bake(&self) -> bool {
        matches!(self, OccluderKind::TransmittanceMap)
    }
}

/// No occlusion: every point receives the light's full output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullOccluder;

impl Occluder for NullOccluder {
    fn transmittance(&self, _ws_p: Vec3) -> f32 {
        1.0
    }
}
