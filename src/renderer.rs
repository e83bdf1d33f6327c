// src/renderer.rs
// Capability surface of the external volumetric rendering engine
// The raymarching engine itself lives outside this crate; occluders and bake
// jobs only depend on the traits defined here.

use std::sync::Arc;

use glam::Vec3;

use crate::camera::ShadowCamera;
use crate::transmittance::MapEncoding;

/// Failure reported by the external renderer's execute step.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct RenderFailure(pub String);

/// Raw per-pixel samples a renderer hands back after a transmittance pass,
/// before being paired with the bake camera. The encoding is fixed by the
/// renderer and carried through to lookups unchanged.
#[derive(Debug, Clone)]
pub struct TransmittanceBuffer {
    pub width: u32,
    pub height: u32,
    pub encoding: MapEncoding,
    pub samples: Vec<f32>,
}

/// The renderer operations this crate depends on.
///
/// `clone_renderer` must produce an independent copy that inherits the
/// source renderer's volumes and global settings but owns its own mutable
/// render state (camera, output toggles), so that bakes for distinct lights
/// can run concurrently against clones of the same base renderer.
pub trait SceneRenderer: Send + Sync {
    fn clone_renderer(&self) -> Box<dyn SceneRenderer>;

    fn set_camera(&mut self, camera: ShadowCamera);

    /// Primary-image computation; disabled during transmittance passes.
    fn set_primary_enabled(&mut self, enabled: bool);

    fn set_transmittance_map_enabled(&mut self, enabled: bool);

    /// Per-pixel sample count for transmittance accumulation.
    fn set_num_deep_samples(&mut self, samples: u32);

    fn execute(&mut self) -> Result<(), RenderFailure>;

    /// The buffer produced by the last execute, if transmittance-map
    /// computation was enabled.
    fn transmittance_map(&self) -> Option<TransmittanceBuffer>;

    /// Traces a single transmittance-only ray and returns the fraction of
    /// light surviving along [0, t_max]. Used by the raymarch occluder.
    fn trace_transmittance(&self, origin: Vec3, direction: Vec3, t_max: f32) -> f32;

    /// Direct access to the scene's density field, when the engine exposes
    /// one. Required by the voxel-sample occluder.
    fn density_field(&self) -> Option<Arc<dyn DensityField>> {
        None
    }
}

/// A participating-medium density field, for occluders that estimate
/// attenuation from a single sample instead of a baked map.
pub trait DensityField: Send + Sync {
    /// Extinction coefficient at a world position.
    fn density(&self, ws_p: Vec3) -> f32;
}
