// src/bake.rs
// One transmittance bake as an explicit job: clone the base renderer, flip
// it into transmittance-only mode, execute, and wrap the resulting buffer.
// Jobs hold no state across invocations and never touch the caller's
// live renderer.

use log::{debug, info};

use crate::camera::ShadowCamera;
use crate::error::{LightError, LightResult};
use crate::renderer::SceneRenderer;
use crate::transmittance::TransmittanceMap;

/// Bakes the transmittance map for a single light. Created per bake
/// request and discarded afterwards.
#[derive(Debug, Clone)]
pub struct ShadowBakeJob {
    camera: ShadowCamera,
    sample_count: u32,
}

impl ShadowBakeJob {
    pub fn new(camera: ShadowCamera, sample_count: u32) -> Self {
        Self {
            camera,
            sample_count,
        }
    }

    pub fn camera(&self) -> &ShadowCamera {
        &self.camera
    }

    pub fn sample_count(&self) -> u32 {
        self.sample_count
    }

    /// Runs the sub-render against a clone of `base` and returns the baked
    /// map. A failed execution aborts with a bake error; there are no
    /// retries.
    pub fn run(&self, base: &dyn SceneRenderer) -> LightResult<TransmittanceMap> {
        let (w, h) = self.camera.resolution();
        info!(
            "baking {}x{} transmittance map ({} projection, {} deep samples)",
            w,
            h,
            self.camera.projection_kind().name(),
            self.sample_count
        );

        let mut renderer = base.clone_renderer();
        renderer.set_camera(self.camera.clone());
        renderer.set_primary_enabled(false);
        renderer.set_transmittance_map_enabled(true);
        renderer.set_num_deep_samples(self.sample_count);
        renderer.execute()?;

        let buffer = renderer
            .transmittance_map()
            .ok_or_else(|| LightError::bake("renderer produced no transmittance buffer"))?;
        if (buffer.width, buffer.height) != (w, h) {
            return Err(LightError::bake(format!(
                "renderer returned a {}x{} buffer for a {}x{} bake camera",
                buffer.width, buffer.height, w, h
            )));
        }
        debug!("bake complete, {} encoding", buffer.encoding.name());
        TransmittanceMap::new(self.camera.clone(), buffer.encoding, buffer.samples)
    }
}
