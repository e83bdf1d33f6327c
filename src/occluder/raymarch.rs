// src/occluder/raymarch.rs
// Delegates every occlusion query to the renderer's raymarcher: one
// transmittance trace from the shaded point toward the light, no caching.

use std::sync::Arc;

use glam::Vec3;

use super::Occluder;
use crate::renderer::SceneRenderer;

const MIN_TRACE_DISTANCE: f32 = 1.0e-6;

pub struct RaymarchOccluder {
    renderer: Arc<dyn SceneRenderer>,
    light_position: Vec3,
}

impl RaymarchOccluder {
    pub fn new(renderer: Arc<dyn SceneRenderer>, light_position: Vec3) -> Self {
        Self {
            renderer,
            light_position,
        }
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }
}

impl Occluder for RaymarchOccluder {
    fn transmittance(&self, ws_p: Vec3) -> f32 {
        let to_light = self.light_position - ws_p;
        let distance = to_light.length();
        if distance < MIN_TRACE_DISTANCE {
            return 1.0;
        }
        self.renderer
            .trace_transmittance(ws_p, to_light / distance, distance)
            .clamp(0.0, 1.0)
    }
}
