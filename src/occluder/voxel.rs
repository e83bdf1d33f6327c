// src/occluder/voxel.rs
// Single-sample density occluder: no bake, no bounds. Attenuation is
// estimated from the extinction coefficient at the shaded point over a
// fixed sample radius.

use std::sync::Arc;

use glam::Vec3;

use super::Occluder;
use crate::renderer::DensityField;

pub struct VoxelSampleOccluder {
    field: Arc<dyn DensityField>,
    sample_radius: f32,
}

impl VoxelSampleOccluder {
    pub fn new(field: Arc<dyn DensityField>, sample_radius: f32) -> Self {
        Self {
            field,
            sample_radius,
        }
    }

    pub fn sample_radius(&self) -> f32 {
        self.sample_radius
    }
}

impl Occluder for VoxelSampleOccluder {
    fn transmittance(&self, ws_p: Vec3) -> f32 {
        let sigma = self.field.density(ws_p).max(0.0);
        (-sigma * self.sample_radius).exp()
    }
}
