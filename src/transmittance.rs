// src/transmittance.rs
// Immutable baked transmittance map: per-pixel samples plus the camera used
// to bake them. Lookups reproject world points through that camera.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::camera::ShadowCamera;
use crate::error::{LightError, LightResult};

/// How the per-pixel samples are encoded. Fixed per map instance; bake and
/// lookup must agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MapEncoding {
    /// Samples are optical depth, converted to attenuation via exp(-tau).
    OpticalDepth,
    /// Samples are attenuation values in [0, 1], returned directly.
    Attenuation,
}

impl MapEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            MapEncoding::OpticalDepth => "optical_depth",
            MapEncoding::Attenuation => "attenuation",
        }
    }
}

/// Baked shadow data for one light. Immutable after construction; a rebake
/// produces a new map with a higher version.
#[derive(Debug, Clone)]
pub struct TransmittanceMap {
    camera: ShadowCamera,
    encoding: MapEncoding,
    samples: Vec<f32>,
    version: u64,
}

impl TransmittanceMap {
    /// Pairs a baked sample buffer with the camera it was baked through.
    /// The buffer length must match the camera resolution.
    pub fn new(
        camera: ShadowCamera,
        encoding: MapEncoding,
        samples: Vec<f32>,
    ) -> LightResult<Self> {
        let (w, h) = camera.resolution();
        if w == 0 || h == 0 {
            return Err(LightError::bake("transmittance map resolution must be non-zero"));
        }
        if samples.len() != (w as usize) * (h as usize) {
            return Err(LightError::bake(format!(
                "transmittance buffer has {} samples, camera resolution {}x{} needs {}",
                samples.len(),
                w,
                h,
                (w as usize) * (h as usize)
            )));
        }
        Ok(Self {
            camera,
            encoding,
            samples,
            version: 1,
        })
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = version;
        self
    }

    pub fn camera(&self) -> &ShadowCamera {
        &self.camera
    }

    pub fn encoding(&self) -> MapEncoding {
        self.encoding
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.camera.resolution()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Raw sample buffer, row-major. Values are interpreted per
    /// [`MapEncoding`].
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// Attenuation toward the baking light for a world point.
    ///
    /// Points the camera cannot project, or that land outside the raster
    /// bounds, resolve to 0: where the shadow source has no information it
    /// assumes full occlusion.
    pub fn attenuation(&self, ws_p: Vec3) -> f32 {
        let rs = match self.camera.world_to_raster(ws_p) {
            Some(rs) => rs,
            None => return 0.0,
        };
        // A spherical camera covers every direction; seam and pole
        // coordinates clamp into range inside the bilinear sampler. Only
        // frustum cameras have genuinely unshadowed raster space.
        if !self.camera.can_project_behind() {
            let (w, h) = self.camera.resolution();
            if rs.x < 0.0 || rs.x >= w as f32 || rs.y < 0.0 || rs.y >= h as f32 {
                return 0.0;
            }
        }
        let sample = self.bilinear(rs.x, rs.y);
        match self.encoding {
            MapEncoding::OpticalDepth => (-sample.max(0.0)).exp(),
            MapEncoding::Attenuation => sample.clamp(0.0, 1.0),
        }
    }

    /// Bilinear sample with edge clamping between the floor and ceiling
    /// raster cells.
    fn bilinear(&self, x: f32, y: f32) -> f32 {
        let (w, h) = self.camera.resolution();
        let max_x = (w - 1) as i64;
        let max_y = (h - 1) as i64;
        let x0 = (x.floor() as i64).clamp(0, max_x) as usize;
        let x1 = (x.ceil() as i64).clamp(0, max_x) as usize;
        let y0 = (y.floor() as i64).clamp(0, max_y) as usize;
        let y1 = (y.ceil() as i64).clamp(0, max_y) as usize;
        let fx = x - x.floor();
        let fy = y - y.floor();
        let row = w as usize;
        let s00 = self.samples[y0 * row + x0];
        let s10 = self.samples[y0 * row + x1];
        let s01 = self.samples[y1 * row + x0];
        let s11 = self.samples[y1 * row + x1];
        let top = s00 + (s10 - s00) * fx;
        let bottom = s01 + (s11 - s01) * fx;
        top + (bottom - top) * fy
    }
}
