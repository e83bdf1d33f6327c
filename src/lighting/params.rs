// src/lighting/params.rs
// Declarative light parameters, as produced by scene-authoring config.
// Required keys are checked by the factory; a missing key fails with a
// configuration error naming it.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{LightError, LightResult};

pub const DEFAULT_SAMPLE_COUNT: u32 = 32;
pub const DEFAULT_SAMPLE_RADIUS: f32 = 1.0;

/// String-keyed light description. Which keys are required depends on the
/// light kind: `position` and `intensity` always, `rotation` and `fov`
/// additionally for spot lights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightParams {
    pub position: Option<Vec3>,
    /// Euler angles in degrees, XYZ order. Spot lights only.
    pub rotation: Option<Vec3>,
    /// Vertical field of view in degrees. Spot lights only.
    pub fov: Option<f32>,
    /// RGB intensity, non-negative.
    pub intensity: Option<Vec3>,
    /// Deep samples per pixel for map bakes. Honored by the map-based
    /// occluders, ignored by the voxel-sample and raymarch ones.
    pub sample_count: Option<u32>,
    /// Sample radius for the voxel-sample occluder.
    pub sample_radius: Option<f32>,
}

impl LightParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = Some(fov);
        self
    }

    pub fn with_intensity(mut self, intensity: Vec3) -> Self {
        self.intensity = Some(intensity);
        self
    }

    pub fn with_sample_count(mut self, sample_count: u32) -> Self {
        self.sample_count = Some(sample_count);
        self
    }

    pub fn with_sample_radius(mut self, sample_radius: f32) -> Self {
        self.sample_radius = Some(sample_radius);
        self
    }

    pub(crate) fn require_position(&self) -> LightResult<Vec3> {
        self.position.ok_or_else(|| LightError::missing("position"))
    }

    pub(crate) fn require_rotation(&self) -> LightResult<Vec3> {
        self.rotation.ok_or_else(|| LightError::missing("rotation"))
    }

    pub(crate) fn require_fov(&self) -> LightResult<f32> {
        let fov = self.fov.ok_or_else(|| LightError::missing("fov"))?;
        if !fov.is_finite() || fov <= 0.0 || fov >= 180.0 {
            return Err(LightError::invalid(
                "fov",
                "must be within (0, 180) degrees",
            ));
        }
        Ok(fov)
    }

    pub(crate) fn require_intensity(&self) -> LightResult<Vec3> {
        let intensity = self
            .intensity
            .ok_or_else(|| LightError::missing("intensity"))?;
        if !intensity.is_finite() || intensity.min_element() < 0.0 {
            return Err(LightError::invalid("intensity", "must be non-negative"));
        }
        Ok(intensity)
    }

    pub(crate) fn sample_count_or_default(&self) -> LightResult<u32> {
        match self.sample_count {
            Some(0) => Err(LightError::invalid("sample_count", "must be at least 1")),
            Some(n) => Ok(n),
            None => Ok(DEFAULT_SAMPLE_COUNT),
        }
    }

    pub(crate) fn sample_radius_or_default(&self) -> LightResult<f32> {
        match self.sample_radius {
            Some(r) if r.is_finite() && r > 0.0 => Ok(r),
            Some(_) => Err(LightError::invalid("sample_radius", "must be positive")),
            None => Ok(DEFAULT_SAMPLE_RADIUS),
        }
    }
}
