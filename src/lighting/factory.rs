// src/lighting/factory.rs
// Resolves a declarative light description into a fully configured
// LightSource: builds the light's shadow camera, constructs the requested
// occluder, and runs the eager bake when one is required.

use std::sync::Arc;

use glam::{EulerRot, Quat};
use log::{info, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::params::LightParams;
use super::{LightKind, LightSource};
use crate::bake::ShadowBakeJob;
use crate::camera::ShadowCamera;
use crate::error::{LightError, LightResult};
use crate::occluder::{
    NullOccluder, Occluder, OccluderKind, OnDemandTransmittanceMapOccluder, RaymarchOccluder,
    TransmittanceMapOccluder, VoxelSampleOccluder,
};
use crate::renderer::SceneRenderer;

/// Base map resolution for point lights (full lat-long coverage).
pub const POINT_MAP_RESOLUTION: (u32, u32) = (2048, 1024);
/// Base map resolution for spot lights (square frustum map).
pub const SPOT_MAP_RESOLUTION: (u32, u32) = (1024, 1024);

/// One fully-declarative light: kind, parameters and occluder selection.
/// Suitable for scene-level serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightDescription {
    pub name: String,
    pub kind: LightKind,
    #[serde(default)]
    pub occluder: OccluderKind,
    pub params: LightParams,
}

/// Builds lights against one base renderer at a fixed resolution scale.
pub struct LightFactory {
    renderer: Arc<dyn SceneRenderer>,
    resolution_multiplier: f32,
}

impl LightFactory {
    pub fn new(
        renderer: Arc<dyn SceneRenderer>,
        resolution_multiplier: f32,
    ) -> LightResult<Self> {
        if !resolution_multiplier.is_finite() || resolution_multiplier <= 0.0 {
            return Err(LightError::invalid(
                "resolution_multiplier",
                "must be positive and finite",
            ));
        }
        Ok(Self {
            renderer,
            resolution_multiplier,
        })
    }

    pub fn resolution_multiplier(&self) -> f32 {
        self.resolution_multiplier
    }

    /// Configures one light. Eager occluder kinds run their bake
    /// synchronously before this returns; on any error no light is
    /// produced.
    pub fn configure(
        &self,
        kind: LightKind,
        params: &LightParams,
        occluder_kind: OccluderKind,
    ) -> LightResult<LightSource> {
        info!(
            "configuring {} light ({} occluder)",
            kind.name(),
            occluder_kind.name()
        );
        match kind {
            LightKind::Point => self.configure_point(params, occluder_kind),
            LightKind::Spot => self.configure_spot(params, occluder_kind),
        }
    }

    /// Name-tagged entry point for scene files. An unknown light kind is
    /// fatal; an unknown occluder kind falls back to the null occluder
    /// with a warning.
    pub fn configure_named(
        &self,
        kind: &str,
        params: &LightParams,
        occluder_kind: &str,
    ) -> LightResult<LightSource> {
        let kind = LightKind::from_name(kind).ok_or_else(|| LightError::unsupported_kind(kind))?;
        let occluder = OccluderKind::from_name(occluder_kind).unwrap_or_else(|| {
            warn!(
                "unrecognized occluder kind '{}', falling back to null",
                occluder_kind
            );
            OccluderKind::Null
        });
        self.configure(kind, params, occluder)
    }

    /// Configures a batch of lights, running their bakes across the worker
    /// pool, and joins before returning. Every returned light is fully
    /// baked; a failed light fails the batch with its name attached.
    pub fn configure_all(&self, lights: &[LightDescription]) -> LightResult<Vec<LightSource>> {
        lights
            .par_iter()
            .map(|desc| {
                self.configure(desc.kind, &desc.params, desc.occluder)
                    .map_err(|err| err.for_light(&desc.name))
            })
            .collect()
    }

    fn configure_point(
        &self,
        params: &LightParams,
        occluder_kind: OccluderKind,
    ) -> LightResult<LightSource> {
        let position = params.require_position()?;
        let intensity = params.require_intensity()?;
        let sample_count = params.sample_count_or_default()?;
        let camera =
            ShadowCamera::spherical(position, self.scaled_resolution(POINT_MAP_RESOLUTION));
        let occluder = self.build_occluder(occluder_kind, &camera, params, sample_count)?;
        Ok(LightSource::new(
            LightKind::Point,
            position,
            Quat::IDENTITY,
            intensity,
            None,
            sample_count,
            occluder,
        ))
    }

    fn configure_spot(
        &self,
        params: &LightParams,
        occluder_kind: OccluderKind,
    ) -> LightResult<LightSource> {
        let position = params.require_position()?;
        let intensity = params.require_intensity()?;
        let rotation = params.require_rotation()?;
        let fov = params.require_fov()?;
        let sample_count = params.sample_count_or_default()?;
        let orientation = Quat::from_euler(
            EulerRot::XYZ,
            rotation.x.to_radians(),
            rotation.y.to_radians(),
            rotation.z.to_radians(),
        );
        let camera = ShadowCamera::perspective(
            position,
            orientation,
            fov,
            self.scaled_resolution(SPOT_MAP_RESOLUTION),
        );
        let occluder = self.build_occluder(occluder_kind, &camera, params, sample_count)?;
        Ok(LightSource::new(
            LightKind::Spot,
            position,
            orientation,
            intensity,
            Some(fov),
            sample_count,
            occluder,
        ))
    }

    fn build_occluder(
        &self,
        kind: OccluderKind,
        camera: &ShadowCamera,
        params: &LightParams,
        sample_count: u32,
    ) -> LightResult<Box<dyn Occluder>> {
        match kind {
            OccluderKind::Null => Ok(Box::new(NullOccluder)),
            OccluderKind::TransmittanceMap => {
                let job = ShadowBakeJob::new(camera.clone(), sample_count);
                let map = job.run(self.renderer.as_ref())?;
                Ok(Box::new(TransmittanceMapOccluder::new(map)))
            }
            OccluderKind::OnDemandTransmittanceMap => {
                Ok(Box::new(OnDemandTransmittanceMapOccluder::new(
                    Arc::clone(&self.renderer),
                    camera.clone(),
                    sample_count,
                )))
            }
            OccluderKind::VoxelSample => {
                let field = self.renderer.density_field().ok_or_else(|| {
                    LightError::configuration(
                        "occluder 'voxel_sample' requires a renderer with an accessible \
                         density field",
                    )
                })?;
                let radius = params.sample_radius_or_default()?;
                Ok(Box::new(VoxelSampleOccluder::new(field, radius)))
            }
            OccluderKind::Raymarch => Ok(Box::new(RaymarchOccluder::new(
                Arc::clone(&self.renderer),
                camera.position(),
            ))),
        }
    }

    fn scaled_resolution(&self, base: (u32, u32)) -> (u32, u32) {
        let scale = |v: u32| ((v as f32 * self.resolution_multiplier) as u32).max(1);
        (scale(base.0), scale(base.1))
    }
}
