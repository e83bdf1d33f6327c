// src/camera.rs
// Shadow-camera projections used to bake and look up transmittance maps
// Perspective cameras match a spot light's frustum; spherical cameras give
// point lights full lat-long coverage.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Near/far planes for the spot-light frustum. Only the xy projection
/// matters for map lookups, so the exact values are uncritical.
const PERSPECTIVE_NEAR: f32 = 0.01;
const PERSPECTIVE_FAR: f32 = 1.0e4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectionKind {
    Perspective,
    Spherical,
}

impl ProjectionKind {
    pub fn name(&self) -> &'static str {
        match self {
            ProjectionKind::Perspective => "perspective",
            ProjectionKind::Spherical => "spherical",
        }
    }
}

/// Camera positioned at a light's transform. Projects world points to raster
/// coordinates for map lookups and generates per-pixel rays for bakes.
///
/// The camera looks down its local -Z axis. Raster space is image-style:
/// x right, y down, origin at the top-left pixel corner.
#[derive(Debug, Clone)]
pub struct ShadowCamera {
    position: Vec3,
    orientation: Quat,
    resolution: (u32, u32),
    projection: Projection,
}

#[derive(Debug, Clone)]
enum Projection {
    Perspective {
        fov_y_deg: f32,
        world_to_clip: Mat4,
        clip_to_world: Mat4,
    },
    Spherical,
}

impl ShadowCamera {
    /// Perspective camera matching a spot light's vertical field of view.
    pub fn perspective(
        position: Vec3,
        orientation: Quat,
        fov_y_deg: f32,
        resolution: (u32, u32),
    ) -> Self {
        let aspect = resolution.0 as f32 / resolution.1 as f32;
        let view = Mat4::from_rotation_translation(orientation, position).inverse();
        let proj = Mat4::perspective_rh(
            fov_y_deg.to_radians(),
            aspect,
            PERSPECTIVE_NEAR,
            PERSPECTIVE_FAR,
        );
        let world_to_clip = proj * view;
        Self {
            position,
            orientation,
            resolution,
            projection: Projection::Perspective {
                fov_y_deg,
                world_to_clip,
                clip_to_world: world_to_clip.inverse(),
            },
        }
    }

    /// Lat-long camera covering the full sphere around a point light.
    pub fn spherical(position: Vec3, resolution: (u32, u32)) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
            resolution,
            projection: Projection::Spherical,
        }
    }

    pub fn projection_kind(&self) -> ProjectionKind {
        match self.projection {
            Projection::Perspective { .. } => ProjectionKind::Perspective,
            Projection::Spherical => ProjectionKind::Spherical,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn resolution(&self) -> (u32, u32) {
        self.resolution
    }

    pub fn fov_y_deg(&self) -> Option<f32> {
        match self.projection {
            Projection::Perspective { fov_y_deg, .. } => Some(fov_y_deg),
            Projection::Spherical => None,
        }
    }

    /// Whether points behind the camera still have a raster coordinate.
    /// True for spherical cameras, false for perspective ones.
    pub fn can_project_behind(&self) -> bool {
        matches!(self.projection, Projection::Spherical)
    }

    /// Projects a world point to raster coordinates. Returns None when the
    /// point has no projection (at or behind a perspective camera).
    pub fn world_to_raster(&self, ws_p: Vec3) -> Option<Vec2> {
        let (w, h) = (self.resolution.0 as f32, self.resolution.1 as f32);
        match &self.projection {
            Projection::Perspective { world_to_clip, .. } => {
                let clip = *world_to_clip * ws_p.extend(1.0);
                if clip.w <= 0.0 {
                    return None;
                }
                let ndc = clip.truncate() / clip.w;
                Some(Vec2::new(
                    (ndc.x * 0.5 + 0.5) * w,
                    (0.5 - ndc.y * 0.5) * h,
                ))
            }
            Projection::Spherical => {
                let cs = self.orientation.inverse() * (ws_p - self.position);
                let len_sq = cs.length_squared();
                if len_sq < 1.0e-12 {
                    // Degenerate: the camera position itself maps to the
                    // raster center.
                    return Some(Vec2::new(w * 0.5, h * 0.5));
                }
                let longitude = cs.x.atan2(-cs.z);
                let latitude = (cs.y / len_sq.sqrt()).clamp(-1.0, 1.0).asin();
                Some(Vec2::new(
                    (longitude / std::f32::consts::TAU + 0.5) * w,
                    (0.5 - latitude / std::f32::consts::PI) * h,
                ))
            }
        }
    }

    /// Ray through the center of pixel (x, y): origin and unit direction.
    pub fn pixel_ray(&self, x: u32, y: u32) -> (Vec3, Vec3) {
        let (w, h) = (self.resolution.0 as f32, self.resolution.1 as f32);
        let u = (x as f32 + 0.5) / w;
        let v = (y as f32 + 0.5) / h;
        match &self.projection {
            Projection::Perspective { clip_to_world, .. } => {
                let ndc = Vec4::new(u * 2.0 - 1.0, 1.0 - v * 2.0, 0.5, 1.0);
                let ws = *clip_to_world * ndc;
                let ws = ws.truncate() / ws.w;
                (self.position, (ws - self.position).normalize())
            }
            Projection::Spherical => {
                let longitude = (u - 0.5) * std::f32::consts::TAU;
                let latitude = (0.5 - v) * std::f32::consts::PI;
                let cs = Vec3::new(
                    latitude.cos() * longitude.sin(),
                    latitude.sin(),
                    -(latitude.cos() * longitude.cos()),
                );
                (self.position, self.orientation * cs)
            }
        }
    }
}
