// src/lighting/mod.rs
// Light entities: kind, transform, intensity and the attached occluder.
// Sampling returns unoccluded luminance; occlusion is a separate query so
// shading code can weigh the two independently.

use std::f32::consts::FRAC_PI_2;
use std::fmt;

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::occluder::Occluder;

pub mod factory;
pub mod params;
pub mod presets;

pub use factory::{LightDescription, LightFactory};
pub use params::{LightParams, DEFAULT_SAMPLE_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightKind {
    Point,
    Spot,
}

impl LightKind {
    pub fn name(&self) -> &'static str {
        match self {
            LightKind::Point => "point",
            LightKind::Spot => "spot",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "point" => Some(LightKind::Point),
            "spot" => Some(LightKind::Spot),
            _ => None,
        }
    }
}

/// Result of sampling a light: luminance arriving at the shaded point
/// before occlusion, and the light position that was sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightSample {
    pub luminance: Vec3,
    pub ws_p: Vec3,
}

/// A fully configured shadow-casting light. Owns exactly one occluder;
/// the factory guarantees eager occluders are baked before a LightSource
/// is ever handed out.
pub struct LightSource {
    kind: LightKind,
    position: Vec3,
    orientation: Quat,
    intensity: Vec3,
    field_of_view: Option<f32>,
    sample_budget: u32,
    falloff_enabled: bool,
    soft_rolloff: bool,
    cos_width: f32,
    cos_start: f32,
    occluder: Box<dyn Occluder>,
}

impl LightSource {
    pub(crate) fn new(
        kind: LightKind,
        position: Vec3,
        orientation: Quat,
        intensity: Vec3,
        field_of_view: Option<f32>,
        sample_budget: u32,
        occluder: Box<dyn Occluder>,
    ) -> Self {
        Self {
            kind,
            position,
            orientation,
            intensity,
            field_of_view,
            sample_budget,
            falloff_enabled: false,
            soft_rolloff: true,
            // Cone covers the full hemisphere until narrowed.
            cos_width: FRAC_PI_2.cos(),
            cos_start: FRAC_PI_2.cos(),
            occluder,
        }
    }

    pub fn kind(&self) -> LightKind {
        self.kind
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn intensity(&self) -> Vec3 {
        self.intensity
    }

    /// Vertical field of view in degrees; spot lights only.
    pub fn field_of_view(&self) -> Option<f32> {
        self.field_of_view
    }

    pub fn sample_budget(&self) -> u32 {
        self.sample_budget
    }

    pub fn occluder(&self) -> &dyn Occluder {
        self.occluder.as_ref()
    }

    pub fn falloff_enabled(&self) -> bool {
        self.falloff_enabled
    }

    pub fn set_falloff_enabled(&mut self, enabled: bool) {
        self.falloff_enabled = enabled;
    }

    /// Cone falloff band for spot lights, both angles in radians measured
    /// from the light axis. Full intensity inside `start`, zero outside
    /// `width`.
    pub fn set_cone_angles(&mut self, width: f32, start: f32) {
        self.cos_width = width.cos();
        self.cos_start = start.cos();
    }

    /// Luminance arriving at `ws_p`, ignoring occlusion.
    pub fn sample(&self, ws_p: Vec3) -> LightSample {
        let luminance = match self.kind {
            LightKind::Point => self.intensity * self.falloff_factor(ws_p),
            LightKind::Spot => {
                self.intensity * self.cone_falloff(ws_p) * self.falloff_factor(ws_p)
            }
        };
        LightSample {
            luminance,
            ws_p: self.position,
        }
    }

    /// Luminance at `ws_p` after the occluder's attenuation.
    pub fn occluded_luminance(&self, ws_p: Vec3) -> Vec3 {
        self.sample(ws_p).luminance * self.occluder.transmittance(ws_p)
    }

    fn cone_falloff(&self, ws_p: Vec3) -> f32 {
        let cs = self.orientation.inverse() * (ws_p - self.position);
        let len = cs.length();
        if len < 1.0e-6 {
            return 1.0;
        }
        // Light axis is local -Z.
        let cos_theta = -cs.z / len;
        if cos_theta < self.cos_width {
            0.0
        } else if cos_theta > self.cos_start {
            1.0
        } else {
            let delta = (cos_theta - self.cos_width) / (self.cos_start - self.cos_width);
            delta * delta * delta * delta
        }
    }

    fn falloff_factor(&self, ws_p: Vec3) -> f32 {
        if !self.falloff_enabled {
            return 1.0;
        }
        let distance_sq = (ws_p - self.position).length_squared().max(1.0e-12);
        if self.soft_rolloff && distance_sq < 1.0 {
            (1.0 / distance_sq).powf(0.25)
        } else {
            1.0 / distance_sq
        }
    }
}

impl fmt::Debug for LightSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LightSource")
            .field("kind", &self.kind)
            .field("position", &self.position)
            .field("intensity", &self.intensity)
            .field("field_of_view", &self.field_of_view)
            .field("sample_budget", &self.sample_budget)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occluder::NullOccluder;

    fn spot_at_origin() -> LightSource {
        // Spot looking down -Z.
        LightSource::new(
            LightKind::Spot,
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::splat(1.0),
            Some(20.0),
            32,
            Box::new(NullOccluder),
        )
    }

    #[test]
    fn point_light_sample_is_intensity_without_falloff() {
        let light = LightSource::new(
            LightKind::Point,
            Vec3::new(1.0, 2.0, 3.0),
            Quat::IDENTITY,
            Vec3::new(0.5, 0.25, 0.125),
            None,
            32,
            Box::new(NullOccluder),
        );
        let s = light.sample(Vec3::new(-4.0, 0.0, 9.0));
        assert_eq!(s.luminance, Vec3::new(0.5, 0.25, 0.125));
        assert_eq!(s.ws_p, light.position());
    }

    #[test]
    fn falloff_attenuates_with_squared_distance() {
        let mut light = LightSource::new(
            LightKind::Point,
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::splat(1.0),
            None,
            32,
            Box::new(NullOccluder),
        );
        light.set_falloff_enabled(true);
        let s = light.sample(Vec3::new(0.0, 0.0, 2.0));
        assert!((s.luminance.x - 0.25).abs() < 1.0e-6);
    }

    #[test]
    fn spot_cone_cuts_off_outside_width() {
        let mut light = spot_at_origin();
        light.set_cone_angles(30.0_f32.to_radians(), 10.0_f32.to_radians());
        // On axis: full intensity.
        let on_axis = light.sample(Vec3::new(0.0, 0.0, -5.0));
        assert_eq!(on_axis.luminance, Vec3::splat(1.0));
        // 45 degrees off axis: outside the 30 degree cone.
        let outside = light.sample(Vec3::new(5.0, 0.0, -5.0));
        assert_eq!(outside.luminance, Vec3::ZERO);
    }

    #[test]
    fn spot_cone_band_is_between_zero_and_one() {
        let mut light = spot_at_origin();
        light.set_cone_angles(40.0_f32.to_radians(), 10.0_f32.to_radians());
        // 25 degrees off axis sits inside the falloff band.
        let theta = 25.0_f32.to_radians();
        let p = Vec3::new(theta.sin(), 0.0, -theta.cos()) * 5.0;
        let s = light.sample(p);
        assert!(s.luminance.x > 0.0 && s.luminance.x < 1.0, "{:?}", s.luminance);
    }

    #[test]
    fn kind_names_round_trip() {
        assert_eq!(LightKind::from_name("point"), Some(LightKind::Point));
        assert_eq!(LightKind::from_name("Spot"), Some(LightKind::Spot));
        assert_eq!(LightKind::from_name("area"), None);
    }
}
