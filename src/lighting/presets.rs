// src/lighting/presets.rs
// Standard studio light setups as immutable description records. Each
// function returns a fresh record; nothing here is shared or mutable.

use glam::Vec3;

use super::factory::LightDescription;
use super::params::LightParams;
use super::LightKind;
use crate::occluder::OccluderKind;

const STANDARD_FOV: f32 = 20.0;

fn standard_spot(name: &str, position: Vec3, rotation: Vec3, intensity: f32) -> LightDescription {
    LightDescription {
        name: name.to_string(),
        kind: LightKind::Spot,
        occluder: OccluderKind::OnDemandTransmittanceMap,
        params: LightParams::new()
            .with_position(position)
            .with_rotation(rotation)
            .with_fov(STANDARD_FOV)
            .with_intensity(Vec3::splat(intensity)),
    }
}

pub fn standard_key() -> LightDescription {
    standard_spot(
        "key",
        Vec3::new(-10.0, 10.0, 10.0),
        Vec3::new(-35.0, -45.0, 0.0),
        0.5,
    )
}

pub fn standard_fill() -> LightDescription {
    standard_spot(
        "fill",
        Vec3::new(10.0, 5.0, 10.0),
        Vec3::new(-19.0, 45.0, 0.0),
        0.06,
    )
}

pub fn standard_rim() -> LightDescription {
    standard_spot(
        "rim",
        Vec3::new(10.0, 10.0, -10.0),
        Vec3::new(-35.0, 135.0, 0.0),
        0.125,
    )
}

pub fn standard_behind() -> LightDescription {
    standard_spot(
        "behind",
        Vec3::new(0.0, 0.0, -20.0),
        Vec3::new(0.0, 180.0, 0.0),
        1.0,
    )
}

pub fn standard_right() -> LightDescription {
    standard_spot(
        "right",
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(0.0, 90.0, 0.0),
        1.0,
    )
}

/// Key, fill and rim together.
pub fn standard_three_point() -> Vec<LightDescription> {
    vec![standard_key(), standard_fill(), standard_rim()]
}
