// tests/test_lighting_e2e.rs
// End-to-end configuration scenarios over one scene: a point light at the
// origin, intensity (1,1,1), and a single opaque sphere (extinction 10,
// radius 1) centered 5 units down -z.

mod common;

use std::sync::Arc;

use common::{init_test_logging, SphereSceneRenderer, SphereVolume};
use glam::Vec3;
use umbra3d::{LightFactory, LightKind, LightParams, OccluderKind};

fn scene() -> Vec<SphereVolume> {
    vec![SphereVolume {
        center: Vec3::new(0.0, 0.0, -5.0),
        radius: 1.0,
        sigma: 10.0,
    }]
}

fn params() -> LightParams {
    LightParams::new()
        .with_position(Vec3::ZERO)
        .with_intensity(Vec3::splat(1.0))
}

#[test]
fn null_strategy_returns_exactly_one_everywhere() {
    init_test_logging();
    let factory =
        LightFactory::new(Arc::new(SphereSceneRenderer::new(scene())), 1.0).unwrap();
    let light = factory
        .configure(LightKind::Point, &params(), OccluderKind::Null)
        .unwrap();

    for p in [
        Vec3::new(0.0, 0.0, -8.0),
        Vec3::new(0.0, 0.0, -4.5),
        Vec3::new(7.0, -3.0, 2.0),
        Vec3::ZERO,
    ] {
        assert_eq!(light.occluder().transmittance(p), 1.0);
        assert_eq!(light.occluded_luminance(p), Vec3::splat(1.0));
    }
}

#[test]
fn switching_to_the_map_strategy_shadows_the_same_scene() {
    let factory =
        LightFactory::new(Arc::new(SphereSceneRenderer::new(scene())), 0.25).unwrap();
    let light = factory
        .configure(LightKind::Point, &params(), OccluderKind::TransmittanceMap)
        .unwrap();

    // Behind the sphere: attenuation ~ exp(-sigma * chord) = exp(-20).
    let shadowed = light.occluded_luminance(Vec3::new(0.0, 0.0, -8.0));
    let expected = (-20.0f32).exp();
    assert!(
        (shadowed.x - expected).abs() <= expected * 0.05,
        "shadowed = {:e}, expected = {:e}",
        shadowed.x,
        expected
    );

    // No volume on the path: essentially unattenuated.
    let lit = light.occluded_luminance(Vec3::new(0.0, 4.0, 3.0));
    assert!((lit.x - 1.0).abs() < 1.0e-3, "lit = {}", lit.x);
}
