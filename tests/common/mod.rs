// tests/common/mod.rs
// Deterministic fake renderer for integration tests: homogeneous spherical
// volumes with exact ray/sphere optical depth, no real rendering. Implements
// the same capability surface the factory and bake jobs drive in production.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use glam::Vec3;
use umbra3d::camera::ShadowCamera;
use umbra3d::renderer::{DensityField, RenderFailure, SceneRenderer, TransmittanceBuffer};
use umbra3d::transmittance::MapEncoding;

pub fn init_test_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Homogeneous sphere of participating media with a constant extinction
/// coefficient.
#[derive(Debug, Clone, Copy)]
pub struct SphereVolume {
    pub center: Vec3,
    pub radius: f32,
    pub sigma: f32,
}

/// Path length of the ray segment [0, t_max] inside the sphere.
fn sphere_chord(origin: Vec3, dir: Vec3, t_max: f32, sphere: &SphereVolume) -> f32 {
    let oc = origin - sphere.center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - sphere.radius * sphere.radius;
    let disc = b * b - c;
    if disc <= 0.0 {
        return 0.0;
    }
    let sq = disc.sqrt();
    let t0 = (-b - sq).max(0.0);
    let t1 = (-b + sq).min(t_max);
    (t1 - t0).max(0.0)
}

pub struct SphereDensityField {
    volumes: Arc<Vec<SphereVolume>>,
}

impl DensityField for SphereDensityField {
    fn density(&self, ws_p: Vec3) -> f32 {
        self.volumes
            .iter()
            .filter(|s| (ws_p - s.center).length_squared() <= s.radius * s.radius)
            .map(|s| s.sigma)
            .sum()
    }
}

/// Fake renderer over analytic sphere volumes. Clones share the volumes and
/// the observation cells (execute count, last bake camera) but carry
/// independent mutable render state, matching the production clone contract.
pub struct SphereSceneRenderer {
    volumes: Arc<Vec<SphereVolume>>,
    execute_count: Arc<AtomicUsize>,
    last_bake_camera: Arc<Mutex<Option<ShadowCamera>>>,
    last_deep_samples: Arc<Mutex<Option<u32>>>,
    fail_execute: bool,
    produce_no_buffer: bool,
    lie_about_resolution: bool,
    camera: Option<ShadowCamera>,
    primary_enabled: bool,
    tmap_enabled: bool,
    deep_samples: u32,
    baked: Option<TransmittanceBuffer>,
}

impl SphereSceneRenderer {
    pub fn new(volumes: Vec<SphereVolume>) -> Self {
        Self {
            volumes: Arc::new(volumes),
            execute_count: Arc::new(AtomicUsize::new(0)),
            last_bake_camera: Arc::new(Mutex::new(None)),
            last_deep_samples: Arc::new(Mutex::new(None)),
            fail_execute: false,
            produce_no_buffer: false,
            lie_about_resolution: false,
            camera: None,
            primary_enabled: true,
            tmap_enabled: false,
            deep_samples: 0,
            baked: None,
        }
    }

    /// Renderer whose execute step always fails.
    pub fn failing(volumes: Vec<SphereVolume>) -> Self {
        Self {
            fail_execute: true,
            ..Self::new(volumes)
        }
    }

    /// Renderer that executes but never produces a transmittance buffer.
    pub fn without_map_output(volumes: Vec<SphereVolume>) -> Self {
        Self {
            produce_no_buffer: true,
            ..Self::new(volumes)
        }
    }

    /// Renderer that returns a buffer whose size does not match the camera.
    pub fn with_wrong_buffer_size(volumes: Vec<SphereVolume>) -> Self {
        Self {
            lie_about_resolution: true,
            ..Self::new(volumes)
        }
    }

    /// Total executes across this renderer and all its clones.
    pub fn execute_count(&self) -> usize {
        self.execute_count.load(Ordering::SeqCst)
    }

    /// Camera most recently attached to this renderer or any clone.
    pub fn last_bake_camera(&self) -> Option<ShadowCamera> {
        self.last_bake_camera.lock().unwrap().clone()
    }

    pub fn last_deep_samples(&self) -> Option<u32> {
        *self.last_deep_samples.lock().unwrap()
    }

    pub fn optical_depth(&self, origin: Vec3, dir: Vec3, t_max: f32) -> f32 {
        self.volumes
            .iter()
            .map(|s| s.sigma * sphere_chord(origin, dir, t_max, s))
            .sum()
    }
}

impl SceneRenderer for SphereSceneRenderer {
    fn clone_renderer(&self) -> Box<dyn SceneRenderer> {
        Box::new(Self {
            volumes: Arc::clone(&self.volumes),
            execute_count: Arc::clone(&self.execute_count),
            last_bake_camera: Arc::clone(&self.last_bake_camera),
            last_deep_samples: Arc::clone(&self.last_deep_samples),
            fail_execute: self.fail_execute,
            produce_no_buffer: self.produce_no_buffer,
            lie_about_resolution: self.lie_about_resolution,
            camera: None,
            primary_enabled: true,
            tmap_enabled: false,
            deep_samples: 0,
            baked: None,
        })
    }

    fn set_camera(&mut self, camera: ShadowCamera) {
        *self.last_bake_camera.lock().unwrap() = Some(camera.clone());
        self.camera = Some(camera);
    }

    fn set_primary_enabled(&mut self, enabled: bool) {
        self.primary_enabled = enabled;
    }

    fn set_transmittance_map_enabled(&mut self, enabled: bool) {
        self.tmap_enabled = enabled;
    }

    fn set_num_deep_samples(&mut self, samples: u32) {
        *self.last_deep_samples.lock().unwrap() = Some(samples);
        self.deep_samples = samples;
    }

    fn execute(&mut self) -> Result<(), RenderFailure> {
        self.execute_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_execute {
            return Err(RenderFailure("injected execute failure".to_string()));
        }
        let camera = self
            .camera
            .as_ref()
            .ok_or_else(|| RenderFailure("no camera attached".to_string()))?;
        if !self.tmap_enabled {
            return Err(RenderFailure(
                "transmittance output disabled".to_string(),
            ));
        }
        if self.produce_no_buffer {
            return Ok(());
        }
        let (w, h) = camera.resolution();
        let out_w = if self.lie_about_resolution { w + 1 } else { w };
        let mut samples = Vec::with_capacity((out_w * h) as usize);
        for y in 0..h {
            for x in 0..out_w {
                let (origin, dir) = camera.pixel_ray(x.min(w - 1), y);
                samples.push(self.optical_depth(origin, dir, f32::MAX));
            }
        }
        self.baked = Some(TransmittanceBuffer {
            width: out_w,
            height: h,
            encoding: MapEncoding::OpticalDepth,
            samples,
        });
        Ok(())
    }

    fn transmittance_map(&self) -> Option<TransmittanceBuffer> {
        self.baked.clone()
    }

    fn trace_transmittance(&self, origin: Vec3, direction: Vec3, t_max: f32) -> f32 {
        (-self.optical_depth(origin, direction, t_max)).exp()
    }

    fn density_field(&self) -> Option<Arc<dyn DensityField>> {
        Some(Arc::new(SphereDensityField {
            volumes: Arc::clone(&self.volumes),
        }))
    }
}
