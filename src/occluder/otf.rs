// src/occluder/otf.rs
// On-the-fly transmittance map occluder: same map as the eager variant, but
// the bake is deferred to the first lookup and cached until invalidated.

use std::sync::{Arc, PoisonError, RwLock};

use glam::Vec3;
use log::warn;

use super::Occluder;
use crate::bake::ShadowBakeJob;
use crate::camera::ShadowCamera;
use crate::renderer::SceneRenderer;
use crate::transmittance::TransmittanceMap;

#[derive(Default)]
enum CacheState {
    #[default]
    Empty,
    Ready(TransmittanceMap),
    /// The lazy bake failed. Lookups stay conservatively opaque until an
    /// explicit invalidation; the bake is not retried on every call.
    Failed,
}

#[derive(Default)]
struct MapCache {
    state: CacheState,
    bake_count: u64,
}

/// Lazily-baked map occluder. Lookups arrive concurrently from shading
/// workers; the cache fill is serialized behind a write lock and later
/// calls only take the read path.
pub struct OnDemandTransmittanceMapOccluder {
    renderer: Arc<dyn SceneRenderer>,
    camera: ShadowCamera,
    sample_count: u32,
    cache: RwLock<MapCache>,
}

impl OnDemandTransmittanceMapOccluder {
    pub fn new(
        renderer: Arc<dyn SceneRenderer>,
        camera: ShadowCamera,
        sample_count: u32,
    ) -> Self {
        Self {
            renderer,
            camera,
            sample_count,
            cache: RwLock::new(MapCache::default()),
        }
    }

    /// Drops the cached map, forcing a rebake on the next lookup. Call
    /// after repositioning the light.
    pub fn invalidate(&self) {
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        cache.state = CacheState::Empty;
    }

    /// Version of the cached map, if one has been baked.
    pub fn map_version(&self) -> Option<u64> {
        let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
        match &cache.state {
            CacheState::Ready(map) => Some(map.version()),
            _ => None,
        }
    }

    pub fn camera(&self) -> &ShadowCamera {
        &self.camera
    }
}

impl Occluder for OnDemandTransmittanceMapOccluder {
    fn transmittance(&self, ws_p: Vec3) -> f32 {
        {
            let cache = self.cache.read().unwrap_or_else(PoisonError::into_inner);
            match &cache.state {
                CacheState::Ready(map) => return map.attenuation(ws_p),
                CacheState::Failed => return 0.0,
                CacheState::Empty => {}
            }
        }

        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        // Another worker may have filled the cache while we waited.
        if let CacheState::Empty = cache.state {
            cache.bake_count += 1;
            let job = ShadowBakeJob::new(self.camera.clone(), self.sample_count);
            match job.run(self.renderer.as_ref()) {
                Ok(map) => cache.state = CacheState::Ready(map.with_version(cache.bake_count)),
                Err(err) => {
                    warn!("on-demand transmittance bake failed: {}", err);
                    cache.state = CacheState::Failed;
                }
            }
        }
        match &cache.state {
            CacheState::Ready(map) => map.attenuation(ws_p),
            _ => 0.0,
        }
    }
}
