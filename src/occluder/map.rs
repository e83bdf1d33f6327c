// src/occluder/map.rs
// Eagerly-baked transmittance map occluder. The map is produced by a
// ShadowBakeJob before the light is registered; lookups are O(1).

use glam::Vec3;

use super::Occluder;
use crate::transmittance::TransmittanceMap;

pub struct TransmittanceMapOccluder {
    map: TransmittanceMap,
}

impl TransmittanceMapOccluder {
    pub fn new(map: TransmittanceMap) -> Self {
        Self { map }
    }

    pub fn map(&self) -> &TransmittanceMap {
        &self.map
    }
}

impl Occluder for TransmittanceMapOccluder {
    fn transmittance(&self, ws_p: Vec3) -> f32 {
        self.map.attenuation(ws_p)
    }
}
