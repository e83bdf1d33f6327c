//! Shadow-casting light configuration and transmittance precomputation for
//! offline volumetric rendering.
//!
//! Scene code describes lights declaratively (position, orientation,
//! intensity, field of view) and selects an occluder strategy; the factory
//! resolves that description into a fully configured [`LightSource`],
//! running an isolated sub-render ([`ShadowBakeJob`]) when the strategy
//! needs an eagerly baked transmittance map.
//!
//! The rendering engine itself is an external collaborator, reached only
//! through the [`renderer::SceneRenderer`] capability trait.

pub mod bake;
pub mod camera;
pub mod error;
pub mod lighting;
pub mod occluder;
pub mod renderer;
pub mod transmittance;

pub use bake::ShadowBakeJob;
pub use camera::{ProjectionKind, ShadowCamera};
pub use error::{LightError, LightResult};
pub use lighting::{
    LightDescription, LightFactory, LightKind, LightParams, LightSample, LightSource,
};
pub use occluder::{
    NullOccluder, Occluder, OccluderKind, OnDemandTransmittanceMapOccluder, RaymarchOccluder,
    TransmittanceMapOccluder, VoxelSampleOccluder,
};
pub use renderer::{DensityField, RenderFailure, SceneRenderer, TransmittanceBuffer};
pub use transmittance::{MapEncoding, TransmittanceMap};
