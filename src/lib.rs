pub mod cli;
pub mod ecs;
pub mod effect;
pub mod events;
pub mod ground;
pub mod ground_track;
pub mod host;
pub mod light_track;
pub mod params;
pub mod snapshot;
pub mod track;
pub mod tween;

pub use effect::{EffectDestroyed, EffectState, FlashLightLoop};
pub use ground::{FlatGround, GroundProjector};
pub use host::{ColorSlot, EffectHost};
pub use params::{DecalPrefab, FlashLightParams, SharedParams};
