mod host;
mod pool;

pub use host::EcsEffectHost;
pub use pool::{InstancePool, PoolStats};

use crate::effect::FlashLightLoop;
use bevy_ecs::prelude::*;
use glam::{Quat, Vec3, Vec4};
use std::sync::Arc;

/// Flashlight effect whose root and decal are ECS entities.
pub type EcsFlashLight = FlashLightLoop<Entity>;

// ---------- Components ----------
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct EffectTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}
impl Default for EffectTransform {
    fn default() -> Self {
        Self { translation: Vec3::ZERO, rotation: Quat::IDENTITY, scale: Vec3::ONE }
    }
}
impl EffectTransform {
    pub fn from_pose(translation: Vec3, rotation: Quat) -> Self {
        Self { translation, rotation, ..Self::default() }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: Vec3,
    pub range: f32,
    pub intensity: f32,
}
impl Default for PointLight {
    fn default() -> Self {
        Self { color: Vec3::ONE, range: 1.0, intensity: 0.0 }
    }
}

/// Colors of a decal's material: the shader tint and the main color.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct DecalMaterial {
    pub tint_color: Vec4,
    pub color: Vec4,
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Active(pub bool);

/// Marks an entity owned by the [`InstancePool`] and records which prefab it was spawned from.
#[derive(Component, Clone, Debug)]
pub struct Pooled {
    pub prefab: Arc<str>,
    pub in_use: bool,
}
