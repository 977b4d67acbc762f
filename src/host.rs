use crate::params::DecalPrefab;
use anyhow::Result;
use glam::{Quat, Vec3, Vec4};
use std::fmt;

/// Material color channel on a pooled visual.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSlot {
    /// Shader tint (`_TintColor`) reset when the decal is placed.
    Tint,
    /// Main material color written every tick.
    Base,
}

/// Scene, pool and render access the flashlight effect needs from its embedding engine.
///
/// Every call may fail; failures mean a misconfigured resource and are handed back to the caller
/// untouched.
pub trait EffectHost {
    type Handle: Copy + Eq + fmt::Debug;

    /// Takes an instance of `prefab` from the pool, placed and active.
    fn spawn(&mut self, prefab: &DecalPrefab, position: Vec3, rotation: Quat) -> Result<Self::Handle>;
    /// Returns an instance to the pool.
    fn despawn(&mut self, handle: Self::Handle) -> Result<()>;

    fn position(&self, handle: Self::Handle) -> Result<Vec3>;
    fn set_position(&mut self, handle: Self::Handle, position: Vec3) -> Result<()>;
    fn set_pose(&mut self, handle: Self::Handle, position: Vec3, rotation: Quat) -> Result<()>;
    fn set_scale(&mut self, handle: Self::Handle, scale: Vec3) -> Result<()>;
    fn set_active(&mut self, handle: Self::Handle, active: bool) -> Result<()>;
    fn set_material_color(&mut self, handle: Self::Handle, slot: ColorSlot, color: Vec4) -> Result<()>;

    fn configure_light(&mut self, handle: Self::Handle, color: Vec3, range: f32) -> Result<()>;
    fn set_light_intensity(&mut self, handle: Self::Handle, intensity: f32) -> Result<()>;
    fn light_intensity(&self, handle: Self::Handle) -> Result<f32>;
}
