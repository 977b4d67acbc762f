use crate::tween::{Ease, PulseTiming};
use anyhow::{Context, Result};
use glam::{Vec3, Vec4};
use log::warn;
use serde::Deserialize;
use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::rc::Rc;

/// Parameter source bound to an effect. The owning factory may edit it between frames.
pub type SharedParams = Rc<RefCell<FlashLightParams>>;

/// Pooled prototype spawned as the ground light decal.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DecalPrefab {
    pub name: String,
}

impl DecalPrefab {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for DecalPrefab {
    fn default() -> Self {
        Self::new("flashlight_ground_light")
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlashLightParams {
    #[serde(default = "FlashLightParams::default_fade_in_time")]
    pub fade_in_time: f32,
    #[serde(default = "FlashLightParams::default_living_time")]
    pub living_time: f32,
    #[serde(default = "FlashLightParams::default_fade_out_time")]
    pub fade_out_time: f32,
    #[serde(default = "FlashLightParams::default_light_intensity")]
    pub light_intensity: f32,
    #[serde(default = "FlashLightParams::default_ground_light_alpha")]
    pub ground_light_alpha: f32,
    #[serde(default = "FlashLightParams::default_light_color")]
    pub light_color: [f32; 3],
    #[serde(default = "FlashLightParams::default_light_range")]
    pub light_range: f32,
    #[serde(default = "FlashLightParams::default_ground_light_scale")]
    pub ground_light_scale: f32,
    #[serde(default)]
    pub enable_ground_light: bool,
    #[serde(default)]
    pub ground_light_prefab: DecalPrefab,
    #[serde(default)]
    pub ease: Ease,
}

impl Default for FlashLightParams {
    fn default() -> Self {
        Self {
            fade_in_time: Self::default_fade_in_time(),
            living_time: Self::default_living_time(),
            fade_out_time: Self::default_fade_out_time(),
            light_intensity: Self::default_light_intensity(),
            ground_light_alpha: Self::default_ground_light_alpha(),
            light_color: Self::default_light_color(),
            light_range: Self::default_light_range(),
            ground_light_scale: Self::default_ground_light_scale(),
            enable_ground_light: false,
            ground_light_prefab: DecalPrefab::default(),
            ease: Ease::default(),
        }
    }
}

impl FlashLightParams {
    const fn default_fade_in_time() -> f32 {
        0.5
    }

    const fn default_living_time() -> f32 {
        1.0
    }

    const fn default_fade_out_time() -> f32 {
        0.5
    }

    const fn default_light_intensity() -> f32 {
        2.0
    }

    const fn default_ground_light_alpha() -> f32 {
        0.5
    }

    const fn default_light_color() -> [f32; 3] {
        [1.0, 0.95, 0.8]
    }

    const fn default_light_range() -> f32 {
        8.0
    }

    const fn default_ground_light_scale() -> f32 {
        0.25
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read flashlight params {}", path.display()))?;
        let params: Self = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse flashlight params {}", path.display()))?;
        Ok(params.sanitized())
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(params) => params,
            Err(err) => {
                warn!("Flashlight params load error: {err:?}. Falling back to defaults.");
                Self::default()
            }
        }
    }

    /// Clamps durations and magnitudes to zero. The effect itself never validates.
    pub fn sanitized(mut self) -> Self {
        self.fade_in_time = self.fade_in_time.max(0.0);
        self.living_time = self.living_time.max(0.0);
        self.fade_out_time = self.fade_out_time.max(0.0);
        self.light_intensity = self.light_intensity.max(0.0);
        self.ground_light_alpha = self.ground_light_alpha.max(0.0);
        self.light_range = self.light_range.max(0.0);
        self.ground_light_scale = self.ground_light_scale.max(0.0);
        self
    }

    pub fn shared(self) -> SharedParams {
        Rc::new(RefCell::new(self))
    }

    pub fn light_color(&self) -> Vec3 {
        Vec3::from_array(self.light_color)
    }

    pub fn color_with_alpha(&self, alpha: f32) -> Vec4 {
        self.light_color().extend(alpha)
    }

    pub fn ground_light_size(&self) -> f32 {
        self.light_range * self.ground_light_scale
    }

    pub fn light_timing(&self) -> PulseTiming {
        self.timing(self.light_intensity)
    }

    pub fn ground_timing(&self) -> PulseTiming {
        self.timing(self.ground_light_alpha)
    }

    fn timing(&self, target: f32) -> PulseTiming {
        PulseTiming {
            fade_in: self.fade_in_time,
            living: self.living_time,
            fade_out: self.fade_out_time,
            target,
            ease: self.ease,
        }
    }
}
