use super::{Active, DecalMaterial, EffectTransform, InstancePool, PointLight, Pooled};
use crate::host::{ColorSlot, EffectHost};
use crate::params::DecalPrefab;
use anyhow::{anyhow, bail, Context, Result};
use bevy_ecs::prelude::*;
use glam::{Quat, Vec3, Vec4};
use std::sync::Arc;

/// [`EffectHost`] over a `bevy_ecs` world; pooled instances are entities recycled through the
/// [`InstancePool`] resource.
pub struct EcsEffectHost<'w> {
    world: &'w mut World,
}

impl<'w> EcsEffectHost<'w> {
    pub fn new(world: &'w mut World) -> Self {
        world.init_resource::<InstancePool>();
        Self { world }
    }

    pub fn world(&self) -> &World {
        &*self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut *self.world
    }

    pub fn pool(&self) -> &InstancePool {
        self.world.resource::<InstancePool>()
    }

    pub fn pool_mut(&mut self) -> Mut<'_, InstancePool> {
        self.world.resource_mut::<InstancePool>()
    }

    /// Spawns a pooled effect root carrying a blacked-out point light and no material.
    pub fn spawn_light_root(&mut self, prefab: &str, position: Vec3) -> Result<Entity> {
        let (entity, _) = self
            .acquire(prefab, position, Quat::IDENTITY)
            .with_context(|| format!("Failed to spawn light root '{prefab}'"))?;
        self.world.entity_mut(entity).insert(PointLight::default());
        Ok(entity)
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.world.get::<Active>(entity).is_some_and(|active| active.0)
    }

    pub fn transform(&self, entity: Entity) -> Result<EffectTransform> {
        self.world
            .get::<EffectTransform>(entity)
            .copied()
            .ok_or_else(|| anyhow!("entity {entity:?} has no EffectTransform"))
    }

    pub fn material(&self, entity: Entity) -> Result<DecalMaterial> {
        self.world
            .get::<DecalMaterial>(entity)
            .copied()
            .ok_or_else(|| anyhow!("entity {entity:?} has no DecalMaterial"))
    }

    pub fn light(&self, entity: Entity) -> Result<PointLight> {
        self.world
            .get::<PointLight>(entity)
            .copied()
            .ok_or_else(|| anyhow!("entity {entity:?} has no PointLight"))
    }

    /// Takes a free instance of `prefab` or spawns a bare one; the flag is true for new entities.
    fn acquire(&mut self, prefab: &str, position: Vec3, rotation: Quat) -> Result<(Entity, bool)> {
        let reused = {
            let mut pool = self.world.resource_mut::<InstancePool>();
            if !pool.has_room() {
                bail!(
                    "instance pool exhausted spawning '{prefab}': {} live instances (capacity {})",
                    pool.live(),
                    pool.capacity().unwrap_or_default()
                );
            }
            pool.take_free(prefab)
        };
        let transform = EffectTransform::from_pose(position, rotation);
        let entity = match reused {
            Some(entity) => {
                let mut entity_mut = self
                    .world
                    .get_entity_mut(entity)
                    .map_err(|_| anyhow!("pooled entity {entity:?} for '{prefab}' no longer exists"))?;
                entity_mut.insert((transform, Active(true)));
                if let Some(mut pooled) = entity_mut.get_mut::<Pooled>() {
                    pooled.in_use = true;
                }
                (entity, false)
            }
            None => {
                let entity = self
                    .world
                    .spawn((transform, Active(true), Pooled { prefab: Arc::from(prefab), in_use: true }))
                    .id();
                self.world.resource_mut::<InstancePool>().note_spawned();
                (entity, true)
            }
        };
        Ok(entity)
    }

    fn transform_mut(&mut self, entity: Entity) -> Result<Mut<'_, EffectTransform>> {
        self.world
            .get_mut::<EffectTransform>(entity)
            .ok_or_else(|| anyhow!("entity {entity:?} has no EffectTransform"))
    }

    fn light_mut(&mut self, entity: Entity) -> Result<Mut<'_, PointLight>> {
        self.world.get_mut::<PointLight>(entity).ok_or_else(|| anyhow!("entity {entity:?} has no PointLight"))
    }
}

impl EffectHost for EcsEffectHost<'_> {
    type Handle = Entity;

    fn spawn(&mut self, prefab: &DecalPrefab, position: Vec3, rotation: Quat) -> Result<Entity> {
        let (entity, fresh) = self
            .acquire(&prefab.name, position, rotation)
            .with_context(|| format!("Failed to spawn decal '{}'", prefab.name))?;
        if fresh {
            self.world.entity_mut(entity).insert(DecalMaterial::default());
        }
        Ok(entity)
    }

    fn despawn(&mut self, handle: Entity) -> Result<()> {
        let prefab = {
            let mut pooled = self
                .world
                .get_mut::<Pooled>(handle)
                .ok_or_else(|| anyhow!("entity {handle:?} is not a pooled instance"))?;
            if !pooled.in_use {
                bail!("entity {handle:?} was already returned to the pool");
            }
            pooled.in_use = false;
            Arc::clone(&pooled.prefab)
        };
        self.set_active(handle, false)?;
        self.world.resource_mut::<InstancePool>().give_back(prefab, handle);
        Ok(())
    }

    fn position(&self, handle: Entity) -> Result<Vec3> {
        self.transform(handle).map(|transform| transform.translation)
    }

    fn set_position(&mut self, handle: Entity, position: Vec3) -> Result<()> {
        self.transform_mut(handle)?.translation = position;
        Ok(())
    }

    fn set_pose(&mut self, handle: Entity, position: Vec3, rotation: Quat) -> Result<()> {
        let mut transform = self.transform_mut(handle)?;
        transform.translation = position;
        transform.rotation = rotation;
        Ok(())
    }

    fn set_scale(&mut self, handle: Entity, scale: Vec3) -> Result<()> {
        self.transform_mut(handle)?.scale = scale;
        Ok(())
    }

    fn set_active(&mut self, handle: Entity, active: bool) -> Result<()> {
        let mut flag =
            self.world.get_mut::<Active>(handle).ok_or_else(|| anyhow!("entity {handle:?} has no Active flag"))?;
        flag.0 = active;
        Ok(())
    }

    fn set_material_color(&mut self, handle: Entity, slot: ColorSlot, color: Vec4) -> Result<()> {
        let mut material = self
            .world
            .get_mut::<DecalMaterial>(handle)
            .ok_or_else(|| anyhow!("entity {handle:?} has no DecalMaterial"))?;
        match slot {
            ColorSlot::Tint => material.tint_color = color,
            ColorSlot::Base => material.color = color,
        }
        Ok(())
    }

    fn configure_light(&mut self, handle: Entity, color: Vec3, range: f32) -> Result<()> {
        let mut light = self.light_mut(handle)?;
        light.color = color;
        light.range = range;
        Ok(())
    }

    fn set_light_intensity(&mut self, handle: Entity, intensity: f32) -> Result<()> {
        self.light_mut(handle)?.intensity = intensity;
        Ok(())
    }

    fn light_intensity(&self, handle: Entity) -> Result<f32> {
        self.light(handle).map(|light| light.intensity)
    }
}
