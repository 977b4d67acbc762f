use crate::events::{EffectEvents, FlashLightEvent};
use crate::ground::{face_up_rotation, GroundProjector};
use crate::host::{ColorSlot, EffectHost};
use crate::params::FlashLightParams;
use crate::track::{PlayOutcome, PulseTrack, TrackKind};
use crate::tween::{ScalarSequence, TweenSequence};
use anyhow::Result;
use glam::{Vec3, Vec4};
use log::debug;

/// Fake ground lighting: a pooled decal under the effect whose alpha pulses with the light.
///
/// The decal is acquired on first activation and kept until [`GroundTrack::release`]; stopping
/// only hides it.
pub struct GroundTrack<D, S = ScalarSequence> {
    track: PulseTrack<S>,
    decal: Option<D>,
    alpha: f32,
    color: Vec3,
}

impl<D: Copy, S: TweenSequence + Default> Default for GroundTrack<D, S> {
    fn default() -> Self {
        Self { track: PulseTrack::new(TrackKind::Ground), decal: None, alpha: 0.0, color: Vec3::ONE }
    }
}

impl<D: Copy, S: TweenSequence + Default> GroundTrack<D, S> {
    pub fn play<H, P>(
        &mut self,
        params: &FlashLightParams,
        host: &mut H,
        root: D,
        projector: &P,
        events: &mut EffectEvents,
    ) -> Result<PlayOutcome>
    where
        H: EffectHost<Handle = D>,
        P: GroundProjector + ?Sized,
    {
        let anchor = projector.project_to_ground(host.position(root)?);
        let rotation = face_up_rotation();
        let decal = match self.decal {
            Some(decal) => {
                host.set_active(decal, true)?;
                host.set_pose(decal, anchor, rotation)?;
                events.push(FlashLightEvent::DecalReactivated);
                decal
            }
            None => {
                let decal = host.spawn(&params.ground_light_prefab, anchor, rotation)?;
                debug!("flashlight ground decal '{}' acquired at {anchor}", params.ground_light_prefab.name);
                events.push(FlashLightEvent::DecalAcquired);
                self.decal = Some(decal);
                decal
            }
        };

        host.set_scale(decal, Vec3::splat(params.ground_light_size()))?;
        self.color = params.light_color();
        host.set_material_color(decal, ColorSlot::Tint, self.color.extend(0.0))?;
        Ok(self.track.play(params.ground_timing(), events))
    }

    /// Advances the alpha sequence and, when it stepped, runs the update hook.
    pub fn tick<H, P>(
        &mut self,
        dt: f32,
        params: Option<&FlashLightParams>,
        host: &mut H,
        root: D,
        projector: &P,
    ) -> Result<()>
    where
        H: EffectHost<Handle = D>,
        P: GroundProjector + ?Sized,
    {
        let Some(alpha) = self.track.tick(dt) else {
            return Ok(());
        };
        self.alpha = alpha;
        if let Some(params) = params {
            self.color = params.light_color();
        }
        self.on_update(host, root, projector)
    }

    fn on_update<H, P>(&mut self, host: &mut H, root: D, projector: &P) -> Result<()>
    where
        H: EffectHost<Handle = D>,
        P: GroundProjector + ?Sized,
    {
        let Some(decal) = self.decal else {
            return Ok(());
        };
        host.set_material_color(decal, ColorSlot::Base, self.color.extend(self.alpha))?;
        let anchor = projector.project_to_ground(host.position(root)?);
        host.set_position(decal, anchor)
    }

    pub fn stop<H: EffectHost<Handle = D>>(&mut self, host: &mut H, events: &mut EffectEvents) -> Result<()> {
        self.track.pause();
        if let Some(decal) = self.decal {
            host.set_active(decal, false)?;
            events.push(FlashLightEvent::DecalDeactivated);
        }
        Ok(())
    }

    /// Kills the sequence and hands the decal back to the pool.
    pub fn release<H: EffectHost<Handle = D>>(&mut self, host: &mut H, events: &mut EffectEvents) -> Result<()> {
        self.track.kill(events);
        if let Some(decal) = self.decal.take() {
            host.despawn(decal)?;
            debug!("flashlight ground decal released");
            events.push(FlashLightEvent::DecalReleased);
        }
        Ok(())
    }

    pub fn track(&self) -> &PulseTrack<S> {
        &self.track
    }

    pub fn decal(&self) -> Option<D> {
        self.decal
    }

    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    pub fn color(&self) -> Vec4 {
        self.color.extend(self.alpha)
    }
}
