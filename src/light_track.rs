use crate::events::EffectEvents;
use crate::host::EffectHost;
use crate::params::FlashLightParams;
use crate::track::{PlayOutcome, PulseTrack, TrackKind};
use crate::tween::{ScalarSequence, TweenSequence};
use anyhow::Result;

/// Drives the point light intensity on the effect root.
pub struct LightTrack<S = ScalarSequence> {
    track: PulseTrack<S>,
}

impl<S: TweenSequence + Default> Default for LightTrack<S> {
    fn default() -> Self {
        Self { track: PulseTrack::new(TrackKind::Light) }
    }
}

impl<S: TweenSequence + Default> LightTrack<S> {
    pub fn play<H: EffectHost>(
        &mut self,
        params: &FlashLightParams,
        host: &mut H,
        light: H::Handle,
        events: &mut EffectEvents,
    ) -> Result<PlayOutcome> {
        // Static light state always follows the current params, restart or not.
        host.configure_light(light, params.light_color(), params.light_range)?;
        host.set_light_intensity(light, 0.0)?;
        Ok(self.track.play(params.light_timing(), events))
    }

    /// Pauses the sequence for a cheap resume and blacks the light out immediately.
    pub fn stop<H: EffectHost>(&mut self, host: &mut H, light: H::Handle) -> Result<()> {
        host.set_light_intensity(light, 0.0)?;
        self.track.pause();
        Ok(())
    }

    pub fn tick<H: EffectHost>(&mut self, dt: f32, host: &mut H, light: H::Handle) -> Result<()> {
        if let Some(intensity) = self.track.tick(dt) {
            host.set_light_intensity(light, intensity)?;
        }
        Ok(())
    }

    pub fn release(&mut self, events: &mut EffectEvents) {
        self.track.kill(events);
    }

    pub fn track(&self) -> &PulseTrack<S> {
        &self.track
    }
}
