use crate::events::{EffectEvents, FlashLightEvent};
use crate::ground::GroundProjector;
use crate::ground_track::GroundTrack;
use crate::host::EffectHost;
use crate::light_track::LightTrack;
use crate::params::SharedParams;
use crate::tween::{ScalarSequence, TweenSequence};
use anyhow::Result;
use log::{debug, warn};
use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectState {
    Idle,
    Active,
    Stopped,
    Destroyed,
}

/// Returned by every lifecycle call made after [`FlashLightLoop::destroy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EffectDestroyed {
    pub operation: &'static str,
}

impl fmt::Display for EffectDestroyed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "flashlight effect already destroyed (attempted {})", self.operation)
    }
}

impl Error for EffectDestroyed {}

/// Looping flashlight pulse: a point light on the effect root plus an optional ground decal.
///
/// `D` is the host's instance handle. Call [`loop_effect`](Self::loop_effect) whenever the
/// embedding framework (re)starts the loop and [`tick`](Self::tick) once per frame.
pub struct FlashLightLoop<D, S = ScalarSequence> {
    root: D,
    params: Option<SharedParams>,
    light: LightTrack<S>,
    ground: GroundTrack<D, S>,
    state: EffectState,
    events: EffectEvents,
}

impl<D, S> FlashLightLoop<D, S>
where
    D: Copy + Eq + fmt::Debug,
    S: TweenSequence + Default,
{
    /// Binds the effect to its pooled root and blacks out the root's light.
    pub fn attach<H: EffectHost<Handle = D>>(host: &mut H, root: D) -> Result<Self> {
        host.set_light_intensity(root, 0.0)?;
        Ok(Self {
            root,
            params: None,
            light: LightTrack::default(),
            ground: GroundTrack::default(),
            state: EffectState::Idle,
            events: EffectEvents::default(),
        })
    }

    pub fn set_parameters(&mut self, params: Option<SharedParams>) -> Result<()> {
        self.ensure_alive("set_parameters")?;
        self.params = params;
        Ok(())
    }

    pub fn loop_effect<H, P>(&mut self, host: &mut H, projector: &P) -> Result<()>
    where
        H: EffectHost<Handle = D>,
        P: GroundProjector + ?Sized,
    {
        self.ensure_alive("loop")?;
        let Some(source) = self.params.clone() else {
            return Ok(());
        };
        let params = source.borrow();

        self.light.play(&params, host, self.root, &mut self.events)?;
        if params.enable_ground_light {
            self.ground.play(&params, host, self.root, projector, &mut self.events)?;
        }
        self.state = EffectState::Active;
        Ok(())
    }

    /// Advances both tracks by `dt`; light first, then ground.
    pub fn tick<H, P>(&mut self, dt: f32, host: &mut H, projector: &P) -> Result<()>
    where
        H: EffectHost<Handle = D>,
        P: GroundProjector + ?Sized,
    {
        self.ensure_alive("tick")?;
        self.light.tick(dt, host, self.root)?;
        let source = self.params.clone();
        let params = source.as_ref().map(|params| params.borrow());
        self.ground.tick(dt, params.as_deref(), host, self.root, projector)
    }

    pub fn stop<H: EffectHost<Handle = D>>(&mut self, host: &mut H) -> Result<()> {
        self.ensure_alive("stop")?;
        self.light.stop(host, self.root)?;
        self.ground.stop(host, &mut self.events)?;
        self.state = EffectState::Stopped;
        Ok(())
    }

    // TODO: fade the light out over fade_out_time before pausing once the effect framework
    // exposes a completion callback; until then smooth stop is an immediate stop.
    pub fn smooth_stop<H: EffectHost<Handle = D>>(&mut self, host: &mut H) -> Result<()> {
        debug!("flashlight smooth stop has no fade; stopping immediately");
        self.stop(host)
    }

    /// Kills both sequences, returns the decal and the root to the pool. Terminal.
    ///
    /// The root is released even when handing back the decal fails; the first error is returned.
    pub fn destroy<H: EffectHost<Handle = D>>(&mut self, host: &mut H) -> Result<()> {
        self.ensure_alive("destroy")?;
        self.state = EffectState::Destroyed;
        self.params = None;
        self.light.release(&mut self.events);
        let ground = self.ground.release(host, &mut self.events);
        if let Err(err) = &ground {
            warn!("flashlight ground decal release failed: {err:#}");
        }
        host.despawn(self.root)?;
        self.events.push(FlashLightEvent::RootReleased);
        ground
    }

    pub fn smooth_destroy<H: EffectHost<Handle = D>>(&mut self, host: &mut H) -> Result<()> {
        self.destroy(host)
    }

    fn ensure_alive(&self, operation: &'static str) -> Result<()> {
        if self.state == EffectState::Destroyed {
            return Err(EffectDestroyed { operation }.into());
        }
        Ok(())
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn root(&self) -> D {
        self.root
    }

    pub fn parameters(&self) -> Option<&SharedParams> {
        self.params.as_ref()
    }

    pub fn light_track(&self) -> &LightTrack<S> {
        &self.light
    }

    pub fn ground_track(&self) -> &GroundTrack<D, S> {
        &self.ground
    }

    pub fn ground_alpha(&self) -> f32 {
        self.ground.alpha()
    }

    pub fn light_intensity<H: EffectHost<Handle = D>>(&self, host: &H) -> Result<f32> {
        host.light_intensity(self.root)
    }

    pub fn events(&self) -> &EffectEvents {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<FlashLightEvent> {
        self.events.drain()
    }
}
