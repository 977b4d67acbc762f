use crate::events::{EffectEvents, FlashLightEvent};
use crate::snapshot::SnapshotCache;
use crate::tween::{PulseTiming, ScalarSequence, TweenSequence};
use log::{debug, trace};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Light,
    Ground,
}

impl TrackKind {
    pub fn label(self) -> &'static str {
        match self {
            TrackKind::Light => "light",
            TrackKind::Ground => "ground",
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrackStats {
    pub builds: u32,
    pub restarts: u32,
    pub kills: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Restarted,
    Rebuilt,
}

/// One pulse channel: at most one live sequence plus the snapshot it was built from.
pub struct PulseTrack<S = ScalarSequence> {
    kind: TrackKind,
    sequence: Option<S>,
    snapshot: SnapshotCache<PulseTiming>,
    stats: TrackStats,
}

impl<S: TweenSequence + Default> PulseTrack<S> {
    pub fn new(kind: TrackKind) -> Self {
        Self { kind, sequence: None, snapshot: SnapshotCache::default(), stats: TrackStats::default() }
    }

    /// Restarts the live sequence when `timing` matches the last build, otherwise kills it and
    /// builds a replacement.
    pub fn play(&mut self, timing: PulseTiming, events: &mut EffectEvents) -> PlayOutcome {
        if !self.snapshot.has_changed(&timing) {
            if let Some(sequence) = self.sequence.as_mut() {
                sequence.restart();
                self.stats.restarts += 1;
                events.push(FlashLightEvent::SequenceRestarted { track: self.kind });
                trace!("flashlight {} track restarted", self.kind);
                return PlayOutcome::Restarted;
            }
        }

        self.snapshot.capture(timing);
        self.kill(events);
        let sequence: S = timing.build();
        let segments = sequence.segments().len();
        let duration = sequence.duration();
        self.sequence = Some(sequence);
        self.stats.builds += 1;
        events.push(FlashLightEvent::SequenceBuilt { track: self.kind, segments, duration });
        debug!("flashlight {} track built: {segments} segments over {duration:.3}s", self.kind);
        PlayOutcome::Rebuilt
    }

    pub fn pause(&mut self) {
        if let Some(sequence) = self.sequence.as_mut() {
            sequence.pause();
        }
    }

    /// Releases the live sequence. No-op when nothing is built.
    pub fn kill(&mut self, events: &mut EffectEvents) {
        if let Some(mut sequence) = self.sequence.take() {
            sequence.kill();
            self.stats.kills += 1;
            events.push(FlashLightEvent::SequenceKilled { track: self.kind });
        }
    }

    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        self.sequence.as_mut().and_then(|sequence| sequence.tick(dt))
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn sequence(&self) -> Option<&S> {
        self.sequence.as_ref()
    }

    pub fn snapshot(&self) -> Option<&PulseTiming> {
        self.snapshot.last()
    }

    pub fn stats(&self) -> TrackStats {
        self.stats
    }
}
