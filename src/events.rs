use crate::track::TrackKind;
use std::collections::VecDeque;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FlashLightEvent {
    SequenceBuilt { track: TrackKind, segments: usize, duration: f32 },
    SequenceRestarted { track: TrackKind },
    SequenceKilled { track: TrackKind },
    DecalAcquired,
    DecalReactivated,
    DecalDeactivated,
    DecalReleased,
    RootReleased,
}

impl fmt::Display for FlashLightEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashLightEvent::SequenceBuilt { track, segments, duration } => {
                write!(f, "SequenceBuilt track={track} segments={segments} duration={duration:.3}")
            }
            FlashLightEvent::SequenceRestarted { track } => write!(f, "SequenceRestarted track={track}"),
            FlashLightEvent::SequenceKilled { track } => write!(f, "SequenceKilled track={track}"),
            FlashLightEvent::DecalAcquired => write!(f, "DecalAcquired"),
            FlashLightEvent::DecalReactivated => write!(f, "DecalReactivated"),
            FlashLightEvent::DecalDeactivated => write!(f, "DecalDeactivated"),
            FlashLightEvent::DecalReleased => write!(f, "DecalReleased"),
            FlashLightEvent::RootReleased => write!(f, "RootReleased"),
        }
    }
}

/// Events retained between drains; older entries are dropped first once full.
pub const EVENT_CAPACITY: usize = 64;

/// Bounded event log of one effect. Looping every frame without draining keeps at most
/// `capacity` entries.
#[derive(Debug)]
pub struct EffectEvents {
    events: VecDeque<FlashLightEvent>,
    capacity: usize,
    dropped: u64,
}

impl Default for EffectEvents {
    fn default() -> Self {
        Self::with_capacity(EVENT_CAPACITY)
    }
}

impl EffectEvents {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { events: VecDeque::with_capacity(capacity), capacity, dropped: 0 }
    }

    pub fn push(&mut self, event: FlashLightEvent) {
        if self.events.len() == self.capacity {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<FlashLightEvent> {
        self.events.drain(..).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FlashLightEvent> {
        self.events.iter()
    }

    pub fn count(&self, mut filter: impl FnMut(&FlashLightEvent) -> bool) -> usize {
        self.events.iter().filter(|event| filter(event)).count()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Events overwritten since the log was created.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_log_drops_oldest_first() {
        let mut events = EffectEvents::with_capacity(2);
        events.push(FlashLightEvent::DecalAcquired);
        events.push(FlashLightEvent::DecalDeactivated);
        events.push(FlashLightEvent::DecalReactivated);
        assert_eq!(events.len(), 2);
        assert_eq!(events.dropped(), 1);
        assert_eq!(events.drain(), vec![FlashLightEvent::DecalDeactivated, FlashLightEvent::DecalReactivated]);
        assert!(events.is_empty());
    }
}
