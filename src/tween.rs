use crate::snapshot::Approx;
use serde::Deserialize;
use smallvec::SmallVec;

/// Offset added to the peak value across the hold segment so the segment always carries a
/// non-zero delta, even on backends that skip no-op tweens.
pub const HOLD_NUDGE: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    #[default]
    OutQuad,
    InQuad,
    InOutQuad,
}

impl Ease {
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::OutQuad => t * (2.0 - t),
            Ease::InQuad => t * t,
            Ease::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Ease::Linear => "linear",
            Ease::OutQuad => "out_quad",
            Ease::InQuad => "in_quad",
            Ease::InOutQuad => "in_out_quad",
        }
    }
}

impl Approx for Ease {
    fn approx_eq(&self, other: &Self) -> bool {
        self == other
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenSegment {
    pub from: f32,
    pub to: f32,
    pub duration: f32,
    pub ease: Ease,
}

impl TweenSegment {
    pub fn new(from: f32, to: f32, duration: f32, ease: Ease) -> Self {
        Self { from, to, duration: duration.max(0.0), ease }
    }

    #[inline]
    pub fn value_at(&self, t: f32) -> f32 {
        self.from + (self.to - self.from) * self.ease.apply(t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loops {
    Finite(u32),
    Infinite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceState {
    Unbuilt,
    Playing,
    Paused,
    Completed,
    Killed,
}

impl SequenceState {
    pub fn is_live(self) -> bool {
        !matches!(self, SequenceState::Killed)
    }
}

/// Capability surface of an interpolation backend: an ordered chain of scalar segments that can be
/// looped, paused, restarted and killed, advanced one host tick at a time.
pub trait TweenSequence {
    fn append(&mut self, segment: TweenSegment);
    fn set_loops(&mut self, loops: Loops);
    fn play(&mut self);
    fn restart(&mut self);
    fn pause(&mut self);
    fn kill(&mut self);
    /// Advances by `dt` seconds and returns the sampled value when the sequence stepped.
    /// Paused, completed or killed sequences return `None`; that return drives the update hook.
    fn tick(&mut self, dt: f32) -> Option<f32>;
    fn state(&self) -> SequenceState;
    fn segments(&self) -> &[TweenSegment];
    fn loops(&self) -> Loops;
    fn value(&self) -> f32;

    fn duration(&self) -> f32 {
        self.segments().iter().map(|segment| segment.duration).sum()
    }
}

/// Built-in scalar backend. Holds up to three segments inline.
#[derive(Debug, Clone)]
pub struct ScalarSequence {
    segments: SmallVec<[TweenSegment; 3]>,
    loops: Loops,
    state: SequenceState,
    elapsed: f32,
    duration: f32,
    completed_loops: u32,
    value: f32,
}

impl Default for ScalarSequence {
    fn default() -> Self {
        Self {
            segments: SmallVec::new(),
            loops: Loops::Finite(1),
            state: SequenceState::Unbuilt,
            elapsed: 0.0,
            duration: 0.0,
            completed_loops: 0,
            value: 0.0,
        }
    }
}

impl ScalarSequence {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn completed_loops(&self) -> u32 {
        self.completed_loops
    }

    /// Samples the chain at `time` seconds into one loop. Zero-length segments resolve to their end.
    pub fn sample(&self, time: f32) -> f32 {
        let Some(last) = self.segments.last() else {
            return 0.0;
        };
        let mut start = 0.0;
        for segment in &self.segments {
            let end = start + segment.duration;
            if time < end {
                let t = if segment.duration > 0.0 { (time - start) / segment.duration } else { 1.0 };
                return segment.value_at(t);
            }
            start = end;
        }
        last.to
    }

    fn rewind(&mut self) {
        self.elapsed = 0.0;
        self.completed_loops = 0;
        self.value = self.sample(0.0);
    }
}

impl TweenSequence for ScalarSequence {
    fn append(&mut self, segment: TweenSegment) {
        if self.state == SequenceState::Killed {
            return;
        }
        self.duration += segment.duration;
        self.segments.push(segment);
        if self.state == SequenceState::Unbuilt {
            self.value = self.sample(0.0);
        }
    }

    fn set_loops(&mut self, loops: Loops) {
        self.loops = loops;
    }

    fn play(&mut self) {
        match self.state {
            SequenceState::Unbuilt => {
                self.rewind();
                self.state = SequenceState::Playing;
            }
            SequenceState::Paused => self.state = SequenceState::Playing,
            SequenceState::Playing | SequenceState::Completed | SequenceState::Killed => {}
        }
    }

    fn restart(&mut self) {
        if self.state == SequenceState::Killed {
            return;
        }
        self.rewind();
        self.state = SequenceState::Playing;
    }

    fn pause(&mut self) {
        if self.state == SequenceState::Playing {
            self.state = SequenceState::Paused;
        }
    }

    fn kill(&mut self) {
        self.state = SequenceState::Killed;
        self.segments.clear();
        self.duration = 0.0;
        self.elapsed = 0.0;
    }

    fn tick(&mut self, dt: f32) -> Option<f32> {
        if self.state != SequenceState::Playing {
            return None;
        }
        self.elapsed += dt.max(0.0);
        let total = self.duration;
        if total <= 0.0 {
            if let Loops::Finite(_) = self.loops {
                self.state = SequenceState::Completed;
            }
            self.value = self.sample(0.0);
            return Some(self.value);
        }
        if self.elapsed >= total {
            let wraps = (self.elapsed / total).floor();
            match self.loops {
                Loops::Infinite => {
                    self.completed_loops = self.completed_loops.saturating_add(wraps as u32);
                    self.elapsed -= wraps * total;
                }
                Loops::Finite(count) => {
                    let finished = self.completed_loops.saturating_add(wraps as u32);
                    if finished >= count.max(1) {
                        self.completed_loops = count.max(1);
                        self.elapsed = total;
                        self.state = SequenceState::Completed;
                    } else {
                        self.completed_loops = finished;
                        self.elapsed -= wraps * total;
                    }
                }
            }
        }
        self.value = self.sample(self.elapsed);
        Some(self.value)
    }

    fn state(&self) -> SequenceState {
        self.state
    }

    fn segments(&self) -> &[TweenSegment] {
        &self.segments
    }

    fn loops(&self) -> Loops {
        self.loops
    }

    fn value(&self) -> f32 {
        self.value
    }

    fn duration(&self) -> f32 {
        self.duration
    }
}

/// Timing of one fade-in / hold / fade-out pulse toward `target`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseTiming {
    pub fade_in: f32,
    pub living: f32,
    pub fade_out: f32,
    pub target: f32,
    pub ease: Ease,
}

impl PulseTiming {
    pub fn fields(&self) -> [f32; 4] {
        [self.fade_in, self.living, self.fade_out, self.target]
    }

    pub fn segment_count(&self) -> usize {
        if self.living > 0.0 {
            3
        } else {
            2
        }
    }

    /// Builds an infinitely looping pulse sequence and starts it.
    pub fn build<S: TweenSequence + Default>(&self) -> S {
        let mut sequence = S::default();
        sequence.set_loops(Loops::Infinite);
        sequence.append(TweenSegment::new(0.0, self.target, self.fade_in, self.ease));
        if self.living > 0.0 {
            sequence.append(TweenSegment::new(self.target, self.target + HOLD_NUDGE, self.living, self.ease));
        }
        sequence.append(TweenSegment::new(self.target, 0.0, self.fade_out, self.ease));
        sequence.play();
        sequence
    }
}

impl Approx for PulseTiming {
    fn approx_eq(&self, other: &Self) -> bool {
        self.fields().approx_eq(&other.fields()) && self.ease.approx_eq(&other.ease)
    }
}
