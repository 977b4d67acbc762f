use bevy_ecs::prelude::*;
use glam::Vec3;
use kestrel_flashlight::ecs::EcsEffectHost;
use kestrel_flashlight::tween::{Loops, SequenceState, TweenSegment, TweenSequence};
use kestrel_flashlight::{FlashLightLoop, FlashLightParams, FlatGround};
use std::cell::{Cell, RefCell};

thread_local! {
    static NEXT_ID: Cell<u32> = const { Cell::new(0) };
    static LOG: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
}

fn record(entry: String) {
    LOG.with(|log| log.borrow_mut().push(entry));
}

fn take_log() -> Vec<String> {
    LOG.with(|log| log.borrow_mut().drain(..).collect())
}

/// Backend that logs every call; it never advances values on its own.
struct RecordingSequence {
    id: u32,
    segments: Vec<TweenSegment>,
    loops: Loops,
    state: SequenceState,
}

impl Default for RecordingSequence {
    fn default() -> Self {
        let id = NEXT_ID.with(|next| {
            let id = next.get();
            next.set(id + 1);
            id
        });
        record(format!("new {id}"));
        Self { id, segments: Vec::new(), loops: Loops::Finite(1), state: SequenceState::Unbuilt }
    }
}

impl TweenSequence for RecordingSequence {
    fn append(&mut self, segment: TweenSegment) {
        self.segments.push(segment);
    }

    fn set_loops(&mut self, loops: Loops) {
        self.loops = loops;
    }

    fn play(&mut self) {
        record(format!("play {}", self.id));
        self.state = SequenceState::Playing;
    }

    fn restart(&mut self) {
        record(format!("restart {}", self.id));
        self.state = SequenceState::Playing;
    }

    fn pause(&mut self) {
        record(format!("pause {}", self.id));
        self.state = SequenceState::Paused;
    }

    fn kill(&mut self) {
        record(format!("kill {}", self.id));
        self.state = SequenceState::Killed;
    }

    fn tick(&mut self, _dt: f32) -> Option<f32> {
        (self.state == SequenceState::Playing).then_some(0.5)
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
        0.5
    }
}

#[test]
fn replacing_a_sequence_kills_the_old_one_first() {
    let mut world = World::new();
    let mut host = EcsEffectHost::new(&mut world);
    let ground = FlatGround::default();
    let root = host.spawn_light_root("flashlight_loop", Vec3::ZERO).expect("spawn root");
    let mut effect: FlashLightLoop<Entity, RecordingSequence> =
        FlashLightLoop::attach(&mut host, root).expect("attach");
    let params = FlashLightParams::default().shared();
    effect.set_parameters(Some(params.clone())).expect("bind");
    take_log();

    effect.loop_effect(&mut host, &ground).expect("first loop");
    effect.loop_effect(&mut host, &ground).expect("second loop");
    params.borrow_mut().light_intensity = 5.0;
    effect.loop_effect(&mut host, &ground).expect("third loop");
    effect.stop(&mut host).expect("stop");
    effect.destroy(&mut host).expect("destroy");

    let log = take_log();
    let first = log[0].trim_start_matches("new ").to_string();
    let second = log[4].trim_start_matches("new ").to_string();
    assert_ne!(first, second);
    assert_eq!(
        log,
        vec![
            format!("new {first}"),
            format!("play {first}"),
            format!("restart {first}"),
            format!("kill {first}"),
            format!("new {second}"),
            format!("play {second}"),
            format!("pause {second}"),
            format!("kill {second}"),
        ]
    );
}

#[test]
fn tick_values_from_any_backend_reach_the_light() {
    let mut world = World::new();
    let mut host = EcsEffectHost::new(&mut world);
    let ground = FlatGround::default();
    let root = host.spawn_light_root("flashlight_loop", Vec3::ZERO).expect("spawn root");
    let mut effect: FlashLightLoop<Entity, RecordingSequence> =
        FlashLightLoop::attach(&mut host, root).expect("attach");
    effect.set_parameters(Some(FlashLightParams::default().shared())).expect("bind");

    effect.loop_effect(&mut host, &ground).expect("loop");
    effect.tick(0.016, &mut host, &ground).expect("tick");
    assert_eq!(effect.light_intensity(&host).expect("intensity"), 0.5);

    let sequence = effect.light_track().track().sequence().expect("sequence");
    assert_eq!(sequence.loops(), Loops::Infinite);
    assert_eq!(sequence.segments().len(), 3);
}
