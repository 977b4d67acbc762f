use kestrel_flashlight::snapshot::SnapshotCache;
use kestrel_flashlight::tween::{Ease, PulseTiming};
use kestrel_flashlight::FlashLightParams;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_params(rng: &mut StdRng) -> FlashLightParams {
    FlashLightParams {
        fade_in_time: rng.gen_range(0.1f32..10.0),
        living_time: rng.gen_range(0.1f32..10.0),
        fade_out_time: rng.gen_range(0.1f32..10.0),
        light_intensity: rng.gen_range(0.1f32..10.0),
        ground_light_alpha: rng.gen_range(0.1f32..1.0),
        ..FlashLightParams::default()
    }
}

fn jitter(value: f32) -> f32 {
    value * (1.0 + 1e-7)
}

#[test]
fn recomputed_values_keep_the_snapshot_fresh() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..256 {
        let params = random_params(&mut rng);
        let mut cache = SnapshotCache::default();
        cache.capture(params.light_timing());

        let recomputed = FlashLightParams {
            fade_in_time: jitter(params.fade_in_time),
            living_time: jitter(params.living_time),
            fade_out_time: jitter(params.fade_out_time),
            light_intensity: jitter(params.light_intensity),
            ..params.clone()
        };
        assert!(!cache.has_changed(&recomputed.light_timing()), "jitter should not count as change: {params:?}");
    }
}

#[test]
fn any_field_change_is_detected() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..256 {
        let params = random_params(&mut rng);
        let mut cache = SnapshotCache::default();
        cache.capture(params.light_timing());

        let field = rng.gen_range(0..4);
        let mut changed = params.light_timing();
        match field {
            0 => changed.fade_in += 0.01,
            1 => changed.living += 0.01,
            2 => changed.fade_out += 0.01,
            _ => changed.target += 0.01,
        }
        assert!(cache.has_changed(&changed), "field {field} change missed: {params:?}");
    }
}

#[test]
fn light_and_ground_snapshots_are_independent() {
    let params = FlashLightParams::default();
    let mut light = SnapshotCache::default();
    let mut ground = SnapshotCache::default();
    light.capture(params.light_timing());
    ground.capture(params.ground_timing());

    let mut edited = params.clone();
    edited.ground_light_alpha += 0.2;
    assert!(!light.has_changed(&edited.light_timing()));
    assert!(ground.has_changed(&edited.ground_timing()));

    edited.living_time += 0.5;
    assert!(light.has_changed(&edited.light_timing()));
}

#[test]
fn ease_change_is_a_change() {
    let timing = PulseTiming { fade_in: 0.2, living: 0.0, fade_out: 0.2, target: 1.0, ease: Ease::Linear };
    let mut cache = SnapshotCache::default();
    cache.capture(timing);
    assert!(cache.has_changed(&PulseTiming { ease: Ease::InOutQuad, ..timing }));
    assert!(!cache.has_changed(&timing));
}
