use glam::{Vec3, Vec4};
use kestrel_flashlight::tween::Ease;
use kestrel_flashlight::{DecalPrefab, FlashLightParams};
use std::fs;

#[test]
fn loads_fixture_params() {
    let params = FlashLightParams::load("fixtures/flashlight/pulse.json").expect("load pulse fixture");
    assert_eq!(params.fade_in_time, 0.5);
    assert_eq!(params.living_time, 1.0);
    assert_eq!(params.fade_out_time, 0.5);
    assert_eq!(params.light_intensity, 2.0);
    assert!(params.enable_ground_light);
    assert_eq!(params.ground_light_prefab, DecalPrefab::new("ground_light_soft"));
    assert_eq!(params.ease, Ease::Linear);
    assert_eq!(params.light_color(), Vec3::new(1.0, 0.9, 0.7));
    assert_eq!(params.ground_light_size(), 3.0);
    assert_eq!(params.color_with_alpha(0.25), Vec4::new(1.0, 0.9, 0.7, 0.25));
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "light_intensity": 4.5, "enable_ground_light": true }"#).expect("write params");

    let params = FlashLightParams::load(&path).expect("load partial params");
    let defaults = FlashLightParams::default();
    assert_eq!(params.light_intensity, 4.5);
    assert!(params.enable_ground_light);
    assert_eq!(params.fade_in_time, defaults.fade_in_time);
    assert_eq!(params.ground_light_prefab, defaults.ground_light_prefab);
    assert_eq!(params.ease, Ease::OutQuad);
}

#[test]
fn loader_clamps_negative_values() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("negative.json");
    fs::write(&path, r#"{ "fade_in_time": -1.0, "living_time": -0.5, "light_range": -3.0 }"#).expect("write params");

    let params = FlashLightParams::load(&path).expect("load params");
    assert_eq!(params.fade_in_time, 0.0);
    assert_eq!(params.living_time, 0.0);
    assert_eq!(params.light_range, 0.0);
    assert_eq!(params.light_timing().segment_count(), 2);
}

#[test]
fn malformed_file_reports_path_and_falls_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ not json").expect("write params");

    let err = FlashLightParams::load(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse flashlight params"), "unexpected error: {err}");
    assert_eq!(FlashLightParams::load_or_default(&path), FlashLightParams::default());
    assert_eq!(FlashLightParams::load_or_default(dir.path().join("missing.json")), FlashLightParams::default());
}
