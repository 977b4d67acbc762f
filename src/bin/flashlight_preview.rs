use anyhow::Result;
use bevy_ecs::world::World;
use glam::Vec3;
use kestrel_flashlight::cli::PreviewOptions;
use kestrel_flashlight::ecs::{EcsEffectHost, EcsFlashLight};
use kestrel_flashlight::{FlashLightParams, FlatGround};
use log::{debug, info};
use std::process;

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("flashlight_preview error: {err:?}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let options = PreviewOptions::parse_from_env()?;
    let mut params = match &options.params {
        Some(path) => FlashLightParams::load(path)?,
        None => FlashLightParams::default(),
    };
    if let Some(ground) = options.ground {
        params.enable_ground_light = ground;
    }
    info!(
        "previewing flashlight pulse: fade_in={} living={} fade_out={} intensity={} ground={}",
        params.fade_in_time,
        params.living_time,
        params.fade_out_time,
        params.light_intensity,
        params.enable_ground_light
    );

    let mut world = World::new();
    let mut host = EcsEffectHost::new(&mut world);
    let root = host.spawn_light_root("flashlight_loop", Vec3::new(0.0, 2.0, 0.0))?;
    let ground = FlatGround::default();

    let mut effect = EcsFlashLight::attach(&mut host, root)?;
    effect.set_parameters(Some(params.shared()))?;
    effect.loop_effect(&mut host, &ground)?;

    println!("time,intensity,alpha");
    for frame in 1..=options.frames {
        effect.tick(options.dt, &mut host, &ground)?;
        let time = frame as f32 * options.dt;
        println!("{time:.4},{:.4},{:.4}", effect.light_intensity(&host)?, effect.ground_alpha());
    }

    effect.destroy(&mut host)?;
    for event in effect.drain_events() {
        debug!("{event}");
    }
    Ok(())
}
