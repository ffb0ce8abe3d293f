//! Example: Render a few frames of the flame headless and save a snapshot.
//!
//! Run with:
//!     cargo run --example render_flame --features tokio

use anyhow::Context;
use trina_flame::{FlameConfig, FlameEngine, ManualScheduler};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Trina Flame - Headless Render Example");
    println!("=====================================\n");

    let config = FlameConfig {
        width: 640,
        height: 400,
        ..Default::default()
    };
    println!("Surface: {}x{}", config.width, config.height);
    println!("Particles: {}", config.particle_count);

    let mut engine = FlameEngine::new(config)?;
    engine.start().await.context("GPU initialization failed")?;
    engine.set_intensity(7.0);
    engine.set_color("#f97316");

    // Two seconds of animation at 60fps, then capture the last frame.
    let mut scheduler = ManualScheduler::with_frame_count(119, 1.0 / 60.0);
    engine.run(&mut scheduler)?;
    let pixels = engine.render_frame(119.0 / 60.0)?;

    let (width, height) = engine.surface_size();
    let image = image::RgbaImage::from_raw(width, height, pixels)
        .context("frame buffer has unexpected size")?;
    let output = "flame_frame.png";
    image.save(output)?;

    println!("\nWrote {} after 120 frames", output);
    println!("Rotation: {:.3} rad", engine.rotation());

    engine.stop();
    Ok(())
}
