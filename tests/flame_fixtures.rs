//! Shared test fixtures for flame engine tests.

#![allow(dead_code)]

use trina_flame::{FlameConfig, FlameEngine};

/// Create a standard small test configuration.
pub fn test_config() -> FlameConfig {
    FlameConfig {
        width: 320,
        height: 180,
        particle_count: 200,
        background: [0.0, 0.0, 0.0],
        seed: 42,
    }
}

/// Engine with the standard test configuration, not yet started.
pub fn test_engine() -> FlameEngine {
    FlameEngine::new(test_config()).expect("test config is valid")
}

/// Engine with an explicit surface size.
pub fn engine_with_surface(width: u32, height: u32) -> FlameEngine {
    FlameEngine::new(FlameConfig {
        width,
        height,
        ..test_config()
    })
    .expect("test config is valid")
}

/// Timestamps for `count` frames at 60fps.
pub fn frame_times(count: usize) -> Vec<f64> {
    (0..count).map(|i| i as f64 / 60.0).collect()
}
