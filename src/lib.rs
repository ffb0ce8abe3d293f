//! Trina Flame Core
//!
//! GPU-accelerated procedural flame particle visualizer.
//!
//! # Features
//!
//! - Spiral flame point cloud with a fixed-size particle pool (no
//!   reallocation over the flame's lifetime)
//! - Per-frame upward advection with wraparound recycling and sinusoidal
//!   lateral flicker
//! - Two pulsing point lights plus ambient, live-rescaled by an external
//!   intensity parameter against a capture-once baseline
//! - Headless GPU rendering via wgpu (Metal on macOS, Vulkan on Linux) with
//!   RGBA pixel readback
//! - Pluggable frame scheduling for wall-clock or scripted (test) loops

pub mod engine;
pub mod flame;
pub mod gpu;

// Re-export commonly used types
pub use engine::{
    CancelHandle, EngineError, FixedStepScheduler, FlameConfig, FlameEngine, FrameScheduler,
    ManualScheduler,
};
pub use flame::{
    gradient_color, parse_hex_color, AmbientLight, FlameParticles, FlameRng, LightRig, PointLight,
    PulsedIntensities, ViewParams, DEFAULT_PARTICLE_COUNT, FLAME_HALF_HEIGHT, INTENSITY_DEFAULT,
};
pub use gpu::{FlameCamera, FlameRenderer, FrameScene, GpuContext, GpuError, RenderConfig};
