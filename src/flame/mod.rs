//! The flame scene model: particle buffers, light rig, and view parameters.
//!
//! Everything here is CPU-side state that the engine mutates once per frame
//! and the GPU layer uploads for drawing. None of it touches wgpu, so the
//! simulation is fully testable without a graphics adapter.

mod lights;
mod params;
mod particles;

pub use lights::{
    AmbientLight, LightRig, PointLight, PulsedIntensities, INTENSITY_DEFAULT,
};
pub use params::{parse_hex_color, ViewParams, DEFAULT_COLOR, INTENSITY_RANGE};
pub use particles::{
    gradient_color, FlameParticles, FlameRng, DEFAULT_PARTICLE_COUNT, FLAME_HALF_HEIGHT,
};
