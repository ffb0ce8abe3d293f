//! GPU rendering using wgpu.
//!
//! Provides headless GPU rendering for the flame visualization
//! using the Metal backend on macOS, Vulkan on Linux.

pub mod camera;
pub mod context;
pub mod pipeline;
pub mod renderer;
pub mod textures;

pub use camera::FlameCamera;
pub use context::{GpuContext, GpuError};
pub use pipeline::{FlamePipeline, FlameUniforms, ParticleInstance};
pub use renderer::{FlameRenderer, FrameScene, RenderConfig};
pub use textures::{ReadbackBuffer, RenderTarget};
