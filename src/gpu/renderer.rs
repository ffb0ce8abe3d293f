//! Headless flame renderer.

use super::{
    camera::FlameCamera,
    context::{GpuContext, GpuError},
    pipeline::{FlamePipeline, FlameUniforms, ParticleInstance},
    textures::{ReadbackBuffer, RenderTarget},
};
use crate::flame::{FlameParticles, LightRig, PulsedIntensities};
use wgpu::BindGroup;

/// Base opacity applied to every particle billboard.
const PARTICLE_OPACITY: f32 = 0.8;

/// Configuration for rendering.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    pub background: [f32; 3],
    pub max_particles: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            // Near-black backdrop (#0a0a0a).
            background: [0.039, 0.039, 0.039],
            max_particles: 1000,
        }
    }
}

/// Scene inputs for one rendered frame.
pub struct FrameScene<'a> {
    pub particles: &'a FlameParticles,
    pub lights: &'a LightRig,
    pub pulsed: PulsedIntensities,
    pub camera: &'a FlameCamera,
    pub rotation: f32,
    pub time: f32,
}

/// Headless flame renderer: one offscreen RGBA target plus readback.
#[derive(Debug)]
pub struct FlameRenderer {
    ctx: GpuContext,
    pipeline: FlamePipeline,
    bind_group: BindGroup,
    target: RenderTarget,
    readback: ReadbackBuffer,
    config: RenderConfig,
}

impl FlameRenderer {
    /// Create a new renderer with the given configuration.
    pub async fn new(config: RenderConfig) -> Result<Self, GpuError> {
        let ctx = GpuContext::new().await?;
        let format = wgpu::TextureFormat::Rgba8Unorm;

        let pipeline = FlamePipeline::new(&ctx.device, format, config.max_particles);
        let bind_group = pipeline.create_bind_group(&ctx.device);
        let target = RenderTarget::new(&ctx.device, "flame_target", config.width, config.height, format);
        let readback = ReadbackBuffer::new(&ctx.device, config.width, config.height);

        Ok(Self {
            ctx,
            pipeline,
            bind_group,
            target,
            readback,
            config,
        })
    }

    /// Recreate the output target at new pixel dimensions.
    ///
    /// Callers guard against zero dimensions; no scene state is touched.
    pub fn resize(&mut self, width: u32, height: u32) {
        let format = wgpu::TextureFormat::Rgba8Unorm;
        self.target = RenderTarget::new(&self.ctx.device, "flame_target", width, height, format);
        self.readback = ReadbackBuffer::new(&self.ctx.device, width, height);
        self.config.width = width;
        self.config.height = height;
        log::debug!("flame render target resized to {}x{}", width, height);
    }

    /// Upload the current particle positions, colors and sizes.
    ///
    /// Call whenever the particle buffers are dirty; instance data is packed
    /// CPU-side and written over the previous generation in place.
    pub fn upload_particles(&self, particles: &FlameParticles) {
        let count = particles.count().min(self.config.max_particles as usize);
        let positions = particles.positions();
        let colors = particles.colors();
        let sizes = particles.sizes();

        let instances: Vec<ParticleInstance> = (0..count)
            .map(|i| {
                let i3 = i * 3;
                ParticleInstance {
                    pos_size: [positions[i3], positions[i3 + 1], positions[i3 + 2], sizes[i]],
                    color: [colors[i3], colors[i3 + 1], colors[i3 + 2], PARTICLE_OPACITY],
                }
            })
            .collect();

        self.ctx.queue.write_buffer(
            &self.pipeline.instance_buffer,
            0,
            bytemuck::cast_slice(&instances),
        );
    }

    /// Record and submit one draw of the full scene.
    pub fn render(&self, scene: &FrameScene<'_>) {
        self.encode(scene, false);
    }

    /// Render a frame and read back RGBA pixel data.
    pub fn render_frame(&self, scene: &FrameScene<'_>) -> Vec<u8> {
        self.encode(scene, true);
        self.readback.read_pixels(&self.ctx.device)
    }

    fn encode(&self, scene: &FrameScene<'_>, copy_out: bool) {
        let uniforms = FlameUniforms {
            view_proj: scene.camera.view_proj().to_cols_array_2d(),
            ambient: [
                scene.lights.ambient.color[0],
                scene.lights.ambient.color[1],
                scene.lights.ambient.color[2],
                scene.lights.ambient.intensity,
            ],
            warm_pos: [
                scene.lights.warm.position[0],
                scene.lights.warm.position[1],
                scene.lights.warm.position[2],
                scene.pulsed.warm,
            ],
            warm_color: [
                scene.lights.warm.color[0],
                scene.lights.warm.color[1],
                scene.lights.warm.color[2],
                0.0,
            ],
            violet_pos: [
                scene.lights.violet.position[0],
                scene.lights.violet.position[1],
                scene.lights.violet.position[2],
                scene.pulsed.violet,
            ],
            violet_color: [
                scene.lights.violet.color[0],
                scene.lights.violet.color[1],
                scene.lights.violet.color[2],
                0.0,
            ],
            proj_scale: scene.camera.proj_scale(),
            rotation: scene.rotation,
            time: scene.time,
        };
        self.ctx.queue.write_buffer(
            &self.pipeline.uniform_buffer,
            0,
            bytemuck::bytes_of(&uniforms),
        );

        let count = scene.particles.count().min(self.config.max_particles as usize);

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("flame_encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("flame_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: self.target.view(),
                    resolve_target: None,
                    depth_slice: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: self.config.background[0] as f64,
                            g: self.config.background[1] as f64,
                            b: self.config.background[2] as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });

            render_pass.set_pipeline(&self.pipeline.pipeline);
            render_pass.set_bind_group(0, &self.bind_group, &[]);
            render_pass.set_vertex_buffer(0, self.pipeline.instance_buffer.slice(..));
            // 4 vertices per particle billboard (triangle strip quad).
            render_pass.draw(0..4, 0..count as u32);
        }

        if copy_out {
            encoder.copy_texture_to_buffer(
                wgpu::TexelCopyTextureInfo {
                    texture: self.target.texture(),
                    mip_level: 0,
                    origin: wgpu::Origin3d::ZERO,
                    aspect: wgpu::TextureAspect::All,
                },
                wgpu::TexelCopyBufferInfo {
                    buffer: self.readback.buffer(),
                    layout: wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(self.readback.padded_row_bytes()),
                        rows_per_image: Some(self.config.height),
                    },
                },
                wgpu::Extent3d {
                    width: self.config.width,
                    height: self.config.height,
                    depth_or_array_layers: 1,
                },
            );
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Current output dimensions in pixels.
    pub fn target_size(&self) -> (u32, u32) {
        (self.target.width(), self.target.height())
    }

    /// Get the render configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Get GPU adapter info.
    pub fn adapter_info(&self) -> wgpu::AdapterInfo {
        self.ctx.adapter_info()
    }
}
