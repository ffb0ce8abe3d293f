//! The flame animation engine: lifecycle, frame loop, and parameter plumbing.
//!
//! One engine instance owns one flame. CPU-side state (particles, lights,
//! camera, view parameters) is allocated by [`FlameEngine::new`]; the GPU
//! generation (device, pipeline, targets) is created by [`FlameEngine::start`]
//! and released by [`FlameEngine::stop`]. The engine is single-threaded and
//! cooperative: frames advance strictly sequentially, one writer, no locks.

mod scheduler;

pub use scheduler::{CancelHandle, FixedStepScheduler, FrameScheduler, ManualScheduler};

use serde::{Deserialize, Serialize};

use crate::flame::{FlameParticles, FlameRng, LightRig, ViewParams, DEFAULT_PARTICLE_COUNT};
use crate::gpu::{FlameCamera, FlameRenderer, FrameScene, GpuError, RenderConfig};

/// Rotation advance per frame, radians around the vertical axis.
const ROTATION_STEP: f32 = 0.005;

/// Errors that can occur in the engine.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("drawable surface has zero dimensions: {width}x{height}")]
    ZeroSizedSurface { width: u32, height: u32 },
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    #[error("engine has not been started")]
    NotStarted,
}

/// Engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlameConfig {
    pub width: u32,
    pub height: u32,
    pub particle_count: usize,
    pub background: [f32; 3],
    /// Seed for the deterministic particle layout.
    pub seed: u32,
}

impl Default for FlameConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            particle_count: DEFAULT_PARTICLE_COUNT,
            background: [0.039, 0.039, 0.039],
            seed: 0x5EED_F1A5,
        }
    }
}

impl FlameConfig {
    fn to_render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width,
            height: self.height,
            background: self.background,
            max_particles: self.particle_count as u32,
        }
    }
}

/// Procedural flame animation engine.
#[derive(Debug)]
pub struct FlameEngine {
    config: FlameConfig,
    params: ViewParams,
    particles: FlameParticles,
    lights: LightRig,
    camera: FlameCamera,
    rotation: f32,
    renderer: Option<FlameRenderer>,
}

impl FlameEngine {
    /// Allocate CPU-side flame state.
    ///
    /// A zero-sized surface is a fatal precondition: the engine refuses to
    /// initialize rather than divide by zero downstream. No GPU resources
    /// are touched until [`start`](Self::start).
    pub fn new(config: FlameConfig) -> Result<Self, EngineError> {
        if config.width == 0 || config.height == 0 {
            return Err(EngineError::ZeroSizedSurface {
                width: config.width,
                height: config.height,
            });
        }

        let mut rng = FlameRng::new(config.seed);
        let particles = FlameParticles::new(config.particle_count, &mut rng);
        let camera = FlameCamera::new(config.width, config.height);

        Ok(Self {
            config,
            params: ViewParams::default(),
            particles,
            lights: LightRig::new(),
            camera,
            rotation: 0.0,
            renderer: None,
        })
    }

    /// Create one generation of GPU resources. No-op if already started.
    ///
    /// Allocation failure is fatal and propagated; the engine never retries.
    pub async fn start(&mut self) -> Result<(), EngineError> {
        if self.renderer.is_some() {
            return Ok(());
        }
        let renderer = FlameRenderer::new(self.config.to_render_config()).await?;
        renderer.upload_particles(&self.particles);
        self.particles.clear_dirty();
        self.renderer = Some(renderer);
        log::info!(
            "flame engine started: {} particles, {}x{}",
            self.particles.count(),
            self.config.width,
            self.config.height
        );
        Ok(())
    }

    pub fn started(&self) -> bool {
        self.renderer.is_some()
    }

    /// Release the GPU generation. Idempotent; safe before the first frame
    /// and safe to call any number of times.
    pub fn stop(&mut self) {
        if self.renderer.take().is_some() {
            log::debug!("flame engine stopped, GPU resources released");
        }
    }

    /// Set the fire intensity (clamped to 1..=10) and rescale the lights.
    ///
    /// The first call snapshots the light baselines; see [`LightRig::rescale`].
    pub fn set_intensity(&mut self, value: f32) -> f32 {
        let stored = self.params.set_intensity(value);
        self.lights.rescale(stored);
        stored
    }

    /// Set the color selection. Validated, stored, and surfaced to the shell
    /// but intentionally never wired into particle or light colors.
    pub fn set_color(&mut self, hex: &str) -> bool {
        self.params.set_color(hex)
    }

    pub fn params(&self) -> &ViewParams {
        &self.params
    }

    pub fn camera(&self) -> &FlameCamera {
        &self.camera
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn particles(&self) -> &FlameParticles {
        &self.particles
    }

    /// Accumulated flame rotation in radians. Grows without bound; the
    /// renderer takes sin/cos so wraparound is tolerated.
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// Advance the simulation one frame without rendering.
    ///
    /// Split out from [`advance`](Self::advance) so the simulation is
    /// exercisable without a GPU adapter.
    pub fn step_simulation(&mut self, time_secs: f64) {
        self.rotation += ROTATION_STEP;
        self.particles.step(time_secs);
    }

    /// Advance one frame and draw it.
    ///
    /// Order per frame: rotation and particle advection, dirty-buffer upload,
    /// parameter floor plus wall-clock pulse for the lights, one draw call.
    pub fn advance(&mut self, time_secs: f64) -> Result<(), EngineError> {
        self.step_simulation(time_secs);
        let renderer = self.renderer.as_ref().ok_or(EngineError::NotStarted)?;

        if self.particles.is_dirty() {
            renderer.upload_particles(&self.particles);
            self.particles.clear_dirty();
        }

        renderer.render(&FrameScene {
            particles: &self.particles,
            lights: &self.lights,
            pulsed: self.lights.pulse(time_secs),
            camera: &self.camera,
            rotation: self.rotation,
            time: time_secs as f32,
        });
        Ok(())
    }

    /// Advance one frame and read back the RGBA pixels.
    pub fn render_frame(&mut self, time_secs: f64) -> Result<Vec<u8>, EngineError> {
        self.step_simulation(time_secs);
        let renderer = self.renderer.as_ref().ok_or(EngineError::NotStarted)?;

        if self.particles.is_dirty() {
            renderer.upload_particles(&self.particles);
            self.particles.clear_dirty();
        }

        Ok(renderer.render_frame(&FrameScene {
            particles: &self.particles,
            lights: &self.lights,
            pulsed: self.lights.pulse(time_secs),
            camera: &self.camera,
            rotation: self.rotation,
            time: time_secs as f32,
        }))
    }

    /// React to a surface resize: update the camera aspect ratio and resize
    /// the output target. Particle and light state is untouched.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), EngineError> {
        if width == 0 || height == 0 {
            return Err(EngineError::ZeroSizedSurface { width, height });
        }
        self.camera.set_aspect(width, height);
        self.config.width = width;
        self.config.height = height;
        if let Some(renderer) = self.renderer.as_mut() {
            renderer.resize(width, height);
        }
        Ok(())
    }

    /// Drive the frame loop until the scheduler is cancelled or exhausted.
    pub fn run(&mut self, scheduler: &mut dyn FrameScheduler) -> Result<(), EngineError> {
        while let Some(time) = scheduler.next_frame() {
            self.advance(time)?;
        }
        Ok(())
    }

    /// Current surface dimensions in pixels.
    pub fn surface_size(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }
}

impl Drop for FlameEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sized_surface_is_fatal() {
        let config = FlameConfig {
            width: 800,
            height: 0,
            ..Default::default()
        };
        let err = FlameEngine::new(config).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ZeroSizedSurface { width: 800, height: 0 }
        ));
    }

    #[test]
    fn advance_before_start_reports_not_started() {
        let mut engine = FlameEngine::new(FlameConfig::default()).unwrap();
        assert!(matches!(engine.advance(0.0), Err(EngineError::NotStarted)));
    }

    #[test]
    fn stop_is_idempotent_before_first_frame() {
        let mut engine = FlameEngine::new(FlameConfig::default()).unwrap();
        engine.stop();
        engine.stop();
        assert!(!engine.started());
    }

    #[test]
    fn rotation_accumulates_per_frame() {
        let mut engine = FlameEngine::new(FlameConfig::default()).unwrap();
        for frame in 0..10 {
            engine.step_simulation(frame as f64 / 60.0);
        }
        assert!((engine.rotation() - 0.05).abs() < 1e-6);
    }

    #[test]
    fn intensity_knob_rescales_lights() {
        let mut engine = FlameEngine::new(FlameConfig::default()).unwrap();
        assert_eq!(engine.set_intensity(10.0), 10.0);
        assert_eq!(engine.lights().warm.intensity, 4.0);
        assert_eq!(engine.lights().violet.intensity, 3.0);

        // Out-of-range input is clamped before reaching the lights.
        assert_eq!(engine.set_intensity(0.0), 1.0);
        assert!((engine.lights().warm.intensity - 0.4).abs() < 1e-6);
    }

    #[test]
    fn color_knob_is_decorative() {
        let mut engine = FlameEngine::new(FlameConfig::default()).unwrap();
        let warm_before = engine.lights().warm.color;
        let colors_before = engine.particles().colors().to_vec();

        assert!(engine.set_color("#00ff00"));
        assert_eq!(engine.params().color, "#00ff00");
        assert_eq!(engine.lights().warm.color, warm_before);
        assert_eq!(engine.particles().colors(), &colors_before[..]);
    }

    #[test]
    fn resize_updates_camera_aspect() {
        let mut engine = FlameEngine::new(FlameConfig {
            width: 800,
            height: 600,
            ..Default::default()
        })
        .unwrap();

        engine.resize(400, 300).unwrap();
        assert!((engine.camera().aspect - 400.0 / 300.0).abs() < 1e-6);
        assert_eq!(engine.surface_size(), (400, 300));

        assert!(engine.resize(0, 300).is_err());
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = FlameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: FlameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.width, config.width);
        assert_eq!(back.particle_count, config.particle_count);
    }
}
