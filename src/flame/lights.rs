//! Light rig for the flame: two pulsing point lights plus a dim ambient.
//!
//! The external intensity parameter rescales each point light against a
//! baseline snapshotted on the first rescale call. Wall-clock pulsing is a
//! multiplicative oscillation layered on top of the rescaled floor every
//! frame; it never writes back into the floor or the baseline.

/// Neutral value of the external intensity parameter.
pub const INTENSITY_DEFAULT: f32 = 5.0;

/// Angular frequency of the light pulse, in rad/s of wall-clock time.
const PULSE_FREQUENCY: f32 = 2.0;

/// A point light with a fixed position and color and a mutable intensity.
#[derive(Debug, Clone)]
pub struct PointLight {
    pub position: [f32; 3],
    pub color: [f32; 3],
    /// Current intensity floor, set by the parameter rescale.
    pub intensity: f32,
}

/// Uniform ambient fill light.
#[derive(Debug, Clone)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Point light intensities for one rendered frame, after pulsing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulsedIntensities {
    pub warm: f32,
    pub violet: f32,
}

/// The flame's light rig.
#[derive(Debug)]
pub struct LightRig {
    /// Warm orange glow above the flame.
    pub warm: PointLight,
    /// Violet glow below the flame.
    pub violet: PointLight,
    pub ambient: AmbientLight,
    /// Baselines captured on the first rescale, in [warm, violet] order.
    baselines: Option<[f32; 2]>,
}

impl LightRig {
    pub fn new() -> Self {
        Self {
            warm: PointLight {
                position: [0.0, 1.0, 0.0],
                color: [1.0, 0.4, 0.0], // #ff6600
                intensity: 2.0,
            },
            violet: PointLight {
                position: [0.0, -1.0, 0.0],
                color: [0.616, 0.0, 1.0], // #9d00ff
                intensity: 1.5,
            },
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
            },
            baselines: None,
        }
    }

    /// Rescale both point lights from the external intensity parameter.
    ///
    /// The first call snapshots the lights' current intensities as the
    /// authoritative baselines; they are never recaptured. Every call,
    /// including the first, sets
    /// `intensity = baseline * (param / INTENSITY_DEFAULT)`, so repeated
    /// calls with the same parameter are idempotent.
    pub fn rescale(&mut self, param: f32) {
        let baselines = *self
            .baselines
            .get_or_insert([self.warm.intensity, self.violet.intensity]);

        let scale = param / INTENSITY_DEFAULT;
        self.warm.intensity = baselines[0] * scale;
        self.violet.intensity = baselines[1] * scale;
    }

    /// Baselines captured by the first [`rescale`](Self::rescale), if any.
    pub fn baselines(&self) -> Option<[f32; 2]> {
        self.baselines
    }

    /// Effective point light intensities for the given wall-clock time.
    ///
    /// Both lights oscillate at the same frequency in opposite phase; the
    /// oscillation rides multiplicatively on the current intensity floors.
    /// Amplitudes match the original 2.0 +/- 0.5 and 1.5 +/- 0.5 swings at
    /// the neutral parameter.
    pub fn pulse(&self, time_secs: f64) -> PulsedIntensities {
        let t = time_secs as f32 * PULSE_FREQUENCY;
        PulsedIntensities {
            warm: self.warm.intensity * (1.0 + 0.25 * t.sin()),
            violet: self.violet.intensity * (1.0 + (1.0 / 3.0) * t.cos()),
        }
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new()
    }
}
