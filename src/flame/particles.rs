//! Flame particle buffers and per-frame simulation.
//!
//! Owns three parallel fixed-length buffers (position, color, size) laid out
//! on a spiral at creation and advected upward every frame with lateral
//! sinusoidal jitter. Buffer lengths never change after creation; particles
//! that rise past the top of the flame are recycled to the bottom.

use std::f32::consts::PI;

/// Default number of particles in the flame.
pub const DEFAULT_PARTICLE_COUNT: usize = 1000;

/// Vertical extent of the flame. Particles live in `[-FLAME_HALF_HEIGHT, FLAME_HALF_HEIGHT]`.
pub const FLAME_HALF_HEIGHT: f32 = 1.5;

/// Upward drift per frame.
const RISE_STEP: f32 = 0.01;

/// Amplitude of the lateral flicker.
const JITTER_AMPLITUDE: f32 = 0.001;

/// Simple pseudo-random number generator for deterministic particle placement.
pub struct FlameRng {
    state: u32,
}

impl FlameRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: seed.max(1),
        }
    }

    pub fn next(&mut self) -> f32 {
        // xorshift32
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        (self.state as f32) / (u32::MAX as f32)
    }

    pub fn next_range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next() * (max - min)
    }
}

/// CPU-side particle state for the flame point cloud.
///
/// Positions and colors are interleaved xyz/rgb triples (`3 * count` floats);
/// sizes are one scalar per particle. All three buffers are allocated once
/// and keep their length for the lifetime of the object.
#[derive(Debug)]
pub struct FlameParticles {
    positions: Vec<f32>,
    colors: Vec<f32>,
    sizes: Vec<f32>,
    count: usize,
    dirty: bool,
}

impl FlameParticles {
    /// Build the spiral flame layout.
    ///
    /// Particle `i` sits at angle `(i/N)*4PI` on a disc of random radius up
    /// to 0.5, at height `(i/N)*3 - 1.5`. Colors follow a three-segment
    /// yellow -> orange -> red -> purple gradient over the normalized index.
    pub fn new(count: usize, rng: &mut FlameRng) -> Self {
        let mut positions = vec![0.0f32; count * 3];
        let mut colors = vec![0.0f32; count * 3];
        let mut sizes = vec![0.0f32; count];

        for i in 0..count {
            let i3 = i * 3;
            let t = i as f32 / count as f32;

            let angle = t * 4.0 * PI;
            let radius = rng.next_range(0.0, 0.5);
            let height = t * 3.0 - FLAME_HALF_HEIGHT;

            positions[i3] = angle.cos() * radius;
            positions[i3 + 1] = height;
            positions[i3 + 2] = angle.sin() * radius;

            let [r, g, b] = gradient_color(t);
            colors[i3] = r;
            colors[i3 + 1] = g;
            colors[i3 + 2] = b;

            sizes[i] = rng.next_range(1.0, 4.0);
        }

        Self {
            positions,
            colors,
            sizes,
            count,
            dirty: true,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Interleaved xyz positions, length `3 * count`.
    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    /// Interleaved rgb colors, length `3 * count`.
    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    /// Per-particle size scalars, length `count`.
    pub fn sizes(&self) -> &[f32] {
        &self.sizes
    }

    /// Whether positions changed since the last [`clear_dirty`](Self::clear_dirty).
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Acknowledge an upload of the position data.
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    /// Advance the simulation by one frame.
    ///
    /// Every particle rises by a fixed step and wraps to the bottom of the
    /// flame once it passes the top. The wall-clock time in seconds drives
    /// the lateral flicker, phase-shifted per particle index.
    pub fn step(&mut self, time_secs: f64) {
        let time = time_secs as f32;
        for i in 0..self.count {
            let i3 = i * 3;

            self.positions[i3 + 1] += RISE_STEP;
            if self.positions[i3 + 1] > FLAME_HALF_HEIGHT {
                self.positions[i3 + 1] = -FLAME_HALF_HEIGHT;
            }

            let phase = time + i as f32;
            self.positions[i3] += phase.sin() * JITTER_AMPLITUDE;
            self.positions[i3 + 2] += phase.cos() * JITTER_AMPLITUDE;
        }
        self.dirty = true;
    }
}

/// Three-segment flame gradient over the normalized particle index.
pub fn gradient_color(t: f32) -> [f32; 3] {
    if t < 0.33 {
        // Yellow to orange
        [1.0, 0.8 - t, 0.0]
    } else if t < 0.66 {
        // Orange to red
        [1.0, 0.3 - (t - 0.33) * 2.0, 0.0]
    } else {
        // Red to purple
        [1.0 - (t - 0.66) * 2.0, 0.0, (t - 0.66) * 3.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particles(count: usize) -> FlameParticles {
        let mut rng = FlameRng::new(0xC0FFEE);
        FlameParticles::new(count, &mut rng)
    }

    #[test]
    fn buffer_lengths_are_fixed() {
        let mut p = particles(100);
        assert_eq!(p.positions().len(), 300);
        assert_eq!(p.colors().len(), 300);
        assert_eq!(p.sizes().len(), 100);

        for frame in 0..500 {
            p.step(frame as f64 / 60.0);
        }
        assert_eq!(p.positions().len(), 300);
        assert_eq!(p.colors().len(), 300);
        assert_eq!(p.sizes().len(), 100);
    }

    #[test]
    fn spiral_heights_span_flame_extent() {
        let p = particles(1000);
        let first = p.positions()[1];
        let last = p.positions()[999 * 3 + 1];
        assert_eq!(first, -FLAME_HALF_HEIGHT);
        assert!(last < FLAME_HALF_HEIGHT && last > 1.4);
    }

    #[test]
    fn heights_stay_in_range_and_wrap_exactly() {
        let mut p = particles(64);
        for frame in 0..2000 {
            p.step(frame as f64 / 60.0);
            for i in 0..p.count() {
                let y = p.positions()[i * 3 + 1];
                assert!(
                    (-FLAME_HALF_HEIGHT..=FLAME_HALF_HEIGHT).contains(&y),
                    "particle {} left the flame at y={}",
                    i,
                    y
                );
            }
        }
    }

    #[test]
    fn particle_above_top_resets_to_bottom() {
        let mut p = particles(4);
        // Force one particle past the top, then step once.
        p.positions[1] = FLAME_HALF_HEIGHT + 0.2;
        p.step(0.0);
        assert_eq!(p.positions()[1], -FLAME_HALF_HEIGHT);
    }

    #[test]
    fn sizes_never_change() {
        let mut p = particles(32);
        let before = p.sizes().to_vec();
        for frame in 0..100 {
            p.step(frame as f64 / 30.0);
        }
        assert_eq!(p.sizes(), &before[..]);
        for &s in p.sizes() {
            assert!((1.0..4.0).contains(&s));
        }
    }

    #[test]
    fn gradient_segments() {
        // t=0: pure yellow-orange family, red channel saturated.
        let c0 = gradient_color(0.0);
        assert_eq!(c0[0], 1.0);
        assert!(c0[1] > 0.0);
        assert_eq!(c0[2], 0.0);

        // Mid segment: orange/red, still no blue.
        let c1 = gradient_color(0.33);
        assert_eq!(c1[0], 1.0);
        assert_eq!(c1[2], 0.0);

        // Tail: purple family picks up blue.
        let c2 = gradient_color(0.67);
        assert!(c2[2] > 0.0);
        assert_eq!(c2[1], 0.0);
    }

    #[test]
    fn gradient_segmentation_for_three_particles() {
        let p = particles(3);
        // Indices 0,1,2 map to t = 0, 1/3, 2/3.
        assert_eq!(p.colors()[0], 1.0); // index 0: r = 1
        assert!(p.colors()[2 * 3 + 2] > 0.0); // index 2: nonzero blue
    }

    #[test]
    fn step_marks_positions_dirty() {
        let mut p = particles(8);
        p.clear_dirty();
        assert!(!p.is_dirty());
        p.step(0.1);
        assert!(p.is_dirty());
    }

    #[test]
    fn rng_is_deterministic() {
        let mut a = FlameRng::new(42);
        let mut b = FlameRng::new(42);
        for _ in 0..16 {
            assert_eq!(a.next().to_bits(), b.next().to_bits());
        }
    }
}
