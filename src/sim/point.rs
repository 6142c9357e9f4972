// point.rs - Grid points
//
// Structure-of-Arrays layout for cache-friendly iteration.
// Points never read each other's state.

use std::f32::consts::TAU;

use crate::config::PhysicsMode;
use crate::light::{depth_scale, illuminate};
use crate::render::Dot;

// Physics constants
const SPRING: f32 = 0.1;
const DAMPING: f32 = 0.85;
const WAVE_RATE: f64 = 0.003; // radians per millisecond

// Depth layers
const DEPTH_MIN: f32 = 0.3;
const DEPTH_SPAN: f32 = 0.7;

#[derive(Clone, Debug, Default)]
pub struct Points {
    // Anchor
    pub base_x: Vec<f32>,
    pub base_y: Vec<f32>,

    // Position
    pub x: Vec<f32>,
    pub y: Vec<f32>,

    // Velocity
    pub vx: Vec<f32>,
    pub vy: Vec<f32>,

    // Depth layer in [0.3, 1.0], fixed at build time
    pub depth: Vec<f32>,
}

impl Points {
    /// Lay out `density²` points centred on a `w` x `h` surface, row-major.
    pub fn build(density: u32, w: u32, h: u32) -> Self {
        let n = (density * density) as usize;
        let mut points = Self::with_capacity(n);
        if n == 0 { return points; }

        let (w, h) = (w as f32, h as f32);
        let spacing = w.min(h) / (density + 1) as f32;
        let span = (density - 1) as f32 * spacing;
        let offset_x = (w - span) / 2.0;
        let offset_y = (h - span) / 2.0;

        let mut index = 0;
        for row in 0..density {
            for col in 0..density {
                let x = offset_x + col as f32 * spacing;
                let y = offset_y + row as f32 * spacing;
                points.push(x, y, depth_for(index, n));
                index += 1;
            }
        }

        points
    }

    fn with_capacity(n: usize) -> Self {
        Self {
            base_x: Vec::with_capacity(n),
            base_y: Vec::with_capacity(n),
            x: Vec::with_capacity(n),
            y: Vec::with_capacity(n),
            vx: Vec::with_capacity(n),
            vy: Vec::with_capacity(n),
            depth: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, x: f32, y: f32, depth: f32) {
        self.base_x.push(x);
        self.base_y.push(y);
        self.x.push(x);
        self.y.push(y);
        self.vx.push(0.0);
        self.vy.push(0.0);
        self.depth.push(depth);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Distance from point `i` to its anchor.
    pub fn displacement(&self, i: usize) -> f32 {
        let dx = self.x[i] - self.base_x[i];
        let dy = self.y[i] - self.base_y[i];
        (dx * dx + dy * dy).sqrt()
    }
}

/// Per-frame force inputs shared by every point.
#[derive(Clone, Copy, Debug)]
pub struct Forces {
    pub emitter: (f32, f32),
    pub attraction: f32,
    pub falloff: f32,
    pub mode: PhysicsMode,
    pub use_depth: bool,
    pub time_ms: f64,
}

#[inline]
pub fn depth_for(index: usize, total: usize) -> f32 {
    DEPTH_MIN + (index as f32 / total as f32) * DEPTH_SPAN
}

/// Apply emitter force, spring-back and damping to point `i`, then step it.
pub fn update_point(p: &mut Points, i: usize, f: &Forces) {
    let dx = f.emitter.0 - p.x[i];
    let dy = f.emitter.1 - p.y[i];
    let dist = (dx * dx + dy * dy).sqrt();

    let scale = depth_scale(p.depth[i], f.use_depth);

    // Zero distance would divide by zero; beyond falloff there is no influence
    if dist > 0.0 && dist < f.falloff {
        let magnitude = f.attraction * (1.0 - dist / f.falloff) * scale;
        let (ux, uy) = (dx / dist, dy / dist);

        let (fx, fy) = match f.mode {
            PhysicsMode::Attract => (ux, uy),
            PhysicsMode::Repel => (-ux, -uy),
            PhysicsMode::Orbit => (-uy, ux),
            PhysicsMode::Wave => {
                let phase = (dist / f.falloff) * TAU;
                let wave = (phase as f64 - f.time_ms * WAVE_RATE).sin() as f32;
                (ux * wave, uy * wave)
            }
        };

        p.vx[i] += fx * magnitude;
        p.vy[i] += fy * magnitude;
    }

    // Spring back to anchor
    p.vx[i] += (p.base_x[i] - p.x[i]) * SPRING;
    p.vy[i] += (p.base_y[i] - p.y[i]) * SPRING;

    p.vx[i] *= DAMPING;
    p.vy[i] *= DAMPING;

    p.x[i] += p.vx[i];
    p.y[i] += p.vy[i];
}

/// Draw instruction for point `i` at its current position.
pub fn shade_point(p: &Points, i: usize, emitter: (f32, f32), falloff: f32, use_depth: bool) -> Dot {
    let dx = emitter.0 - p.x[i];
    let dy = emitter.1 - p.y[i];
    let dist = (dx * dx + dy * dy).sqrt();
    let (radius, color) = illuminate(dist, falloff, p.depth[i], use_depth);

    Dot { x: p.x[i], y: p.y[i], radius, color }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{NEON_GREEN, UNLIT};

    fn forces(emitter: (f32, f32), mode: PhysicsMode) -> Forces {
        Forces {
            emitter,
            attraction: 0.2,
            falloff: 100.0,
            mode,
            use_depth: false,
            time_ms: 0.0,
        }
    }

    fn single_at(x: f32, y: f32) -> Points {
        let mut p = Points::default();
        p.push(x, y, 1.0);
        p
    }

    #[test]
    fn test_build_counts_and_centres() {
        let p = Points::build(3, 200, 100);
        assert_eq!(p.len(), 9);

        // spacing = 100 / 4 = 25, lattice spans 50px centred on (100, 50)
        assert_eq!(p.base_x[0], 75.0);
        assert_eq!(p.base_y[0], 25.0);
        assert_eq!(p.base_x[8], 125.0);
        assert_eq!(p.base_y[8], 75.0);

        // row-major: index 1 is the next column on the same row
        assert_eq!(p.base_y[1], p.base_y[0]);
        assert!(p.base_x[1] > p.base_x[0]);
    }

    #[test]
    fn test_build_empty() {
        let p = Points::build(0, 100, 100);
        assert!(p.is_empty());
    }

    #[test]
    fn test_depth_monotonic_in_range() {
        let p = Points::build(20, 300, 300);
        assert!(p.depth.windows(2).all(|w| w[0] <= w[1]));
        assert!(p.depth.iter().all(|&d| (0.3..=1.0).contains(&d)));
        assert_eq!(p.depth[0], 0.3);
    }

    #[test]
    fn test_single_point_depth() {
        let p = Points::build(1, 50, 80);
        assert_eq!(p.len(), 1);
        assert_eq!(p.depth[0], 0.3);
        assert_eq!((p.base_x[0], p.base_y[0]), (25.0, 40.0));
    }

    #[test]
    fn test_attract_and_repel_are_opposite() {
        let mut a = single_at(0.0, 0.0);
        let mut r = single_at(0.0, 0.0);
        update_point(&mut a, 0, &forces((10.0, 0.0), PhysicsMode::Attract));
        update_point(&mut r, 0, &forces((10.0, 0.0), PhysicsMode::Repel));

        assert!(a.vx[0] > 0.0);
        assert!(r.vx[0] < 0.0);
        assert!((a.vx[0] + r.vx[0]).abs() < 1e-6);
        assert_eq!(a.vy[0], 0.0);
    }

    #[test]
    fn test_orbit_is_tangential() {
        let mut p = single_at(0.0, 0.0);
        update_point(&mut p, 0, &forces((10.0, 0.0), PhysicsMode::Orbit));
        // emitter along +x, push is rotated 90° to +y
        assert!(p.vx[0].abs() < 1e-6);
        assert!(p.vy[0] > 0.0);
    }

    #[test]
    fn test_wave_follows_time() {
        // phase = 0.25 * TAU = PI/2; sin(PI/2 - t*0.003)
        let mut crest = single_at(0.0, 0.0);
        let mut f = forces((25.0, 0.0), PhysicsMode::Wave);
        update_point(&mut crest, 0, &f);
        assert!(crest.vx[0] > 0.0);

        let mut trough = single_at(0.0, 0.0);
        f.time_ms = std::f64::consts::PI / 0.003;
        update_point(&mut trough, 0, &f);
        assert!(trough.vx[0] < 0.0);
    }

    #[test]
    fn test_no_force_at_zero_distance() {
        let mut p = single_at(5.0, 5.0);
        update_point(&mut p, 0, &forces((5.0, 5.0), PhysicsMode::Attract));
        assert_eq!((p.vx[0], p.vy[0]), (0.0, 0.0));
        assert_eq!((p.x[0], p.y[0]), (5.0, 5.0));
    }

    #[test]
    fn test_no_force_beyond_falloff() {
        let mut p = single_at(0.0, 0.0);
        update_point(&mut p, 0, &forces((100.0, 0.0), PhysicsMode::Attract));
        assert_eq!(p.vx[0], 0.0);
    }

    #[test]
    fn test_spring_damping_step() {
        let mut p = single_at(0.0, 0.0);
        p.x[0] = 10.0;
        update_point(&mut p, 0, &forces((1000.0, 0.0), PhysicsMode::Attract));
        // v = (0 + (0 - 10) * 0.1) * 0.85 = -0.85
        assert!((p.vx[0] + 0.85).abs() < 1e-6);
        assert!((p.x[0] - 9.15).abs() < 1e-5);
    }

    #[test]
    fn test_depth_scales_force() {
        let mut shallow = single_at(0.0, 0.0);
        shallow.depth[0] = 0.3;
        let mut f = forces((10.0, 0.0), PhysicsMode::Attract);
        f.use_depth = true;
        update_point(&mut shallow, 0, &f);

        let mut flat = single_at(0.0, 0.0);
        flat.depth[0] = 0.3;
        f.use_depth = false;
        update_point(&mut flat, 0, &f);

        assert!((shallow.vx[0] - flat.vx[0] * 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_shade_uses_current_position() {
        let mut p = single_at(0.0, 0.0);
        p.x[0] = 40.0;
        let dot = shade_point(&p, 0, (40.0, 0.0), 100.0, false);
        assert_eq!((dot.x, dot.y), (40.0, 0.0));
        assert_eq!(dot.color, NEON_GREEN);
        assert_eq!(dot.radius, 4.0);

        let dark = shade_point(&p, 0, (400.0, 0.0), 100.0, false);
        assert_eq!(dark.color, UNLIT);
        assert_eq!(dark.radius, 2.0);
    }
}
