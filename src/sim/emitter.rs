// emitter.rs - Moving light source
//
// One angle accumulator feeds both trajectories, so switching the path
// style never resets the motion. The accumulator is f64 and never wraps;
// positions come out as f32.

use std::f32::consts::FRAC_PI_6;
use std::f64::consts::{FRAC_PI_2, TAU};

use crate::config::PathStyle;

const ORBIT_FRACTION: f32 = 0.25;
const TRIANGLE_SCALE: f32 = 1.5;

pub struct EmitterPath {
    angle: f64,
    style: PathStyle,
    center: (f32, f32),
    orbit_radius: f32,
}

impl EmitterPath {
    /// Starts at the top of the circle (angle -π/2).
    pub fn new(w: u32, h: u32, style: PathStyle) -> Self {
        let mut path = Self {
            angle: -FRAC_PI_2,
            style,
            center: (0.0, 0.0),
            orbit_radius: 0.0,
        };
        path.set_layout(w, h);
        path
    }

    /// Recompute centre and orbit radius for a new surface size.
    pub fn set_layout(&mut self, w: u32, h: u32) {
        let (w, h) = (w as f32, h as f32);
        self.center = (w / 2.0, h / 2.0);
        self.orbit_radius = w.min(h) * ORBIT_FRACTION;
    }

    #[inline]
    pub fn advance(&mut self, delta: f32) {
        self.angle += f64::from(delta);
    }

    pub fn set_style(&mut self, style: PathStyle) {
        self.style = style;
    }

    pub fn style(&self) -> PathStyle {
        self.style
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn center(&self) -> (f32, f32) {
        self.center
    }

    /// Emitter position for the current style and angle.
    pub fn position(&self) -> (f32, f32) {
        match self.style {
            PathStyle::Circle => self.circle_position(),
            PathStyle::Triangle => self.triangle_position(),
        }
    }

    pub fn circle_position(&self) -> (f32, f32) {
        let (cx, cy) = self.center;
        let (sin, cos) = self.angle.sin_cos();
        let r = f64::from(self.orbit_radius);
        (
            (f64::from(cx) + cos * r) as f32,
            (f64::from(cy) + sin * r) as f32,
        )
    }

    pub fn triangle_position(&self) -> (f32, f32) {
        // Euclidean remainder keeps negative angles in [0, 1)
        let progress = (self.angle / TAU).rem_euclid(1.0) as f32;
        self.triangle_point(progress)
    }

    /// Top, bottom-right, bottom-left.
    pub fn triangle_vertices(&self) -> [(f32, f32); 3] {
        let (cx, cy) = self.center;
        let size = self.orbit_radius * TRIANGLE_SCALE;
        let (sin30, cos30) = FRAC_PI_6.sin_cos();
        [
            (cx, cy - size),
            (cx + size * cos30, cy + size * sin30),
            (cx - size * cos30, cy + size * sin30),
        ]
    }

    /// Point on the triangle at `progress` in [0, 1). Each edge takes a
    /// third of a turn and is eased so the emitter slows into the corners.
    pub fn triangle_point(&self, progress: f32) -> (f32, f32) {
        let vertices = self.triangle_vertices();
        let scaled = progress * 3.0;
        // progress just under 1.0 can round up to 3.0
        let segment = (scaled.floor().max(0.0) as usize).min(2);
        let t = ease_in_out_cubic((scaled - segment as f32).clamp(0.0, 1.0));

        let (ax, ay) = vertices[segment];
        let (bx, by) = vertices[(segment + 1) % 3];
        (ax + (bx - ax) * t, ay + (by - ay) * t)
    }
}

#[inline]
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}
