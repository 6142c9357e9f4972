// sim/ - Kinetic grid simulation
//
// Points are stored as Structure-of-Arrays.
// World owns all per-frame state and is the only writer.

mod emitter;
mod lifecycle;
mod point;

pub use emitter::{ease_in_out_cubic, EmitterPath};
pub use lifecycle::{run, FrameTicket, Lifecycle, LoopState, VSync};
pub use point::{depth_for, shade_point, update_point, Forces, Points};

use crate::config::{Config, ConfigDelta};
use crate::light::{Rgb, BACKGROUND};
use crate::render::{Canvas, Surface};

// Emitter glyph
pub const EMITTER_RADIUS: f32 = 6.0;
pub const EMITTER_GLOW: f32 = 30.0;
pub const EMITTER_COLOR: Rgb = Rgb::new(0x39, 0xFF, 0x14);

/// Kinetic grid world
pub struct World<S: Surface = Canvas> {
    // Screen dimensions
    w: u32,
    h: u32,

    config: Config,

    // Entities
    points: Points,
    emitter: EmitterPath,
    emitter_pos: (f32, f32),

    // Output
    surface: S,
}

impl World<Canvas> {
    pub fn new(w: u32, h: u32, config: Config) -> Self {
        Self::with_surface(Canvas::new(w, h), config)
    }
}

impl<S: Surface> World<S> {
    /// Build a world sized to an existing surface.
    pub fn with_surface(surface: S, config: Config) -> Self {
        let (w, h) = surface.size();
        let emitter = EmitterPath::new(w, h, config.path_style);
        let emitter_pos = emitter.position();
        log::debug!(
            "building {}x{} grid on {}x{} surface",
            config.grid_density, config.grid_density, w, h
        );

        Self {
            w,
            h,
            config,
            points: Points::build(config.grid_density, w, h),
            emitter,
            emitter_pos,
            surface,
        }
    }

    /// New surface dimensions: fresh layout, no carry-over of old positions.
    pub fn resize(&mut self, w: u32, h: u32) {
        if (w, h) == (self.w, self.h) { return; }
        log::info!("resize {}x{} -> {}x{}", self.w, self.h, w, h);

        self.w = w;
        self.h = h;
        self.surface.resize(w, h);
        self.emitter.set_layout(w, h);
        self.rebuild();
    }

    /// Apply a new configuration, rebuilding only when the grid layout changes.
    pub fn reconfigure(&mut self, next: Config) -> ConfigDelta {
        let delta = self.config.diff(&next);
        self.config = next;

        if delta.path_changed {
            self.emitter.set_style(next.path_style);
        }
        if delta.rebuild_grid {
            self.rebuild();
        }
        delta
    }

    // Replaces the whole point set in one assignment
    fn rebuild(&mut self) {
        let density = self.config.grid_density;
        log::debug!("rebuilding {}x{} grid", density, density);
        self.points = Points::build(density, self.w, self.h);
    }

    /// One frame: clear, advance emitter, step points, draw emitter.
    pub fn step_frame(&mut self, time_ms: f64) {
        self.surface.clear(BACKGROUND);

        self.emitter.advance(self.config.emitter_speed);
        self.emitter_pos = self.emitter.position();

        self.step_points(self.emitter_pos, time_ms);

        let (ex, ey) = self.emitter_pos;
        self.surface
            .glow_circle(ex, ey, EMITTER_RADIUS, EMITTER_GLOW, EMITTER_COLOR);
    }

    /// Update then draw every point against a given emitter position.
    pub fn step_points(&mut self, emitter: (f32, f32), time_ms: f64) {
        let cfg = &self.config;
        let forces = Forces {
            emitter,
            attraction: cfg.attraction,
            falloff: cfg.falloff,
            mode: cfg.physics_mode,
            use_depth: cfg.depth_effect,
            time_ms,
        };

        for i in 0..self.points.len() {
            update_point(&mut self.points, i, &forces);
            let dot = shade_point(&self.points, i, emitter, forces.falloff, forces.use_depth);
            self.surface.draw_dot(&dot);
        }
    }

    // Accessors
    pub fn config(&self) -> &Config { &self.config }
    pub fn points(&self) -> &Points { &self.points }
    pub fn points_mut(&mut self) -> &mut Points { &mut self.points }
    pub fn emitter(&self) -> &EmitterPath { &self.emitter }
    pub fn emitter_position(&self) -> (f32, f32) { self.emitter_pos }
    pub fn surface(&self) -> &S { &self.surface }
    pub fn surface_mut(&mut self) -> &mut S { &mut self.surface }
    pub fn width(&self) -> u32 { self.w }
    pub fn height(&self) -> u32 { self.h }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PathStyle;
    use crate::render::DrawList;

    fn world(density: u32) -> World<DrawList> {
        let cfg = Config { grid_density: density, ..Config::default() };
        World::with_surface(DrawList::new(200, 100), cfg)
    }

    #[test]
    fn test_frame_draws_every_point_then_emitter() {
        let mut w = world(20);
        w.step_frame(0.0);

        let list = w.surface();
        assert_eq!(list.background, Some(BACKGROUND));
        assert_eq!(list.dots.len(), 400);
        assert_eq!(list.glows.len(), 1);

        let (glyph, blur) = list.glows[0];
        assert_eq!((glyph.x, glyph.y), w.emitter_position());
        assert_eq!(glyph.radius, EMITTER_RADIUS);
        assert_eq!(glyph.color, EMITTER_COLOR);
        assert_eq!(blur, EMITTER_GLOW);
    }

    #[test]
    fn test_frame_advances_emitter_first() {
        let mut w = world(20);
        let before = w.emitter().angle();
        w.step_frame(0.0);
        let after = w.emitter().angle();
        assert!((after - before - f64::from(w.config().emitter_speed)).abs() < 1e-9);
        assert_eq!(w.emitter_position(), w.emitter().circle_position());
    }

    #[test]
    fn test_dots_reflect_updated_positions() {
        let mut w = world(20);
        w.step_frame(0.0);
        let p = w.points();
        for (i, dot) in w.surface().dots.iter().enumerate() {
            assert_eq!((dot.x, dot.y), (p.x[i], p.y[i]));
        }
    }

    #[test]
    fn test_reconfigure_without_density_keeps_points() {
        let mut w = world(20);
        for _ in 0..5 {
            w.step_frame(0.0);
        }
        let moved = w.points().x.clone();

        let cfg = Config { falloff: 300.0, emitter_speed: 0.03, ..*w.config() };
        let delta = w.reconfigure(cfg);
        assert!(delta.changed && !delta.rebuild_grid);
        assert_eq!(w.points().x, moved);
    }

    #[test]
    fn test_reconfigure_density_rebuilds() {
        let mut w = world(20);
        w.step_frame(0.0);

        let cfg = Config { grid_density: 30, ..*w.config() };
        assert!(w.reconfigure(cfg).rebuild_grid);
        assert_eq!(w.points().len(), 900);
        assert!(w.points().vx.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_path_switch_keeps_angle() {
        let mut w = world(20);
        w.step_frame(0.0);
        let angle = w.emitter().angle();

        let cfg = Config { path_style: PathStyle::Triangle, ..*w.config() };
        w.reconfigure(cfg);
        assert_eq!(w.emitter().angle(), angle);
        assert_eq!(w.emitter().style(), PathStyle::Triangle);

        w.step_frame(0.0);
        assert_eq!(w.emitter_position(), w.emitter().triangle_position());
    }

    #[test]
    fn test_resize_relayouts_everything() {
        let mut w = world(20);
        w.step_frame(0.0);
        w.resize(400, 400);

        assert_eq!(w.surface().size(), (400, 400));
        assert_eq!(w.emitter().orbit_radius(), 100.0);
        assert_eq!(w.emitter().center(), (200.0, 200.0));
        let fresh = Points::build(20, 400, 400);
        assert_eq!(w.points().base_x, fresh.base_x);
        assert_eq!(w.points().base_y, fresh.base_y);
        assert_eq!(w.points().x, fresh.x);
    }
}
