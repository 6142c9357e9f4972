use wasm_bindgen::prelude::*;

// ============================================================================
// KINETIC GRID - Light-reactive point field driven by a moving emitter
// ============================================================================

pub mod config;
pub mod error;
pub mod light;
pub mod render;
pub mod sim;
pub mod time;

use config::{Config, PathStyle, PhysicsMode};
use error::ConfigError;
use sim::{FrameTicket, Lifecycle, World};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("kinetic-grid loaded");
}

/// Host-facing handle. The host owns the canvas element and drives frames:
///
/// ```js
/// grid.start();
/// const loop = (t) => { if (grid.tick(t)) requestAnimationFrame(loop); };
/// requestAnimationFrame(loop);
/// ```
#[wasm_bindgen]
pub struct KineticGrid {
    world: World,
    lifecycle: Lifecycle,
    pending: Option<FrameTicket>,
}

#[wasm_bindgen]
impl KineticGrid {
    #[wasm_bindgen(constructor)]
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            world: World::new(w, h, Config::default()),
            lifecycle: Lifecycle::new(),
            pending: None,
        }
    }

    // Lifecycle

    pub fn start(&mut self) {
        self.lifecycle.start();
        // A clone may have stopped the loop since this ticket was issued
        if !self.pending.is_some_and(|t| self.lifecycle.admits(t)) {
            self.pending = self.lifecycle.schedule();
        }
    }

    pub fn stop(&mut self) {
        self.lifecycle.stop();
        self.pending = None;
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    /// Run the scheduled frame. Returns false once stopped; the host should
    /// not request another animation frame then.
    pub fn tick(&mut self, time_ms: f64) -> bool {
        let Some(ticket) = self.pending.take() else { return false };
        if !self.lifecycle.admits(ticket) {
            return false;
        }

        self.world.step_frame(time_ms);
        self.pending = self.lifecycle.schedule();
        self.pending.is_some()
    }

    pub fn resize(&mut self, w: u32, h: u32) {
        self.world.resize(w, h);
    }

    // Configuration

    pub fn set_grid_density(&mut self, density: u32) {
        self.apply(Config { grid_density: density, ..*self.world.config() });
    }

    pub fn set_falloff(&mut self, falloff: f32) {
        self.apply(Config { falloff, ..*self.world.config() });
    }

    pub fn set_attraction(&mut self, attraction: f32) {
        self.apply(Config { attraction, ..*self.world.config() });
    }

    pub fn set_emitter_speed(&mut self, emitter_speed: f32) {
        self.apply(Config { emitter_speed, ..*self.world.config() });
    }

    pub fn set_depth_effect(&mut self, depth_effect: bool) {
        self.apply(Config { depth_effect, ..*self.world.config() });
    }

    pub fn set_physics_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let physics_mode: PhysicsMode = mode.parse().map_err(js_error)?;
        self.apply(Config { physics_mode, ..*self.world.config() });
        Ok(())
    }

    pub fn set_path_style(&mut self, style: &str) -> Result<(), JsValue> {
        let path_style: PathStyle = style.parse().map_err(js_error)?;
        self.apply(Config { path_style, ..*self.world.config() });
        Ok(())
    }

    /// Replace the whole configuration; missing fields take their defaults.
    pub fn set_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let cfg = Config::from_json(json).map_err(js_error)?;
        self.apply(cfg);
        Ok(())
    }

    pub fn config_json(&self) -> Result<String, JsValue> {
        self.world.config().to_json().map_err(js_error)
    }

    // Accessors for WASM

    pub fn output_ptr(&self) -> *const u8 { self.world.surface().ptr() }
    pub fn output_len(&self) -> usize { self.world.surface().len() }
    pub fn width(&self) -> u32 { self.world.width() }
    pub fn height(&self) -> u32 { self.world.height() }
    pub fn point_count(&self) -> usize { self.world.points().len() }

    /// Copy of the RGBA frame, ready for `new ImageData(pixels, w, h)`.
    pub fn pixels(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.world.surface().pixels())
    }
}

impl KineticGrid {
    fn apply(&mut self, requested: Config) {
        let cfg = requested.clamped();
        if cfg != requested {
            log::warn!("config out of range, clamped: {:?}", requested);
        }
        let delta = self.world.reconfigure(cfg);
        if delta.rebuild_grid {
            log::info!("grid density now {}", cfg.grid_density);
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}

fn js_error(e: ConfigError) -> JsValue {
    JsValue::from_str(&e.to_string())
}
