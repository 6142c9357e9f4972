//! Frame timing.
//!
//! `FrameClock` is the single source of the `time_ms` value threaded into
//! each frame. `web_time::Instant` maps to `performance.now()` on wasm and to
//! `std::time::Instant` natively.

use std::time::Duration;

use web_time::Instant;

#[derive(Debug)]
pub struct FrameClock {
    start: Instant,
    frame_count: u64,
    fps: f32,
    fps_frame_count: u64,
    fps_update_time: Instant,
    fps_update_interval: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            frame_count: 0,
            fps: 0.0,
            fps_frame_count: 0,
            fps_update_time: now,
            fps_update_interval: Duration::from_millis(500),
        }
    }

    /// Milliseconds since the clock was created.
    #[inline]
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }

    /// Mark a new frame and return its timestamp in milliseconds.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        self.frame_count += 1;

        let since = now.duration_since(self.fps_update_time);
        if since >= self.fps_update_interval {
            let frames = self.frame_count - self.fps_frame_count;
            self.fps = frames as f32 / since.as_secs_f32();
            self.fps_frame_count = self.frame_count;
            self.fps_update_time = now;
        }

        now.duration_since(self.start).as_secs_f64() * 1000.0
    }

    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame_count
    }

    /// Frames per second, refreshed every 500ms.
    #[inline]
    pub fn fps(&self) -> f32 {
        self.fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
