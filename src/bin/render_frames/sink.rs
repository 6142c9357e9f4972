// sink.rs - Frame pacing and PNG output for the run loop

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context};
use image::{ImageBuffer, Rgba};
use kinetic_grid::render::{Canvas, Surface};
use kinetic_grid::sim::{Lifecycle, VSync};
use kinetic_grid::time::FrameClock;

const FRAME_MS: f64 = 1000.0 / 60.0;

pub struct PngSink {
    dir: PathBuf,
    limit: u64,
    every: u64,
    frame: u64,
    written: u64,
    clock: Option<FrameClock>,
    lifecycle: Lifecycle,
    // First write failure; surfaced by finish() since wait() cannot fail
    error: Option<anyhow::Error>,
}

impl PngSink {
    pub fn new(dir: PathBuf, limit: u64, every: u64, realtime: bool, lifecycle: Lifecycle) -> Self {
        Self {
            dir,
            limit,
            every: every.max(1),
            frame: 0,
            written: 0,
            clock: realtime.then(FrameClock::new),
            lifecycle,
            error: None,
        }
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn finish(&mut self) -> anyhow::Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn save(&mut self, canvas: &Canvas) -> anyhow::Result<()> {
        let (w, h) = canvas.size();
        let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_raw(w, h, canvas.pixels().to_vec())
            .ok_or_else(|| anyhow!("canvas buffer does not match {}x{}", w, h))?;

        let path = self.dir.join(format!("frame_{:05}.png", self.frame));
        img.save(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        log::debug!("wrote {}", path.display());
        self.written += 1;
        Ok(())
    }
}

impl VSync<Canvas> for PngSink {
    fn wait(&mut self, canvas: &Canvas) -> f64 {
        self.frame += 1;

        if self.frame % self.every == 0 && self.error.is_none() {
            if let Err(e) = self.save(canvas) {
                log::error!("{:#}", e);
                self.error = Some(e);
                self.lifecycle.stop();
            }
        }

        if self.frame >= self.limit {
            self.lifecycle.stop();
        }

        match &mut self.clock {
            Some(clock) => {
                let target = self.frame as f64 * FRAME_MS;
                let now = clock.elapsed_ms();
                if target > now {
                    spin_sleep::sleep(Duration::from_secs_f64((target - now) / 1000.0));
                }
                if clock.frame() % 60 == 0 {
                    log::debug!("{:.1} fps", clock.fps());
                }
                clock.tick()
            }
            None => self.frame as f64 * FRAME_MS,
        }
    }
}
