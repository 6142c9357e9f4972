// render_frames - Run the kinetic grid headless and dump PNG frames
//
// Pipeline:
//   1. Load config (defaults, optional JSON file), clamp to UI ranges
//   2. Build world on a software canvas
//   3. Drive the explicit run loop; the sink saves every K-th frame
//   4. Sink stops the loop after N frames (N = 0 renders nothing)
//
// Usage: cargo run --bin render_frames -- [--width W] [--height H] [--frames N]
//        [--every K] [--out DIR] [--config FILE] [--realtime]

#[cfg(not(target_arch = "wasm32"))]
mod sink;

#[cfg(not(target_arch = "wasm32"))]
use std::path::PathBuf;

#[cfg(not(target_arch = "wasm32"))]
#[derive(Clone, Debug, PartialEq)]
struct Options {
    width: u32,
    height: u32,
    frames: u64,
    every: u64,
    out: PathBuf,
    config_path: Option<PathBuf>,
    realtime: bool,
}

#[cfg(not(target_arch = "wasm32"))]
impl Default for Options {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            frames: 120,
            every: 10,
            out: PathBuf::from("frames"),
            config_path: None,
            realtime: false,
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Options {
    /// Parse `--flag value` pairs; args[0] is the program name.
    fn parse(args: &[String]) -> Self {
        let d = Self::default();
        let mut o = Self::default();

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--width" => { o.width = args.get(i+1).and_then(|s| s.parse().ok()).unwrap_or(d.width); i += 2; }
                "--height" => { o.height = args.get(i+1).and_then(|s| s.parse().ok()).unwrap_or(d.height); i += 2; }
                "--frames" => { o.frames = args.get(i+1).and_then(|s| s.parse().ok()).unwrap_or(d.frames); i += 2; }
                "--every" => { o.every = args.get(i+1).and_then(|s| s.parse().ok()).unwrap_or(d.every).max(1); i += 2; }
                "--out" => { o.out = args.get(i+1).map(PathBuf::from).unwrap_or(d.out.clone()); i += 2; }
                "--config" => { o.config_path = args.get(i+1).map(PathBuf::from); i += 2; }
                "--realtime" => { o.realtime = true; i += 1; }
                other => { log::warn!("ignoring unknown argument {}", other); i += 1; }
            }
        }
        o
    }
}

/// Returns the number of frames drawn.
#[cfg(not(target_arch = "wasm32"))]
fn render(opts: &Options) -> anyhow::Result<u64> {
    use anyhow::Context;
    use kinetic_grid::config::Config;
    use kinetic_grid::sim::{run, Lifecycle, World};

    // run() always draws before its first wait
    if opts.frames == 0 {
        log::warn!("--frames 0, nothing to render");
        return Ok(0);
    }

    let config = match &opts.config_path {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    let clamped = config.clamped();
    if clamped != config {
        log::warn!("config out of range, clamped to {:?}", clamped);
    }

    std::fs::create_dir_all(&opts.out)
        .with_context(|| format!("creating output dir {}", opts.out.display()))?;

    log::info!(
        "rendering {} frames at {}x{} ({} mode, {} path), saving every {}",
        opts.frames, opts.width, opts.height, clamped.physics_mode, clamped.path_style, opts.every
    );

    let mut world = World::new(opts.width, opts.height, clamped);
    let lifecycle = Lifecycle::new();
    let mut sink = sink::PngSink::new(
        opts.out.clone(),
        opts.frames,
        opts.every,
        opts.realtime,
        lifecycle.clone(),
    );

    let drawn = run(&mut world, &lifecycle, &mut sink);
    sink.finish()?;

    log::info!("done: {} frames drawn, {} written", drawn, sink.written());
    Ok(drawn)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use flexi_logger::Logger;

    let _logger = Logger::try_with_env_or_str("info")?.start()?;

    let args: Vec<String> = std::env::args().collect();
    render(&Options::parse(&args))?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("render_frames")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    fn scratch_dir(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("kinetic-grid-{}-{}", name, std::process::id()))
    }

    #[test]
    fn test_parse_defaults_and_flags() {
        assert_eq!(Options::parse(&args(&[])), Options::default());

        let o = Options::parse(&args(&["--width", "320", "--frames", "0", "--every", "0", "--realtime"]));
        assert_eq!(o.width, 320);
        assert_eq!(o.height, 600);
        assert_eq!(o.frames, 0);
        assert_eq!(o.every, 1);
        assert!(o.realtime);
    }

    #[test]
    fn test_zero_frames_draws_nothing() {
        let out = scratch_dir("zero");
        let opts = Options { frames: 0, out: out.clone(), ..Options::default() };
        assert_eq!(render(&opts).unwrap(), 0);
        assert!(!out.exists());
    }

    #[test]
    fn test_renders_exact_frame_count() {
        let out = scratch_dir("three");
        let opts = Options {
            width: 64,
            height: 48,
            frames: 3,
            every: 1,
            out: out.clone(),
            ..Options::default()
        };
        assert_eq!(render(&opts).unwrap(), 3);
        assert!(out.join("frame_00003.png").exists());
        assert!(!out.join("frame_00004.png").exists());
        std::fs::remove_dir_all(&out).unwrap();
    }
}
