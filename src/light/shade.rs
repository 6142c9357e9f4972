// shade.rs - Distance/depth to size and brightness

use super::{gradient, Rgb};

/// Depth modulation factor; 1.0 when the depth effect is off.
#[inline(always)]
pub fn depth_scale(depth: f32, use_depth: bool) -> f32 {
    if use_depth { depth } else { 1.0 }
}

/// Illumination from the emitter, (1 - d/falloff)^1.5 inside the radius.
#[inline]
pub fn brightness(dist: f32, falloff: f32) -> f32 {
    if dist < falloff {
        (1.0 - dist / falloff).clamp(0.0, 1.0).powf(1.5)
    } else {
        0.0
    }
}

/// Dot radius in pixels, roughly [1, 4].
#[inline]
pub fn dot_size(brightness: f32, depth_scale: f32) -> f32 {
    (2.0 + brightness * 2.0) * (0.5 + depth_scale * 0.5)
}

#[inline]
pub fn depth_brightness(brightness: f32, depth_scale: f32) -> f32 {
    brightness * (0.4 + depth_scale * 0.6)
}

/// Radius and colour for a point `dist` pixels from the emitter.
pub fn illuminate(dist: f32, falloff: f32, depth: f32, use_depth: bool) -> (f32, Rgb) {
    let b = brightness(dist, falloff);
    let ds = depth_scale(depth, use_depth);
    (dot_size(b, ds), gradient(depth_brightness(b, ds)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::light::{NEON_GREEN, UNLIT};

    #[test]
    fn test_brightness_bounds() {
        assert_eq!(brightness(0.0, 100.0), 1.0);
        assert_eq!(brightness(100.0, 100.0), 0.0);
        assert_eq!(brightness(250.0, 100.0), 0.0);
        // (1 - 0.75)^1.5 = 0.125
        assert!((brightness(75.0, 100.0) - 0.125).abs() < 1e-6);
    }

    #[test]
    fn test_size_range() {
        assert_eq!(dot_size(0.0, 1.0), 2.0);
        assert_eq!(dot_size(1.0, 1.0), 4.0);
        assert!((dot_size(0.0, 0.3) - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_illuminate_at_emitter() {
        let (size, color) = illuminate(0.0, 150.0, 0.65, false);
        assert_eq!(size, 4.0);
        assert_eq!(color, NEON_GREEN);

        let (size, color) = illuminate(400.0, 150.0, 0.65, true);
        assert!((size - 2.0 * 0.825).abs() < 1e-6);
        assert_eq!(color, UNLIT);
    }

    #[test]
    fn test_depth_dims_near_points() {
        let (_, shallow) = illuminate(10.0, 150.0, 0.3, true);
        let (_, deep) = illuminate(10.0, 150.0, 1.0, true);
        // deeper layers reach further up the ramp toward green
        assert!(deep.g > shallow.g);
    }
}
