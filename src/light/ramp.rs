// ramp.rs - Grey -> purple -> neon green colour ramp

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

pub const UNLIT: Rgb = Rgb::new(80, 80, 80);
pub const PURPLE: Rgb = Rgb::new(138, 43, 226);
pub const NEON_GREEN: Rgb = Rgb::new(57, 255, 20);
pub const BACKGROUND: Rgb = Rgb::new(20, 20, 25);

/// Two-segment ramp over `level` in [0, 1].
/// 0.5 belongs to the lower segment; both segments meet at PURPLE.
pub fn gradient(level: f32) -> Rgb {
    if level > 0.5 {
        lerp_rgb(PURPLE, NEON_GREEN, (level - 0.5) * 2.0)
    } else {
        lerp_rgb(UNLIT, PURPLE, level * 2.0)
    }
}

#[inline]
fn lerp_rgb(a: Rgb, b: Rgb, t: f32) -> Rgb {
    Rgb::new(channel(a.r, b.r, t), channel(a.g, b.g, t), channel(a.b, b.b, t))
}

// floor(start + (end - start) * t), floored toward -inf like the UI does
#[inline]
fn channel(start: u8, end: u8, t: f32) -> u8 {
    let (s, e) = (start as f32, end as f32);
    (s + (e - s) * t).floor().clamp(0.0, 255.0) as u8
}
