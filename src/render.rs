// render.rs - Draw instructions and the software rasterizer
//
// Output format (for canvas blitting):
//   RGBA8, row-major, w * h * 4 bytes, alpha always 255.
//   The host wraps it in an ImageData and calls putImageData.

use crate::light::Rgb;

/// One filled circle, produced per point per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dot {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub color: Rgb,
}

/// Immediate-mode 2D target.
pub trait Surface {
    fn size(&self) -> (u32, u32);

    fn resize(&mut self, w: u32, h: u32);

    fn clear(&mut self, color: Rgb);

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb);

    /// Circle with a soft halo `blur` pixels wide. Targets without a glow
    /// effect draw the plain circle.
    fn glow_circle(&mut self, x: f32, y: f32, radius: f32, _blur: f32, color: Rgb) {
        self.fill_circle(x, y, radius, color);
    }

    fn draw_dot(&mut self, dot: &Dot) {
        self.fill_circle(dot.x, dot.y, dot.radius, dot.color);
    }
}

// Computed in usize so large surfaces cannot overflow u32
fn buffer_len(w: u32, h: u32) -> usize {
    w as usize * h as usize * 4
}

pub struct Canvas {
    out: Vec<u8>,
    w: u32,
    h: u32,
}

impl Canvas {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            out: vec![0; buffer_len(w, h)],
            w,
            h,
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.out
    }

    pub fn ptr(&self) -> *const u8 {
        self.out.as_ptr()
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.w || y >= self.h { return None; }
        let i = (y as usize * self.w as usize + x as usize) * 4;
        Some(Rgb::new(self.out[i], self.out[i + 1], self.out[i + 2]))
    }

    /// Pixel rectangle covering a circle, clipped to the buffer.
    fn bounds(&self, x: f32, y: f32, reach: f32) -> Option<(u32, u32, u32, u32)> {
        let x0 = (x - reach).floor().max(0.0);
        let y0 = (y - reach).floor().max(0.0);
        let x1 = (x + reach).ceil().min(self.w as f32 - 1.0);
        let y1 = (y + reach).ceil().min(self.h as f32 - 1.0);
        if !(x0 <= x1 && y0 <= y1) { return None; }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }

    #[inline]
    fn blend(&mut self, px: u32, py: u32, color: Rgb, alpha: f32) {
        let i = (py as usize * self.w as usize + px as usize) * 4;
        let a = alpha.clamp(0.0, 1.0);
        for (c, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let dst = self.out[i + c] as f32;
            self.out[i + c] = (dst + (src as f32 - dst) * a).round() as u8;
        }
        self.out[i + 3] = 255;
    }

    #[inline]
    fn add(&mut self, px: u32, py: u32, color: Rgb, amount: f32) {
        let i = (py as usize * self.w as usize + px as usize) * 4;
        for (c, src) in [color.r, color.g, color.b].into_iter().enumerate() {
            let v = self.out[i + c] as f32 + src as f32 * amount;
            self.out[i + c] = v.min(255.0) as u8;
        }
        self.out[i + 3] = 255;
    }
}

impl Surface for Canvas {
    fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
        self.out.resize(buffer_len(w, h), 0);
    }

    fn clear(&mut self, color: Rgb) {
        let px = color.to_rgba();
        for chunk in self.out.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    // One-pixel coverage ramp at the edge; sampled at pixel centres.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb) {
        if radius <= 0.0 || !x.is_finite() || !y.is_finite() { return; }
        let Some((x0, y0, x1, y1)) = self.bounds(x, y, radius + 1.0) else { return };

        for py in y0..=y1 {
            for px in x0..=x1 {
                let dx = px as f32 + 0.5 - x;
                let dy = py as f32 + 0.5 - y;
                let d = (dx * dx + dy * dy).sqrt();
                let coverage = radius + 0.5 - d;
                if coverage > 0.0 {
                    self.blend(px, py, color, coverage);
                }
            }
        }
    }

    // Additive quadratic halo from the rim out to radius + blur, then the
    // solid disc on top.
    fn glow_circle(&mut self, x: f32, y: f32, radius: f32, blur: f32, color: Rgb) {
        if blur > 0.0 && x.is_finite() && y.is_finite() {
            if let Some((x0, y0, x1, y1)) = self.bounds(x, y, radius + blur) {
                for py in y0..=y1 {
                    for px in x0..=x1 {
                        let dx = px as f32 + 0.5 - x;
                        let dy = py as f32 + 0.5 - y;
                        let d = (dx * dx + dy * dy).sqrt();
                        let t = 1.0 - ((d - radius) / blur).clamp(0.0, 1.0);
                        if t > 0.0 {
                            self.add(px, py, color, t * t * 0.5);
                        }
                    }
                }
            }
        }
        self.fill_circle(x, y, radius, color);
    }
}

/// Records draw calls instead of rasterizing them.
#[derive(Debug, Default)]
pub struct DrawList {
    pub w: u32,
    pub h: u32,
    pub background: Option<Rgb>,
    pub dots: Vec<Dot>,
    pub glows: Vec<(Dot, f32)>,
}

impl DrawList {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h, ..Self::default() }
    }
}

impl Surface for DrawList {
    fn size(&self) -> (u32, u32) {
        (self.w, self.h)
    }

    fn resize(&mut self, w: u32, h: u32) {
        self.w = w;
        self.h = h;
    }

    fn clear(&mut self, color: Rgb) {
        self.background = Some(color);
        self.dots.clear();
        self.glows.clear();
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb) {
        self.dots.push(Dot { x, y, radius, color });
    }

    fn glow_circle(&mut self, x: f32, y: f32, radius: f32, blur: f32, color: Rgb) {
        self.glows.push((Dot { x, y, radius, color }, blur));
    }
}
