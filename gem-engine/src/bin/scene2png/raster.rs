// raster.rs - Tiny software rasteriser for previews
//
// Linear RGB float canvas; alpha-blended triangles, additive point splats.

use glam::{Mat4, Vec3, Vec4};
use image::RgbImage;

// Points right in front of the camera would otherwise cover the frame
const MAX_SPLAT_RADIUS: f32 = 48.0;

pub struct Canvas {
    pub w: u32,
    pub h: u32,
    pub px: Vec<[f32; 3]>,
}

impl Canvas {
    pub fn new(w: u32, h: u32, bg: [f32; 3]) -> Self {
        Self { w, h, px: vec![bg; (w * h) as usize] }
    }

    #[inline]
    fn idx(&self, x: i32, y: i32) -> Option<usize> {
        if (x as u32) < self.w && (y as u32) < self.h {
            Some((y as u32 * self.w + x as u32) as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, c: [f32; 3], a: f32) {
        if let Some(i) = self.idx(x, y) {
            let p = &mut self.px[i];
            for k in 0..3 {
                p[k] = p[k] * (1.0 - a) + c[k] * a;
            }
        }
    }

    #[inline]
    pub fn add(&mut self, x: i32, y: i32, c: [f32; 3]) {
        if let Some(i) = self.idx(x, y) {
            let p = &mut self.px[i];
            for k in 0..3 {
                p[k] += c[k];
            }
        }
    }

    /// Bounding-box scan with edge functions; winding agnostic
    pub fn fill_triangle(&mut self, a: [f32; 2], b: [f32; 2], c: [f32; 2], color: [f32; 3], alpha: f32) {
        let area = edge(a, b, c);
        if area.abs() < 1e-6 {
            return;
        }

        let min_x = a[0].min(b[0]).min(c[0]).floor().max(0.0) as i32;
        let max_x = a[0].max(b[0]).max(c[0]).ceil().min(self.w as f32 - 1.0) as i32;
        let min_y = a[1].min(b[1]).min(c[1]).floor().max(0.0) as i32;
        let max_y = a[1].max(b[1]).max(c[1]).ceil().min(self.h as f32 - 1.0) as i32;

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = [x as f32 + 0.5, y as f32 + 0.5];
                let w0 = edge(b, c, p) / area;
                let w1 = edge(c, a, p) / area;
                let w2 = edge(a, b, p) / area;
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    self.blend(x, y, color, alpha);
                }
            }
        }
    }

    /// Soft sparkle disc, brightest in the middle
    pub fn splat(&mut self, cx: f32, cy: f32, diameter: f32, color: [f32; 3]) {
        let r = (diameter * 0.5).clamp(0.5, MAX_SPLAT_RADIUS);
        let (x0, x1) = ((cx - r).floor() as i32, (cx + r).ceil() as i32);
        let (y0, y1) = ((cy - r).floor() as i32, (cy + r).ceil() as i32);

        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = (x as f32 + 0.5 - cx) / (2.0 * r);
                let dy = (y as f32 + 0.5 - cy) / (2.0 * r);
                let dist = (dx * dx + dy * dy).sqrt();
                if dist > 0.5 {
                    continue;
                }
                let sparkle = (1.0 - smoothstep(0.0, 0.3, dist)).powi(2);
                let k = (1.0 + sparkle) * sparkle;
                self.add(x, y, [color[0] * k, color[1] * k, color[2] * k]);
            }
        }
    }

    /// ACES filmic curve after exposure, then 8-bit sRGB-ish gamma
    pub fn to_image(&self, exposure: f32) -> RgbImage {
        let mut img = RgbImage::new(self.w, self.h);
        for (i, p) in self.px.iter().enumerate() {
            let x = i as u32 % self.w;
            let y = i as u32 / self.w;
            let rgb = p.map(|c| {
                let v = aces(c * exposure).powf(1.0 / 2.2);
                (v.clamp(0.0, 1.0) * 255.0) as u8
            });
            img.put_pixel(x, y, image::Rgb(rgb));
        }
        img
    }
}

/// World point -> (screen x, screen y); None behind the near plane
pub fn project(view_proj: &Mat4, p: Vec3, w: u32, h: u32) -> Option<[f32; 2]> {
    let clip: Vec4 = *view_proj * p.extend(1.0);
    if clip.w <= 1e-3 {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some([(ndc.x * 0.5 + 0.5) * w as f32, (1.0 - (ndc.y * 0.5 + 0.5)) * h as f32])
}

pub fn hex_rgb(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

#[inline]
fn edge(a: [f32; 2], b: [f32; 2], p: [f32; 2]) -> f32 {
    (b[0] - a[0]) * (p[1] - a[1]) - (b[1] - a[1]) * (p[0] - a[0])
}

#[inline]
fn smoothstep(e0: f32, e1: f32, x: f32) -> f32 {
    let t = ((x - e0) / (e1 - e0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
fn aces(x: f32) -> f32 {
    let (a, b, c, d, e) = (2.51, 0.03, 2.43, 0.59, 0.14);
    ((x * (a * x + b)) / (x * (c * x + d) + e)).clamp(0.0, 1.0)
}
