// bloom.rs - Threshold + blur + add
//
// Approximates the site's bloom pass with the same strength, radius and threshold.

use super::raster::Canvas;

pub fn apply(canvas: &mut Canvas, strength: f32, radius: f32, threshold: f32) {
    let (w, h) = (canvas.w as usize, canvas.h as usize);
    if w == 0 || h == 0 || strength <= 0.0 {
        return;
    }

    // Bright pass
    let mut bright: Vec<[f32; 3]> = canvas
        .px
        .iter()
        .map(|p| {
            let luma = 0.2126 * p[0] + 0.7152 * p[1] + 0.0722 * p[2];
            if luma > threshold { *p } else { [0.0; 3] }
        })
        .collect();

    // Blur radius in pixels scales with the short side
    let r = ((radius * w.min(h) as f32 * 0.05).round() as usize).max(1);
    box_blur(&mut bright, w, h, r, true);
    box_blur(&mut bright, w, h, r, false);

    for (p, b) in canvas.px.iter_mut().zip(&bright) {
        for k in 0..3 {
            p[k] += b[k] * strength;
        }
    }
}

fn box_blur(buf: &mut [[f32; 3]], w: usize, h: usize, r: usize, horizontal: bool) {
    let (lines, len) = if horizontal { (h, w) } else { (w, h) };
    let at = |line: usize, i: usize| if horizontal { line * w + i } else { i * w + line };
    let mut tmp = vec![[0.0f32; 3]; len];

    for line in 0..lines {
        for i in 0..len {
            let lo = i.saturating_sub(r);
            let hi = (i + r).min(len - 1);
            let mut acc = [0.0f32; 3];
            for j in lo..=hi {
                let p = buf[at(line, j)];
                for k in 0..3 {
                    acc[k] += p[k];
                }
            }
            let n = (hi - lo + 1) as f32;
            tmp[i] = acc.map(|v| v / n);
        }
        for i in 0..len {
            buf[at(line, i)] = tmp[i];
        }
    }
}
