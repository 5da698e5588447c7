// scene2png - Render the hero scene to a PNG without a browser
//
// Pipeline:
//   1. Load config (optional), build the animator
//   2. Scroll a synthetic 3-viewport page to the requested progress
//   3. Tick until the camera has settled, ending at the requested time
//   4. Rasterise glow, surfaces (far to near), gem fields
//   5. Bloom, tone map, write
//
// Usage: cargo run --bin scene2png -- [--progress P] [--time T] [--width W] [--height H]
//                                     [--seed S] [--config FILE] [--out FILE]

mod bloom;
mod raster;

use std::env;

use gem_engine::anim::Animator;
use gem_engine::config::SceneConfig;
use gem_engine::error::ConfigError;
use glam::{Mat2, Vec2, Vec3};
use raster::{hex_rgb, project, Canvas};

const SETTLE_FRAMES: usize = 240;
const FRAME_MS: f64 = 1000.0 / 60.0;
const PAGE_VIEWPORTS: f64 = 3.0;

#[derive(thiserror::Error, Debug)]
enum PreviewError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

struct Args {
    progress: f32,
    time: f32,
    width: u32,
    height: u32,
    seed: Option<u32>,
    config: Option<String>,
    out: String,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().collect();
    let mut a = Args {
        progress: 0.0,
        time: 10.0,
        width: 960,
        height: 540,
        seed: None,
        config: None,
        out: "scene.png".into(),
    };

    let mut i = 1;
    while i < args.len() {
        let val = args.get(i + 1);
        match args[i].as_str() {
            "--progress" => { a.progress = val.and_then(|s| s.parse().ok()).unwrap_or(0.0); i += 2; }
            "--time" => { a.time = val.and_then(|s| s.parse().ok()).unwrap_or(10.0); i += 2; }
            "--width" => { a.width = val.and_then(|s| s.parse().ok()).unwrap_or(960); i += 2; }
            "--height" => { a.height = val.and_then(|s| s.parse().ok()).unwrap_or(540); i += 2; }
            "--seed" => { a.seed = val.and_then(|s| s.parse().ok()); i += 2; }
            "--config" => { a.config = val.cloned(); i += 2; }
            "--out" => { if let Some(v) = val { a.out = v.clone(); } i += 2; }
            other => { log::warn!("ignoring argument {}", other); i += 1; }
        }
    }

    a.progress = a.progress.clamp(0.0, 1.0);
    a.width = a.width.max(1);
    a.height = a.height.max(1);
    a
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(parse_args()) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), PreviewError> {
    let mut cfg = match &args.config {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };
    if let Some(seed) = args.seed {
        cfg.seed = seed;
    }

    log::info!(
        "rendering {}x{} at progress {:.2}, t = {:.1}s",
        args.width, args.height, args.progress, args.time
    );

    let (w, h) = (args.width as f32, args.height as f32);
    let mut anim = Animator::new(&cfg, w, h);

    let viewport = h as f64;
    let document = viewport * PAGE_VIEWPORTS;
    let scroll_y = args.progress as f64 * (document - viewport);
    anim.on_scroll(scroll_y, document, viewport);

    let end_ms = args.time as f64 * 1000.0;
    for f in 0..SETTLE_FRAMES {
        anim.tick(end_ms - (SETTLE_FRAMES - 1 - f) as f64 * FRAME_MS);
    }
    log::info!("  camera at {:?}", anim.scene().rig.camera.position);

    let mut canvas = Canvas::new(args.width, args.height, hex_rgb(cfg.render.fog_color));

    log::info!("  glow...");
    draw_glow(&mut canvas, &anim);
    log::info!("  surfaces...");
    draw_surfaces(&mut canvas, &anim);
    log::info!("  gems...");
    let drawn = draw_gems(&mut canvas, &anim);
    log::info!("    {} points on screen", drawn);

    if let Some((strength, radius, threshold)) = anim.chain().bloom() {
        log::info!("  bloom...");
        bloom::apply(&mut canvas, strength, radius, threshold);
    }

    canvas.to_image(anim.chain().exposure).save(&args.out)?;
    log::info!("wrote {}", args.out);
    Ok(())
}

/// Silver rim, brighter toward the edges, scaled by the pulse
fn draw_glow(canvas: &mut Canvas, anim: &Animator) {
    let pulse = anim.scene().glow.pulse();
    let (w, h) = (canvas.w as f32, canvas.h as f32);
    let half_diag = (w * w + h * h).sqrt() * 0.5;

    for y in 0..canvas.h {
        for x in 0..canvas.w {
            let d = Vec2::new(x as f32 - w * 0.5, y as f32 - h * 0.5).length() / half_diag;
            let intensity = (0.8 * d).powf(1.5) * 0.2 * pulse * 0.8;
            canvas.add(x as i32, y as i32, [intensity; 3]);
        }
    }
}

fn draw_surfaces(canvas: &mut Canvas, anim: &Animator) {
    let scene = anim.scene();
    let vp = scene.rig.camera.view_projection();

    // Painter's order: most negative z first
    let mut order: Vec<usize> = (0..scene.surfaces.len()).collect();
    order.sort_by(|&a, &b| {
        let (za, zb) = (scene.surfaces.layers[a].position.z, scene.surfaces.layers[b].position.z);
        za.total_cmp(&zb)
    });

    for i in order {
        let s = &scene.surfaces.layers[i];
        let color = hex_rgb(s.color);
        let screen: Vec<Option<[f32; 2]>> = s
            .vertices
            .chunks_exact(3)
            .map(|v| project(&vp, Vec3::new(v[0], v[1], v[2]) + s.position, canvas.w, canvas.h))
            .collect();

        for tri in s.indices.chunks_exact(3) {
            let (Some(a), Some(b), Some(c)) =
                (screen[tri[0] as usize], screen[tri[1] as usize], screen[tri[2] as usize])
            else {
                continue;
            };
            canvas.fill_triangle(a, b, c, color, s.opacity);
        }
    }
}

fn draw_gems(canvas: &mut Canvas, anim: &Animator) -> usize {
    let scene = anim.scene();
    let cam = &scene.rig.camera;
    let view = cam.view_matrix();
    let vp = cam.view_projection();
    let mut drawn = 0;

    for field in &scene.gems {
        let angle = field.angle();
        // GLSL mat2(c, -s, s, c) is column-major
        let rot = Mat2::from_cols_array(&[angle.cos(), -angle.sin(), angle.sin(), angle.cos()]);

        for (p, (c, size)) in field
            .positions
            .chunks_exact(3)
            .zip(field.colors.chunks_exact(3).zip(&field.sizes))
        {
            let xy = rot * Vec2::new(p[0], p[1]);
            let world = Vec3::new(xy.x, xy.y, p[2]);

            let depth = -(view.transform_point3(world).z);
            if depth <= cam.near {
                continue;
            }
            let Some(screen) = project(&vp, world, canvas.w, canvas.h) else { continue };

            canvas.splat(screen[0], screen[1], size * (400.0 / depth), [c[0], c[1], c[2]]);
            drawn += 1;
        }
    }
    drawn
}
