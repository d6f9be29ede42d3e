mod render;

use glam::Vec2;
use winit::{event::*, event_loop::EventLoop, window::WindowBuilder};

use scene_core::{DeviceProfile, DeviceTier, FrameClock, SceneDirector, LOW_POWER_CORES};

// Line-delta scroll events approximate this many pixels per line.
const SCROLL_LINE_PX: f32 = 40.0;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .init();

    let seed = env_u64("SCENE_SEED").unwrap_or(42);
    let reduced_motion = env_flag("SCENE_REDUCED_MOTION");
    let hero = std::env::var("SCENE_PRESET").map(|v| v == "hero").unwrap_or(false);
    let tier_override: Option<DeviceTier> = match std::env::var("SCENE_TIER") {
        Ok(s) => Some(s.parse()?),
        Err(_) => None,
    };

    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Ambient background (native)")
        .build(&event_loop)?;

    let size = window.inner_size();
    let scale_factor = window.scale_factor();
    let logical_width = (size.width as f64 / scale_factor) as u32;
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(LOW_POWER_CORES);

    // Profile is derived once here; later resizes reconfigure the surface but
    // never re-derive the particle budget.
    let profile = match tier_override {
        Some(tier) => DeviceProfile::for_tier(tier, cores <= LOW_POWER_CORES),
        None => DeviceProfile::detect(logical_width, cores),
    };
    let mut director = if hero {
        SceneDirector::hero(profile, seed)?
    } else {
        SceneDirector::background(profile, seed)?
    };
    director.set_reduced_motion(reduced_motion);
    log::info!(
        "scene ready: {:?} tier, {} particles, seed {}",
        profile.tier,
        profile.particle_count,
        seed
    );

    let mut gpu = match pollster::block_on(render::GpuState::new(&window, &director)) {
        Ok(g) => Some(g),
        Err(e) => {
            // Best-effort visual layer: keep the window alive as a static
            // backdrop instead of propagating.
            log::error!("GPU init failed, falling back to static backdrop: {e:?}");
            None
        }
    };

    let mut clock = FrameClock::new();
    let mut surface_w = size.width.max(1);
    let mut surface_h = size.height.max(1);
    let mut scroll_y = 0.0f32;

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CursorMoved { position, .. } => {
                let x = (position.x as f32 / surface_w as f32) * 2.0 - 1.0;
                let y = 1.0 - (position.y as f32 / surface_h as f32) * 2.0;
                director.set_pointer_target(Vec2::new(x, y));
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => lines * SCROLL_LINE_PX,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32,
                };
                scroll_y = (scroll_y - dy).max(0.0);
                director.set_scroll_offset(scroll_y);
            }
            WindowEvent::Occluded(occluded) => {
                director.set_tab_visible(!occluded);
            }
            WindowEvent::Resized(new_size) => {
                surface_w = new_size.width.max(1);
                surface_h = new_size.height.max(1);
                if let Some(g) = &mut gpu {
                    g.resize(new_size);
                }
            }
            WindowEvent::CloseRequested => elwt.exit(),
            _ => {}
        },
        Event::AboutToWait => {
            let timing = clock.tick();
            director.tick(timing.elapsed);
            if let Some(g) = &mut gpu {
                match g.render(&director) {
                    Ok(()) => g.window().request_redraw(),
                    Err(wgpu::SurfaceError::Lost) => g.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => elwt.exit(),
                    Err(_) => {}
                }
            }
        }
        _ => {}
    })?;
    Ok(())
}

fn env_u64(key: &str) -> Option<u64> {
    std::env::var(key).ok().and_then(|s| s.parse().ok())
}

fn env_flag(key: &str) -> bool {
    std::env::var(key).map(|v| v == "1" || v == "true").unwrap_or(false)
}
