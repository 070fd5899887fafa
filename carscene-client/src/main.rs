use std::{
    path::Path,
    time::{Duration, Instant},
};

use glam::Vec2;
use glow::HasContext;
use sdl2::event::{Event, WindowEvent};

use crate::{
    abs::App,
    config::Settings,
    other::{InputState, UpdateContext},
    render::{model::ModelLibrary, ui::uirenderer::UIRenderer},
    scenes::{RenderContext, Scene, SceneManager, models::ModelsScene, shape::ShapeScene},
};

mod abs;
mod config;
mod logging;
mod other;
mod render;
mod scenes;

/// Builds the shader program stored under `src/render/shaders/<name>/`.
#[macro_export]
macro_rules! shader_program {
    ($name:ident, $gl:expr) => {
        $crate::abs::ShaderProgram::from_sources(
            &$gl,
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/render/shaders/",
                stringify!($name),
                "/vert.glsl"
            )),
            include_str!(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/src/render/shaders/",
                stringify!($name),
                "/frag.glsl"
            )),
        )
        .map_err(|e| format!("Shader program `{}`: {}", stringify!($name), e))
    };
}

/// How often the window title is refreshed.
const TITLE_INTERVAL: Duration = Duration::from_millis(500);

fn main() {
    let (settings, settings_problem) = Settings::load();
    let data_dir = config::data_dir();

    if let Err(e) = logging::init(settings.level_filter(), &data_dir) {
        eprintln!("Cannot set up logging: {}", e);
        std::process::exit(1);
    }
    if let Some(problem) = settings_problem {
        log::warn!("{}, using default settings", problem);
    }

    if let Err(e) = run(&settings, &data_dir) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn drawable_size(app: &App) -> Vec2 {
    let (width, height) = app.window.drawable_size();
    Vec2::new(width as f32, height as f32)
}

fn run(settings: &Settings, data_dir: &Path) -> Result<(), String> {
    log::info!("Starting carscene {}", env!("CARGO_PKG_VERSION"));

    let mut app = App::new(&settings.window)?;

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.enable(glow::CULL_FACE);
        app.gl.cull_face(glow::BACK);
        app.gl.front_face(glow::CCW);
        app.gl.enable(glow::BLEND);
        app.gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
    }

    let mut ui_renderer = UIRenderer::new(
        &app.gl,
        shader_program!(ui, app.gl)?,
        app.window.drawable_size(),
    )?;

    let models = ModelLibrary::load(&app.gl, &settings.models_dir);
    let scenes: Vec<Box<dyn Scene>> = vec![
        Box::new(ShapeScene::new(&app.gl)?),
        Box::new(ModelsScene::new(
            &app.gl,
            models,
            settings.camera,
            data_dir.join("car.sav"),
        )?),
    ];
    let mut scene_manager = SceneManager::new(scenes);

    let mouse = app.sdl.mouse();
    let mut input = InputState::default();
    let frame_budget = (settings.window.fps > 0)
        .then(|| Duration::from_secs_f64(1.0 / settings.window.fps as f64));

    let mut last_frame_time = Instant::now();
    let mut title_timer = Instant::now();
    let mut frames = 0u32;

    'running: loop {
        let frame_start = Instant::now();
        let delta_time = frame_start.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = frame_start;

        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            input.handle_event(&event);
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = app.window.drawable_size();
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                    ui_renderer.resize(width, height);
                }
                _ => {}
            }
        }

        let update_ctx = UpdateContext::new(&input, delta_time);
        if !scene_manager.update(&update_ctx, &mouse) {
            break 'running;
        }

        scene_manager.render(&mut RenderContext {
            gl: &app.gl,
            ui: &mut ui_renderer,
            screen: drawable_size(&app),
        });
        app.window.gl_swap_window();

        frames += 1;
        let since_title = title_timer.elapsed();
        if since_title >= TITLE_INTERVAL {
            let fps = frames as f32 / since_title.as_secs_f32();
            if let Some(scene) = scene_manager.current() {
                let status = scene.status();
                let title = format!(
                    "{} | {} | {} | {:.0} fps",
                    settings.window.title,
                    scene.name(),
                    status,
                    fps
                );
                if let Err(e) = app.window.set_title(&title) {
                    log::warn!("Cannot set the window title: {}", e);
                }
            }
            frames = 0;
            title_timer = Instant::now();
        }

        if let Some(budget) = frame_budget {
            let elapsed = frame_start.elapsed();
            if elapsed < budget {
                std::thread::sleep(budget - elapsed);
            }
        }
    }

    log::info!("Shutting down");
    Ok(())
}
