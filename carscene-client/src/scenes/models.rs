//! The main scene: the car driving around the block, seen through a fly camera.

use std::{path::PathBuf, sync::Arc};

use carscene_core::{
    CameraInput, CameraSettings, Car, FlyCamera, MeshDrawer,
    car::pose::NEUTRAL_TINT,
    scenery::{self, Placement},
};
use glam::{Vec2, Vec3};
use glow::HasContext;
use sdl2::{keyboard::Keycode, mouse::MouseUtil};

use super::{RenderContext, Scene, SceneSwitch};
use crate::{
    abs::ShaderProgram,
    other::{KeyboardState, UpdateContext},
    render::{drawer::GlDrawer, model::ModelLibrary, ui::dashboard},
};

/// Speed change per second while `I` or `K` is held, in m/s².
const ACCELERATION: f32 = 5.0;
/// Steering change per second while `J` or `L` is held, in degrees.
const STEERING_RATE: f32 = 45.0;

pub struct ModelsScene {
    program: ShaderProgram,
    models: ModelLibrary,
    scenery: Vec<Placement>,
    car: Car,
    camera: FlyCamera,
    mouse_look: bool,
    save_path: PathBuf,
}

impl ModelsScene {
    pub fn new(
        gl: &Arc<glow::Context>,
        models: ModelLibrary,
        camera: CameraSettings,
        save_path: PathBuf,
    ) -> Result<Self, String> {
        Ok(Self {
            program: crate::shader_program!(transform, gl)?,
            models,
            scenery: scenery::layout(),
            car: Car::new(),
            camera: FlyCamera::new(camera),
            mouse_look: false,
            save_path,
        })
    }

    fn drive(&mut self, keyboard: &KeyboardState, delta_time: f32) {
        let controls = &mut self.car.controls;

        let throttle = keyboard.axis(Keycode::K, Keycode::I);
        if throttle != 0.0 {
            controls.set_speed(controls.speed + throttle * ACCELERATION * delta_time);
        }
        let steering = keyboard.axis(Keycode::J, Keycode::L);
        if steering != 0.0 {
            controls.set_steering_angle(controls.steering_angle + steering * STEERING_RATE * delta_time);
        }
        if keyboard.was_pressed(Keycode::R) {
            controls.reset_steering();
        }
        if keyboard.was_pressed(Keycode::H) {
            controls.toggle_headlight();
        }
        if keyboard.was_pressed(Keycode::Z) {
            controls.toggle_left_blinker();
        }
        if keyboard.was_pressed(Keycode::X) {
            controls.toggle_right_blinker();
        }
        controls.braking = keyboard.is_down(Keycode::B);
    }

    fn camera_input(&self, ctx: &UpdateContext) -> CameraInput {
        let keyboard = ctx.keyboard;
        CameraInput {
            movement: Vec3::new(
                keyboard.axis(Keycode::A, Keycode::D),
                keyboard.axis(Keycode::Q, Keycode::E),
                keyboard.axis(Keycode::W, Keycode::S),
            ),
            look: Vec2::new(
                keyboard.axis(Keycode::Up, Keycode::Down),
                keyboard.axis(Keycode::Left, Keycode::Right),
            ),
            mouse_delta: if self.mouse_look {
                ctx.mouse.delta
            } else {
                Vec2::ZERO
            },
        }
    }

    fn save(&self) {
        let result = self
            .save_path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|_| std::fs::write(&self.save_path, self.car.save()));
        match result {
            Ok(()) => log::info!("Saved the car to {}", self.save_path.display()),
            Err(e) => log::error!("Failed to save the car to {}: {}", self.save_path.display(), e),
        }
    }

    fn load(&mut self) {
        let result = std::fs::read(&self.save_path)
            .map_err(|e| e.to_string())
            .and_then(|data| Car::load(&data));
        match result {
            Ok(car) => {
                self.car = car;
                log::info!("Restored the car from {}", self.save_path.display());
            }
            Err(e) => log::warn!("Failed to restore the car from {}: {}", self.save_path.display(), e),
        }
    }

    fn set_mouse_look(&mut self, enabled: bool, mouse: &MouseUtil) {
        self.mouse_look = enabled;
        mouse.set_relative_mouse_mode(enabled);
    }
}

impl Scene for ModelsScene {
    fn name(&self) -> &'static str {
        "Models"
    }

    fn status(&self) -> String {
        let controls = &self.car.controls;
        format!(
            "{:.1} m/s | {:.1}°",
            controls.speed, controls.steering_angle
        )
    }

    fn update(&mut self, ctx: &UpdateContext, mouse: &MouseUtil) -> SceneSwitch {
        let keyboard = ctx.keyboard;
        if keyboard.was_pressed(Keycode::Escape) {
            return SceneSwitch::Quit;
        }
        if keyboard.was_pressed(Keycode::T) {
            return SceneSwitch::Next;
        }
        if keyboard.was_pressed(Keycode::Space) {
            self.set_mouse_look(!self.mouse_look, mouse);
        }
        if keyboard.was_pressed(Keycode::F5) {
            self.save();
        }
        if keyboard.was_pressed(Keycode::F9) {
            self.load();
        }

        self.drive(keyboard, ctx.delta_time);
        self.car.update(ctx.delta_time);

        let input = self.camera_input(ctx);
        self.camera.apply(&input, ctx.delta_time);

        SceneSwitch::None
    }

    fn render(&mut self, ctx: &mut RenderContext) {
        unsafe {
            ctx.gl.clear_color(0.5, 0.7, 0.9, 1.0);
            ctx.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let proj_view = self.camera.projection(ctx.aspect_ratio()) * self.camera.view();
        let mut drawer = GlDrawer::new(ctx.gl, &self.program, &self.models);
        for placement in &self.scenery {
            drawer.draw_mesh(placement.model, proj_view * placement.transform, NEUTRAL_TINT);
        }
        self.car.render(proj_view, &mut drawer);

        dashboard::draw(&self.car, ctx.screen, ctx.ui);
    }

    fn leave(&mut self, mouse: &MouseUtil) {
        self.set_mouse_look(false, mouse);
    }
}
