//! The [`Scene`] trait and the scenes of the application.
//!
//! Scenes are kept alive for the whole run and cycled with [`SceneSwitch::Next`], so the car
//! keeps its state while the polygon is shown.

use glam::Vec2;
use sdl2::mouse::MouseUtil;

use crate::{other::UpdateContext, render::ui::uirenderer::UIRenderer};

pub mod models;
pub mod shape;

pub enum SceneSwitch {
    None,
    Next,
    Quit,
}

/// What a scene gets to draw a frame.
pub struct RenderContext<'a> {
    pub gl: &'a glow::Context,
    pub ui: &'a mut UIRenderer,
    /// Drawable size in pixels.
    pub screen: Vec2,
}

impl RenderContext<'_> {
    pub fn aspect_ratio(&self) -> f32 {
        self.screen.x / self.screen.y.max(1.0)
    }
}

pub trait Scene {
    fn name(&self) -> &'static str;

    /// A short summary of the scene state for the window title.
    fn status(&self) -> String {
        String::new()
    }

    fn update(&mut self, ctx: &UpdateContext, mouse: &MouseUtil) -> SceneSwitch;

    fn render(&mut self, ctx: &mut RenderContext);

    /// Called when another scene takes over.
    fn leave(&mut self, _mouse: &MouseUtil) {}
}

/// Owns every scene and forwards to the active one.
pub struct SceneManager {
    scenes: Vec<Box<dyn Scene>>,
    current: usize,
}

impl SceneManager {
    pub fn new(scenes: Vec<Box<dyn Scene>>) -> Self {
        Self { scenes, current: 0 }
    }

    pub fn current(&self) -> Option<&dyn Scene> {
        self.scenes.get(self.current).map(|scene| scene.as_ref())
    }

    /// Updates the active scene. Returns `false` once the application should quit.
    pub fn update(&mut self, ctx: &UpdateContext, mouse: &MouseUtil) -> bool {
        let Some(scene) = self.scenes.get_mut(self.current) else {
            return false;
        };
        match scene.update(ctx, mouse) {
            SceneSwitch::None => {}
            SceneSwitch::Next => {
                scene.leave(mouse);
                self.current = (self.current + 1) % self.scenes.len();
                log::info!("Switched to the {} scene", self.scenes[self.current].name());
            }
            SceneSwitch::Quit => return false,
        }
        true
    }

    pub fn render(&mut self, ctx: &mut RenderContext) {
        if let Some(scene) = self.scenes.get_mut(self.current) {
            scene.render(ctx);
        }
    }
}
