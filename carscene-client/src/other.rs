//! Per-frame input state gathered from SDL events.

use std::collections::HashSet;

use glam::Vec2;
use sdl2::{event::Event, keyboard::Keycode};

/// Keys held, and the keys that went down during the current frame.
#[derive(Default)]
pub struct KeyboardState {
    pub down: HashSet<Keycode>,
    pub pressed: HashSet<Keycode>,
}

impl KeyboardState {
    pub fn is_down(&self, key: Keycode) -> bool {
        self.down.contains(&key)
    }

    pub fn was_pressed(&self, key: Keycode) -> bool {
        self.pressed.contains(&key)
    }

    /// `1.0` when only `positive` is held, `-1.0` when only `negative` is, else `0.0`.
    pub fn axis(&self, negative: Keycode, positive: Keycode) -> f32 {
        self.is_down(positive) as i32 as f32 - self.is_down(negative) as i32 as f32
    }
}

#[derive(Default)]
pub struct MouseState {
    /// Relative motion summed over the frame's events.
    pub delta: Vec2,
}

/// Input collected for one frame.
#[derive(Default)]
pub struct InputState {
    pub keyboard: KeyboardState,
    pub mouse: MouseState,
}

impl InputState {
    /// Clears the per-frame presses and motion; held keys carry over.
    pub fn begin_frame(&mut self) {
        self.keyboard.pressed.clear();
        self.mouse.delta = Vec2::ZERO;
    }

    pub fn press(&mut self, keycode: Keycode) {
        self.keyboard.down.insert(keycode);
        self.keyboard.pressed.insert(keycode);
    }

    pub fn release(&mut self, keycode: Keycode) {
        self.keyboard.down.remove(&keycode);
    }

    pub fn handle_event(&mut self, event: &Event) {
        match *event {
            Event::KeyDown {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => self.press(keycode),
            Event::KeyUp {
                keycode: Some(keycode),
                repeat: false,
                ..
            } => self.release(keycode),
            Event::MouseMotion { xrel, yrel, .. } => {
                self.mouse.delta += Vec2::new(xrel as f32, yrel as f32);
            }
            _ => {}
        }
    }
}

/// Context handed to scenes during the update phase.
pub struct UpdateContext<'a> {
    pub keyboard: &'a KeyboardState,
    pub mouse: &'a MouseState,
    pub delta_time: f32,
}

impl<'a> UpdateContext<'a> {
    pub fn new(input: &'a InputState, delta_time: f32) -> Self {
        Self {
            keyboard: &input.keyboard,
            mouse: &input.mouse,
            delta_time,
        }
    }
}
