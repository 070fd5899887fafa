//! The introduction scene: a coloured polygon whose side count follows `=` and `-`.

use std::sync::Arc;

use carscene_core::shape::{self, MAX_SIDES, MIN_SIDES, ShapeVertex};
use glow::HasContext;
use sdl2::{keyboard::Keycode, mouse::MouseUtil};

use super::{RenderContext, Scene, SceneSwitch};
use crate::{
    abs::{Mesh, ShaderProgram, Vertex},
    other::UpdateContext,
};

impl Vertex for ShapeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ShapeVertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                4,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(ShapeVertex, color) as i32,
            );
        }
    }
}

pub struct ShapeScene {
    program: ShaderProgram,
    mesh: Mesh,
    sides: u32,
}

impl ShapeScene {
    pub fn new(gl: &Arc<glow::Context>) -> Result<Self, String> {
        let program = crate::shader_program!(basic, gl)?;
        let (vertices, indices) = shape::ngon(MIN_SIDES);
        Ok(Self {
            program,
            mesh: Mesh::new(gl, &vertices, &indices, glow::TRIANGLES)?,
            sides: MIN_SIDES,
        })
    }

    fn set_sides(&mut self, sides: u32) {
        let sides = sides.clamp(MIN_SIDES, MAX_SIDES);
        if sides == self.sides {
            return;
        }
        self.sides = sides;
        let (vertices, indices) = shape::ngon(sides);
        self.mesh.update(&vertices, &indices);
        log::debug!("Polygon now has {} sides", sides);
    }
}

impl Scene for ShapeScene {
    fn name(&self) -> &'static str {
        "Shape"
    }

    fn status(&self) -> String {
        format!("{} sides", self.sides)
    }

    fn update(&mut self, ctx: &UpdateContext, _mouse: &MouseUtil) -> SceneSwitch {
        let keyboard = ctx.keyboard;
        if keyboard.was_pressed(Keycode::Escape) {
            return SceneSwitch::Quit;
        }
        if keyboard.was_pressed(Keycode::T) {
            return SceneSwitch::Next;
        }
        if keyboard.was_pressed(Keycode::Equals) || keyboard.was_pressed(Keycode::KpPlus) {
            self.set_sides(self.sides + 1);
        }
        if keyboard.was_pressed(Keycode::Minus) || keyboard.was_pressed(Keycode::KpMinus) {
            self.set_sides(self.sides.saturating_sub(1));
        }
        SceneSwitch::None
    }

    fn render(&mut self, ctx: &mut RenderContext) {
        unsafe {
            ctx.gl.clear_color(0.1, 0.1, 0.1, 1.0);
            ctx.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        self.program.use_program();
        self.mesh.draw();
    }
}
