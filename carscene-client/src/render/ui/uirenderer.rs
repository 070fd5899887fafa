//! Batched drawing of solid rectangles.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec4};
use glow::HasContext;

use crate::{
    abs::{Mesh, ShaderProgram},
    render::ui::UIVertex,
};

/// A filled rectangle, `rect` being its top-left and bottom-right corners in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawCommand {
    pub rect: [Vec2; 2],
    pub color: Vec4,
}

/// Collects [`DrawCommand`]s and flushes one draw call per run of equal colours.
pub struct UIRenderer {
    gl: Arc<glow::Context>,
    shader_program: ShaderProgram,
    mesh: Mesh,
    pub projection_matrix: Mat4,
    color: Option<Vec4>,
    vertices: Vec<UIVertex>,
    indices: Vec<u32>,
}

impl UIRenderer {
    pub fn new(
        gl: &Arc<glow::Context>,
        shader_program: ShaderProgram,
        (width, height): (u32, u32),
    ) -> Result<Self, String> {
        Ok(Self {
            gl: Arc::clone(gl),
            shader_program,
            mesh: Mesh::new::<UIVertex>(gl, &[], &[], glow::TRIANGLES)?,
            projection_matrix: Self::projection(width, height),
            color: None,
            vertices: Vec::new(),
            indices: Vec::new(),
        })
    }

    /// Pixel coordinates to clip space, y pointing down.
    pub fn projection(width: u32, height: u32) -> Mat4 {
        Mat4::orthographic_rh_gl(0.0, width as f32, height as f32, 0.0, -1.0, 1.0)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection_matrix = Self::projection(width, height);
    }

    pub fn add_command(&mut self, command: DrawCommand) {
        if self.color.is_some_and(|color| color != command.color) {
            self.flush();
        }
        self.color = Some(command.color);
        self.append_quad(command.rect);
    }

    /// Draws whatever is still batched. Call once after the last widget has drawn.
    pub fn finish(&mut self) {
        self.flush();
    }

    fn flush(&mut self) {
        let Some(color) = self.color.take() else {
            return;
        };
        if self.indices.is_empty() {
            return;
        }

        self.mesh.update(&self.vertices, &self.indices);

        unsafe {
            self.gl.disable(glow::DEPTH_TEST);
        }
        self.shader_program.use_program();
        self.shader_program
            .set_uniform("u_projection", self.projection_matrix);
        self.shader_program.set_uniform("u_color", color);
        self.mesh.draw();
        unsafe {
            self.gl.enable(glow::DEPTH_TEST);
        }

        self.vertices.clear();
        self.indices.clear();
    }

    fn append_quad(&mut self, [min, max]: [Vec2; 2]) {
        let base = self.vertices.len() as u32;
        // Counter-clockwise on screen once y is flipped by the projection.
        for corner in [
            Vec2::new(max.x, min.y),
            min,
            Vec2::new(min.x, max.y),
            max,
        ] {
            self.vertices.push(UIVertex {
                position: corner.to_array(),
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}
