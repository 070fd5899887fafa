//! Draws [`ModelId`]s through the transform shader.

use carscene_core::{MeshDrawer, ModelId};
use glam::{Mat4, Vec4};

use crate::{abs::ShaderProgram, render::model::ModelLibrary};

/// Issues one draw call per model with its final transform and tint.
pub struct GlDrawer<'a> {
    gl: &'a glow::Context,
    program: &'a ShaderProgram,
    models: &'a ModelLibrary,
}

impl<'a> GlDrawer<'a> {
    /// Binds `program`; it stays bound for every draw of this drawer.
    pub fn new(gl: &'a glow::Context, program: &'a ShaderProgram, models: &'a ModelLibrary) -> Self {
        program.use_program();
        Self {
            gl,
            program,
            models,
        }
    }
}

impl MeshDrawer for GlDrawer<'_> {
    fn draw_mesh(&mut self, model: ModelId, mvp: Mat4, tint: Vec4) {
        self.program.set_uniform("u_mvp", mvp);
        self.program.set_uniform("u_tint", tint);
        self.models.draw(self.gl, model);
    }
}
