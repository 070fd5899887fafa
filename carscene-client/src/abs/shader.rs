//! OpenGL shaders and the [`Uniform`] values the renderers feed them.

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec4};
use glow::HasContext;

/// A single compiled shader stage.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a shader stage, returning the driver's info log on failure.
    pub fn new(gl: &Arc<glow::Context>, shader_type: u32, source: &str) -> Result<Self, String> {
        unsafe {
            let shader = gl.create_shader(shader_type)?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(log);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be written to a uniform variable.
pub trait Uniform {
    fn set_uniform(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

macro_rules! uniform {
    ($ty:ty, |$value:ident, $gl:ident, $loc:ident| $body:expr) => {
        impl Uniform for $ty {
            fn set_uniform(&self, $gl: &glow::Context, $loc: &glow::UniformLocation) {
                let $value = self;
                unsafe { $body }
            }
        }
    };
}

uniform!(f32, |v, gl, loc| gl.uniform_1_f32(Some(loc), *v));
uniform!(Vec2, |v, gl, loc| gl.uniform_2_f32(Some(loc), v.x, v.y));
uniform!(Vec4, |v, gl, loc| gl.uniform_4_f32(Some(loc), v.x, v.y, v.z, v.w));
uniform!(Mat4, |v, gl, loc| gl.uniform_matrix_4_f32_slice(Some(loc), false, v.as_ref()));

/// A linked shader program.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links the given stages into a program, returning the info log on failure.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, String> {
        unsafe {
            let program = gl.create_program()?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(log);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Compiles a vertex and a fragment stage and links them.
    pub fn from_sources(
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, String> {
        let vert = Shader::new(gl, glow::VERTEX_SHADER, vertex_source)?;
        let frag = Shader::new(gl, glow::FRAGMENT_SHADER, fragment_source)?;
        Self::new(gl, &[&vert, &frag])
    }

    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform of the program; names the program does not use are ignored.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        if let Some(location) = unsafe { self.gl.get_uniform_location(self.id, name) } {
            value.set_uniform(&self.gl, &location);
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
