//! The solid-colour overlay drawn over the 3D scene.
//!
//! Widgets lay themselves out in screen pixels (origin top-left) and emit coloured rectangles
//! into the [`uirenderer::UIRenderer`], which batches rectangles of equal colour into one draw.

use glow::HasContext;

use crate::abs::Vertex;

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct UIVertex {
    pub position: [f32; 2],
}

impl Vertex for UIVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                0,
                2,
                glow::FLOAT,
                false,
                std::mem::size_of::<UIVertex>() as i32,
                0,
            );
        }
    }
}

pub mod dashboard;
pub mod uirenderer;
pub mod widgets;
