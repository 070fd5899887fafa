//! PLY model loading.
//!
//! Models are vertex-coloured triangle meshes. Each `vertex` carries `x y z` and
//! `red green blue` as bytes; each `face` lists its corners in `vertex_indices`
//! (or `vertex_index`). Faces with more than three corners are fanned into triangles.

use std::{collections::HashMap, io::BufRead, path::Path, sync::Arc};

use carscene_core::ModelId;
use glow::HasContext;
use ply_rs::{
    parser::Parser,
    ply::{DefaultElement, Property},
};
use thiserror::Error;

use crate::abs::{Mesh, Vertex};

#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ModelVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex for ModelVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            let stride = std::mem::size_of::<ModelVertex>() as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(
                1,
                4,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(ModelVertex, color) as i32,
            );
        }
    }
}

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Missing property: {element}.{property}")]
    MissingProperty {
        element: &'static str,
        property: &'static str,
    },
    #[error("Vertex index {index} is out of range for {count} vertices")]
    IndexOutOfRange { index: i64, count: usize },
}

/// CPU-side geometry of a model, ready for upload.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ModelData {
    pub vertices: Vec<ModelVertex>,
    pub indices: Vec<u32>,
}

fn scalar(property: &Property) -> Option<f64> {
    Some(match *property {
        Property::Char(v) => v as f64,
        Property::UChar(v) => v as f64,
        Property::Short(v) => v as f64,
        Property::UShort(v) => v as f64,
        Property::Int(v) => v as f64,
        Property::UInt(v) => v as f64,
        Property::Float(v) => v as f64,
        Property::Double(v) => v,
        _ => return None,
    })
}

fn index_list(property: &Property) -> Option<Vec<i64>> {
    Some(match property {
        Property::ListChar(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListUChar(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListShort(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListUShort(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListInt(v) => v.iter().map(|&i| i as i64).collect(),
        Property::ListUInt(v) => v.iter().map(|&i| i as i64).collect(),
        _ => return None,
    })
}

/// Colour channels stored as bytes are normalised, float channels are taken as they are.
fn channel(property: &Property) -> Option<f32> {
    match *property {
        Property::UChar(v) => Some(v as f32 / 255.0),
        Property::Float(v) => Some(v),
        Property::Double(v) => Some(v as f32),
        _ => None,
    }
}

fn get<'a>(
    element: &'a DefaultElement,
    element_name: &'static str,
    property: &'static str,
) -> Result<&'a Property, ModelError> {
    element.get(property).ok_or(ModelError::MissingProperty {
        element: element_name,
        property,
    })
}

impl ModelData {
    pub fn parse<R: BufRead>(reader: &mut R) -> Result<Self, ModelError> {
        let ply = Parser::<DefaultElement>::new()
            .read_ply(reader)
            .map_err(|e| ModelError::Parse(e.to_string()))?;

        let missing = |element, property| ModelError::MissingProperty { element, property };

        let vertices = ply
            .payload
            .get("vertex")
            .ok_or(missing("vertex", "x"))?
            .iter()
            .map(|element| {
                let coord = |name| {
                    get(element, "vertex", name)
                        .and_then(|p| scalar(p).ok_or(missing("vertex", name)))
                };
                let color = |name| {
                    get(element, "vertex", name)
                        .and_then(|p| channel(p).ok_or(missing("vertex", name)))
                };
                Ok(ModelVertex {
                    position: [coord("x")? as f32, coord("y")? as f32, coord("z")? as f32],
                    color: [color("red")?, color("green")?, color("blue")?, 1.0],
                })
            })
            .collect::<Result<Vec<_>, ModelError>>()?;

        let mut indices = Vec::new();
        for face in ply.payload.get("face").map(Vec::as_slice).unwrap_or_default() {
            let corners = face
                .get("vertex_indices")
                .or_else(|| face.get("vertex_index"))
                .and_then(index_list)
                .ok_or(missing("face", "vertex_indices"))?;
            let corners = corners
                .into_iter()
                .map(|index| {
                    u32::try_from(index)
                        .ok()
                        .filter(|&i| (i as usize) < vertices.len())
                        .ok_or(ModelError::IndexOutOfRange {
                            index,
                            count: vertices.len(),
                        })
                })
                .collect::<Result<Vec<_>, _>>()?;
            for i in 1..corners.len().saturating_sub(1) {
                indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
            }
        }

        log::debug!(
            "Parsed model with {} vertices and {} triangles",
            vertices.len(),
            indices.len() / 3
        );

        Ok(Self { vertices, indices })
    }

    pub fn load(path: &Path) -> Result<Self, ModelError> {
        let file = std::fs::File::open(path)?;
        Self::parse(&mut std::io::BufReader::new(file))
    }
}

/// The GPU meshes of every model that could be loaded.
pub struct ModelLibrary {
    meshes: HashMap<ModelId, Mesh>,
}

impl ModelLibrary {
    /// Loads every [`ModelId`] from `dir`. Models that fail to load are reported and left out;
    /// drawing them is then a no-op.
    pub fn load(gl: &Arc<glow::Context>, dir: &Path) -> Self {
        let mut meshes = HashMap::new();
        for model in ModelId::ALL {
            let path = dir.join(model.file_name());
            let data = match ModelData::load(&path) {
                Ok(data) => data,
                Err(e) => {
                    log::warn!("Skipping model {}: {}", path.display(), e);
                    continue;
                }
            };
            match Mesh::new(gl, &data.vertices, &data.indices, glow::TRIANGLES) {
                Ok(mesh) => {
                    meshes.insert(model, mesh);
                }
                Err(e) => log::warn!("Cannot upload model {}: {}", path.display(), e),
            }
        }
        log::info!(
            "Loaded {} of {} models from {}",
            meshes.len(),
            ModelId::ALL.len(),
            dir.display()
        );
        Self { meshes }
    }

    pub fn get(&self, model: ModelId) -> Option<&Mesh> {
        self.meshes.get(&model)
    }

    /// Draws a model with the currently bound program, toggling face culling for
    /// double-sided models.
    pub fn draw(&self, gl: &glow::Context, model: ModelId) {
        let Some(mesh) = self.get(model) else {
            return;
        };
        if model.double_sided() {
            unsafe { gl.disable(glow::CULL_FACE) };
            mesh.draw();
            unsafe { gl.enable(glow::CULL_FACE) };
        } else {
            mesh.draw();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: &str = "ply
format ascii 1.0
element vertex 4
property float x
property float y
property float z
property uchar red
property uchar green
property uchar blue
element face 1
property list uchar int vertex_indices
end_header
0 0 0 255 0 0
1 0 0 0 255 0
1 1 0 0 0 255
0 1 0 255 255 255
4 0 1 2 3
";

    #[test]
    fn test_parse_ascii_quad() {
        let data = ModelData::parse(&mut QUAD.as_bytes()).unwrap();
        assert_eq!(data.vertices.len(), 4);
        assert_eq!(data.vertices[1].position, [1.0, 0.0, 0.0]);
        assert_eq!(data.vertices[0].color, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(data.vertices[3].color, [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(data.indices, vec![0, 1, 2, 0, 2, 3]);
    }

    #[test]
    fn test_missing_color_is_reported() {
        let source = "ply
format ascii 1.0
element vertex 1
property float x
property float y
property float z
end_header
0 0 0
";
        let error = ModelData::parse(&mut source.as_bytes()).unwrap_err();
        assert!(matches!(
            error,
            ModelError::MissingProperty {
                element: "vertex",
                property: "red"
            }
        ));
    }

    #[test]
    fn test_out_of_range_index() {
        let source = QUAD.replace("4 0 1 2 3", "3 0 1 7");
        let error = ModelData::parse(&mut source.as_bytes()).unwrap_err();
        assert!(matches!(
            error,
            ModelError::IndexOutOfRange { index: 7, count: 4 }
        ));
    }

    #[test]
    fn test_missing_file() {
        let error = ModelData::load(Path::new("/nonexistent/frame.ply")).unwrap_err();
        assert!(matches!(error, ModelError::Io(_)));
    }

    #[test]
    fn test_vertex_has_no_padding() {
        assert_eq!(std::mem::size_of::<ModelVertex>(), 7 * 4);
    }
}
