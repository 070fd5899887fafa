//! The procedurally generated polygon of the introduction scene.

use std::f32::consts::TAU;

use glam::Vec2;

pub const MIN_SIDES: u32 = 5;
pub const MAX_SIDES: u32 = 12;
pub const RADIUS: f32 = 0.7;

const CORNER_COLORS: [[f32; 4]; 3] = [
    [1.0, 0.0, 0.0, 1.0],
    [0.0, 1.0, 0.0, 1.0],
    [0.0, 0.0, 1.0, 1.0],
];
const CENTER_COLOR: [f32; 4] = [1.0; 4];

/// A vertex of the polygon, laid out as the basic shader expects it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[repr(C)]
pub struct ShapeVertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// Builds a regular polygon with `sides` corners (clamped to `MIN_SIDES..=MAX_SIDES`) as a
/// triangle fan around a white centre vertex.
///
/// Corners go clockwise starting at the top, the centre is the last vertex, and every triangle is
/// wound counter-clockwise so it survives back-face culling.
pub fn ngon(sides: u32) -> (Vec<ShapeVertex>, Vec<u32>) {
    let sides = sides.clamp(MIN_SIDES, MAX_SIDES);

    let mut vertices: Vec<ShapeVertex> = (0..sides)
        .map(|i| {
            let angle = TAU * i as f32 / sides as f32;
            ShapeVertex {
                position: [RADIUS * angle.sin(), RADIUS * angle.cos()],
                color: CORNER_COLORS[i as usize % CORNER_COLORS.len()],
            }
        })
        .collect();
    vertices.push(ShapeVertex {
        position: [0.0, 0.0],
        color: CENTER_COLOR,
    });

    let indices = (0..sides)
        .flat_map(|i| [sides, (i + 1) % sides, i])
        .collect();

    (vertices, indices)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn signed_area(a: Vec2, b: Vec2, c: Vec2) -> f32 {
        (b - a).perp_dot(c - a)
    }

    #[test]
    fn test_pentagon() {
        let (vertices, indices) = ngon(5);
        assert_eq!(vertices.len(), 6);
        assert_eq!(indices.len(), 15);
        assert_eq!(vertices[5].position, [0.0, 0.0]);
        assert_eq!(vertices[5].color, CENTER_COLOR);
        assert_relative_eq!(vertices[0].position[1], RADIUS);
        assert_eq!(vertices[3].color, CORNER_COLORS[0]);
        assert_eq!(&indices[..6], &[5, 1, 0, 5, 2, 1]);
        assert_eq!(&indices[12..], &[5, 0, 4]);
    }

    #[test]
    fn test_side_count_is_clamped() {
        assert_eq!(ngon(2).0.len(), MIN_SIDES as usize + 1);
        assert_eq!(ngon(40).0.len(), MAX_SIDES as usize + 1);
    }

    #[test]
    fn test_triangles_are_counter_clockwise() {
        for sides in MIN_SIDES..=MAX_SIDES {
            let (vertices, indices) = ngon(sides);
            for triangle in indices.chunks(3) {
                let [a, b, c] = [0, 1, 2].map(|k| Vec2::from(vertices[triangle[k] as usize].position));
                assert!(signed_area(a, b, c) > 0.0);
            }
            for vertex in &vertices[..sides as usize] {
                assert_relative_eq!(Vec2::from(vertex.position).length(), RADIUS, epsilon = 1e-5);
            }
        }
    }
}
