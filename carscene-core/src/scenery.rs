//! Placement of the static scenery around the car: the lawn, the square of roads, a pine tree in
//! the middle and streetlights along the roads.

use glam::{Mat4, Vec3};

use crate::model::ModelId;

const GRASS_HEIGHT: f32 = -0.1;
const GRASS_SCALE: f32 = 50.0;

const ROAD_OFFSET: f32 = 20.0;
const ROAD_SPACING: f32 = 5.0;
const ROAD_SEGMENTS: i32 = 7;

const TREE_POSITION: Vec3 = Vec3::new(0.0, 0.1, 1.0);
const TREE_SCALE: f32 = 15.0;

const STREETLIGHT_OFFSET: f32 = 17.0;
const STREETLIGHT_HEIGHT: f32 = -0.15;
const STREETLIGHT_SPACING: f32 = 10.0;

/// A model placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub model: ModelId,
    pub transform: Mat4,
}

impl Placement {
    fn new(model: ModelId, transform: Mat4) -> Self {
        Self { model, transform }
    }
}

/// Rotation of one side of the road square about the vertical axis.
fn side_rotation(side: i32) -> Mat4 {
    Mat4::from_rotation_y((90.0 * side as f32).to_radians())
}

/// Returns every piece of scenery. The layout never changes, so callers usually compute it once.
pub fn layout() -> Vec<Placement> {
    let mut placements = Vec::with_capacity(42);

    // The lawn is lowered a bit so the roads win the depth test.
    placements.push(Placement::new(
        ModelId::Grass,
        Mat4::from_translation(Vec3::new(0.0, GRASS_HEIGHT, 0.0))
            * Mat4::from_scale(Vec3::new(GRASS_SCALE, 1.0, GRASS_SCALE)),
    ));

    let road_scale = Mat4::from_scale(Vec3::new(ROAD_SPACING, 1.0, ROAD_SPACING));
    for side in 0..4 {
        for i in 0..ROAD_SEGMENTS {
            let along = (i - ROAD_SEGMENTS / 2) as f32 * ROAD_SPACING;
            placements.push(Placement::new(
                ModelId::Street,
                side_rotation(side)
                    * Mat4::from_translation(Vec3::new(along, 0.0, ROAD_OFFSET))
                    * road_scale,
            ));
        }
    }

    for side in 0..4 {
        placements.push(Placement::new(
            ModelId::StreetCorner,
            side_rotation(side)
                * Mat4::from_translation(Vec3::new(ROAD_OFFSET, 0.0, ROAD_OFFSET))
                * road_scale,
        ));
    }

    placements.push(Placement::new(
        ModelId::Pine,
        Mat4::from_translation(TREE_POSITION) * Mat4::from_scale(Vec3::splat(TREE_SCALE)),
    ));

    for side in 0..4 {
        for along in [-STREETLIGHT_SPACING, STREETLIGHT_SPACING] {
            placements.push(Placement::new(
                ModelId::Streetlight,
                side_rotation(side)
                    * Mat4::from_translation(Vec3::new(
                        along,
                        STREETLIGHT_HEIGHT,
                        STREETLIGHT_OFFSET,
                    ))
                    * Mat4::from_rotation_y(90.0_f32.to_radians()),
            ));
        }
    }

    placements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(placements: &[Placement], model: ModelId) -> usize {
        placements.iter().filter(|p| p.model == model).count()
    }

    #[test]
    fn test_layout_counts() {
        let placements = layout();
        assert_eq!(placements.len(), 42);
        assert_eq!(count(&placements, ModelId::Grass), 1);
        assert_eq!(count(&placements, ModelId::Street), 28);
        assert_eq!(count(&placements, ModelId::StreetCorner), 4);
        assert_eq!(count(&placements, ModelId::Pine), 1);
        assert_eq!(count(&placements, ModelId::Streetlight), 8);
    }

    #[test]
    fn test_roads_form_a_square() {
        for placement in layout().iter().filter(|p| p.model == ModelId::Street) {
            let origin = placement.transform.w_axis.truncate();
            let on_edge = (origin.x.abs() - ROAD_OFFSET).abs() < 1e-4
                || (origin.z.abs() - ROAD_OFFSET).abs() < 1e-4;
            assert!(on_edge, "road segment at {:?}", origin);
            assert!(origin.x.abs() <= ROAD_OFFSET + 1e-4 && origin.z.abs() <= ROAD_OFFSET + 1e-4);
        }
    }

    #[test]
    fn test_corners_and_lights() {
        let placements = layout();
        for corner in placements.iter().filter(|p| p.model == ModelId::StreetCorner) {
            let origin = corner.transform.w_axis.truncate();
            assert!((origin.x.abs() - ROAD_OFFSET).abs() < 1e-4);
            assert!((origin.z.abs() - ROAD_OFFSET).abs() < 1e-4);
        }
        for light in placements.iter().filter(|p| p.model == ModelId::Streetlight) {
            let origin = light.transform.w_axis.truncate();
            assert!((origin.y - STREETLIGHT_HEIGHT).abs() < 1e-6);
            let distance = origin.x.abs().max(origin.z.abs());
            assert!((distance - STREETLIGHT_OFFSET).abs() < 1e-4);
        }
    }
}
