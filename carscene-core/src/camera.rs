//! A free-flying camera for looking around the scene.

use glam::{Mat3, Mat4, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Tunables of the [`FlyCamera`], read from the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    /// Movement speed in units per second.
    pub move_speed: f32,
    /// Rotation speed of the arrow keys in radians per second.
    pub look_speed: f32,
    pub mouse_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov: 70.0,
            near: 0.1,
            far: 300.0,
            move_speed: 10.0,
            look_speed: 1.5,
            mouse_sensitivity: 0.1,
        }
    }
}

/// Input gathered for one frame, each axis in `-1.0..=1.0` except `mouse_delta`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CameraInput {
    /// `x` is right, `y` is up and `z` is backwards, all in camera space.
    pub movement: Vec3,
    /// `x` turns the view down, `y` turns it right.
    pub look: Vec2,
    /// Mouse movement in pixels since the last frame.
    pub mouse_delta: Vec2,
}

/// A camera that flies freely; it turns around the vertical axis and tilts up and down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlyCamera {
    pub position: Vec3,
    /// `x` is the pitch and `y` the yaw, both in radians.
    pub orientation: Vec2,
    pub settings: CameraSettings,
}

impl FlyCamera {
    pub const START_POSITION: Vec3 = Vec3::new(0.0, 5.0, -7.5);

    pub fn new(settings: CameraSettings) -> Self {
        Self {
            position: Self::START_POSITION,
            orientation: Vec2::ZERO,
            settings,
        }
    }

    /// Applies one frame of input.
    pub fn apply(&mut self, input: &CameraInput, delta_time: f32) {
        let look = input.look * self.settings.look_speed
            + Vec2::new(input.mouse_delta.y, input.mouse_delta.x) * self.settings.mouse_sensitivity;
        self.orientation -= look * delta_time;

        let offset = Mat3::from_rotation_y(self.orientation.y)
            * (input.movement * self.settings.move_speed);
        self.position += offset * delta_time;
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_rotation_x(-self.orientation.x)
            * Mat4::from_rotation_y(-self.orientation.y)
            * Mat4::from_translation(-self.position)
    }

    pub fn projection(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.settings.fov.to_radians(),
            aspect_ratio,
            self.settings.near,
            self.settings.far,
        )
    }
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self::new(CameraSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::*;

    #[test]
    fn test_view_moves_world_opposite_to_camera() {
        let camera = FlyCamera::default();
        let eye = camera.view().transform_point3(FlyCamera::START_POSITION);
        assert!(eye.abs_diff_eq(Vec3::ZERO, 1e-6));
    }

    #[test]
    fn test_forward_follows_yaw() {
        let mut camera = FlyCamera::default();
        camera.orientation.y = FRAC_PI_2;
        let forward = CameraInput {
            movement: Vec3::NEG_Z,
            ..Default::default()
        };
        camera.apply(&forward, 1.0);
        let moved = camera.position - FlyCamera::START_POSITION;
        assert!(moved.abs_diff_eq(Vec3::new(-10.0, 0.0, 0.0), 1e-4), "{:?}", moved);
    }

    #[test]
    fn test_look_keys_and_mouse() {
        let mut camera = FlyCamera::default();
        let input = CameraInput {
            look: Vec2::new(0.0, 1.0),
            mouse_delta: Vec2::new(10.0, 0.0),
            ..Default::default()
        };
        camera.apply(&input, 0.5);
        assert!((camera.orientation.y - -(1.5 + 1.0) * 0.5).abs() < 1e-6);
        assert_eq!(camera.orientation.x, 0.0);
    }

    #[test]
    fn test_settings_fill_missing_fields() {
        let settings: CameraSettings = serde_json::from_str(r#"{ "fov": 90.0 }"#).unwrap();
        assert_eq!(settings.fov, 90.0);
        assert_eq!(settings.far, CameraSettings::default().far);
    }

    #[test]
    fn test_projection_maps_near_plane() {
        let camera = FlyCamera::default();
        let clip = camera.projection(1.0) * glam::Vec4::new(0.0, 0.0, -0.1, 1.0);
        assert!((clip.z / clip.w + 1.0).abs() < 1e-4);
    }
}
