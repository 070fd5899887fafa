//! Fixed mount points of the car's sub-parts.
//!
//! The car meshes are authored with the front of the car towards `-x` and up towards `+y`, which
//! puts the left side of the car on `+z`.

use glam::Vec3;

/// Offset of the whole car from the world origin, so it sits on the road.
pub const SCENE_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -20.0);
/// Height of the frame above the car origin.
pub const FRAME_OFFSET: Vec3 = Vec3::new(0.0, 0.25, 0.0);
/// The wheel mesh origin is not on its rotation axis; this moves it back.
pub const WHEEL_PIVOT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.10124);
/// Tilt of the front headlights so they follow the angled nose, in degrees.
pub const FRONT_HEADLIGHT_TILT: f32 = 5.0;
pub const LIGHT_OFFSET: Vec3 = Vec3::new(0.0, 0.0, 0.029);
pub const BLINKER_OFFSET: Vec3 = Vec3::new(0.0, 0.0, -0.06065);

const FRONT_AXLE_X: f32 = -1.29;
const REAR_AXLE_X: f32 = 1.4;
const WHEEL_HEIGHT: f32 = 0.245;
const WHEEL_TRACK: f32 = 0.57;

const FRONT_HEADLIGHT_X: f32 = -1.9650;
const REAR_HEADLIGHT_X: f32 = 2.0019;
const HEADLIGHT_HEIGHT: f32 = 0.38;
const HEADLIGHT_SPREAD: f32 = 0.45;

/// One corner of the car. Wheels and headlight assemblies are mounted on each corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl MountPoint {
    pub const ALL: [MountPoint; 4] = [
        MountPoint::FrontLeft,
        MountPoint::FrontRight,
        MountPoint::RearLeft,
        MountPoint::RearRight,
    ];

    pub fn is_front(self) -> bool {
        matches!(self, MountPoint::FrontLeft | MountPoint::FrontRight)
    }

    pub fn is_left(self) -> bool {
        matches!(self, MountPoint::FrontLeft | MountPoint::RearLeft)
    }

    fn corner(self, front_x: f32, rear_x: f32, height: f32, half_width: f32) -> Vec3 {
        let x = if self.is_front() { front_x } else { rear_x };
        let z = if self.is_left() { half_width } else { -half_width };
        Vec3::new(x, height, z)
    }

    /// Position of the wheel hub relative to the car origin.
    pub fn wheel_offset(self) -> Vec3 {
        self.corner(FRONT_AXLE_X, REAR_AXLE_X, WHEEL_HEIGHT, WHEEL_TRACK)
    }

    /// Position of the headlight assembly relative to the frame.
    pub fn headlight_offset(self) -> Vec3 {
        self.corner(FRONT_HEADLIGHT_X, REAR_HEADLIGHT_X, HEADLIGHT_HEIGHT, HEADLIGHT_SPREAD)
    }
}
