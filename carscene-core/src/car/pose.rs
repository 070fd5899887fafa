//! Hierarchical transforms of the car parts.
//!
//! Every part hangs off a parent transform: the wheels off the car root, the frame off the root,
//! and the headlight assemblies off the frame. Each step multiplies on the right of its parent,
//! so the order of the calls below is the order in which the transforms apply to the mesh.

use glam::{Mat4, Vec3, Vec4};

use crate::{
    car::{
        BLINKER_OFFSET, Car, FRAME_OFFSET, FRONT_HEADLIGHT_TILT, LIGHT_OFFSET, MountPoint,
        SCENE_OFFSET, WHEEL_PIVOT_OFFSET,
    },
    model::ModelId,
};

pub const NEUTRAL_TINT: Vec4 = Vec4::ONE;
pub const FRONT_LIGHT_ON: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);
pub const FRONT_LIGHT_OFF: Vec4 = Vec4::new(0.5, 0.5, 0.5, 1.0);
pub const REAR_LIGHT_ON: Vec4 = Vec4::new(1.0, 0.1, 0.1, 1.0);
pub const REAR_LIGHT_OFF: Vec4 = Vec4::new(0.5, 0.1, 0.1, 1.0);
pub const BLINKER_ON: Vec4 = Vec4::new(1.0, 0.7, 0.3, 1.0);
pub const BLINKER_OFF: Vec4 = Vec4::new(0.5, 0.35, 0.15, 1.0);

/// Something that can draw a model with a final transform and a colour tint.
pub trait MeshDrawer {
    /// Draws `model` with the local-to-clip matrix `mvp`, its vertex colours multiplied by
    /// `tint`.
    fn draw_mesh(&mut self, model: ModelId, mvp: Mat4, tint: Vec4);
}

impl<F: FnMut(ModelId, Mat4, Vec4)> MeshDrawer for F {
    fn draw_mesh(&mut self, model: ModelId, mvp: Mat4, tint: Vec4) {
        self(model, mvp, tint)
    }
}

/// A car part placed in the world.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartPose {
    pub model: ModelId,
    /// Local-to-world transform.
    pub transform: Mat4,
    pub tint: Vec4,
}

impl Car {
    /// Local-to-world transform of the car origin.
    pub fn root_transform(&self) -> Mat4 {
        Mat4::from_translation(self.position + SCENE_OFFSET)
            * Mat4::from_rotation_y(self.orientation.y)
            * Mat4::from_rotation_x(self.orientation.x)
    }

    fn wheel_transform(&self, root: Mat4, mount: MountPoint) -> Mat4 {
        let mut model = root * Mat4::from_translation(mount.wheel_offset());

        // The wheel mesh is authored for the right side.
        if mount.is_left() {
            model *= Mat4::from_rotation_y(180.0_f32.to_radians());
        }

        if mount.is_front() {
            model *= Mat4::from_rotation_y((-self.controls.steering_angle).to_radians());
        }

        let roll = if mount.is_left() {
            -self.wheel_roll_angle()
        } else {
            self.wheel_roll_angle()
        };
        model * Mat4::from_rotation_z(roll) * Mat4::from_translation(WHEEL_PIVOT_OFFSET)
    }

    fn headlight_transform(frame: Mat4, mount: MountPoint) -> Mat4 {
        let mut model = frame * Mat4::from_translation(mount.headlight_offset());

        if mount.is_left() {
            model *= Mat4::from_rotation_x(180.0_f32.to_radians());
        }

        if mount.is_front() {
            let tilt = if mount.is_left() {
                FRONT_HEADLIGHT_TILT
            } else {
                -FRONT_HEADLIGHT_TILT
            };
            model *= Mat4::from_rotation_z(tilt.to_radians());
        }

        model
    }

    fn light_tint(&self, mount: MountPoint) -> Vec4 {
        match (mount.is_front(), self.controls.headlight_on, self.controls.braking) {
            (true, true, _) => FRONT_LIGHT_ON,
            (true, false, _) => FRONT_LIGHT_OFF,
            (false, _, true) => REAR_LIGHT_ON,
            (false, _, false) => REAR_LIGHT_OFF,
        }
    }

    fn blinker_tint(&self, mount: MountPoint) -> Vec4 {
        if self.blinker_on() && self.controls.blinker_activated(mount.is_left()) {
            BLINKER_ON
        } else {
            BLINKER_OFF
        }
    }

    /// Computes the transform and tint of every car part, in draw order: the four wheels, the
    /// frame, then a light and a blinker for each headlight assembly.
    pub fn part_transforms(&self) -> Vec<PartPose> {
        let root = self.root_transform();
        let mut parts = Vec::with_capacity(13);

        for mount in MountPoint::ALL {
            parts.push(PartPose {
                model: ModelId::Wheel,
                transform: self.wheel_transform(root, mount),
                tint: NEUTRAL_TINT,
            });
        }

        let frame = root * Mat4::from_translation(FRAME_OFFSET);
        parts.push(PartPose {
            model: ModelId::Frame,
            transform: frame,
            tint: NEUTRAL_TINT,
        });

        for mount in MountPoint::ALL {
            let headlight = Self::headlight_transform(frame, mount);
            parts.push(PartPose {
                model: ModelId::Light,
                transform: headlight * Mat4::from_translation(LIGHT_OFFSET),
                tint: self.light_tint(mount),
            });
            parts.push(PartPose {
                model: ModelId::Blinker,
                transform: headlight * Mat4::from_translation(BLINKER_OFFSET),
                tint: self.blinker_tint(mount),
            });
        }

        parts
    }

    /// Draws the whole car through `drawer`.
    pub fn render<D: MeshDrawer + ?Sized>(&self, proj_view: Mat4, drawer: &mut D) {
        for part in self.part_transforms() {
            drawer.draw_mesh(part.model, proj_view * part.transform, part.tint);
        }
    }

    /// World position of the frame, handy for a camera following the car.
    pub fn frame_position(&self) -> Vec3 {
        (self.root_transform() * Mat4::from_translation(FRAME_OFFSET)).w_axis.truncate()
    }
}
