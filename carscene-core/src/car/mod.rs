//! The car of the models scene.
//!
//! This module provides the [`Car`] struct, which owns the vehicle state and advances it every
//! frame with a single-track (bicycle) kinematic model, and the [`Controls`] struct through which
//! the control surface drives it. Turning that state into draw calls lives in [`pose`].

use std::f32::consts::{PI, TAU};

use glam::{Mat3, Vec2, Vec3};
use serde::{Deserialize, Serialize};

pub mod mount;
pub mod pose;

pub use mount::*;
pub use pose::*;

/// Distance between the front and rear axles.
pub const WHEELBASE: f32 = 2.7;
/// Radius of the wheel meshes.
pub const WHEEL_RADIUS: f32 = 0.2;
/// Deceleration applied while braking, in m/s².
pub const BRAKING_DECELERATION: f32 = 4.0;
/// Below this speed the brakes stop the car outright.
pub const LOW_SPEED_THRESHOLD: f32 = 0.1;
/// Time a blinker stays in one state.
pub const BLINKER_PERIOD: f32 = 0.5;
/// Bound used by [`Controls::set_speed`].
pub const MAX_SPEED: f32 = 10.0;
/// Bound used by [`Controls::set_steering_angle`], in degrees.
pub const MAX_STEERING_ANGLE: f32 = 30.0;

pub const SAVE_MAGIC: &[u8; 4] = b"CARS";
pub const LATEST_SAVE_VERSION: u8 = 1;

/// The inputs of the car. Any field can be changed between two updates.
///
/// The fields are not validated by [`Car::update`]. The setters clamp to the ranges the control
/// surface is expected to honour.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Controls {
    /// Signed speed in m/s, positive is forward.
    pub speed: f32,
    /// Steering angle of the front wheels in degrees.
    pub steering_angle: f32,
    pub headlight_on: bool,
    pub braking: bool,
    pub left_blinker: bool,
    pub right_blinker: bool,
}

impl Controls {
    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed.clamp(-MAX_SPEED, MAX_SPEED);
    }

    pub fn set_steering_angle(&mut self, degrees: f32) {
        self.steering_angle = degrees.clamp(-MAX_STEERING_ANGLE, MAX_STEERING_ANGLE);
    }

    pub fn reset_steering(&mut self) {
        self.steering_angle = 0.0;
    }

    pub fn toggle_headlight(&mut self) {
        self.headlight_on = !self.headlight_on;
    }

    pub fn toggle_left_blinker(&mut self) {
        self.left_blinker = !self.left_blinker;
    }

    pub fn toggle_right_blinker(&mut self) {
        self.right_blinker = !self.right_blinker;
    }

    /// Returns whether the blinker on the given side is signalling.
    pub fn blinker_activated(&self, left: bool) -> bool {
        if left {
            self.left_blinker
        } else {
            self.right_blinker
        }
    }
}

/// The car and all of its per-frame state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Car {
    pub position: Vec3,
    /// `x` is the pitch and `y` the yaw, both in radians.
    pub orientation: Vec2,
    pub controls: Controls,
    wheel_roll_angle: f32,
    blinker_on: bool,
    blinker_timer: f32,
}

impl Car {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn yaw(&self) -> f32 {
        self.orientation.y
    }

    pub fn pitch(&self) -> f32 {
        self.orientation.x
    }

    /// Roll angle of the wheels, always within `(-π, π]`.
    pub fn wheel_roll_angle(&self) -> f32 {
        self.wheel_roll_angle
    }

    /// Whether the blinker lamps are lit in the current blink phase.
    pub fn blinker_on(&self) -> bool {
        self.blinker_on
    }

    /// Seconds since the blinkers last changed phase.
    pub fn blinker_timer(&self) -> f32 {
        self.blinker_timer
    }

    /// Advances the car by `delta_time` seconds.
    pub fn update(&mut self, delta_time: f32) {
        if self.controls.braking {
            self.brake(delta_time);
        }

        let speed = self.controls.speed;

        let angular_speed = speed * (-self.controls.steering_angle.to_radians()).sin() / WHEELBASE;
        self.orientation.y += angular_speed * delta_time;

        // Position uses the heading of this tick.
        let forward = Mat3::from_rotation_y(self.orientation.y) * Vec3::new(-speed, 0.0, 0.0);
        self.position += forward * delta_time;

        self.wheel_roll_angle = wrap_angle(
            self.wheel_roll_angle + speed / (TAU * WHEEL_RADIUS) * delta_time,
        );

        self.update_blinkers(delta_time);
    }

    fn brake(&mut self, delta_time: f32) {
        let speed = self.controls.speed;
        if speed.abs() < LOW_SPEED_THRESHOLD {
            self.controls.speed = 0.0;
            return;
        }
        let magnitude = (speed.abs() - BRAKING_DECELERATION * delta_time).max(0.0);
        self.controls.speed = magnitude.copysign(speed);
    }

    fn update_blinkers(&mut self, delta_time: f32) {
        if self.controls.left_blinker || self.controls.right_blinker {
            self.blinker_timer += delta_time;
            if self.blinker_timer >= BLINKER_PERIOD {
                self.blinker_timer = 0.0;
                self.blinker_on = !self.blinker_on;
            }
        } else {
            self.blinker_on = true;
            self.blinker_timer = 0.0;
        }
    }

    /// Serializes the whole car state.
    ///
    /// Floats are stored bit for bit so a restored car continues on exactly the same trajectory.
    pub fn save(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(48);
        data.extend(SAVE_MAGIC);
        data.push(LATEST_SAVE_VERSION);
        for value in [
            self.position.x,
            self.position.y,
            self.position.z,
            self.orientation.x,
            self.orientation.y,
            self.controls.speed,
            self.controls.steering_angle,
            self.wheel_roll_angle,
            self.blinker_timer,
        ] {
            data.extend(value.to_le_bytes());
        }
        for flag in [
            self.controls.headlight_on,
            self.controls.braking,
            self.controls.left_blinker,
            self.controls.right_blinker,
            self.blinker_on,
        ] {
            data.push(flag as u8);
        }
        log::debug!("Saved car state ({} bytes)", data.len());
        data
    }

    /// Restores a car previously written by [`Car::save`].
    pub fn load(data: &[u8]) -> Result<Self, String> {
        fn read_f32(data: &[u8], offset: &mut usize) -> Result<f32, String> {
            if *offset + 4 > data.len() {
                return Err("Unexpected end of data".to_string());
            }

            let bytes: [u8; 4] = data[*offset..*offset + 4]
                .try_into()
                .map_err(|_| "Failed to read f32".to_string())?;

            *offset += 4;
            Ok(f32::from_le_bytes(bytes))
        }

        fn read_bool(data: &[u8], offset: &mut usize) -> Result<bool, String> {
            let byte = *data
                .get(*offset)
                .ok_or_else(|| "Unexpected end of data".to_string())?;
            *offset += 1;
            match byte {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(format!("Invalid flag value: {}", other)),
            }
        }

        if data.len() < 5 || &data[0..4] != SAVE_MAGIC {
            return Err("Invalid save file signature".to_string());
        }
        let version = data[4];
        if version != LATEST_SAVE_VERSION {
            return Err(format!("Unsupported save file version: {}", version));
        }

        let mut offset = 5;
        let position = Vec3::new(
            read_f32(data, &mut offset)?,
            read_f32(data, &mut offset)?,
            read_f32(data, &mut offset)?,
        );
        let orientation = Vec2::new(read_f32(data, &mut offset)?, read_f32(data, &mut offset)?);
        let speed = read_f32(data, &mut offset)?;
        let steering_angle = read_f32(data, &mut offset)?;
        let wheel_roll_angle = read_f32(data, &mut offset)?;
        let blinker_timer = read_f32(data, &mut offset)?;

        let controls = Controls {
            speed,
            steering_angle,
            headlight_on: read_bool(data, &mut offset)?,
            braking: read_bool(data, &mut offset)?,
            left_blinker: read_bool(data, &mut offset)?,
            right_blinker: read_bool(data, &mut offset)?,
        };
        let blinker_on = read_bool(data, &mut offset)?;

        log::debug!("Loaded car state at {:?}", position);

        Ok(Self {
            position,
            orientation,
            controls,
            wheel_roll_angle,
            blinker_on,
            blinker_timer,
        })
    }
}

/// Wraps an angle into `(-π, π]`.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = PI - (PI - angle).rem_euclid(TAU);
    // `rem_euclid` can round up to exactly TAU.
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn moving_car(speed: f32, steering_angle: f32) -> Car {
        let mut car = Car::new();
        car.controls.speed = speed;
        car.controls.steering_angle = steering_angle;
        car
    }

    #[test]
    fn test_standing_car_does_not_move() {
        let mut car = moving_car(0.0, 0.0);
        car.update(1.0);
        assert_eq!(car.position, Vec3::ZERO);
        assert_eq!(car.yaw(), 0.0);
    }

    #[test]
    fn test_straight_line_moves_along_negative_x() {
        let mut car = moving_car(10.0, 0.0);
        car.update(1.0);
        assert_relative_eq!(car.position.x, -10.0);
        assert_relative_eq!(car.position.y, 0.0);
        assert_relative_eq!(car.position.z, 0.0);
        assert_eq!(car.yaw(), 0.0);
    }

    #[test]
    fn test_steering_matches_bicycle_model() {
        let mut car = moving_car(10.0, 30.0);
        car.update(0.1);
        let expected = 10.0 * (-30.0_f32).to_radians().sin() / WHEELBASE * 0.1;
        assert_relative_eq!(car.yaw(), expected, epsilon = 1e-6);
        assert_relative_eq!(car.yaw(), -0.1852, epsilon = 1e-4);
    }

    #[test]
    fn test_position_uses_updated_heading() {
        let mut car = moving_car(10.0, 30.0);
        car.update(0.1);
        let yaw = car.yaw();
        assert_relative_eq!(car.position.x, -yaw.cos(), epsilon = 1e-6);
        assert_relative_eq!(car.position.z, yaw.sin(), epsilon = 1e-6);
    }

    #[test]
    fn test_braking_stops_without_crossing_zero() {
        for (speed, delta_time) in [(10.0, 0.016), (-7.5, 0.05), (3.0, 2.0), (-0.3, 10.0)] {
            let mut car = moving_car(speed, 0.0);
            car.controls.braking = true;
            let mut last = car.controls.speed.abs();
            for _ in 0..1000 {
                car.update(delta_time);
                let current = car.controls.speed;
                assert!(current.abs() <= last);
                assert!(current == 0.0 || current.signum() == speed.signum());
                last = current.abs();
            }
            assert_eq!(car.controls.speed, 0.0);
        }
    }

    #[test]
    fn test_braking_snaps_low_speed_to_zero() {
        let mut car = moving_car(0.09, 0.0);
        car.controls.braking = true;
        car.update(0.0);
        assert_eq!(car.controls.speed, 0.0);
    }

    #[test]
    fn test_wheel_roll_angle_stays_wrapped() {
        let mut car = Car::new();
        let steps = [(10.0, 0.016), (-10.0, 3.0), (9.5, 100.0), (-3.0, 0.5), (10.0, 1e4)];
        for _ in 0..50 {
            for (speed, delta_time) in steps {
                car.controls.speed = speed;
                car.update(delta_time);
                let angle = car.wheel_roll_angle();
                assert!(angle > -PI && angle <= PI, "angle {} out of range", angle);
            }
        }
    }

    #[test]
    fn test_wrap_angle() {
        assert_relative_eq!(wrap_angle(0.5), 0.5, epsilon = 1e-6);
        assert_eq!(wrap_angle(PI), PI);
        assert_eq!(wrap_angle(-PI), PI);
        assert_relative_eq!(wrap_angle(PI + 0.5), -PI + 0.5, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(-PI - 0.5), PI - 0.5, epsilon = 1e-5);
        assert_relative_eq!(wrap_angle(7.0 * TAU + 1.0), 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_blinkers_pinned_on_when_inactive() {
        let mut car = Car::new();
        car.controls.left_blinker = true;
        for _ in 0..7 {
            car.update(0.1);
        }
        assert!(car.blinker_timer() > 0.0);

        car.controls.left_blinker = false;
        car.update(0.1);
        assert!(car.blinker_on());
        assert_eq!(car.blinker_timer(), 0.0);
    }

    #[test]
    fn test_blinker_toggles_every_five_updates() {
        let mut car = Car::new();
        car.controls.right_blinker = true;
        let mut toggles = Vec::new();
        let mut last = car.blinker_on();
        for step in 1..=30 {
            car.update(0.1);
            if car.blinker_on() != last {
                toggles.push(step);
                last = car.blinker_on();
            }
        }
        assert_eq!(toggles, vec![5, 10, 15, 20, 25, 30]);
    }

    #[test]
    fn test_save_and_resume_is_bit_identical() {
        let mut car = moving_car(8.3, -17.0);
        car.controls.left_blinker = true;
        car.controls.headlight_on = true;
        car.orientation.x = 0.05;

        let mut reference = car.clone();
        for _ in 0..40 {
            car.update(1.0 / 60.0);
            reference.update(1.0 / 60.0);
        }

        let mut restored = Car::load(&car.save()).unwrap();
        assert_eq!(restored, car);

        for step in 0..200 {
            if step == 120 {
                restored.controls.braking = true;
                reference.controls.braking = true;
            }
            restored.update(1.0 / 60.0);
            reference.update(1.0 / 60.0);
        }
        assert_eq!(restored.save(), reference.save());
        assert_eq!(restored.position.x.to_bits(), reference.position.x.to_bits());
    }

    #[test]
    fn test_load_rejects_bad_data() {
        assert!(Car::load(b"nope").is_err());
        let mut data = Car::new().save();
        data[4] = 99;
        assert!(Car::load(&data).is_err());
        let data = Car::new().save();
        assert!(Car::load(&data[..data.len() - 1]).is_err());
    }

    #[test]
    fn test_control_setters_clamp() {
        let mut controls = Controls::default();
        controls.set_steering_angle(45.0);
        assert_eq!(controls.steering_angle, MAX_STEERING_ANGLE);
        controls.set_speed(-25.0);
        assert_eq!(controls.speed, -MAX_SPEED);
        controls.reset_steering();
        assert_eq!(controls.steering_angle, 0.0);
        controls.toggle_left_blinker();
        assert!(controls.blinker_activated(true));
        assert!(!controls.blinker_activated(false));
    }
}
