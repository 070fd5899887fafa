//! The core of carscene. This crate holds everything that does not need a window or a GPU:
//! the car and its kinematics, the hierarchical transforms of its parts, the scenery layout, the
//! introduction polygon and the fly camera.
//!
//! Drawing goes through the [`car::MeshDrawer`] trait so the whole crate can be exercised without
//! a graphics context.

pub mod camera;
pub mod car;
pub mod model;
pub mod scenery;
pub mod shape;

pub use camera::{CameraInput, CameraSettings, FlyCamera};
pub use car::{Car, Controls, MeshDrawer, MountPoint, PartPose};
pub use model::ModelId;
