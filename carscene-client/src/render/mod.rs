//! Everything that talks to the GPU: models, the transform drawer, the overlay and the shaders.

pub mod drawer;
pub mod model;
pub mod ui;
