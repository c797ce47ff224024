//! The individual effects driven by the controller.

pub mod particles;
pub mod shooting_star;
pub mod spotlight;
pub mod tilt;
