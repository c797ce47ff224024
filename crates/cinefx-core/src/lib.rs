//! Core types shared by the cinefx crates.
//!
//! Geometry, typed style values and the class/property names that tie the
//! effects engine to whatever renders the document.

mod geometry;
mod settings;
mod style;

pub use geometry::{ElementId, Point, Rect, Viewport};
pub use settings::{
    EffectsConfig, ParticleSettings, ShootingStarSettings, SpotlightSettings, TiltSettings,
    UniformRange,
};
pub use style::{Length, ParseStyleError, Seconds, TiltTransform, class, property};
