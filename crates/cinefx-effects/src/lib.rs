//! Ambient page effects for cinefx.
//!
//! A pointer-tracked spotlight, a self-replenishing particle field, periodic
//! shooting stars and a hover tilt for feature cards. The effects act on any
//! [`Document`]; [`MemoryDocument`] is the in-memory page used by the terminal
//! host and the tests. All timing runs on the controller's virtual clock and
//! all randomness comes from a [`RandomSource`].

mod controller;
mod document;
mod effects;
mod random;
mod scheduler;

pub use controller::{EffectStats, EffectsController};
pub use document::{Document, Element, MemoryDocument};
pub use effects::{
    particles::{Particle, ParticleEmitter, ParticleSpec},
    shooting_star::{ShootingStar, ShootingStarEmitter},
    spotlight::{Spotlight, SpotlightPosition},
    tilt::{TiltHandler, tilt_for},
};
pub use random::{RandomSource, SeededRandom, SequenceRandom};
pub use scheduler::Scheduler;
