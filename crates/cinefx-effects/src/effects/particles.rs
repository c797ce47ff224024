//! Floating particle emitter.
//!
//! Each particle lives for its animation duration plus delay. The controller
//! schedules its removal and emits a replacement in the same tick, so the
//! population seeded at start stays constant.

use cinefx_core::{ElementId, Length, ParticleSettings, Seconds, UniformRange, class, property};

use crate::document::Document;
use crate::random::RandomSource;

const LEFT_VW: UniformRange = UniformRange::new(0.0, 100.0);
const TOP_VH: UniformRange = UniformRange::new(0.0, 100.0);

/// Randomized parameters of one particle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSpec {
    pub left_vw: f64,
    pub top_vh: f64,
    pub size_px: f64,
    pub duration_s: f64,
    pub delay_s: f64,
}

impl ParticleSpec {
    /// Draw a particle. Samples are taken as left, top, size, duration, delay.
    pub fn random<R: RandomSource + ?Sized>(random: &mut R, settings: &ParticleSettings) -> Self {
        Self {
            left_vw: LEFT_VW.sample(random.next_unit()),
            top_vh: TOP_VH.sample(random.next_unit()),
            size_px: settings.size_px.sample(random.next_unit()),
            duration_s: settings.duration_s.sample(random.next_unit()),
            delay_s: settings.delay_s.sample(random.next_unit()),
        }
    }

    /// Time from creation until the particle is retired, never under 1 ms so
    /// a replacement always lands on a later tick.
    pub fn lifetime_ms(&self) -> u64 {
        Seconds(self.duration_s + self.delay_s).as_millis().max(1)
    }

    fn apply<D: Document>(&self, doc: &mut D, element: ElementId) {
        let size = Length::Px(self.size_px).to_string();
        doc.set_style(element, property::LEFT, &Length::Vw(self.left_vw).to_string());
        doc.set_style(element, property::TOP, &Length::Vh(self.top_vh).to_string());
        doc.set_style(element, property::WIDTH, &size);
        doc.set_style(element, property::HEIGHT, &size);
        doc.set_style(
            element,
            property::ANIMATION_DURATION,
            &Seconds(self.duration_s).to_string(),
        );
        doc.set_style(
            element,
            property::ANIMATION_DELAY,
            &Seconds(self.delay_s).to_string(),
        );
    }
}

/// A particle that has been placed in the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub element: ElementId,
    pub spec: ParticleSpec,
}

/// Owns the shared particle container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParticleEmitter {
    container: ElementId,
}

impl ParticleEmitter {
    /// Create the container up front so emission never has to wait for it.
    pub fn mount<D: Document>(doc: &mut D) -> Self {
        let container = doc.create_element(class::PARTICLES);
        doc.append_to_body(container);
        Self { container }
    }

    pub fn container(&self) -> ElementId {
        self.container
    }

    /// Create one randomized particle inside the container.
    pub fn emit<D, R>(&self, doc: &mut D, random: &mut R, settings: &ParticleSettings) -> Particle
    where
        D: Document,
        R: RandomSource + ?Sized,
    {
        let spec = ParticleSpec::random(random, settings);
        let element = doc.create_element(class::PARTICLE);
        spec.apply(doc, element);
        doc.append_child(self.container, element);
        Particle { element, spec }
    }

    pub fn retire<D: Document>(&self, doc: &mut D, element: ElementId) {
        doc.remove(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::random::SequenceRandom;
    use cinefx_core::Viewport;

    fn setup() -> (MemoryDocument, ParticleEmitter) {
        let mut doc = MemoryDocument::new(Viewport::new(100.0, 30.0));
        let emitter = ParticleEmitter::mount(&mut doc);
        (doc, emitter)
    }

    #[test]
    fn test_mount_creates_container() {
        let (doc, emitter) = setup();
        assert_eq!(doc.query_selector_all(class::PARTICLES), vec![emitter.container()]);
        assert!(doc.children(emitter.container()).is_empty());
    }

    #[test]
    fn test_first_emit_adds_a_particle() {
        let (mut doc, emitter) = setup();
        let mut random = SequenceRandom::constant(0.5);
        let particle = emitter.emit(&mut doc, &mut random, &ParticleSettings::default());
        assert_eq!(doc.children(emitter.container()), &[particle.element]);
    }

    #[test]
    fn test_emit_writes_randomized_styles() {
        let (mut doc, emitter) = setup();
        let mut random = SequenceRandom::new([0.25, 0.5, 0.5, 0.25, 0.5]);
        let particle = emitter.emit(&mut doc, &mut random, &ParticleSettings::default());

        assert_eq!(
            particle.spec,
            ParticleSpec {
                left_vw: 25.0,
                top_vh: 50.0,
                size_px: 5.0,
                duration_s: 15.0,
                delay_s: 5.0,
            }
        );
        assert_eq!(particle.spec.lifetime_ms(), 20_000);

        let el = particle.element;
        assert_eq!(doc.style(el, "left"), Some("25vw"));
        assert_eq!(doc.style(el, "top"), Some("50vh"));
        assert_eq!(doc.style(el, "width"), Some("5px"));
        assert_eq!(doc.style(el, "height"), Some("5px"));
        assert_eq!(doc.style(el, "animation-duration"), Some("15s"));
        assert_eq!(doc.style(el, "animation-delay"), Some("5s"));
        assert_eq!(doc.element(el).map(|e| e.class.as_str()), Some("particle"));
    }

    #[test]
    fn test_spec_respects_ranges() {
        let settings = ParticleSettings::default();
        let mut random = SequenceRandom::new([0.0, 0.999_999, 0.3, 0.7, 0.1, 0.9]);
        for _ in 0..50 {
            let spec = ParticleSpec::random(&mut random, &settings);
            assert!((0.0..100.0).contains(&spec.left_vw));
            assert!((0.0..100.0).contains(&spec.top_vh));
            assert!((2.0..8.0).contains(&spec.size_px));
            assert!((10.0..30.0).contains(&spec.duration_s));
            assert!((0.0..10.0).contains(&spec.delay_s));
            assert!(spec.lifetime_ms() >= 10_000);
        }
    }

    #[test]
    fn test_lifetime_never_zero() {
        let spec = ParticleSpec {
            left_vw: 0.0,
            top_vh: 0.0,
            size_px: 2.0,
            duration_s: 0.0002,
            delay_s: 0.0,
        };
        assert_eq!(spec.lifetime_ms(), 1);
    }

    #[test]
    fn test_retire_removes_particle() {
        let (mut doc, emitter) = setup();
        let mut random = SequenceRandom::constant(0.1);
        let particle = emitter.emit(&mut doc, &mut random, &ParticleSettings::default());
        emitter.retire(&mut doc, particle.element);
        assert!(!doc.contains(particle.element));
        assert!(doc.children(emitter.container()).is_empty());
    }
}
