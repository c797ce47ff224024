//! Periodic shooting stars confined to the top of the viewport.

use cinefx_core::{ElementId, Length, ShootingStarSettings, class, property};

use crate::document::Document;
use crate::random::RandomSource;

/// A star that has been attached to the body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStar {
    pub element: ElementId,
    pub left_vw: f64,
    pub top_vh: f64,
}

/// Creates and removes shooting-star elements.
///
/// Holds no elements itself; each star is owned by the removal task the
/// controller schedules for it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShootingStarEmitter;

impl ShootingStarEmitter {
    pub fn spawn<D, R>(
        &self,
        doc: &mut D,
        random: &mut R,
        settings: &ShootingStarSettings,
    ) -> ShootingStar
    where
        D: Document,
        R: RandomSource + ?Sized,
    {
        let left_vw = settings.left_vw.sample(random.next_unit());
        let top_vh = settings.top_vh.sample(random.next_unit());

        let element = doc.create_element(class::SHOOTING_STAR);
        doc.set_style(element, property::LEFT, &Length::Vw(left_vw).to_string());
        doc.set_style(element, property::TOP, &Length::Vh(top_vh).to_string());
        doc.append_to_body(element);

        ShootingStar {
            element,
            left_vw,
            top_vh,
        }
    }

    pub fn remove<D: Document>(&self, doc: &mut D, element: ElementId) {
        doc.remove(element);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::MemoryDocument;
    use crate::random::SequenceRandom;
    use cinefx_core::Viewport;

    #[test]
    fn test_spawn_in_upper_band() {
        let mut doc = MemoryDocument::new(Viewport::new(100.0, 40.0));
        let mut random = SequenceRandom::new([0.5, 0.5]);
        let star = ShootingStarEmitter.spawn(&mut doc, &mut random, &ShootingStarSettings::default());

        assert_eq!(star.left_vw, 50.0);
        assert_eq!(star.top_vh, 15.0);
        assert_eq!(doc.style(star.element, "left"), Some("50vw"));
        assert_eq!(doc.style(star.element, "top"), Some("15vh"));
        assert_eq!(doc.query_selector_all(class::SHOOTING_STAR), vec![star.element]);
    }

    #[test]
    fn test_top_never_leaves_band() {
        let mut doc = MemoryDocument::new(Viewport::new(100.0, 40.0));
        let mut random = SequenceRandom::new([0.0, 0.999_999, 0.42]);
        let settings = ShootingStarSettings::default();
        for _ in 0..30 {
            let star = ShootingStarEmitter.spawn(&mut doc, &mut random, &settings);
            assert!((0.0..100.0).contains(&star.left_vw));
            assert!((0.0..30.0).contains(&star.top_vh));
        }
    }

    #[test]
    fn test_remove() {
        let mut doc = MemoryDocument::new(Viewport::new(100.0, 40.0));
        let mut random = SequenceRandom::constant(0.2);
        let star = ShootingStarEmitter.spawn(&mut doc, &mut random, &ShootingStarSettings::default());
        ShootingStarEmitter.remove(&mut doc, star.element);
        assert!(doc.query_selector_all(class::SHOOTING_STAR).is_empty());
    }
}
