//! 3D tilt on hover for feature cards.

use cinefx_core::{ElementId, Point, Rect, TiltSettings, TiltTransform, class, property};

use crate::document::Document;

/// Compute the tilt for a pointer over `rect`.
///
/// The angle on each axis is the pointer's offset from the card center divided
/// by `settings.divisor`. Pointer below center tips the top edge away
/// (positive `rotateX`); pointer right of center turns the card toward it
/// (negative `rotateY`).
pub fn tilt_for(rect: Rect, pointer: Point, settings: &TiltSettings) -> TiltTransform {
    let x = pointer.x - rect.left;
    let y = pointer.y - rect.top;
    let center = rect.half_extent();

    TiltTransform {
        perspective_px: settings.perspective_px,
        rotate_x_deg: (y - center.y) / settings.divisor,
        rotate_y_deg: (center.x - x) / settings.divisor,
        scale: settings.scale,
    }
}

/// The cards selected at mount time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TiltHandler {
    cards: Vec<ElementId>,
}

impl TiltHandler {
    /// Select every `feature-item` currently in the document.
    pub fn mount<D: Document>(doc: &D) -> Self {
        Self {
            cards: doc.query_selector_all(class::FEATURE_ITEM),
        }
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    pub fn is_card(&self, element: ElementId) -> bool {
        self.cards.contains(&element)
    }

    /// Apply the tilt for a pointer over `card`. Returns `None` if the element
    /// was not selected at mount.
    pub fn pointer_moved<D: Document>(
        &self,
        doc: &mut D,
        card: ElementId,
        pointer: Point,
        settings: &TiltSettings,
    ) -> Option<TiltTransform> {
        if !self.is_card(card) {
            return None;
        }
        let transform = tilt_for(doc.bounding_rect(card), pointer, settings);
        doc.set_style(card, property::TRANSFORM, &transform.to_string());
        Some(transform)
    }

    pub fn pointer_left<D: Document>(&self, doc: &mut D, card: ElementId) {
        if self.is_card(card) {
            doc.set_style(card, property::TRANSFORM, "");
        }
    }
}
