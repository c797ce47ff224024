//! Pointer-tracked spotlight glow.

use cinefx_core::{ElementId, Length, Point, class, property};

use crate::document::Document;

/// Spotlight position as percentages of the viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpotlightPosition {
    pub x_pct: f64,
    pub y_pct: f64,
}

/// Owns the single spotlight overlay element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spotlight {
    element: ElementId,
}

impl Spotlight {
    /// Create the overlay and attach it to the body.
    pub fn mount<D: Document>(doc: &mut D) -> Self {
        let element = doc.create_element(class::SPOTLIGHT);
        doc.append_to_body(element);
        Self { element }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Write the pointer position into the `--x`/`--y` custom properties.
    pub fn track<D: Document>(&self, doc: &mut D, pointer: Point) -> SpotlightPosition {
        let (x_pct, y_pct) = doc.viewport().percent_of(pointer);
        doc.set_style(
            self.element,
            property::SPOTLIGHT_X,
            &Length::Percent(x_pct).to_string(),
        );
        doc.set_style(
            self.element,
            property::SPOTLIGHT_Y,
            &Length::Percent(y_pct).to_string(),
        );
        SpotlightPosition { x_pct, y_pct }
    }
}
