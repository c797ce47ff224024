//! The page the effects decorate: feature cards laid out in the terminal and
//! pointer routing between them.

use cinefx_core::{ElementId, Point, Rect, Viewport, class};
use cinefx_effects::{Document, MemoryDocument};

const CARD_MAX_WIDTH: f64 = 26.0;
const CARD_HEIGHT: f64 = 7.0;
const CARD_GAP: f64 = 2.0;

/// A feature card and its title.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub element: ElementId,
    pub title: String,
}

/// Cards placed in a document, re-laid out on resize.
#[derive(Debug, Clone, Default)]
pub struct Page {
    cards: Vec<Card>,
}

impl Page {
    /// Insert one `feature-item` per title and lay them out for `viewport`.
    pub fn build(doc: &mut MemoryDocument, titles: &[String]) -> Self {
        let cards = titles
            .iter()
            .map(|title| Card {
                element: doc.insert(class::FEATURE_ITEM, Rect::default()),
                title: title.clone(),
            })
            .collect();
        let page = Self { cards };
        page.layout(doc);
        page
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn title(&self, element: ElementId) -> Option<&str> {
        self.cards
            .iter()
            .find(|c| c.element == element)
            .map(|c| c.title.as_str())
    }

    /// Update the viewport and recompute every card rect.
    pub fn resize(&self, doc: &mut MemoryDocument, viewport: Viewport) {
        doc.set_viewport(viewport);
        self.layout(doc);
    }

    fn layout(&self, doc: &mut MemoryDocument) {
        let rects = card_rects(doc.viewport(), self.cards.len());
        for (card, rect) in self.cards.iter().zip(rects) {
            doc.set_rect(card.element, rect);
        }
    }
}

/// Lay `count` cards out in a centered row below the middle of the viewport.
pub fn card_rects(viewport: Viewport, count: usize) -> Vec<Rect> {
    if count == 0 {
        return Vec::new();
    }
    let n = count as f64;
    let available = (viewport.width - CARD_GAP * (n + 1.0)).max(0.0);
    let width = (available / n).floor().min(CARD_MAX_WIDTH).max(0.0);
    let row_width = width * n + CARD_GAP * (n - 1.0);
    let left = ((viewport.width - row_width) / 2.0).floor().max(0.0);
    let top = (viewport.height * 0.55).floor();
    let height = CARD_HEIGHT.min((viewport.height - top - 1.0).max(0.0));

    (0..count)
        .map(|i| Rect::new(left + i as f64 * (width + CARD_GAP), top, width, height))
        .collect()
}

/// What happened to a card as the pointer moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverEvent {
    Moved(ElementId),
    Left(ElementId),
}

/// Synthesizes enter/leave semantics from raw pointer positions.
#[derive(Debug, Clone, Default)]
pub struct HoverTracker {
    hovered: Option<ElementId>,
}

impl HoverTracker {
    pub fn hovered(&self) -> Option<ElementId> {
        self.hovered
    }

    /// Route a pointer position to the cards. A card the pointer just left gets
    /// a `Left` before the new card gets its `Moved`.
    pub fn route<D: Document>(
        &mut self,
        doc: &D,
        cards: &[ElementId],
        pointer: Point,
    ) -> Vec<HoverEvent> {
        let hit = cards
            .iter()
            .rev()
            .copied()
            .find(|card| doc.bounding_rect(*card).contains(pointer));

        let mut events = Vec::with_capacity(2);
        if let Some(previous) = self.hovered.filter(|prev| Some(*prev) != hit) {
            events.push(HoverEvent::Left(previous));
        }
        if let Some(card) = hit {
            events.push(HoverEvent::Moved(card));
        }
        self.hovered = hit;
        events
    }

    /// Pointer left the page entirely.
    pub fn clear(&mut self) -> Option<HoverEvent> {
        self.hovered.take().map(HoverEvent::Left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> (MemoryDocument, Page) {
        let mut doc = MemoryDocument::new(Viewport::new(100.0, 30.0));
        let titles = vec!["One".to_string(), "Two".to_string(), "Three".to_string()];
        let page = Page::build(&mut doc, &titles);
        (doc, page)
    }

    fn ids(page: &Page) -> Vec<ElementId> {
        page.cards().iter().map(|c| c.element).collect()
    }

    #[test]
    fn test_card_rects_fit_viewport() {
        let viewport = Viewport::new(100.0, 30.0);
        let rects = card_rects(viewport, 3);
        assert_eq!(rects.len(), 3);
        for pair in rects.windows(2) {
            assert!(pair[0].right() < pair[1].left);
        }
        for rect in &rects {
            assert!(rect.left >= 0.0 && rect.right() <= viewport.width);
            assert!(rect.bottom() <= viewport.height);
            assert!(rect.width <= CARD_MAX_WIDTH);
        }
    }

    #[test]
    fn test_no_cards() {
        assert!(card_rects(Viewport::new(80.0, 24.0), 0).is_empty());
    }

    #[test]
    fn test_build_inserts_feature_items() {
        let (doc, page) = page();
        assert_eq!(doc.query_selector_all(class::FEATURE_ITEM), ids(&page));
        assert_eq!(page.title(page.cards()[1].element), Some("Two"));
    }

    #[test]
    fn test_resize_moves_cards() {
        let (mut doc, page) = page();
        let card = page.cards()[0].element;
        let before = doc.bounding_rect(card);
        page.resize(&mut doc, Viewport::new(200.0, 60.0));
        assert_ne!(doc.bounding_rect(card), before);
        assert_eq!(doc.viewport(), Viewport::new(200.0, 60.0));
    }

    #[test]
    fn test_hover_enter_move_leave() {
        let (doc, page) = page();
        let cards = ids(&page);
        let first = doc.bounding_rect(cards[0]);
        let second = doc.bounding_rect(cards[1]);
        let inside = |r: Rect| Point::new(r.left + 1.0, r.top + 1.0);
        let mut hover = HoverTracker::default();

        assert!(hover.route(&doc, &cards, Point::new(0.0, 0.0)).is_empty());
        assert_eq!(
            hover.route(&doc, &cards, inside(first)),
            vec![HoverEvent::Moved(cards[0])]
        );
        assert_eq!(
            hover.route(&doc, &cards, inside(second)),
            vec![HoverEvent::Left(cards[0]), HoverEvent::Moved(cards[1])]
        );
        assert_eq!(
            hover.route(&doc, &cards, Point::new(0.0, 0.0)),
            vec![HoverEvent::Left(cards[1])]
        );
        assert_eq!(hover.hovered(), None);
    }

    #[test]
    fn test_clear_emits_leave_once() {
        let (doc, page) = page();
        let cards = ids(&page);
        let rect = doc.bounding_rect(cards[2]);
        let mut hover = HoverTracker::default();
        hover.route(&doc, &cards, Point::new(rect.left, rect.top));
        assert_eq!(hover.clear(), Some(HoverEvent::Left(cards[2])));
        assert_eq!(hover.clear(), None);
    }
}
