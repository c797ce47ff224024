//! Host document abstraction and an in-memory implementation.

use std::collections::BTreeMap;

use cinefx_core::{ElementId, Rect, Viewport};

/// The operations the effects need from a page.
///
/// Mirrors the small slice of the DOM the effects touch. Implementations treat
/// operations on unknown elements as no-ops.
pub trait Document {
    /// Create a detached element carrying a single class.
    fn create_element(&mut self, class: &str) -> ElementId;

    fn append_to_body(&mut self, element: ElementId);

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detach and drop an element along with its descendants.
    fn remove(&mut self, element: ElementId);

    /// Set an inline style property. An empty value clears it.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Attached elements with the given class, in document order.
    fn query_selector_all(&self, class: &str) -> Vec<ElementId>;

    fn bounding_rect(&self, element: ElementId) -> Rect;

    fn viewport(&self) -> Viewport;
}

/// A single element stored by [`MemoryDocument`].
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub class: String,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub styles: BTreeMap<String, String>,
    pub rect: Rect,
    attached: bool,
}

impl Element {
    fn new(class: &str) -> Self {
        Self {
            class: class.to_string(),
            parent: None,
            children: Vec::new(),
            styles: BTreeMap::new(),
            rect: Rect::default(),
            attached: false,
        }
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.styles.get(property).map(String::as_str)
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

/// Document kept entirely in memory.
///
/// Used by tests and by the terminal host, which renders it every frame.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeMap<ElementId, Element>,
    body: Vec<ElementId>,
    viewport: Viewport,
    next_id: u64,
}

impl MemoryDocument {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Add a pre-existing element, such as a card laid out by the host.
    pub fn insert(&mut self, class: &str, rect: Rect) -> ElementId {
        let id = self.create_element(class);
        self.set_rect(id, rect);
        self.append_to_body(id);
        id
    }

    pub fn set_rect(&mut self, element: ElementId, rect: Rect) {
        if let Some(el) = self.elements.get_mut(&element) {
            el.rect = rect;
        }
    }

    pub fn element(&self, element: ElementId) -> Option<&Element> {
        self.elements.get(&element)
    }

    pub fn contains(&self, element: ElementId) -> bool {
        self.elements.contains_key(&element)
    }

    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.element(element).and_then(|el| el.style(property))
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.element(element)
            .map(|el| el.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn body(&self) -> &[ElementId] {
        &self.body
    }

    /// Number of elements alive, attached or not.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn detach(&mut self, element: ElementId) {
        let parent = self.elements.get(&element).and_then(|el| el.parent);
        match parent {
            Some(parent) => {
                if let Some(p) = self.elements.get_mut(&parent) {
                    p.children.retain(|c| *c != element);
                }
            }
            None => self.body.retain(|c| *c != element),
        }
        if let Some(el) = self.elements.get_mut(&element) {
            el.parent = None;
        }
        self.set_attached(element, false);
    }

    fn set_attached(&mut self, element: ElementId, attached: bool) {
        let mut stack = vec![element];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.elements.get_mut(&id) {
                el.attached = attached;
                stack.extend(el.children.iter().copied());
            }
        }
    }

    fn collect_class(&self, ids: &[ElementId], class: &str, out: &mut Vec<ElementId>) {
        for id in ids {
            if let Some(el) = self.elements.get(id) {
                if el.class == class {
                    out.push(*id);
                }
                self.collect_class(&el.children, class, out);
            }
        }
    }
}

impl Document for MemoryDocument {
    fn create_element(&mut self, class: &str) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.elements.insert(id, Element::new(class));
        id
    }

    fn append_to_body(&mut self, element: ElementId) {
        if !self.contains(element) {
            return;
        }
        self.detach(element);
        self.body.push(element);
        self.set_attached(element, true);
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent == child || !self.contains(parent) || !self.contains(child) {
            return;
        }
        self.detach(child);
        let parent_attached = match self.elements.get_mut(&parent) {
            Some(p) => {
                p.children.push(child);
                p.attached
            }
            None => return,
        };
        if let Some(c) = self.elements.get_mut(&child) {
            c.parent = Some(parent);
        }
        self.set_attached(child, parent_attached);
    }

    fn remove(&mut self, element: ElementId) {
        if !self.contains(element) {
            return;
        }
        self.detach(element);
        let mut stack = vec![element];
        while let Some(id) = stack.pop() {
            if let Some(el) = self.elements.remove(&id) {
                stack.extend(el.children);
            }
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(el) = self.elements.get_mut(&element) {
            if value.is_empty() {
                el.styles.remove(property);
            } else {
                el.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn query_selector_all(&self, class: &str) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_class(&self.body, class, &mut out);
        out
    }

    fn bounding_rect(&self, element: ElementId) -> Rect {
        self.element(element).map(|el| el.rect).unwrap_or_default()
    }

    fn viewport(&self) -> Viewport {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc() -> MemoryDocument {
        MemoryDocument::new(Viewport::new(120.0, 40.0))
    }

    #[test]
    fn test_detached_elements_are_not_selected() {
        let mut doc = doc();
        let el = doc.create_element("particle");
        assert!(doc.query_selector_all("particle").is_empty());
        doc.append_to_body(el);
        assert_eq!(doc.query_selector_all("particle"), vec![el]);
    }

    #[test]
    fn test_nested_selection_in_document_order() {
        let mut doc = doc();
        let container = doc.create_element("particles");
        doc.append_to_body(container);
        let a = doc.create_element("particle");
        let b = doc.create_element("particle");
        doc.append_child(container, a);
        doc.append_child(container, b);
        let c = doc.create_element("particle");
        doc.append_to_body(c);

        assert_eq!(doc.query_selector_all("particle"), vec![a, b, c]);
        assert_eq!(doc.children(container), &[a, b]);
        assert!(doc.element(a).unwrap().is_attached());
    }

    #[test]
    fn test_remove_drops_descendants() {
        let mut doc = doc();
        let container = doc.create_element("particles");
        doc.append_to_body(container);
        let child = doc.create_element("particle");
        doc.append_child(container, child);

        doc.remove(container);
        assert!(!doc.contains(container));
        assert!(!doc.contains(child));
        assert!(doc.body().is_empty());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_remove_child_updates_parent() {
        let mut doc = doc();
        let container = doc.create_element("particles");
        doc.append_to_body(container);
        let child = doc.create_element("particle");
        doc.append_child(container, child);

        doc.remove(child);
        assert!(doc.children(container).is_empty());
        // Removing twice is harmless.
        doc.remove(child);
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_empty_style_clears_property() {
        let mut doc = doc();
        let card = doc.insert("feature-item", Rect::new(0.0, 0.0, 10.0, 5.0));
        doc.set_style(card, "transform", "scale(2)");
        assert_eq!(doc.style(card, "transform"), Some("scale(2)"));
        doc.set_style(card, "transform", "");
        assert_eq!(doc.style(card, "transform"), None);
    }

    #[test]
    fn test_bounding_rect_of_unknown_element() {
        let doc = doc();
        assert_eq!(doc.bounding_rect(ElementId(99)), Rect::default());
        assert_eq!(doc.viewport(), Viewport::new(120.0, 40.0));
    }
}
