//! In-process document model
//!
//! A minimal stand-in for the host page: a tree of elements, each with a tag,
//! string attributes, a layout box in document coordinates, text content and
//! the [`Style`] record the reveal effects write to. The tree structure is
//! fixed once built; the reveal crate only mutates attributes, style and
//! text.

use indexmap::IndexMap;
use insular_animation::TargetKey;
use insular_core::{Rect, Size};
use slotmap::{new_key_type, Key, SlotMap};

use crate::style::Style;

new_key_type! {
    /// Handle to an element of a [`Document`]
    pub struct ElementId;
}

impl ElementId {
    /// Key used to register tweens against this element
    pub fn target_key(self) -> TargetKey {
        TargetKey(self.data().as_ffi())
    }

    /// Reverse of [`ElementId::target_key`]
    pub fn from_target(key: TargetKey) -> Self {
        Self::from(slotmap::KeyData::from_ffi(key.0))
    }
}

/// A single node of the document tree
#[derive(Clone, Debug)]
pub struct Element {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: IndexMap<String, String>,
    /// Layout box in document coordinates, untransformed
    layout: Rect,
    text: String,
    style: Style,
}

impl Element {
    fn new(tag: &str, parent: Option<ElementId>, layout: Rect) -> Self {
        Self {
            tag: tag.to_string(),
            parent,
            children: Vec::new(),
            attributes: IndexMap::new(),
            layout,
            text: String::new(),
            style: Style::default(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn parent(&self) -> Option<ElementId> {
        self.parent
    }

    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    pub fn attributes(&self) -> &IndexMap<String, String> {
        &self.attributes
    }

    pub fn layout(&self) -> Rect {
        self.layout
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> &Style {
        &self.style
    }
}

/// The element tree plus the viewport it is scrolled in
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    root: ElementId,
    viewport: Size,
    scroll_y: f32,
}

impl Document {
    /// Empty document whose root is a `body` spanning the viewport
    pub fn new(viewport: Size) -> Self {
        let mut elements = SlotMap::with_key();
        let root = elements.insert(Element::new(
            "body",
            None,
            Rect::new(0.0, 0.0, viewport.width, viewport.height),
        ));
        Self {
            elements,
            root,
            viewport,
            scroll_y: 0.0,
        }
    }

    /// The `body` element
    pub fn root(&self) -> ElementId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.elements.contains_key(id)
    }

    /// Append a new element as the last child of `parent`
    ///
    /// An unknown `parent` attaches the element to the root instead.
    pub fn create_element(&mut self, parent: ElementId, tag: &str, layout: Rect) -> ElementId {
        let parent = if self.elements.contains_key(parent) {
            parent
        } else {
            tracing::trace!("Document: unknown parent, attaching <{}> to body", tag);
            self.root
        };
        let id = self
            .elements
            .insert(Element::new(tag, Some(parent), layout));
        if let Some(p) = self.elements.get_mut(parent) {
            p.children.push(id);
        }
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|e| e.tag.as_str())
    }

    pub fn children(&self, id: ElementId) -> &[ElementId] {
        self.elements
            .get(id)
            .map(|e| e.children.as_slice())
            .unwrap_or(&[])
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn attribute(&self, id: ElementId, name: &str) -> Option<&str> {
        self.elements
            .get(id)
            .and_then(|e| e.attributes.get(name))
            .map(String::as_str)
    }

    pub fn has_attribute(&self, id: ElementId, name: &str) -> bool {
        self.elements
            .get(id)
            .is_some_and(|e| e.attributes.contains_key(name))
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: impl Into<String>) {
        if let Some(e) = self.elements.get_mut(id) {
            e.attributes.insert(name.to_string(), value.into());
        }
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) -> Option<String> {
        self.elements
            .get_mut(id)
            .and_then(|e| e.attributes.shift_remove(name))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Traversal
    // ─────────────────────────────────────────────────────────────────────────

    /// `id` and everything below it, in document order
    pub fn subtree(&self, id: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if !self.elements.contains_key(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            // reversed so the first child is visited first
            stack.extend(self.children(next).iter().rev().copied());
        }
        out
    }

    /// Everything strictly below `id`, in document order
    pub fn descendants(&self, id: ElementId) -> Vec<ElementId> {
        let mut all = self.subtree(id);
        if !all.is_empty() {
            all.remove(0);
        }
        all
    }

    /// Elements in the subtree of `root` (inclusive) carrying `name`
    pub fn query_attribute(&self, root: ElementId, name: &str) -> Vec<ElementId> {
        self.subtree(root)
            .into_iter()
            .filter(|id| self.has_attribute(*id, name))
            .collect()
    }

    /// Nearest of `id` and its ancestors that carries `name`
    pub fn closest_with_attribute(&self, id: ElementId, name: &str) -> Option<ElementId> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let element = self.elements.get(current)?;
            if element.attributes.contains_key(name) {
                return Some(current);
            }
            cursor = element.parent;
        }
        None
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Geometry
    // ─────────────────────────────────────────────────────────────────────────

    pub fn layout(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id).map(|e| e.layout)
    }

    pub fn set_layout(&mut self, id: ElementId, layout: Rect) {
        if let Some(e) = self.elements.get_mut(id) {
            e.layout = layout;
        }
    }

    /// Layout box relative to the viewport, like `getBoundingClientRect`
    /// minus transforms
    pub fn client_rect(&self, id: ElementId) -> Option<Rect> {
        self.layout(id).map(|r| r.offset(0.0, -self.scroll_y))
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn set_scroll_y(&mut self, scroll_y: f32) {
        self.scroll_y = scroll_y;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Presentation
    // ─────────────────────────────────────────────────────────────────────────

    pub fn style(&self, id: ElementId) -> Option<&Style> {
        self.elements.get(id).map(|e| &e.style)
    }

    pub fn style_mut(&mut self, id: ElementId) -> Option<&mut Style> {
        self.elements.get_mut(id).map(|e| &mut e.style)
    }

    pub fn text(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id).map(|e| e.text.as_str())
    }

    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) {
        if let Some(e) = self.elements.get_mut(id) {
            e.text = text.into();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (Document, ElementId, ElementId, ElementId) {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let section = doc.create_element(doc.root(), "section", Rect::new(0.0, 0.0, 1000.0, 600.0));
        let a = doc.create_element(section, "div", Rect::new(0.0, 0.0, 100.0, 100.0));
        let b = doc.create_element(section, "div", Rect::new(0.0, 120.0, 100.0, 100.0));
        (doc, section, a, b)
    }

    #[test]
    fn test_document_order() {
        let (doc, section, a, b) = sample();
        assert_eq!(doc.subtree(doc.root()), vec![doc.root(), section, a, b]);
        assert_eq!(doc.descendants(section), vec![a, b]);
    }

    #[test]
    fn test_closest_with_attribute() {
        let (mut doc, section, a, _) = sample();
        assert_eq!(doc.closest_with_attribute(a, "data-preserve-animation"), None);
        doc.set_attribute(section, "data-preserve-animation", "");
        assert_eq!(
            doc.closest_with_attribute(a, "data-preserve-animation"),
            Some(section)
        );
    }

    #[test]
    fn test_client_rect_follows_scroll() {
        let (mut doc, _, _, b) = sample();
        doc.set_scroll_y(100.0);
        assert_eq!(doc.client_rect(b).map(|r| r.y()), Some(20.0));
    }

    #[test]
    fn test_target_key_round_trip() {
        let (_, _, a, _) = sample();
        assert_eq!(ElementId::from_target(a.target_key()), a);
    }
}
