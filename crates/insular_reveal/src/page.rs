//! Page descriptions
//!
//! A page is described in TOML as a tree of elements with layout boxes,
//! attributes and text, which is enough to drive the dispatcher without a
//! browser:
//!
//! ```toml
//! viewport = [1280, 800]
//!
//! [[element]]
//! tag = "section"
//! rect = [0, 0, 1280, 800]
//! attrs = { "data-stagger" = "0.1" }
//!
//!   [[element.child]]
//!   tag = "h2"
//!   rect = [80, 120, 600, 64]
//!   attrs = { "data-animate" = "fade-up" }
//! ```

use indexmap::IndexMap;
use insular_core::{Rect, Size};
use serde::Deserialize;

use crate::dom::{Document, ElementId};

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageDescription {
    /// `[width, height]` in CSS pixels
    pub viewport: Option<[f32; 2]>,
    pub scroll_y: f32,
    pub reduced_motion: bool,
    #[serde(rename = "element")]
    pub elements: Vec<ElementDescription>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ElementDescription {
    #[serde(default = "default_tag")]
    pub tag: String,
    /// `[x, y, width, height]` in document coordinates
    pub rect: [f32; 4],
    #[serde(default)]
    pub attrs: IndexMap<String, String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "child")]
    pub children: Vec<ElementDescription>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl PageDescription {
    pub fn viewport_or(&self, fallback: Size) -> Size {
        self.viewport
            .map(|[w, h]| Size::new(w, h))
            .unwrap_or(fallback)
    }

    /// Build the document, using `fallback_viewport` when none is given
    pub fn build(&self, fallback_viewport: Size) -> Document {
        let mut doc = Document::new(self.viewport_or(fallback_viewport));
        doc.set_scroll_y(self.scroll_y);
        let root = doc.root();
        for element in &self.elements {
            element.append_to(&mut doc, root);
        }
        doc
    }
}

impl ElementDescription {
    fn append_to(&self, doc: &mut Document, parent: ElementId) -> ElementId {
        let [x, y, w, h] = self.rect;
        let id = doc.create_element(parent, &self.tag, Rect::new(x, y, w, h));
        for (name, value) in &self.attrs {
            doc.set_attribute(id, name, value.as_str());
        }
        if !self.text.is_empty() {
            doc.set_text(id, self.text.as_str());
        }
        for child in &self.children {
            child.append_to(doc, id);
        }
        id
    }
}
