//! Scroll parallax
//!
//! `data-parallax` elements drift down by `viewport_height * speed` as they
//! scroll from "top at viewport top" to "bottom at viewport top".

use crate::dom::{Document, ElementId};
use crate::hints::read_number;
use crate::trigger::{Edge, ScrubRange, TriggerPoint};

pub const ATTR_PARALLAX: &str = "data-parallax";
pub const ATTR_PARALLAX_SPEED: &str = "data-parallax-speed";

pub struct Parallax {
    element: ElementId,
    speed: f32,
    range: ScrubRange,
}

impl Parallax {
    pub fn new(doc: &Document, element: ElementId, default_speed: f32) -> Self {
        Self {
            element,
            speed: read_number(doc, element, ATTR_PARALLAX_SPEED).unwrap_or(default_speed),
            range: ScrubRange::new(
                TriggerPoint::new(Edge::Top, 0.0),
                TriggerPoint::new(Edge::Bottom, 0.0),
            ),
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn update(&self, doc: &mut Document) {
        let Some(rect) = doc.client_rect(self.element) else {
            return;
        };
        let viewport_height = doc.viewport().height;
        let progress = self.range.progress(rect, viewport_height);
        if let Some(style) = doc.style_mut(self.element) {
            style.motion.translate_y = viewport_height * self.speed * progress;
        }
    }
}
