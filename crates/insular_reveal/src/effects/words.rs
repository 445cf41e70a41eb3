//! Word-by-word text reveal
//!
//! The text of a `data-reveal-text` element is split on spaces. Scroll
//! progress from "top at 90%" to "centre at 50%" lights words in order: word
//! `i` of `n` is lit once progress reaches `i / (n - 1)`.

use insular_core::Color;

use crate::dom::{Document, ElementId};
use crate::trigger::{Edge, ScrubRange, TriggerPoint};

pub const ATTR_REVEAL_TEXT: &str = "data-reveal-text";

/// Colour of a lit word
pub const LIT_WORD: Color = Color::rgb(231.0 / 255.0, 233.0 / 255.0, 228.0 / 255.0);
/// Colour of a word not reached yet
pub const UNLIT_WORD: Color = Color::rgba(231.0 / 255.0, 233.0 / 255.0, 228.0 / 255.0, 0.15);

pub struct WordReveal {
    element: ElementId,
    words: usize,
    range: ScrubRange,
}

impl WordReveal {
    /// `None` for an element without text
    pub fn new(doc: &Document, element: ElementId) -> Option<Self> {
        let text = doc.text(element)?;
        if text.is_empty() {
            return None;
        }
        Some(Self {
            element,
            words: text.split(' ').count(),
            range: ScrubRange::new(
                TriggerPoint::new(Edge::Top, 0.9),
                TriggerPoint::new(Edge::Center, 0.5),
            ),
        })
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn word_count(&self) -> usize {
        self.words
    }

    /// Number of leading words lit at `progress`
    pub fn lit_at(&self, progress: f32) -> usize {
        if self.words <= 1 {
            return self.words;
        }
        let last = (self.words - 1) as f32;
        (0..self.words)
            .take_while(|i| progress >= *i as f32 / last)
            .count()
    }

    pub fn update(&self, doc: &mut Document) {
        let Some(rect) = doc.client_rect(self.element) else {
            return;
        };
        let viewport_height = doc.viewport().height;
        // nothing is lit before the range starts
        let lit = if self.range.start.is_passed(rect, viewport_height) {
            self.lit_at(self.range.progress(rect, viewport_height))
        } else {
            0
        };
        if let Some(style) = doc.style_mut(self.element) {
            style.lit_words = Some(lit);
        }
    }
}

/// Colour of word `index` under `style.lit_words`
pub fn word_color(lit_words: Option<usize>, index: usize) -> Color {
    match lit_words {
        Some(lit) if index < lit => LIT_WORD,
        _ => UNLIT_WORD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::{Rect, Size};

    fn paragraph(text: &str, top: f32) -> (Document, ElementId) {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let p = doc.create_element(doc.root(), "p", Rect::new(0.0, top, 600.0, 200.0));
        doc.set_text(p, text);
        (doc, p)
    }

    #[test]
    fn test_thresholds() {
        let (doc, p) = paragraph("cambio seguro y rapido", 0.0);
        let reveal = WordReveal::new(&doc, p).unwrap();
        assert_eq!(reveal.word_count(), 4);
        assert_eq!(reveal.lit_at(0.0), 1);
        assert_eq!(reveal.lit_at(0.34), 2);
        assert_eq!(reveal.lit_at(0.99), 3);
        assert_eq!(reveal.lit_at(1.0), 4);
    }

    #[test]
    fn test_single_word_is_always_lit() {
        let (doc, p) = paragraph("Insular", 0.0);
        let reveal = WordReveal::new(&doc, p).unwrap();
        assert_eq!(reveal.lit_at(0.0), 1);
    }

    #[test]
    fn test_scroll_lights_words() {
        let (mut doc, p) = paragraph("uno dos tres", 1000.0);
        let reveal = WordReveal::new(&doc, p).unwrap();
        reveal.update(&mut doc);
        assert_eq!(doc.style(p).unwrap().lit_words, Some(0));
        assert_eq!(word_color(Some(0), 0), UNLIT_WORD);

        // centre of the paragraph at the viewport centre
        doc.set_scroll_y(700.0);
        reveal.update(&mut doc);
        assert_eq!(doc.style(p).unwrap().lit_words, Some(3));
        assert_eq!(word_color(Some(3), 2), LIT_WORD);
    }
}
