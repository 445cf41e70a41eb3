//! Section colour transitions
//!
//! When a `section[data-bg-color]` reaches the middle of the viewport, from
//! either direction, the body background tweens to the section's colour. The
//! resolved colour is mirrored into the theme so canvas effects that sample
//! the body background see it on their next resize.

use insular_animation::{AnimationScheduler, Tween, TweenId};
use insular_core::{parse_color, Color};
use insular_theme::{SharedTheme, DEFAULT_BASE_COLOR};

use crate::dom::{Document, ElementId};
use crate::trigger::{Edge, ToggleEvent, ToggleTrigger, TriggerPoint};

pub const ATTR_BG_COLOR: &str = "data-bg-color";

/// One coloured section and its centre-line trigger
pub struct SectionColor {
    section: ElementId,
    color: Color,
    trigger: ToggleTrigger,
}

impl SectionColor {
    /// `None` unless `section` is a `<section>` with a parseable colour
    pub fn read(doc: &Document, section: ElementId) -> Option<Self> {
        if doc.tag(section) != Some("section") {
            return None;
        }
        let color = parse_color(doc.attribute(section, ATTR_BG_COLOR)?)?;
        Some(Self {
            section,
            color,
            trigger: ToggleTrigger::new(
                TriggerPoint::new(Edge::Top, 0.5),
                TriggerPoint::new(Edge::Bottom, 0.5),
            ),
        })
    }

    pub fn section(&self) -> ElementId {
        self.section
    }

    /// Colour to transition to, if the section was just entered
    pub fn on_scroll(&mut self, doc: &Document) -> Option<Color> {
        let rect = doc.client_rect(self.section)?;
        let entered = self
            .trigger
            .update(rect, doc.viewport().height)
            .into_iter()
            .filter(|e| matches!(e, ToggleEvent::Enter | ToggleEvent::EnterBack))
            .count();
        (entered > 0).then_some(self.color)
    }
}

/// A running body background tween
#[derive(Clone, Copy, Debug)]
pub struct BackdropTransition {
    pub from: Color,
    pub to: Color,
    pub tween: TweenId,
}

impl BackdropTransition {
    /// Start from the body's current colour, replacing any running transition
    pub fn start(
        doc: &Document,
        theme: Option<&SharedTheme>,
        scheduler: &AnimationScheduler,
        to: Color,
        duration_s: f32,
    ) -> Self {
        let body = doc.root();
        scheduler.kill_tweens_of(body.target_key());
        let from = doc
            .style(body)
            .and_then(|s| s.background)
            .or_else(|| theme.map(|t| t.borrow().base_color()))
            .unwrap_or(DEFAULT_BASE_COLOR);
        let tween = scheduler.add(body.target_key(), Tween::new(duration_s * 1000.0));
        tracing::trace!("backdrop: {} -> {}", from.to_css(), to.to_css());
        Self { from, to, tween }
    }

    pub fn render(&self, doc: &mut Document, theme: Option<&SharedTheme>, progress: f32) {
        let color = Color::lerp(&self.from, &self.to, progress);
        let body = doc.root();
        if let Some(style) = doc.style_mut(body) {
            style.background = Some(color);
        }
        if let Some(theme) = theme {
            theme.borrow_mut().set_body_background(color.to_css());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::{Rect, Size};
    use insular_theme::ThemeState;

    #[test]
    fn test_section_requires_tag_and_colour() {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let div = doc.create_element(doc.root(), "div", Rect::new(0.0, 0.0, 10.0, 10.0));
        doc.set_attribute(div, ATTR_BG_COLOR, "#fff");
        assert!(SectionColor::read(&doc, div).is_none());

        let bad = doc.create_element(doc.root(), "section", Rect::new(0.0, 0.0, 10.0, 10.0));
        doc.set_attribute(bad, ATTR_BG_COLOR, "var(--nope)");
        assert!(SectionColor::read(&doc, bad).is_none());
    }

    #[test]
    fn test_transition_writes_body_and_theme() {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let section =
            doc.create_element(doc.root(), "section", Rect::new(0.0, 900.0, 1000.0, 600.0));
        doc.set_attribute(section, ATTR_BG_COLOR, "#ffffff");
        let theme = ThemeState::new().shared();
        let scheduler = AnimationScheduler::new();

        let mut colour = SectionColor::read(&doc, section).unwrap();
        assert_eq!(colour.on_scroll(&doc), None);
        doc.set_scroll_y(600.0);
        let to = colour.on_scroll(&doc).unwrap();

        let transition = BackdropTransition::start(&doc, Some(&theme), &scheduler, to, 0.6);
        assert_eq!(transition.from, DEFAULT_BASE_COLOR);
        scheduler.tick(700.0);
        transition.render(&mut doc, Some(&theme), scheduler.progress(transition.tween).unwrap());

        let body = doc.root();
        let background = doc.style(body).unwrap().background.unwrap();
        assert_eq!(background.to_rgb8(), [255, 255, 255]);
        assert_eq!(theme.borrow().body_background(), Some("rgb(255, 255, 255)"));
    }
}
