//! CTA pulse
//!
//! `data-cta-pulse` elements breathe between scale 1 and a small peak on an
//! endless yoyo. The pulse plays while the element is in the lower part of
//! the viewport range, rewinds when it leaves, and holds still under the
//! pointer.

use insular_animation::{
    AnimationScheduler, EaseDirection, Easing, Repeat, SchedulerHandle, Tween, TweenId,
};
use insular_core::Point;

use crate::config::RevealConfig;
use crate::dom::{Document, ElementId};
use crate::trigger::{Edge, ToggleEvent, ToggleTrigger, TriggerPoint};

pub const ATTR_CTA_PULSE: &str = "data-cta-pulse";

pub struct Pulse {
    element: ElementId,
    tween: TweenId,
    peak: f32,
    trigger: Option<ToggleTrigger>,
    hovered: bool,
}

impl Pulse {
    /// Register a paused pulse for `element`
    pub fn create(
        scheduler: &AnimationScheduler,
        element: ElementId,
        config: &RevealConfig,
    ) -> Self {
        let tween = Tween::new(config.pulse_duration * 1000.0)
            .with_repeat(Repeat::Infinite)
            .with_yoyo(true)
            .with_easing(Easing::Sine(EaseDirection::InOut));
        let tween = scheduler.add(element.target_key(), tween);
        scheduler.with_tween_mut(tween, Tween::pause);
        Self {
            element,
            tween,
            peak: config.pulse_scale,
            trigger: Some(ToggleTrigger::new(
                TriggerPoint::new(Edge::Top, config.pulse_start),
                TriggerPoint::new(Edge::Bottom, 0.0),
            )),
            hovered: false,
        }
    }

    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn tween(&self) -> TweenId {
        self.tween
    }

    /// Stop following scroll; the tween keeps whatever state it has
    pub fn detach_trigger(&mut self) {
        self.trigger = None;
    }

    /// Play or rewind on boundary crossings
    pub fn on_scroll(&mut self, doc: &mut Document, handle: &SchedulerHandle) {
        let (Some(trigger), Some(rect)) = (self.trigger.as_mut(), doc.client_rect(self.element))
        else {
            return;
        };
        for event in trigger.update(rect, doc.viewport().height) {
            match event {
                ToggleEvent::Enter | ToggleEvent::EnterBack => handle.resume(self.tween),
                ToggleEvent::Leave | ToggleEvent::LeaveBack => {
                    handle.with_tween_mut(self.tween, |t| {
                        t.restart();
                        t.pause();
                    });
                    self.render(doc, 0.0);
                }
            }
        }
    }

    /// Hover tracking from a pointer position in client coordinates
    pub fn on_pointer_move(&mut self, doc: &Document, handle: &SchedulerHandle, position: Point) {
        let over = doc
            .client_rect(self.element)
            .is_some_and(|r| r.contains(position));
        if over == self.hovered {
            return;
        }
        self.hovered = over;
        if over {
            handle.pause(self.tween);
        } else {
            handle.resume(self.tween);
        }
    }

    pub fn on_pointer_leave(&mut self, handle: &SchedulerHandle) {
        if self.hovered {
            self.hovered = false;
            handle.resume(self.tween);
        }
    }

    pub fn render(&self, doc: &mut Document, progress: f32) {
        if let Some(style) = doc.style_mut(self.element) {
            style.motion.scale = 1.0 + (self.peak - 1.0) * progress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_animation::TweenState;
    use insular_core::{Rect, Size};

    #[test]
    fn test_pulse_follows_viewport() {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let cta = doc.create_element(doc.root(), "a", Rect::new(0.0, 1000.0, 200.0, 50.0));
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let mut pulse = Pulse::create(&scheduler, cta, &RevealConfig::default());

        pulse.on_scroll(&mut doc, &handle);
        assert_eq!(scheduler.state(pulse.tween()), Some(TweenState::Paused));

        // top at 600 < 0.85 * 800
        doc.set_scroll_y(400.0);
        pulse.on_scroll(&mut doc, &handle);
        assert_eq!(scheduler.state(pulse.tween()), Some(TweenState::Running));

        scheduler.tick(600.0);
        pulse.render(&mut doc, scheduler.progress(pulse.tween()).unwrap());
        let scale = doc.style(cta).unwrap().motion.scale;
        assert!(scale > 1.0 && scale < 1.045);

        doc.set_scroll_y(0.0);
        pulse.on_scroll(&mut doc, &handle);
        assert_eq!(scheduler.state(pulse.tween()), Some(TweenState::Paused));
        assert_eq!(doc.style(cta).unwrap().motion.scale, 1.0);
    }

    #[test]
    fn test_hover_pauses() {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let cta = doc.create_element(doc.root(), "a", Rect::new(0.0, 100.0, 200.0, 50.0));
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();
        let mut pulse = Pulse::create(&scheduler, cta, &RevealConfig::default());
        pulse.on_scroll(&mut doc, &handle);

        pulse.on_pointer_move(&doc, &handle, Point::new(50.0, 120.0));
        assert_eq!(scheduler.state(pulse.tween()), Some(TweenState::Paused));
        pulse.on_pointer_leave(&handle);
        assert_eq!(scheduler.state(pulse.tween()), Some(TweenState::Running));
    }
}
