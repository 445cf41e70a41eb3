//! Endless marquee
//!
//! The track of a `data-marquee` element (its child marked
//! `data-marquee-track`, or else its first child) slides left by half its
//! total item width, linearly and forever. Tracks are expected to hold their
//! items twice so the loop is seamless.

use insular_animation::{AnimationScheduler, Easing, Repeat, Tween, TweenId};

use crate::dom::{Document, ElementId};

pub const ATTR_MARQUEE: &str = "data-marquee";
pub const ATTR_MARQUEE_TRACK: &str = "data-marquee-track";

#[derive(Clone, Copy, Debug)]
pub struct Marquee {
    track: ElementId,
    shift: f32,
    tween: TweenId,
}

impl Marquee {
    /// `None` when there is no track or the track has no items
    pub fn start(
        doc: &Document,
        scheduler: &AnimationScheduler,
        container: ElementId,
        duration_s: f32,
    ) -> Option<Self> {
        let children = doc.children(container);
        let track = children
            .iter()
            .copied()
            .find(|c| doc.has_attribute(*c, ATTR_MARQUEE_TRACK))
            .or_else(|| children.first().copied())?;

        let items = doc.children(track);
        let item_width = doc.layout(*items.first()?)?.width();
        let shift = -(item_width * items.len() as f32) / 2.0;

        let tween = Tween::new(duration_s * 1000.0)
            .with_easing(Easing::Linear)
            .with_repeat(Repeat::Infinite);
        let tween = scheduler.add(track.target_key(), tween);
        tracing::trace!("marquee: {} items, shift {}px", items.len(), shift);
        Some(Self {
            track,
            shift,
            tween,
        })
    }

    pub fn track(&self) -> ElementId {
        self.track
    }

    pub fn tween(&self) -> TweenId {
        self.tween
    }

    pub fn render(&self, doc: &mut Document, progress: f32) {
        if let Some(style) = doc.style_mut(self.track) {
            style.motion.translate_x = self.shift * progress;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::{Rect, Size};

    #[test]
    fn test_marquee_loops_over_half_the_track() {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let strip = doc.create_element(doc.root(), "div", Rect::new(0.0, 0.0, 1000.0, 80.0));
        let track = doc.create_element(strip, "div", Rect::new(0.0, 0.0, 1600.0, 80.0));
        for i in 0..8 {
            doc.create_element(track, "img", Rect::new(i as f32 * 200.0, 0.0, 200.0, 80.0));
        }
        let scheduler = AnimationScheduler::new();
        let marquee = Marquee::start(&doc, &scheduler, strip, 20.0).unwrap();

        scheduler.tick(5000.0);
        marquee.render(&mut doc, scheduler.progress(marquee.tween()).unwrap());
        assert!((doc.style(track).unwrap().motion.translate_x + 200.0).abs() < 1e-3);

        // wraps around after one loop
        scheduler.tick(20_000.0);
        marquee.render(&mut doc, scheduler.progress(marquee.tween()).unwrap());
        assert!((doc.style(track).unwrap().motion.translate_x + 200.0).abs() < 1e-3);
    }

    #[test]
    fn test_empty_track_is_skipped() {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let strip = doc.create_element(doc.root(), "div", Rect::new(0.0, 0.0, 1000.0, 80.0));
        doc.create_element(strip, "div", Rect::new(0.0, 0.0, 0.0, 80.0));
        let scheduler = AnimationScheduler::new();
        assert!(Marquee::start(&doc, &scheduler, strip, 20.0).is_none());
    }
}
