//! Entrance animations
//!
//! An entrance tweens an element from its kind's offset state to rest. The
//! offset state is written as soon as the entrance starts, so an element
//! waiting out its delay stays hidden.

use insular_animation::{AnimationScheduler, Interpolate, Tween, TweenId};

use crate::dom::{Document, ElementId};
use crate::hints::EntrancePlan;
use crate::style::MotionStyle;
use crate::trigger::{OneShotTrigger, TriggerPoint};

/// An entrance waiting for its element to scroll into view
#[derive(Clone, Copy, Debug)]
pub struct ArmedEntrance {
    pub element: ElementId,
    pub plan: EntrancePlan,
    trigger: OneShotTrigger,
}

impl ArmedEntrance {
    pub fn new(element: ElementId, plan: EntrancePlan, start: TriggerPoint) -> Self {
        Self {
            element,
            plan,
            trigger: OneShotTrigger::new(start),
        }
    }

    /// True the first time the element passes its start point
    pub fn check(&mut self, doc: &Document) -> bool {
        match doc.client_rect(self.element) {
            Some(rect) => self.trigger.check(rect, doc.viewport().height),
            None => false,
        }
    }

    pub fn fired(&self) -> bool {
        self.trigger.fired()
    }
}

/// A started entrance
#[derive(Clone, Copy, Debug)]
pub struct RunningEntrance {
    pub element: ElementId,
    pub from: MotionStyle,
    pub tween: TweenId,
}

impl RunningEntrance {
    /// Write the offset state and register the tween
    pub fn start(
        doc: &mut Document,
        scheduler: &AnimationScheduler,
        element: ElementId,
        plan: &EntrancePlan,
    ) -> Self {
        if let Some(style) = doc.style_mut(element) {
            style.motion = plan.from;
            style.transform_origin = plan.origin;
        }
        let tween = Tween::new(plan.duration * 1000.0)
            .with_delay(plan.delay * 1000.0)
            .with_easing(plan.easing);
        let tween = scheduler.add(element.target_key(), tween);
        tracing::trace!(
            "entrance: {} on {:?} over {}s after {}s",
            plan.kind,
            element,
            plan.duration,
            plan.delay
        );
        Self {
            element,
            from: plan.from,
            tween,
        }
    }

    /// Render eased `progress`
    pub fn render(&self, doc: &mut Document, progress: f32) {
        if let Some(style) = doc.style_mut(self.element) {
            style.motion = self.from.lerp(&MotionStyle::REST, progress);
        }
    }
}

/// Force an element to its resting state
pub fn settle(doc: &mut Document, element: ElementId) {
    if let Some(style) = doc.style_mut(element) {
        style.motion = MotionStyle::REST;
    }
}
