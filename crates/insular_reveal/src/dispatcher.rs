//! Reveal dispatcher
//!
//! Owns every trigger and tween of the current view:
//!
//! - `init` scans a subtree for hints, applies group staggers, plays
//!   entrances and counters already in view and arms one-shot triggers for
//!   the rest, then wires up the scroll effects
//! - `on_scroll` fires armed triggers and updates scroll-driven effects
//! - `tick` advances the tweens and writes their styles and text
//! - `cleanup` tears it all down except for tweens on preserved elements
//!
//! The dispatcher does not touch the host; [`RevealMount`](crate::RevealMount)
//! forwards frames and events to it.

use std::rc::Weak;

use insular_animation::{AnimationScheduler, TargetKey, TweenState};
use insular_core::Point;
use insular_theme::SharedTheme;
use rustc_hash::FxHashMap;
use tracing::{debug, trace};

use crate::config::RevealConfig;
use crate::counter::{ArmedCounter, NumericText, RunningCounter, ATTR_COUNTER};
use crate::dom::{Document, ElementId};
use crate::effects::backdrop::ATTR_BG_COLOR;
use crate::effects::marquee::ATTR_MARQUEE;
use crate::effects::parallax::ATTR_PARALLAX;
use crate::effects::pulse::ATTR_CTA_PULSE;
use crate::effects::words::ATTR_REVEAL_TEXT;
use crate::effects::{BackdropTransition, Marquee, Parallax, Pulse, SectionColor, WordReveal};
use crate::entrance::{settle, ArmedEntrance, RunningEntrance};
use crate::mount::MountState;
use crate::hints::{EntrancePlan, ATTR_ANIMATE};
use crate::stagger::{apply_group_staggers, StaggerUndo};
use crate::trigger::{in_viewport, Edge, TriggerPoint};

/// Elements at or below one carrying this keep their tweens on cleanup
pub const ATTR_PRESERVE: &str = "data-preserve-animation";

/// Snapshot of what the dispatcher currently holds
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevealStats {
    pub armed_entrances: usize,
    pub running_entrances: usize,
    pub armed_counters: usize,
    pub running_counters: usize,
    pub pulses: usize,
    pub parallax: usize,
    pub sections: usize,
    pub word_reveals: usize,
    pub marquees: usize,
    pub tweens: usize,
}

impl RevealStats {
    /// Scroll triggers still waiting or following scroll
    pub fn triggers(&self) -> usize {
        self.armed_entrances
            + self.armed_counters
            + self.pulses
            + self.parallax
            + self.sections
            + self.word_reveals
    }
}

pub struct RevealDispatcher {
    config: RevealConfig,
    scheduler: AnimationScheduler,
    theme: Option<SharedTheme>,
    reduced_motion: bool,
    root: Option<ElementId>,

    armed: Vec<ArmedEntrance>,
    entrances: FxHashMap<ElementId, RunningEntrance>,
    armed_counters: Vec<ArmedCounter>,
    counters: FxHashMap<ElementId, RunningCounter>,

    pulses: Vec<Pulse>,
    parallax: Vec<Parallax>,
    sections: Vec<SectionColor>,
    backdrop: Option<BackdropTransition>,
    words: Vec<WordReveal>,
    marquees: Vec<(ElementId, Marquee)>,

    stagger_undo: StaggerUndo,

    // the mount currently driving this dispatcher
    mount: Option<Weak<MountState>>,
}

impl RevealDispatcher {
    pub fn new(config: RevealConfig) -> Self {
        Self {
            config,
            scheduler: AnimationScheduler::new(),
            theme: None,
            reduced_motion: false,
            root: None,
            armed: Vec::new(),
            entrances: FxHashMap::default(),
            armed_counters: Vec::new(),
            counters: FxHashMap::default(),
            pulses: Vec::new(),
            parallax: Vec::new(),
            sections: Vec::new(),
            backdrop: None,
            words: Vec::new(),
            marquees: Vec::new(),
            stagger_undo: StaggerUndo::default(),
            mount: None,
        }
    }

    /// Theme the section colour transitions write the body background to
    pub fn with_theme(mut self, theme: SharedTheme) -> Self {
        self.theme = Some(theme);
        self
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &AnimationScheduler {
        &self.scheduler
    }

    /// Record the mount driving this dispatcher, returning the previous one
    pub(crate) fn replace_mount(&mut self, mount: Weak<MountState>) -> Option<Weak<MountState>> {
        self.mount.replace(mount)
    }

    pub fn set_reduced_motion(&mut self, reduced: bool) {
        self.reduced_motion = reduced;
    }

    pub fn is_initialized(&self) -> bool {
        self.root.is_some()
    }

    // Init

    /// Scan `root` and start or arm everything it declares
    ///
    /// Initialising again without a cleanup tears the previous view down
    /// first.
    pub fn init(&mut self, doc: &mut Document, root: ElementId) {
        if self.root.is_some() {
            debug!("RevealDispatcher: re-init without cleanup, tearing down first");
            self.cleanup(doc);
        }
        self.root = Some(root);

        if self.reduced_motion {
            self.scheduler.clear();
            self.entrances.clear();
            for (_, counter) in self.counters.drain() {
                counter.restore(doc);
            }
            self.pulses.clear();
            self.marquees.clear();
            self.backdrop = None;
            for id in doc.query_attribute(root, ATTR_ANIMATE) {
                settle(doc, id);
            }
            debug!("RevealDispatcher: reduced motion, everything at rest");
            return;
        }

        self.stagger_undo = apply_group_staggers(doc, root);
        let start = TriggerPoint::new(Edge::Top, self.config.trigger_start);
        let viewport_height = doc.viewport().height;

        for id in doc.query_attribute(root, ATTR_ANIMATE) {
            if self.entrances.contains_key(&id) {
                continue;
            }
            let Some(plan) = EntrancePlan::for_element(doc, id, &self.config) else {
                trace!("RevealDispatcher: {:?} has no usable animation kind", id);
                continue;
            };
            let visible = doc
                .client_rect(id)
                .is_some_and(|r| in_viewport(r, viewport_height));
            if visible {
                let running = RunningEntrance::start(doc, &self.scheduler, id, &plan);
                self.entrances.insert(id, running);
            } else {
                self.armed.push(ArmedEntrance::new(id, plan, start));
            }
        }

        let handle = self.scheduler.handle();
        for id in doc.query_attribute(root, ATTR_CTA_PULSE) {
            if self.pulses.iter().any(|p| p.element() == id) {
                continue;
            }
            let mut pulse = Pulse::create(&self.scheduler, id, &self.config);
            pulse.on_scroll(doc, &handle);
            self.pulses.push(pulse);
        }

        for id in doc.query_attribute(root, ATTR_COUNTER) {
            if self.counters.contains_key(&id) {
                continue;
            }
            let Some(text) = doc.text(id).and_then(NumericText::parse) else {
                trace!("RevealDispatcher: counter {:?} has no number, skipped", id);
                continue;
            };
            let visible = doc
                .client_rect(id)
                .is_some_and(|r| in_viewport(r, viewport_height));
            if visible {
                self.start_counter(doc, id, text);
            } else {
                self.armed_counters.push(ArmedCounter::new(id, text, start));
            }
        }

        for id in doc.query_attribute(root, ATTR_PARALLAX) {
            let parallax = Parallax::new(doc, id, self.config.parallax_speed);
            parallax.update(doc);
            self.parallax.push(parallax);
        }

        self.sections = doc
            .query_attribute(root, ATTR_BG_COLOR)
            .into_iter()
            .filter_map(|id| SectionColor::read(doc, id))
            .collect();

        for id in doc.query_attribute(root, ATTR_REVEAL_TEXT) {
            if let Some(reveal) = WordReveal::new(doc, id) {
                reveal.update(doc);
                self.words.push(reveal);
            }
        }

        for id in doc.query_attribute(root, ATTR_MARQUEE) {
            if self.marquees.iter().any(|(container, _)| *container == id) {
                continue;
            }
            match Marquee::start(doc, &self.scheduler, id, self.config.marquee_duration) {
                Some(marquee) => self.marquees.push((id, marquee)),
                None => trace!("RevealDispatcher: marquee {:?} has no items", id),
            }
        }

        // Sections already across the centre line take their colour now
        self.update_sections(doc);

        let stats = self.stats();
        debug!(
            "RevealDispatcher: init started {} entrances, armed {}, {} counters, {} triggers",
            stats.running_entrances,
            stats.armed_entrances,
            stats.running_counters + stats.armed_counters,
            stats.triggers()
        );
    }

    fn start_counter(&mut self, doc: &mut Document, id: ElementId, text: NumericText) {
        let counter = RunningCounter::start(
            doc,
            &self.scheduler,
            id,
            text,
            self.config.counter_duration,
            self.config.counter_ease,
        );
        self.counters.insert(id, counter);
    }

    // Input

    /// Re-evaluate every scroll trigger against the document's scroll offset
    pub fn on_scroll(&mut self, doc: &mut Document) {
        let mut fired = Vec::new();
        self.armed.retain_mut(|armed| {
            if armed.check(doc) {
                fired.push((armed.element, armed.plan));
                false
            } else {
                true
            }
        });
        for (id, plan) in fired {
            debug!("RevealDispatcher: trigger fired for {:?}", id);
            let running = RunningEntrance::start(doc, &self.scheduler, id, &plan);
            self.entrances.insert(id, running);
        }

        let mut fired_counters = Vec::new();
        self.armed_counters.retain_mut(|armed| {
            if armed.check(doc) {
                fired_counters.push((armed.element, armed.text.clone()));
                false
            } else {
                true
            }
        });
        for (id, text) in fired_counters {
            self.start_counter(doc, id, text);
        }

        let handle = self.scheduler.handle();
        for pulse in &mut self.pulses {
            pulse.on_scroll(doc, &handle);
        }
        for parallax in &self.parallax {
            parallax.update(doc);
        }
        for reveal in &self.words {
            reveal.update(doc);
        }
        self.update_sections(doc);
    }

    fn update_sections(&mut self, doc: &mut Document) {
        let mut next = None;
        for section in &mut self.sections {
            if let Some(color) = section.on_scroll(doc) {
                next = Some(color);
            }
        }
        if let Some(color) = next {
            let transition = BackdropTransition::start(
                doc,
                self.theme.as_ref(),
                &self.scheduler,
                color,
                self.config.backdrop_duration,
            );
            self.backdrop = Some(transition);
        }
    }

    /// Pointer position in client coordinates
    pub fn on_pointer_move(&mut self, doc: &Document, position: Point) {
        let handle = self.scheduler.handle();
        for pulse in &mut self.pulses {
            pulse.on_pointer_move(doc, &handle, position);
        }
    }

    pub fn on_pointer_leave(&mut self) {
        let handle = self.scheduler.handle();
        for pulse in &mut self.pulses {
            pulse.on_pointer_leave(&handle);
        }
    }

    // Frame

    /// Advance all tweens by `dt_ms` and write their current values
    ///
    /// Returns true while any tween is still playing.
    pub fn tick(&mut self, doc: &mut Document, dt_ms: f32) -> bool {
        let active = self.scheduler.tick(dt_ms);
        let scheduler = &self.scheduler;

        self.entrances.retain(|_, entrance| {
            let Some(progress) = scheduler.progress(entrance.tween) else {
                return false;
            };
            entrance.render(doc, progress);
            let done = scheduler.state(entrance.tween) == Some(TweenState::Finished);
            if done {
                scheduler.kill(entrance.tween);
            }
            !done
        });

        self.counters.retain(|_, counter| {
            let Some(progress) = scheduler.progress(counter.tween) else {
                return false;
            };
            counter.render(doc, progress);
            let done = scheduler.state(counter.tween) == Some(TweenState::Finished);
            if done {
                scheduler.kill(counter.tween);
            }
            !done
        });

        for pulse in &self.pulses {
            if let Some(progress) = scheduler.progress(pulse.tween()) {
                pulse.render(doc, progress);
            }
        }

        for (_, marquee) in &self.marquees {
            if let Some(progress) = scheduler.progress(marquee.tween()) {
                marquee.render(doc, progress);
            }
        }

        if let Some(transition) = self.backdrop {
            match scheduler.progress(transition.tween) {
                Some(progress) => {
                    transition.render(doc, self.theme.as_ref(), progress);
                    if scheduler.state(transition.tween) == Some(TweenState::Finished) {
                        scheduler.kill(transition.tween);
                        self.backdrop = None;
                    }
                }
                None => self.backdrop = None,
            }
        }

        active
    }

    // Teardown

    /// Kill every trigger and every tween outside preserved subtrees
    ///
    /// Safe to call any number of times.
    pub fn cleanup(&mut self, doc: &mut Document) {
        let armed = self.armed.len() + self.armed_counters.len();
        self.armed.clear();
        self.armed_counters.clear();
        self.parallax.clear();
        self.sections.clear();
        self.words.clear();
        for pulse in &mut self.pulses {
            pulse.detach_trigger();
        }

        let killed = self.scheduler.kill_all_except(|key: TargetKey| {
            doc.closest_with_attribute(ElementId::from_target(key), ATTR_PRESERVE)
                .is_some()
        });

        let scheduler = &self.scheduler;
        self.entrances
            .retain(|_, e| scheduler.state(e.tween).is_some());
        self.counters.retain(|_, c| {
            let alive = scheduler.state(c.tween).is_some();
            if !alive {
                c.restore(doc);
            }
            alive
        });
        self.pulses.retain(|p| scheduler.state(p.tween()).is_some());
        self.marquees
            .retain(|(_, m)| scheduler.state(m.tween()).is_some());
        if self
            .backdrop
            .is_some_and(|b| scheduler.state(b.tween).is_none())
        {
            self.backdrop = None;
        }

        self.stagger_undo.restore(doc);
        self.root = None;

        if armed > 0 || !killed.is_empty() {
            debug!(
                "RevealDispatcher: cleanup dropped {} armed triggers, killed {} tweens",
                armed,
                killed.len()
            );
        }
    }

    pub fn stats(&self) -> RevealStats {
        RevealStats {
            armed_entrances: self.armed.len(),
            running_entrances: self.entrances.len(),
            armed_counters: self.armed_counters.len(),
            running_counters: self.counters.len(),
            pulses: self.pulses.len(),
            parallax: self.parallax.len(),
            sections: self.sections.len(),
            word_reveals: self.words.len(),
            marquees: self.marquees.len(),
            tweens: self.scheduler.tween_count(),
        }
    }
}

impl Default for RevealDispatcher {
    fn default() -> Self {
        Self::new(RevealConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::{Rect, Size};

    fn page() -> (Document, ElementId, ElementId) {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let main = doc.create_element(doc.root(), "main", Rect::new(0.0, 0.0, 1000.0, 3000.0));
        let above = doc.create_element(main, "h1", Rect::new(0.0, 100.0, 600.0, 80.0));
        doc.set_attribute(above, ATTR_ANIMATE, "fade-up");
        let below = doc.create_element(main, "p", Rect::new(0.0, 2000.0, 600.0, 80.0));
        doc.set_attribute(below, ATTR_ANIMATE, "fade");
        (doc, above, below)
    }

    #[test]
    fn test_init_splits_visible_and_armed() {
        let (mut doc, above, below) = page();
        let mut dispatcher = RevealDispatcher::default();
        let root = doc.root();
        dispatcher.init(&mut doc, root);

        let stats = dispatcher.stats();
        assert_eq!(stats.running_entrances, 1);
        assert_eq!(stats.armed_entrances, 1);
        assert_eq!(doc.style(above).unwrap().motion.translate_y, 40.0);
        // armed entrances leave the element alone
        assert!(doc.style(below).unwrap().motion.is_at_rest());
    }

    #[test]
    fn test_tick_runs_entrance_to_rest() {
        let (mut doc, above, _) = page();
        let mut dispatcher = RevealDispatcher::default();
        let root = doc.root();
        dispatcher.init(&mut doc, root);

        assert!(dispatcher.tick(&mut doc, 450.0));
        let mid = doc.style(above).unwrap().motion;
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);

        dispatcher.tick(&mut doc, 500.0);
        assert!(doc.style(above).unwrap().motion.is_at_rest());
        assert_eq!(dispatcher.stats().running_entrances, 0);
    }

    #[test]
    fn test_reduced_motion_rests_everything() {
        let (mut doc, above, below) = page();
        let mut dispatcher = RevealDispatcher::default();
        dispatcher.set_reduced_motion(true);
        let root = doc.root();
        dispatcher.init(&mut doc, root);

        assert_eq!(dispatcher.stats(), RevealStats::default());
        assert!(doc.style(above).unwrap().motion.is_at_rest());
        assert!(doc.style(below).unwrap().motion.is_at_rest());
    }

    #[test]
    fn test_cleanup_keeps_preserved_tweens() {
        let (mut doc, above, _) = page();
        let canvas_wrap = doc.create_element(doc.root(), "div", Rect::new(0.0, 0.0, 300.0, 150.0));
        doc.set_attribute(canvas_wrap, ATTR_PRESERVE, "");
        let badge = doc.create_element(canvas_wrap, "span", Rect::new(0.0, 0.0, 50.0, 20.0));
        doc.set_attribute(badge, ATTR_ANIMATE, "scale");

        let mut dispatcher = RevealDispatcher::default();
        let root = doc.root();
        dispatcher.init(&mut doc, root);
        assert_eq!(dispatcher.stats().running_entrances, 2);

        dispatcher.cleanup(&mut doc);
        let stats = dispatcher.stats();
        assert_eq!(stats.running_entrances, 1);
        assert_eq!(stats.armed_entrances, 0);
        assert_eq!(stats.tweens, 1);
        // killed mid-flight, left where it was
        assert_eq!(doc.style(above).unwrap().motion.opacity, 0.0);

        dispatcher.tick(&mut doc, 1000.0);
        assert!(doc.style(badge).unwrap().motion.is_at_rest());
    }
}
