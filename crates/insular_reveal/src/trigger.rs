//! Viewport triggers
//!
//! Positions are written the way scroll-trigger markup writes them: an
//! element edge and a viewport line, e.g. `top 80%` is "the element's top
//! meets the line at 80% of the viewport height". All checks work on client
//! rects (layout boxes relative to the viewport), so scrolling down moves
//! every element up.

use insular_core::Rect;

/// Which edge of the element a trigger point follows
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

/// An element edge meeting a horizontal viewport line
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerPoint {
    pub edge: Edge,
    /// Viewport line as a fraction of the viewport height
    pub viewport_fraction: f32,
}

impl TriggerPoint {
    pub const fn new(edge: Edge, viewport_fraction: f32) -> Self {
        Self {
            edge,
            viewport_fraction,
        }
    }

    /// Signed distance still to scroll before the point is reached;
    /// zero or negative once it has been passed
    pub fn remaining(&self, rect: Rect, viewport_height: f32) -> f32 {
        let edge = match self.edge {
            Edge::Top => rect.top(),
            Edge::Center => rect.y() + rect.height() / 2.0,
            Edge::Bottom => rect.bottom(),
        };
        edge - viewport_height * self.viewport_fraction
    }

    pub fn is_passed(&self, rect: Rect, viewport_height: f32) -> bool {
        self.remaining(rect, viewport_height) <= 0.0
    }
}

/// Any part of `rect` overlaps the viewport height
pub fn in_viewport(rect: Rect, viewport_height: f32) -> bool {
    rect.top() <= viewport_height && rect.bottom() >= 0.0
}

/// Fires once, the first time its point is passed
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OneShotTrigger {
    point: TriggerPoint,
    fired: bool,
}

impl OneShotTrigger {
    pub fn new(point: TriggerPoint) -> Self {
        Self { point, fired: false }
    }

    pub fn fired(&self) -> bool {
        self.fired
    }

    /// True exactly once
    pub fn check(&mut self, rect: Rect, viewport_height: f32) -> bool {
        if self.fired || !self.point.is_passed(rect, viewport_height) {
            return false;
        }
        self.fired = true;
        true
    }
}

/// Scroll distance between two points, mapped onto `0.0..=1.0`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrubRange {
    pub start: TriggerPoint,
    pub end: TriggerPoint,
}

impl ScrubRange {
    pub const fn new(start: TriggerPoint, end: TriggerPoint) -> Self {
        Self { start, end }
    }

    pub fn progress(&self, rect: Rect, viewport_height: f32) -> f32 {
        let to_start = self.start.remaining(rect, viewport_height);
        let to_end = self.end.remaining(rect, viewport_height);
        // Both distances shrink at the scroll rate, so their difference is
        // the length of the range
        let length = to_end - to_start;
        if length <= 0.0 {
            return if to_start <= 0.0 { 1.0 } else { 0.0 };
        }
        (-to_start / length).clamp(0.0, 1.0)
    }
}

/// Callback points of a toggle trigger
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToggleEvent {
    /// Scrolling down past the start
    Enter,
    /// Scrolling down past the end
    Leave,
    /// Scrolling up past the end
    EnterBack,
    /// Scrolling up past the start
    LeaveBack,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Zone {
    Before,
    Active,
    After,
}

/// Reports every boundary crossing of a start/end range
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ToggleTrigger {
    range: ScrubRange,
    zone: Zone,
}

impl ToggleTrigger {
    pub fn new(start: TriggerPoint, end: TriggerPoint) -> Self {
        Self {
            range: ScrubRange::new(start, end),
            zone: Zone::Before,
        }
    }

    pub fn is_active(&self) -> bool {
        self.zone == Zone::Active
    }

    /// Re-evaluate after a scroll or resize, returning crossings in order
    pub fn update(&mut self, rect: Rect, viewport_height: f32) -> Vec<ToggleEvent> {
        let next = if !self.range.start.is_passed(rect, viewport_height) {
            Zone::Before
        } else if !self.range.end.is_passed(rect, viewport_height) {
            Zone::Active
        } else {
            Zone::After
        };

        let events = match (self.zone, next) {
            (Zone::Before, Zone::Active) => vec![ToggleEvent::Enter],
            (Zone::Before, Zone::After) => vec![ToggleEvent::Enter, ToggleEvent::Leave],
            (Zone::Active, Zone::After) => vec![ToggleEvent::Leave],
            (Zone::Active, Zone::Before) => vec![ToggleEvent::LeaveBack],
            (Zone::After, Zone::Active) => vec![ToggleEvent::EnterBack],
            (Zone::After, Zone::Before) => vec![ToggleEvent::EnterBack, ToggleEvent::LeaveBack],
            _ => Vec::new(),
        };
        self.zone = next;
        events
    }
}
