//! Group stagger
//!
//! A container with `data-stagger="<step>"` offsets the `data-delay` of every
//! `[data-animate]` element below it by `index * step`, in document order,
//! on top of whatever delay the element already declares.

use insular_core::parse_float_prefix;

use crate::dom::{Document, ElementId};
use crate::hints::{read_number, ATTR_ANIMATE, ATTR_DELAY};

pub const ATTR_STAGGER: &str = "data-stagger";

/// A stagger container and its step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StaggerGroup {
    pub group: ElementId,
    /// seconds
    pub step: f32,
}

impl StaggerGroup {
    /// Read the step of `group`, `None` when non-finite or not positive
    pub fn read(doc: &Document, group: ElementId) -> Option<Self> {
        let raw = doc.attribute(group, ATTR_STAGGER)?;
        let step = parse_float_prefix(raw).map(|(v, _)| v as f32)?;
        (step.is_finite() && step > 0.0).then_some(Self { group, step })
    }
}

/// `data-delay` values as they were before a stagger pass rewrote them
#[derive(Debug, Default)]
pub struct StaggerUndo {
    previous: Vec<(ElementId, Option<String>)>,
}

impl StaggerUndo {
    pub fn is_empty(&self) -> bool {
        self.previous.is_empty()
    }

    /// Put every rewritten `data-delay` back, in reverse order so an element
    /// staggered by nested groups ends at its first value
    pub fn restore(&mut self, doc: &mut Document) {
        for (id, value) in self.previous.drain(..).rev() {
            match value {
                Some(v) => doc.set_attribute(id, ATTR_DELAY, v),
                None => {
                    doc.remove_attribute(id, ATTR_DELAY);
                }
            }
        }
    }
}

/// Apply every stagger group under `root`, returning how to undo it
pub fn apply_group_staggers(doc: &mut Document, root: ElementId) -> StaggerUndo {
    let mut undo = StaggerUndo::default();
    let groups: Vec<StaggerGroup> = doc
        .query_attribute(root, ATTR_STAGGER)
        .into_iter()
        .filter_map(|g| StaggerGroup::read(doc, g))
        .collect();

    for group in groups {
        let children: Vec<ElementId> = doc
            .descendants(group.group)
            .into_iter()
            .filter(|id| doc.has_attribute(*id, ATTR_ANIMATE))
            .collect();

        for (index, child) in children.iter().enumerate() {
            let base = read_number(doc, *child, ATTR_DELAY).unwrap_or(0.0);
            let total = base + index as f32 * group.step;
            let previous = doc.attribute(*child, ATTR_DELAY).map(str::to_string);
            undo.previous.push((*child, previous));
            doc.set_attribute(*child, ATTR_DELAY, total.to_string());
        }
        tracing::trace!(
            "stagger: {} children at {}s step",
            children.len(),
            group.step
        );
    }
    undo
}

#[cfg(test)]
mod tests {
    use super::*;
    use insular_core::{Rect, Size};

    fn group(step: &str, delays: &[Option<&str>]) -> (Document, Vec<ElementId>) {
        let mut doc = Document::new(Size::new(1000.0, 800.0));
        let g = doc.create_element(doc.root(), "ul", Rect::new(0.0, 0.0, 1000.0, 400.0));
        doc.set_attribute(g, ATTR_STAGGER, step);
        let children = delays
            .iter()
            .map(|delay| {
                let li = doc.create_element(g, "li", Rect::new(0.0, 0.0, 100.0, 40.0));
                doc.set_attribute(li, ATTR_ANIMATE, "fade-up");
                if let Some(d) = delay {
                    doc.set_attribute(li, ATTR_DELAY, *d);
                }
                li
            })
            .collect();
        (doc, children)
    }

    fn delays(doc: &Document, ids: &[ElementId]) -> Vec<f32> {
        ids.iter()
            .map(|id| read_number(doc, *id, ATTR_DELAY).unwrap_or(0.0))
            .collect()
    }

    #[test]
    fn test_stagger_is_additive() {
        let (mut doc, kids) = group("0.1", &[None, Some("0.5"), None]);
        let root = doc.root();
        apply_group_staggers(&mut doc, root);
        let d = delays(&doc, &kids);
        assert!((d[0] - 0.0).abs() < 1e-6);
        assert!((d[1] - 0.6).abs() < 1e-6);
        assert!((d[2] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_stagger_monotonic_with_equal_base() {
        let (mut doc, kids) = group("0.15", &[Some("0.2"); 5]);
        let root = doc.root();
        apply_group_staggers(&mut doc, root);
        let d = delays(&doc, &kids);
        assert!(d.windows(2).all(|w| w[0] <= w[1]));
        for (i, v) in d.iter().enumerate() {
            assert!((v - (0.2 + i as f32 * 0.15)).abs() < 1e-5);
        }
    }

    #[test]
    fn test_invalid_step_is_ignored() {
        for step in ["0", "-1", "fast", ""] {
            let (mut doc, kids) = group(step, &[None, None]);
            let root = doc.root();
            let undo = apply_group_staggers(&mut doc, root);
            assert!(undo.is_empty());
            assert!(kids.iter().all(|id| doc.attribute(*id, ATTR_DELAY).is_none()));
        }
    }

    #[test]
    fn test_restore_puts_back_original_delays() {
        let (mut doc, kids) = group("0.1", &[None, Some("0.5")]);
        let root = doc.root();
        let mut undo = apply_group_staggers(&mut doc, root);
        undo.restore(&mut doc);
        assert_eq!(doc.attribute(kids[0], ATTR_DELAY), None);
        assert_eq!(doc.attribute(kids[1], ATTR_DELAY), Some("0.5"));
    }
}
