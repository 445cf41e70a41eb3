//! Entrance timing and offsets seen from the document

use insular_core::{Rect, Size};
use insular_reveal::{Document, ElementId, RevealConfig, RevealDispatcher};

fn container_with_child(attrs: &[(&str, &str)]) -> (Document, ElementId, ElementId) {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let root = doc.root();
    let container = doc.create_element(root, "section", Rect::new(0.0, 0.0, 1280.0, 800.0));
    let child = doc.create_element(container, "div", Rect::new(100.0, 200.0, 500.0, 120.0));
    for (name, value) in attrs {
        doc.set_attribute(child, name, *value);
    }
    (doc, container, child)
}

#[test]
fn test_fade_up_in_view_starts_immediately() {
    let (mut doc, container, child) = container_with_child(&[("data-animate", "fade-up")]);
    let mut dispatcher = RevealDispatcher::default();
    dispatcher.init(&mut doc, container);

    let start = doc.style(child).unwrap().motion;
    assert_eq!(start.opacity, 0.0);
    assert_eq!(start.translate_y, 40.0);
    assert_eq!(dispatcher.stats().running_entrances, 1);

    // halfway through 0.9s, power2.out has covered 87.5%
    dispatcher.tick(&mut doc, 450.0);
    let mid = doc.style(child).unwrap().motion;
    assert!((mid.opacity - 0.875).abs() < 1e-4);
    assert!((mid.translate_y - 5.0).abs() < 1e-3);

    dispatcher.tick(&mut doc, 450.0);
    let end = doc.style(child).unwrap().motion;
    assert_eq!(end.translate_y, 0.0);
    assert_eq!(end.opacity, 1.0);
    assert_eq!(dispatcher.stats().running_entrances, 0);
}

#[test]
fn test_distance_override_on_upward_start() {
    let (mut doc, container, child) =
        container_with_child(&[("data-animate", "fade-down"), ("data-distance", "80")]);
    let mut dispatcher = RevealDispatcher::default();
    dispatcher.init(&mut doc, container);
    assert_eq!(doc.style(child).unwrap().motion.translate_y, -80.0);
}

#[test]
fn test_delay_holds_offset_state() {
    let (mut doc, container, child) =
        container_with_child(&[("data-animate", "scale"), ("data-delay", "0.5")]);
    let mut dispatcher = RevealDispatcher::default();
    dispatcher.init(&mut doc, container);

    dispatcher.tick(&mut doc, 400.0);
    let held = doc.style(child).unwrap().motion;
    assert_eq!(held.opacity, 0.0);
    assert_eq!(held.scale, 0.9);

    dispatcher.tick(&mut doc, 1100.0);
    assert!(doc.style(child).unwrap().motion.is_at_rest());
}

#[test]
fn test_tilt_keeps_perspective_until_done() {
    let (mut doc, container, child) = container_with_child(&[("data-animate", "tilt")]);
    let mut dispatcher = RevealDispatcher::default();
    dispatcher.init(&mut doc, container);

    dispatcher.tick(&mut doc, 300.0);
    let mid = doc.style(child).unwrap();
    assert_eq!(mid.motion.perspective, Some(800.0));
    assert!(mid.motion.rotate_x < 0.0);
    assert_eq!(mid.transform_origin.y, 100.0);

    dispatcher.tick(&mut doc, 700.0);
    assert_eq!(doc.style(child).unwrap().motion.perspective, None);
}

#[test]
fn test_config_defaults_apply() {
    let config: RevealConfig = RevealConfig {
        duration: 0.4,
        distance: 64.0,
        ..RevealConfig::default()
    };
    let (mut doc, container, child) = container_with_child(&[("data-animate", "fade-left")]);
    let mut dispatcher = RevealDispatcher::new(config);
    dispatcher.init(&mut doc, container);
    assert_eq!(doc.style(child).unwrap().motion.translate_x, 64.0);

    dispatcher.tick(&mut doc, 400.0);
    assert!(doc.style(child).unwrap().motion.is_at_rest());
}
