//! Dispatcher lifecycle against a headless host

use std::cell::RefCell;
use std::rc::Rc;

use insular_core::{Rect, Size};
use insular_platform::{Event, EventKind, HeadlessHost};
use insular_reveal::{Document, ElementId, RevealDispatcher, RevealMount, Style};

struct Page {
    doc: Document,
    group: ElementId,
    cards: Vec<ElementId>,
    rate: ElementId,
    footer_note: ElementId,
}

/// Hero with a staggered card group and a rate counter in view, and a note
/// far below the fold
fn page() -> Page {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let root = doc.root();
    let main = doc.create_element(root, "main", Rect::new(0.0, 0.0, 1280.0, 3000.0));

    let group = doc.create_element(main, "div", Rect::new(0.0, 100.0, 1280.0, 300.0));
    doc.set_attribute(group, "data-stagger", "0.12");
    let cards = (0..3)
        .map(|i| {
            let card = doc.create_element(
                group,
                "article",
                Rect::new(i as f32 * 400.0, 100.0, 380.0, 300.0),
            );
            doc.set_attribute(card, "data-animate", "fade-up");
            card
        })
        .collect::<Vec<_>>();
    doc.set_attribute(cards[1], "data-delay", "0.3");

    let rate = doc.create_element(main, "span", Rect::new(0.0, 500.0, 200.0, 40.0));
    doc.set_attribute(rate, "data-counter", "");
    doc.set_text(rate, "160,4479");

    let footer_note = doc.create_element(main, "p", Rect::new(0.0, 2400.0, 600.0, 60.0));
    doc.set_attribute(footer_note, "data-animate", "blur-up");

    Page {
        doc,
        group,
        cards,
        rate,
        footer_note,
    }
}

fn snapshot(doc: &Document) -> Vec<(Style, Option<String>, String)> {
    doc.subtree(doc.root())
        .into_iter()
        .map(|id| {
            (
                doc.style(id).cloned().unwrap_or_default(),
                doc.attribute(id, "data-delay").map(str::to_string),
                doc.text(id).unwrap_or_default().to_string(),
            )
        })
        .collect()
}

#[test]
fn test_stagger_writes_incremental_delays() {
    let Page {
        mut doc, cards, ..
    } = page();
    let mut dispatcher = RevealDispatcher::default();
    let root = doc.root();
    dispatcher.init(&mut doc, root);

    let delays: Vec<f32> = cards
        .iter()
        .map(|c| doc.attribute(*c, "data-delay").unwrap().parse().unwrap())
        .collect();
    assert!((delays[0] - 0.0).abs() < 1e-5);
    assert!((delays[1] - 0.42).abs() < 1e-5);
    assert!((delays[2] - 0.24).abs() < 1e-5);
}

#[test]
fn test_cleanup_twice_then_init_matches_fresh_init() {
    let Page { doc, .. } = page();
    let mut fresh_doc = doc;
    let mut fresh = RevealDispatcher::default();
    let root = fresh_doc.root();
    fresh.init(&mut fresh_doc, root);
    let expected = snapshot(&fresh_doc);
    let expected_stats = fresh.stats();

    let Page { mut doc, .. } = page();
    let mut dispatcher = RevealDispatcher::default();
    let root = doc.root();
    dispatcher.init(&mut doc, root);
    dispatcher.tick(&mut doc, 300.0);
    dispatcher.cleanup(&mut doc);
    dispatcher.cleanup(&mut doc);

    let stats = dispatcher.stats();
    assert_eq!(stats.triggers(), 0);
    assert_eq!(stats.tweens, 0);

    dispatcher.init(&mut doc, root);
    assert_eq!(snapshot(&doc), expected);
    assert_eq!(dispatcher.stats(), expected_stats);
}

#[test]
fn test_detach_twice_leaves_nothing_on_the_host() {
    let host = Rc::new(HeadlessHost::new());
    let Page { doc, .. } = page();
    let root = doc.root();
    let doc = Rc::new(RefCell::new(doc));
    let dispatcher = Rc::new(RefCell::new(RevealDispatcher::default()));

    let mount = RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root);
    host.advance(100.0);
    host.run_frames(5);
    assert!(host.listener_count() > 0);
    assert_eq!(host.pending_frames(), 1);

    mount.detach();
    mount.detach();
    assert_eq!(host.listener_count(), 0);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.timer_count(), 0);
    assert_eq!(dispatcher.borrow().stats().triggers(), 0);

    // nothing runs afterwards
    host.run_frames(3);
    host.dispatch(Event::scrolled(1800.0));
    assert_eq!(host.frames_run(), 8);
    assert!(!mount.is_attached());
}

#[test]
fn test_below_fold_fires_exactly_once() {
    let host = Rc::new(HeadlessHost::new());
    let Page {
        doc, footer_note, ..
    } = page();
    let root = doc.root();
    let doc = Rc::new(RefCell::new(doc));
    let dispatcher = Rc::new(RefCell::new(RevealDispatcher::default()));
    let _mount = RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root);
    host.advance(80.0);

    assert!(doc.borrow().style(footer_note).unwrap().motion.is_at_rest());
    assert_eq!(dispatcher.borrow().stats().armed_entrances, 1);

    // top at 2400 - 1800 = 600 <= 640
    host.dispatch(Event::scrolled(1800.0));
    assert_eq!(dispatcher.borrow().stats().armed_entrances, 0);
    assert_eq!(doc.borrow().style(footer_note).unwrap().motion.blur, 12.0);

    host.run_frames(90);
    assert!(doc.borrow().style(footer_note).unwrap().motion.is_at_rest());

    for scroll_y in [0.0, 1800.0, 0.0, 2000.0, 1500.0] {
        host.dispatch(Event::scrolled(scroll_y));
        host.run_frame();
        let d = dispatcher.borrow();
        assert_eq!(d.stats().running_entrances, 0);
        assert_eq!(d.stats().armed_entrances, 0);
        assert!(doc.borrow().style(footer_note).unwrap().motion.is_at_rest());
    }
}

#[test]
fn test_counter_restores_exact_text() {
    let Page {
        mut doc, rate, ..
    } = page();
    let mut dispatcher = RevealDispatcher::default();
    let root = doc.root();
    dispatcher.init(&mut doc, root);
    assert_eq!(doc.text(rate), Some("0,0000"));

    dispatcher.tick(&mut doc, 1000.0);
    let mid = doc.text(rate).unwrap().to_string();
    assert_ne!(mid, "0,0000");
    assert_ne!(mid, "160,4479");
    assert!(mid.contains(','));

    dispatcher.tick(&mut doc, 1000.0);
    assert_eq!(doc.text(rate), Some("160,4479"));
    assert_eq!(dispatcher.stats().running_counters, 0);
}

#[test]
fn test_counter_killed_by_cleanup_shows_original() {
    let Page {
        mut doc, rate, ..
    } = page();
    let mut dispatcher = RevealDispatcher::default();
    let root = doc.root();
    dispatcher.init(&mut doc, root);
    dispatcher.tick(&mut doc, 500.0);
    dispatcher.cleanup(&mut doc);
    assert_eq!(doc.text(rate), Some("160,4479"));
}

#[test]
fn test_reduced_motion_host() {
    let host = Rc::new(HeadlessHost::new());
    host.set_reduced_motion(true);
    let Page {
        doc, group, cards, ..
    } = page();
    let root = doc.root();
    let doc = Rc::new(RefCell::new(doc));
    let dispatcher = Rc::new(RefCell::new(RevealDispatcher::default()));
    let _mount = RevealMount::attach(host.clone(), doc.clone(), dispatcher.clone(), root);
    host.advance(80.0);

    let doc = doc.borrow();
    assert!(doc.has_attribute(group, "data-stagger"));
    assert!(doc.attribute(cards[0], "data-delay").is_none());
    for card in cards {
        assert!(doc.style(card).unwrap().motion.is_at_rest());
    }
    assert_eq!(dispatcher.borrow().stats().tweens, 0);
    assert_eq!(host.listener_count_for(EventKind::Scroll), 1);
}
