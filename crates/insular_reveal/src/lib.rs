//! Insular Reveal
//!
//! Attribute-driven scroll animations for a document:
//!
//! - **Entrances**: `data-animate="fade-up"` and friends, tuned with
//!   `data-delay`, `data-duration`, `data-ease`, `data-distance`,
//!   `data-skew` and `data-rotate`; played at once when in view, otherwise
//!   armed to fire once when the element's top crosses 80% of the viewport
//! - **Stagger groups**: `data-stagger` offsets the delays of the animated
//!   elements below it
//! - **Counters**: `data-counter` counts displayed numbers up from zero
//! - **Scroll effects**: CTA pulse, parallax, section colour transitions,
//!   word-by-word text reveal and an endless marquee
//!
//! [`RevealDispatcher`] holds the state of one view; [`RevealMount`] binds it
//! to a [`FrameHost`](insular_platform::FrameHost).
//!
//! # Example
//!
//! ```rust
//! use insular_core::{Rect, Size};
//! use insular_reveal::{Document, RevealDispatcher};
//!
//! let mut doc = Document::new(Size::new(1280.0, 800.0));
//! let root = doc.root();
//! let title = doc.create_element(root, "h1", Rect::new(0.0, 120.0, 600.0, 80.0));
//! doc.set_attribute(title, "data-animate", "fade-up");
//!
//! let mut dispatcher = RevealDispatcher::default();
//! dispatcher.init(&mut doc, root);
//! assert_eq!(doc.style(title).unwrap().motion.translate_y, 40.0);
//!
//! dispatcher.tick(&mut doc, 1000.0);
//! assert!(doc.style(title).unwrap().motion.is_at_rest());
//! ```

pub mod config;
pub mod counter;
pub mod dispatcher;
pub mod dom;
pub mod effects;
pub mod entrance;
pub mod hints;
pub mod mount;
pub mod page;
pub mod stagger;
pub mod style;
pub mod trigger;

// ─────────────────────────────────────────────────────────────────────────────
// Document
// ─────────────────────────────────────────────────────────────────────────────

pub use dom::{Document, Element, ElementId};
pub use page::{ElementDescription, PageDescription};
pub use style::{MotionStyle, Style, TransformOrigin};

// ─────────────────────────────────────────────────────────────────────────────
// Hints and triggers
// ─────────────────────────────────────────────────────────────────────────────

pub use counter::NumericText;
pub use hints::{AnimationKind, EntrancePlan, RevealOverrides, UnknownKind};
pub use stagger::{apply_group_staggers, StaggerGroup};
pub use trigger::{in_viewport, Edge, OneShotTrigger, ScrubRange, ToggleEvent, ToggleTrigger, TriggerPoint};

// ─────────────────────────────────────────────────────────────────────────────
// Dispatch
// ─────────────────────────────────────────────────────────────────────────────

pub use config::RevealConfig;
pub use dispatcher::{RevealDispatcher, RevealStats, ATTR_PRESERVE};
pub use mount::RevealMount;
