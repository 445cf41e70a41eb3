//! Scroll and pointer effects beyond the one-shot entrances

pub mod backdrop;
pub mod marquee;
pub mod parallax;
pub mod pulse;
pub mod words;

pub use backdrop::{BackdropTransition, SectionColor};
pub use marquee::Marquee;
pub use parallax::Parallax;
pub use pulse::Pulse;
pub use words::{word_color, WordReveal};
