//! Insular Animation System
//!
//! Timed tweens driven by the host's frame loop.
//!
//! # Features
//!
//! - **Easing**: the named curves page authors write in markup (`power2.out`,
//!   `sine.inOut`, `back.out`, ...)
//! - **Tweens**: delay, duration, repeat and yoyo timing with pause/resume
//! - **Scheduler**: a slotmap-backed registry ticked once per frame, with a
//!   weak [`SchedulerHandle`] for effects that should not keep it alive
//! - **Interpolation**: [`Interpolate`] for scalars, points and colours

pub mod easing;
pub mod scheduler;
pub mod tween;
pub mod values;

pub use easing::{EaseDirection, Easing, UnknownEasing};
pub use scheduler::{AnimationScheduler, SchedulerHandle, TargetKey, TweenId};
pub use tween::{Repeat, Tween, TweenState};
pub use values::Interpolate;
