//! Tween timing
//!
//! A [`Tween`] only knows about time: delay, duration, repeats and yoyo.
//! What it animates is up to the owner, which reads [`Tween::progress`] after
//! each tick and interpolates its own from/to values.

use crate::easing::Easing;

/// How many extra iterations play after the first
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Repeat {
    #[default]
    Never,
    Times(u32),
    Infinite,
}

/// Lifecycle of a tween
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TweenState {
    /// Waiting out its delay
    Delayed,
    Running,
    Paused,
    Finished,
}

/// Timing for a single tween
#[derive(Clone, Debug)]
pub struct Tween {
    delay_ms: f32,
    duration_ms: f32,
    easing: Easing,
    repeat: Repeat,
    yoyo: bool,
    elapsed_ms: f32,
    paused: bool,
}

impl Tween {
    pub fn new(duration_ms: f32) -> Self {
        Self {
            delay_ms: 0.0,
            duration_ms: duration_ms.max(0.0),
            easing: Easing::default(),
            repeat: Repeat::Never,
            yoyo: false,
            elapsed_ms: 0.0,
            paused: false,
        }
    }

    pub fn with_delay(mut self, delay_ms: f32) -> Self {
        self.delay_ms = delay_ms.max(0.0);
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Alternate direction on every repeat
    pub fn with_yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    pub fn delay_ms(&self) -> f32 {
        self.delay_ms
    }

    pub fn duration_ms(&self) -> f32 {
        self.duration_ms
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn repeat(&self) -> Repeat {
        self.repeat
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Advance the tween clock. Paused and finished tweens do not move.
    pub fn tick(&mut self, dt_ms: f32) {
        if self.paused || self.is_finished() {
            return;
        }
        self.elapsed_ms += dt_ms.max(0.0);
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Rewind to the start (including the delay)
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.paused = false;
    }

    /// Jump straight to the end state
    pub fn complete(&mut self) {
        self.paused = false;
        match self.total_ms() {
            Some(total) => self.elapsed_ms = total,
            None => self.elapsed_ms = self.delay_ms,
        }
    }

    /// Total run time including delay, `None` for infinite repeats
    fn total_ms(&self) -> Option<f32> {
        let iterations = match self.repeat {
            Repeat::Never => 1,
            Repeat::Times(n) => n.saturating_add(1),
            Repeat::Infinite => return None,
        };
        Some(self.delay_ms + self.duration_ms * iterations as f32)
    }

    pub fn is_finished(&self) -> bool {
        match self.total_ms() {
            Some(total) => self.elapsed_ms >= total,
            None => false,
        }
    }

    /// Running or waiting on its delay, and not paused
    pub fn is_playing(&self) -> bool {
        !self.paused && !self.is_finished()
    }

    pub fn state(&self) -> TweenState {
        if self.is_finished() {
            TweenState::Finished
        } else if self.paused {
            TweenState::Paused
        } else if self.elapsed_ms < self.delay_ms {
            TweenState::Delayed
        } else {
            TweenState::Running
        }
    }

    /// Linear progress through the current iteration, yoyo applied
    pub fn linear_progress(&self) -> f32 {
        let (iteration, local) = if self.is_finished() {
            let last = match self.repeat {
                Repeat::Times(n) => n,
                _ => 0,
            };
            (last, 1.0)
        } else {
            let active = self.elapsed_ms - self.delay_ms;
            if active <= 0.0 {
                return 0.0;
            }
            if self.duration_ms <= 0.0 {
                return 1.0;
            }
            let iteration = (active / self.duration_ms).floor();
            let local = (active - iteration * self.duration_ms) / self.duration_ms;
            (iteration as u32, local)
        };

        if self.yoyo && iteration % 2 == 1 {
            1.0 - local
        } else {
            local
        }
    }

    /// Eased progress, 0.0 at the start and 1.0 at the end of an iteration
    pub fn progress(&self) -> f32 {
        self.easing.apply(self.linear_progress())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::EaseDirection;

    #[test]
    fn test_delay_then_run() {
        let mut t = Tween::new(900.0).with_delay(200.0);
        assert_eq!(t.state(), TweenState::Delayed);
        t.tick(100.0);
        assert_eq!(t.progress(), 0.0);
        t.tick(550.0);
        assert_eq!(t.state(), TweenState::Running);
        assert!((t.linear_progress() - 0.5).abs() < 1e-5);
        t.tick(1000.0);
        assert!(t.is_finished());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_eased_progress() {
        let mut t = Tween::new(1000.0).with_easing(Easing::Power(2, EaseDirection::Out));
        t.tick(500.0);
        assert!((t.progress() - 0.875).abs() < 1e-5);
    }

    #[test]
    fn test_yoyo_infinite() {
        let mut t = Tween::new(1200.0)
            .with_repeat(Repeat::Infinite)
            .with_yoyo(true)
            .with_easing(Easing::Linear);
        t.tick(1500.0);
        // second iteration runs backwards
        assert!((t.linear_progress() - 0.75).abs() < 1e-5);
        t.tick(100_000.0);
        assert!(!t.is_finished());
    }

    #[test]
    fn test_pause_holds_time() {
        let mut t = Tween::new(100.0);
        t.tick(30.0);
        t.pause();
        t.tick(50.0);
        assert_eq!(t.elapsed_ms(), 30.0);
        assert_eq!(t.state(), TweenState::Paused);
        t.resume();
        t.tick(70.0);
        assert!(t.is_finished());
    }

    #[test]
    fn test_zero_duration_completes_after_delay() {
        let mut t = Tween::new(0.0).with_delay(50.0);
        assert!(!t.is_finished());
        t.tick(50.0);
        assert!(t.is_finished());
        assert_eq!(t.progress(), 1.0);
    }

    #[test]
    fn test_repeat_yoyo_lands_on_start() {
        let mut t = Tween::new(100.0)
            .with_repeat(Repeat::Times(1))
            .with_yoyo(true);
        t.complete();
        assert!(t.is_finished());
        assert_eq!(t.progress(), 0.0);
    }
}
