//! Animation scheduler
//!
//! Holds every live tween and advances them once per frame. There is no
//! background thread: the owner calls [`AnimationScheduler::tick`] from the
//! host's frame callback with the frame delta.
//!
//! Each tween is registered against a [`TargetKey`] (usually an element id)
//! so whole groups can be killed at once, for example when a view is torn
//! down.

use crate::tween::{Tween, TweenState};
use slotmap::{new_key_type, SlotMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

impl TweenId {
    /// Convert to raw u64 for storage outside the scheduler
    pub fn to_raw(self) -> u64 {
        slotmap::Key::data(&self).as_ffi()
    }

    /// Reconstruct from raw u64 produced by `to_raw()`
    pub fn from_raw(raw: u64) -> Self {
        TweenId::from(slotmap::KeyData::from_ffi(raw))
    }
}

/// Opaque identity of the thing a tween animates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TargetKey(pub u64);

struct ScheduledTween {
    target: TargetKey,
    tween: Tween,
}

/// Internal state of the animation scheduler
struct SchedulerInner {
    tweens: SlotMap<TweenId, ScheduledTween>,
}

/// Lock the scheduler state, recovering the data from a poisoned mutex
fn lock(inner: &Mutex<SchedulerInner>) -> MutexGuard<'_, SchedulerInner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The animation scheduler that ticks all registered tweens
///
/// Owned by whoever drives the frame loop and shared with effects through
/// [`SchedulerHandle`].
pub struct AnimationScheduler {
    inner: Arc<Mutex<SchedulerInner>>,
}

impl AnimationScheduler {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SchedulerInner {
                tweens: SlotMap::with_key(),
            })),
        }
    }

    /// Get a handle to this scheduler for passing to components
    pub fn handle(&self) -> SchedulerHandle {
        SchedulerHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Advance all tweens by `dt_ms`
    ///
    /// Finished tweens stay registered until killed so their owner can read
    /// the final progress. Returns true if any tween still needs frames.
    pub fn tick(&self, dt_ms: f32) -> bool {
        let mut inner = lock(&self.inner);
        for (_, scheduled) in inner.tweens.iter_mut() {
            scheduled.tween.tick(dt_ms);
        }
        inner.tweens.iter().any(|(_, s)| s.tween.is_playing())
    }

    /// Check if any tweens are still playing
    pub fn has_active_animations(&self) -> bool {
        lock(&self.inner)
            .tweens
            .iter()
            .any(|(_, s)| s.tween.is_playing())
    }

    /// Number of registered tweens, finished ones included
    pub fn tween_count(&self) -> usize {
        lock(&self.inner).tweens.len()
    }

    pub fn add(&self, target: TargetKey, tween: Tween) -> TweenId {
        lock(&self.inner)
            .tweens
            .insert(ScheduledTween { target, tween })
    }

    /// Eased progress of a tween
    pub fn progress(&self, id: TweenId) -> Option<f32> {
        lock(&self.inner).tweens.get(id).map(|s| s.tween.progress())
    }

    pub fn state(&self, id: TweenId) -> Option<TweenState> {
        lock(&self.inner).tweens.get(id).map(|s| s.tween.state())
    }

    pub fn target(&self, id: TweenId) -> Option<TargetKey> {
        lock(&self.inner).tweens.get(id).map(|s| s.target)
    }

    /// Apply a function to modify a tween if it exists
    pub fn with_tween_mut<F, R>(&self, id: TweenId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Tween) -> R,
    {
        lock(&self.inner).tweens.get_mut(id).map(|s| f(&mut s.tween))
    }

    pub fn kill(&self, id: TweenId) -> Option<Tween> {
        lock(&self.inner).tweens.remove(id).map(|s| s.tween)
    }

    /// Kill every tween registered against `target`
    pub fn kill_tweens_of(&self, target: TargetKey) -> Vec<TweenId> {
        self.kill_where(|t| t == target)
    }

    /// Kill every tween whose target is not kept by `keep`
    pub fn kill_all_except<F>(&self, keep: F) -> Vec<TweenId>
    where
        F: Fn(TargetKey) -> bool,
    {
        self.kill_where(|t| !keep(t))
    }

    fn kill_where<F>(&self, pred: F) -> Vec<TweenId>
    where
        F: Fn(TargetKey) -> bool,
    {
        let mut inner = lock(&self.inner);
        let doomed: Vec<TweenId> = inner
            .tweens
            .iter()
            .filter(|(_, s)| pred(s.target))
            .map(|(id, _)| id)
            .collect();
        for id in &doomed {
            inner.tweens.remove(*id);
        }
        if !doomed.is_empty() {
            tracing::trace!("AnimationScheduler: killed {} tweens", doomed.len());
        }
        doomed
    }

    /// Remove everything
    pub fn clear(&self) {
        lock(&self.inner).tweens.clear();
    }
}

impl Default for AnimationScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Weak handle to the scheduler
///
/// Every operation is a no-op once the scheduler has been dropped.
#[derive(Clone)]
pub struct SchedulerHandle {
    inner: Weak<Mutex<SchedulerInner>>,
}

impl SchedulerHandle {
    /// Register a tween and return its ID
    pub fn add(&self, target: TargetKey, tween: Tween) -> Option<TweenId> {
        self.inner
            .upgrade()
            .map(|inner| lock(&inner).tweens.insert(ScheduledTween { target, tween }))
    }

    pub fn progress(&self, id: TweenId) -> Option<f32> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get(id).map(|s| s.tween.progress()))
    }

    pub fn state(&self, id: TweenId) -> Option<TweenState> {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get(id).map(|s| s.tween.state()))
    }

    /// Apply a function to modify a tween if both it and the scheduler exist
    pub fn with_tween_mut<F, R>(&self, id: TweenId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Tween) -> R,
    {
        self.inner
            .upgrade()
            .and_then(|inner| lock(&inner).tweens.get_mut(id).map(|s| f(&mut s.tween)))
    }

    pub fn pause(&self, id: TweenId) {
        self.with_tween_mut(id, Tween::pause);
    }

    pub fn resume(&self, id: TweenId) {
        self.with_tween_mut(id, Tween::resume);
    }

    pub fn kill(&self, id: TweenId) {
        if let Some(inner) = self.inner.upgrade() {
            lock(&inner).tweens.remove(id);
        }
    }

    /// Check if the scheduler is still alive
    pub fn is_alive(&self) -> bool {
        self.inner.strong_count() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheduler_tick() {
        let scheduler = AnimationScheduler::new();
        let id = scheduler.add(TargetKey(1), Tween::new(100.0));

        assert!(scheduler.tick(50.0));
        let p = scheduler.progress(id).unwrap();
        assert!(p > 0.0 && p < 1.0);

        assert!(!scheduler.tick(100.0));
        assert_eq!(scheduler.progress(id), Some(1.0));
        // finished tweens stay until killed
        assert_eq!(scheduler.tween_count(), 1);
    }

    #[test]
    fn test_kill_by_target() {
        let scheduler = AnimationScheduler::new();
        scheduler.add(TargetKey(1), Tween::new(100.0));
        scheduler.add(TargetKey(1), Tween::new(200.0));
        let keep = scheduler.add(TargetKey(2), Tween::new(100.0));

        assert_eq!(scheduler.kill_tweens_of(TargetKey(1)).len(), 2);
        assert_eq!(scheduler.tween_count(), 1);
        assert!(scheduler.progress(keep).is_some());
    }

    #[test]
    fn test_kill_all_except() {
        let scheduler = AnimationScheduler::new();
        scheduler.add(TargetKey(1), Tween::new(100.0));
        scheduler.add(TargetKey(2), Tween::new(100.0));
        scheduler.add(TargetKey(3), Tween::new(100.0));

        let killed = scheduler.kill_all_except(|t| t == TargetKey(2));
        assert_eq!(killed.len(), 2);
        assert_eq!(scheduler.tween_count(), 1);
    }

    #[test]
    fn test_handle_outlives_scheduler() {
        let scheduler = AnimationScheduler::new();
        let handle = scheduler.handle();

        let id = handle.add(TargetKey(7), Tween::new(100.0)).unwrap();
        handle.pause(id);
        scheduler.tick(50.0);
        assert_eq!(handle.progress(id), Some(0.0));
        assert_eq!(handle.state(id), Some(TweenState::Paused));

        drop(scheduler);
        assert!(!handle.is_alive());
        assert!(handle.add(TargetKey(7), Tween::new(100.0)).is_none());
        assert_eq!(handle.progress(id), None);
    }

    #[test]
    fn test_raw_id_round_trip() {
        let scheduler = AnimationScheduler::new();
        let id = scheduler.add(TargetKey(1), Tween::new(10.0));
        assert_eq!(TweenId::from_raw(id.to_raw()), id);
    }
}
