//! # Remote Motion Interpolation
//!
//! Remote players report their pose about ten times a second. Snapping the
//! avatar to each report looks jittery, so the rendered position glides from
//! where it currently is to the reported position with a quadratic
//! ease-in-out curve.
//!
//! The registry always holds the reported position; only what is drawn lags.
//!
//! ```ignore
//! let mut tweens = TweenSet::new(TWEEN_DURATION_MS);
//! // On `player.move`: glide from the previous position to the reported one.
//! tweens.retarget(id, previous, reported, now_ms);
//!
//! // Each frame:
//! let drawn = tweens.sample(id, now_ms).unwrap_or(reported);
//! ```

use std::collections::HashMap;

use skirmish_core::PlayerId;
use skirmish_shared::math::Vec3;

use crate::TWEEN_DURATION_MS;

/// Quadratic ease-in-out over `t ∈ [0, 1]`.
#[inline]
#[must_use]
pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        -1.0 + (4.0 - 2.0 * t) * t
    }
}

/// One glide between two positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionTween {
    from: Vec3,
    to: Vec3,
    start_ms: u64,
    duration_ms: u64,
}

impl MotionTween {
    /// Starts a glide at `start_ms`.
    #[must_use]
    pub const fn new(from: Vec3, to: Vec3, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms,
        }
    }

    /// Returns true once the glide has reached its destination.
    #[must_use]
    pub fn is_finished(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    /// Position at `now_ms`.
    #[must_use]
    pub fn sample(&self, now_ms: u64) -> Vec3 {
        if self.duration_ms == 0 {
            return self.to;
        }
        let elapsed = now_ms.saturating_sub(self.start_ms) as f32;
        let t = elapsed / self.duration_ms as f32;
        self.from.lerp(self.to, ease_in_out_quad(t))
    }
}

/// Active glides, one per remote player.
#[derive(Clone, Debug)]
pub struct TweenSet {
    duration_ms: u64,
    tweens: HashMap<PlayerId, MotionTween>,
}

impl Default for TweenSet {
    fn default() -> Self {
        Self::new(TWEEN_DURATION_MS)
    }
}

impl TweenSet {
    /// Creates an empty set whose glides last `duration_ms`.
    #[must_use]
    pub fn new(duration_ms: u64) -> Self {
        Self {
            duration_ms,
            tweens: HashMap::new(),
        }
    }

    /// Starts a glide toward `to` from wherever `id` is currently drawn.
    ///
    /// `fallback` is used when nothing is in flight for `id`.
    pub fn retarget(&mut self, id: PlayerId, fallback: Vec3, to: Vec3, now_ms: u64) {
        let from = self.sample(id, now_ms).unwrap_or(fallback);
        self.tweens
            .insert(id, MotionTween::new(from, to, now_ms, self.duration_ms));
    }

    /// Drawn position of `id`, if a glide was ever started for it.
    #[must_use]
    pub fn sample(&self, id: PlayerId, now_ms: u64) -> Option<Vec3> {
        self.tweens.get(&id).map(|tween| tween.sample(now_ms))
    }

    /// Drops the glide for a departed player.
    pub fn remove(&mut self, id: PlayerId) {
        self.tweens.remove(&id);
    }

    /// Drops glides that have arrived. Their players are drawn at the
    /// reported position from then on.
    pub fn prune(&mut self, now_ms: u64) {
        self.tweens.retain(|_, tween| !tween.is_finished(now_ms));
    }

    /// Number of tracked players.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tweens.len()
    }

    /// Returns true if nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tweens.is_empty()
    }
}
