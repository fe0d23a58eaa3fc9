//! # Movement Throttle
//!
//! Position updates are the only rate-limited outbound traffic. A move is
//! sent when the rounded pose differs from the last one sent **and** the
//! interval has elapsed since that send. Everything else goes out at once.

use skirmish_shared::math::{Euler, Vec3};
use skirmish_shared::protocol::MovePayload;

use crate::{MOVE_INTERVAL_MS, MOVE_PRECISION};

/// Rate limiter for `player.move`.
#[derive(Clone, Debug)]
pub struct MovementThrottle {
    interval_ms: u64,
    precision: u32,
    last_sent: Option<MovePayload>,
    last_sent_at: Option<u64>,
}

impl Default for MovementThrottle {
    fn default() -> Self {
        Self::new(MOVE_INTERVAL_MS, MOVE_PRECISION)
    }
}

impl MovementThrottle {
    /// Creates a throttle.
    #[must_use]
    pub const fn new(interval_ms: u64, precision: u32) -> Self {
        Self {
            interval_ms,
            precision,
            last_sent: None,
            last_sent_at: None,
        }
    }

    /// Pose most recently handed out for sending.
    #[must_use]
    pub const fn last_sent(&self) -> Option<&MovePayload> {
        self.last_sent.as_ref()
    }

    fn round(&self, position: Vec3, rotation: Euler) -> MovePayload {
        MovePayload {
            position: position.rounded(self.precision),
            rotation: rotation.rounded(self.precision),
        }
    }

    /// Returns the rounded pose to send, or `None` if throttled or unchanged.
    pub fn poll(&mut self, now_ms: u64, position: Vec3, rotation: Euler) -> Option<MovePayload> {
        let pose = self.round(position, rotation);
        if self.last_sent == Some(pose) {
            return None;
        }
        if let Some(at) = self.last_sent_at {
            if now_ms.saturating_sub(at) < self.interval_ms {
                return None;
            }
        }
        self.record(now_ms, pose);
        Some(pose)
    }

    /// Returns the rounded pose unconditionally and records it as sent.
    pub fn force(&mut self, now_ms: u64, position: Vec3, rotation: Euler) -> MovePayload {
        let pose = self.round(position, rotation);
        self.record(now_ms, pose);
        pose
    }

    fn record(&mut self, now_ms: u64, pose: MovePayload) {
        self.last_sent = Some(pose);
        self.last_sent_at = Some(now_ms);
    }

    /// Forgets the last send.
    pub fn reset(&mut self) {
        self.last_sent = None;
        self.last_sent_at = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_move_is_sent_rounded() {
        let mut throttle = MovementThrottle::default();
        let pose = throttle
            .poll(0, Vec3::new(1.234_56, 2.0, -3.005_1), Euler::IDENTITY)
            .unwrap();
        assert_eq!(pose.position, Vec3::new(1.23, 2.0, -3.01));
    }

    #[test]
    fn test_changes_within_interval_collapse() {
        let mut throttle = MovementThrottle::default();
        let mut sent = 0;
        for step in 0..100u16 {
            let x = f32::from(step) * 0.1;
            if throttle.poll(u64::from(step), Vec3::new(x, 2.0, 0.0), Euler::IDENTITY).is_some() {
                sent += 1;
            }
        }
        // t = 0 only; the interval has not elapsed again before t = 100.
        assert_eq!(sent, 1);
    }

    #[test]
    fn test_unchanged_pose_is_not_resent() {
        let mut throttle = MovementThrottle::default();
        let at = Vec3::new(5.0, 2.0, 5.0);
        assert!(throttle.poll(0, at, Euler::IDENTITY).is_some());
        assert!(throttle.poll(1000, at, Euler::IDENTITY).is_none());
        assert!(throttle
            .poll(1000, Vec3::new(5.001, 2.0, 5.0), Euler::IDENTITY)
            .is_none());
        assert!(throttle
            .poll(1000, Vec3::new(5.01, 2.0, 5.0), Euler::IDENTITY)
            .is_some());
    }

    #[test]
    fn test_force_bypasses_and_records() {
        let mut throttle = MovementThrottle::default();
        throttle.poll(0, Vec3::new(0.0, 2.0, 0.0), Euler::IDENTITY);

        let door = Vec3::new(100.0, 2.0, 100.0);
        let pose = throttle.force(10, door, Euler::IDENTITY);
        assert_eq!(throttle.last_sent(), Some(&pose));

        assert!(throttle.poll(200, door, Euler::IDENTITY).is_none());
    }
}
