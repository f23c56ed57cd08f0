//=========================================================================
// Diagnostics
//=========================================================================
//
// Rate-limited reporting of arm state.
//
// Architecture:
// ```text
//   PlayMode::update() ──record(elapsed, snapshot)──> Diagnostics
//                                                       ├─ log::debug!
//                                                       └─ try_send ──> subscribers
// ```
//
// At most one snapshot is emitted per interval. Sends never block: a full
// subscriber channel drops the snapshot, a disconnected subscriber is
// removed.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use glam::Vec3;
use log::{debug, trace};

//=== ArmSnapshot =========================================================

/// Head and goal world positions at one instant.
///
/// These are world-space, not parent-local: the head sits under the arm
/// chain, so its local position differs from `head` whenever any joint is
/// offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArmSnapshot {
    pub head: Vec3,
    pub goal: Vec3,
}

impl ArmSnapshot {
    /// Distance from head to goal.
    pub fn distance(&self) -> f32 {
        self.head.distance(self.goal)
    }
}

//=== Diagnostics =========================================================

/// Emits [`ArmSnapshot`]s at a bounded rate.
#[derive(Debug)]
pub struct Diagnostics {
    /// Seconds between emissions; `0` disables output.
    interval: f32,
    since_last: f32,
    subscribers: Vec<Sender<ArmSnapshot>>,
}

impl Diagnostics {
    /// Per-subscriber channel capacity.
    pub const CHANNEL_CAPACITY: usize = 16;

    pub fn new(interval: f32) -> Self {
        Self {
            interval: interval.max(0.0),
            // Emit on the first record after construction.
            since_last: f32::INFINITY,
            subscribers: Vec::new(),
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn is_enabled(&self) -> bool {
        self.interval > 0.0
    }

    /// Opens a new channel receiving every emitted snapshot.
    pub fn subscribe(&mut self) -> Receiver<ArmSnapshot> {
        let (tx, rx) = bounded(Self::CHANNEL_CAPACITY);
        self.subscribers.push(tx);
        rx
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Advances the clock by `elapsed` seconds and emits `snapshot` if an
    /// interval has passed. Returns whether it was emitted.
    ///
    /// The snapshot is built lazily so nothing is computed between
    /// emissions.
    pub fn record<F>(&mut self, elapsed: f32, snapshot: F) -> bool
    where
        F: FnOnce() -> ArmSnapshot,
    {
        if !self.is_enabled() {
            return false;
        }

        self.since_last += elapsed.max(0.0);
        if self.since_last < self.interval {
            return false;
        }
        self.since_last = 0.0;

        let snapshot = snapshot();
        debug!(
            target: "reaching_arm::diagnostics",
            "head position: {:.3}, {:.3}, {:.3}; goal position: {:.3}, {:.3}, {:.3}; distance {:.3}",
            snapshot.head.x,
            snapshot.head.y,
            snapshot.head.z,
            snapshot.goal.x,
            snapshot.goal.y,
            snapshot.goal.z,
            snapshot.distance()
        );

        self.subscribers.retain(|tx| match tx.try_send(snapshot) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                trace!(target: "reaching_arm::diagnostics", "Subscriber full, snapshot dropped");
                true
            }
            Err(TrySendError::Disconnected(_)) => {
                debug!(target: "reaching_arm::diagnostics", "Subscriber disconnected");
                false
            }
        });

        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> ArmSnapshot {
        ArmSnapshot {
            head: Vec3::new(0.0, 0.0, 3.0),
            goal: Vec3::new(4.0, 0.0, 0.0),
        }
    }

    #[test]
    fn distance_is_euclidean() {
        assert!((snapshot().distance() - 5.0).abs() < 1e-6);
    }

    #[test]
    fn first_record_emits_then_waits_for_interval() {
        let mut diagnostics = Diagnostics::new(1.0);
        let rx = diagnostics.subscribe();

        assert!(diagnostics.record(0.016, snapshot));
        assert!(!diagnostics.record(0.5, snapshot));
        assert!(!diagnostics.record(0.49, snapshot));
        assert!(diagnostics.record(0.02, snapshot));

        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn zero_interval_disables_output() {
        let mut diagnostics = Diagnostics::new(0.0);
        let rx = diagnostics.subscribe();

        let mut built = false;
        assert!(!diagnostics.record(10.0, || {
            built = true;
            snapshot()
        }));
        assert!(!built, "snapshot must not be built when disabled");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn snapshot_not_built_between_emissions() {
        let mut diagnostics = Diagnostics::new(1.0);
        diagnostics.record(0.0, snapshot);

        let mut built = false;
        diagnostics.record(0.1, || {
            built = true;
            snapshot()
        });
        assert!(!built);
    }

    #[test]
    fn full_channel_drops_without_blocking() {
        let mut diagnostics = Diagnostics::new(0.5);
        let rx = diagnostics.subscribe();

        for _ in 0..(Diagnostics::CHANNEL_CAPACITY * 2) {
            assert!(diagnostics.record(1.0, snapshot));
        }

        assert_eq!(rx.try_iter().count(), Diagnostics::CHANNEL_CAPACITY);
        assert_eq!(diagnostics.subscriber_count(), 1);
    }

    #[test]
    fn disconnected_subscribers_are_pruned() {
        let mut diagnostics = Diagnostics::new(0.5);
        let kept = diagnostics.subscribe();
        drop(diagnostics.subscribe());
        assert_eq!(diagnostics.subscriber_count(), 2);

        diagnostics.record(1.0, snapshot);

        assert_eq!(diagnostics.subscriber_count(), 1);
        assert_eq!(kept.try_recv().unwrap(), snapshot());
    }

    #[test]
    fn negative_interval_is_treated_as_disabled() {
        let diagnostics = Diagnostics::new(-3.0);
        assert!(!diagnostics.is_enabled());
        assert_eq!(diagnostics.interval(), 0.0);
    }
}
