//! Temporal aggregation of per-frame classifier output
//!
//! Keeps the pointer trajectory that feeds the point-history classifier
//! and the id windows that smooth flickering labels by majority vote.

use tracing::trace;

use super::vote::majority_vote;
use crate::bridge::LandmarkPoint;
use crate::classifier::{HandSign, HistoryBuffer, HISTORY_LENGTH};

/// Histories owned by the pipeline for its whole lifetime
#[derive(Clone, Debug, Default)]
pub struct TemporalAggregator {
    /// Pointer positions, `(0,0)` when the pointer sign is not active
    trajectory: HistoryBuffer<LandmarkPoint, HISTORY_LENGTH>,

    /// Hand sign ids, 0 for frames without a hand
    gesture_ids: HistoryBuffer<u8, HISTORY_LENGTH>,

    /// Point-history classifier ids
    finger_gestures: HistoryBuffer<u8, HISTORY_LENGTH>,
}

impl TemporalAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame
    ///
    /// The pointer is only appended to the trajectory when a hand is
    /// present and showing the pointer sign; every other frame appends
    /// the origin sentinel so the window keeps advancing.
    pub fn on_frame(&mut self, has_hand: bool, gesture_id: u8, pointer: Option<LandmarkPoint>) {
        let point = match pointer {
            Some(p) if has_hand && HandSign::from_id(gesture_id).is_pointer() => p,
            _ => LandmarkPoint::ORIGIN,
        };
        self.trajectory.push(point);

        let id = if has_hand { gesture_id } else { HandSign::NO_OP.id() };
        self.gesture_ids.push(id);

        trace!(
            gesture_id = id,
            x = point.x,
            y = point.y,
            "aggregator frame recorded"
        );
    }

    /// Majority-voted hand sign id over the window (no-op id while empty)
    pub fn smoothed_gesture_id(&self) -> u8 {
        majority_vote(self.gesture_ids.iter().copied()).unwrap_or(HandSign::NO_OP.id())
    }

    /// True once the trajectory holds a full window
    pub fn trajectory_ready(&self) -> bool {
        self.trajectory.is_ready()
    }

    /// Full trajectory window, oldest first
    pub fn trajectory(&self) -> Option<[LandmarkPoint; HISTORY_LENGTH]> {
        self.trajectory.snapshot()
    }

    /// Trajectory points collected so far, oldest first
    pub fn trajectory_points(&self) -> impl Iterator<Item = &LandmarkPoint> + '_ {
        self.trajectory.iter()
    }

    pub fn record_finger_gesture(&mut self, id: u8) {
        self.finger_gestures.push(id);
    }

    /// Majority-voted point-history id (0 while empty)
    pub fn smoothed_finger_gesture(&self) -> u8 {
        majority_vote(self.finger_gestures.iter().copied()).unwrap_or(0)
    }

    pub fn reset(&mut self) {
        self.trajectory.clear();
        self.gesture_ids.clear();
        self.finger_gestures.clear();
    }
}
