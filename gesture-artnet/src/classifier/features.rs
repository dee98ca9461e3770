//! Feature extraction for the external gesture classifiers
//!
//! Produces the two input vectors the models were trained on:
//! - pose: 21 landmarks relative to the wrist, scaled to [-1, 1] (42 values)
//! - trajectory: 16 pointer positions relative to the first, scaled by
//!   frame size per axis (32 values)

use nalgebra::SVector;

use super::buffer::HISTORY_LENGTH;
use crate::bridge::{LandmarkPoint, LANDMARK_COUNT, WRIST};

/// Values in a pose feature vector
pub const POSE_FEATURE_LEN: usize = LANDMARK_COUNT * 2;

/// Values in a trajectory feature vector
pub const TRAJECTORY_FEATURE_LEN: usize = HISTORY_LENGTH * 2;

/// Flattened pose features: [x0, y0, x1, y1, ..., x20, y20]
pub type PoseFeatures = SVector<f32, POSE_FEATURE_LEN>;

/// Flattened trajectory features: [x0, y0, ..., x15, y15]
pub type TrajectoryFeatures = SVector<f32, TRAJECTORY_FEATURE_LEN>;

/// Normalize a hand pose for the keypoint classifier
///
/// Every point is made relative to the wrist, then the whole vector is
/// divided by its largest absolute component. A vector that is all zero
/// is returned as is.
pub fn normalize_pose(points: &[LandmarkPoint; LANDMARK_COUNT]) -> PoseFeatures {
    let base = points[WRIST];
    let relative = PoseFeatures::from_fn(|i, _| {
        let p = points[i / 2];
        if i % 2 == 0 {
            (p.x - base.x) as f32
        } else {
            (p.y - base.y) as f32
        }
    });

    let max_value = relative.amax();
    if max_value == 0.0 {
        return relative;
    }
    relative / max_value
}

/// Normalize a pointer trajectory for the point-history classifier
///
/// Points are made relative to the oldest entry and divided by the frame
/// width (x) or height (y). Frame dimensions must be non-zero.
pub fn normalize_trajectory(
    history: &[LandmarkPoint; HISTORY_LENGTH],
    frame_width: u32,
    frame_height: u32,
) -> TrajectoryFeatures {
    debug_assert!(frame_width > 0 && frame_height > 0);

    let base = history[0];
    let width = frame_width as f32;
    let height = frame_height as f32;

    TrajectoryFeatures::from_fn(|i, _| {
        let p = history[i / 2];
        if i % 2 == 0 {
            (p.x - base.x) as f32 / width
        } else {
            (p.y - base.y) as f32 / height
        }
    })
}
