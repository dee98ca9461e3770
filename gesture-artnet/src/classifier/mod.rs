//! Classifier module - feature extraction and history buffering
//!
//! Note: gesture inference runs in external models.
//! Rust handles feature normalization and the history windows they read.

mod buffer;
mod features;
mod model;

pub use buffer::{HistoryBuffer, HISTORY_LENGTH};
pub use features::{
    normalize_pose, normalize_trajectory, PoseFeatures, TrajectoryFeatures, POSE_FEATURE_LEN,
    TRAJECTORY_FEATURE_LEN,
};
pub use model::{FingerGesture, HandSign, FINGER_GESTURES, HAND_SIGNS};
