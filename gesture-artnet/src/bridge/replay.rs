//! Recorded detector/classifier traces
//!
//! One JSON object per line, as produced by the capture front end:
//!
//! ```text
//! {"t_ms": 33, "hand": {"landmarks": [[x, y], ...21], "handedness": "Right"}, "hand_sign": 2, "finger_gesture": 0}
//! {"t_ms": 66, "hand": null}
//! ```
//!
//! `landmarks` are pixels; `normalized_landmarks` (0-1 floats) may be
//! given instead and are converted with the capture size.

use serde::Deserialize;

use super::classifier_integration::{PoseClassifier, TrajectoryClassifier};
use super::hand_landmarks::{HandFrame, Handedness, LandmarkPoint};
use crate::classifier::{PoseFeatures, TrajectoryFeatures};
use crate::error::{GestureLinkError, Result};

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceHand {
    #[serde(default)]
    pub landmarks: Option<Vec<[i32; 2]>>,
    #[serde(default)]
    pub normalized_landmarks: Option<Vec<[f32; 2]>>,
    #[serde(default)]
    pub handedness: Handedness,
}

/// One recorded frame
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TraceRecord {
    #[serde(default)]
    pub t_ms: Option<u64>,
    #[serde(default)]
    pub hand: Option<TraceHand>,
    /// Keypoint classifier output for this frame
    #[serde(default)]
    pub hand_sign: u8,
    /// Point-history classifier output, if it ran on this frame
    #[serde(default)]
    pub finger_gesture: Option<u8>,
}

impl TraceRecord {
    /// Parse one trace line (1-based `line` for error messages)
    pub fn parse_line(raw: &str, line: usize) -> Result<Self> {
        serde_json::from_str(raw).map_err(|err| GestureLinkError::Trace {
            line,
            message: err.to_string(),
        })
    }

    /// Hand for this frame in pixel coordinates
    pub fn hand_frame(&self, capture_width: u32, capture_height: u32) -> Result<Option<HandFrame>> {
        let Some(hand) = &self.hand else {
            return Ok(None);
        };

        let frame = if let Some(points) = &hand.landmarks {
            let points: Vec<LandmarkPoint> =
                points.iter().map(|&[x, y]| LandmarkPoint::new(x, y)).collect();
            HandFrame::from_slice(&points, hand.handedness)?
        } else if let Some(points) = &hand.normalized_landmarks {
            let points: Vec<(f32, f32)> = points.iter().map(|&[x, y]| (x, y)).collect();
            HandFrame::from_normalized(&points, capture_width, capture_height, hand.handedness)?
        } else {
            return Err(GestureLinkError::InvalidLandmarks(0));
        };
        Ok(Some(frame))
    }

    /// Classifiers that answer with this record's recorded ids
    pub fn classifier(&self) -> RecordedClassifier {
        RecordedClassifier {
            hand_sign: self.hand_sign,
            finger_gesture: self.finger_gesture.unwrap_or(0),
        }
    }
}

/// Replays ids captured alongside the landmarks
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RecordedClassifier {
    pub hand_sign: u8,
    pub finger_gesture: u8,
}

impl PoseClassifier for RecordedClassifier {
    fn classify_pose(&mut self, _features: &PoseFeatures) -> u8 {
        self.hand_sign
    }
}

impl TrajectoryClassifier for RecordedClassifier {
    fn classify_trajectory(&mut self, _features: &TrajectoryFeatures) -> u8 {
        self.finger_gesture
    }
}
