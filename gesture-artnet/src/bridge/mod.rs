//! Bridge module - the seam to the external detector and classifiers
//!
//! Re-exports only in mod.rs, logic in submodules.

mod classifier_integration;
mod hand_landmarks;
mod replay;

pub use classifier_integration::{LabelTable, PoseClassifier, TrajectoryClassifier};

pub use hand_landmarks::{
    HandFrame,
    Handedness,
    LandmarkPoint,
    // Constants
    INDEX_DIP, INDEX_MCP, INDEX_PIP, INDEX_TIP,
    LANDMARK_COUNT, POINTER_LANDMARK,
    MIDDLE_DIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP,
    PINKY_DIP, PINKY_MCP, PINKY_PIP, PINKY_TIP,
    RING_DIP, RING_MCP, RING_PIP, RING_TIP,
    THUMB_CMC, THUMB_IP, THUMB_MCP, THUMB_TIP,
    WRIST,
};

pub use replay::{RecordedClassifier, TraceHand, TraceRecord};
