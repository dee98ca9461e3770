//! Gesture ArtNet - hand gestures to lighting control
//!
//! Library root. Only contains:
//! - Module declarations
//! - Re-exports of the types a frame loop needs

pub mod artnet;
pub mod bridge;
pub mod classifier;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod stability;

pub use artnet::{ControlPayload, EmitterStats, ProtocolEmitter};
pub use bridge::{HandFrame, Handedness, LabelTable, LandmarkPoint, PoseClassifier, TrajectoryClassifier};
pub use classifier::{FingerGesture, HandSign};
pub use config::Config;
pub use error::{GestureLinkError, Result};
pub use pipeline::{FrameReport, GesturePipeline};
pub use stability::{TemporalAggregator, TransmissionGate};
