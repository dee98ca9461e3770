//! Hand landmark types and detector-output conversion
//!
//! The external detector reports 21 landmarks per hand in normalized
//! (0-1) image coordinates. Everything downstream works in integer pixels.

use serde::{Deserialize, Serialize};

use crate::error::{GestureLinkError, Result};

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Landmarks per detected hand
pub const LANDMARK_COUNT: usize = 21;

/// Landmark that drives the pointer (index fingertip)
pub const POINTER_LANDMARK: usize = INDEX_TIP;

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// A single landmark in pixel coordinates
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LandmarkPoint {
    pub x: i32,
    pub y: i32,
}

impl LandmarkPoint {
    /// Sentinel appended to the trajectory when no pointer is active
    pub const ORIGIN: LandmarkPoint = LandmarkPoint { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Convert a normalized detector coordinate to a pixel position
    ///
    /// Truncates toward zero and pins to the last pixel row/column so
    /// a coordinate of exactly 1.0 stays inside the frame.
    pub fn from_normalized(nx: f32, ny: f32, width: u32, height: u32) -> Self {
        Self {
            x: to_pixel(nx, width),
            y: to_pixel(ny, height),
        }
    }
}

impl From<(i32, i32)> for LandmarkPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

fn to_pixel(n: f32, dim: u32) -> i32 {
    let dim = dim as i32;
    ((n * dim as f32) as i32).min(dim - 1)
}

/// Which hand the detector believes it saw
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Handedness::Left => "Left",
            Handedness::Right => "Right",
            Handedness::Unknown => "Unknown",
        }
    }
}

/// One detected hand for the current frame
#[derive(Clone, Debug, PartialEq)]
pub struct HandFrame {
    pub landmarks: [LandmarkPoint; LANDMARK_COUNT],
    pub handedness: Handedness,
}

impl HandFrame {
    pub fn new(landmarks: [LandmarkPoint; LANDMARK_COUNT], handedness: Handedness) -> Self {
        Self {
            landmarks,
            handedness,
        }
    }

    /// Build from a slice, rejecting anything that is not exactly 21 points
    pub fn from_slice(points: &[LandmarkPoint], handedness: Handedness) -> Result<Self> {
        let landmarks: [LandmarkPoint; LANDMARK_COUNT] = points
            .try_into()
            .map_err(|_| GestureLinkError::InvalidLandmarks(points.len()))?;
        Ok(Self::new(landmarks, handedness))
    }

    /// Build from detector output in normalized coordinates
    pub fn from_normalized(
        points: &[(f32, f32)],
        width: u32,
        height: u32,
        handedness: Handedness,
    ) -> Result<Self> {
        if points.len() != LANDMARK_COUNT {
            return Err(GestureLinkError::InvalidLandmarks(points.len()));
        }

        let mut landmarks = [LandmarkPoint::default(); LANDMARK_COUNT];
        for (slot, &(nx, ny)) in landmarks.iter_mut().zip(points) {
            *slot = LandmarkPoint::from_normalized(nx, ny, width, height);
        }
        Ok(Self::new(landmarks, handedness))
    }

    pub fn wrist(&self) -> LandmarkPoint {
        self.landmarks[WRIST]
    }

    /// Index fingertip, used as the pointer position
    pub fn pointer(&self) -> LandmarkPoint {
        self.landmarks[POINTER_LANDMARK]
    }
}
