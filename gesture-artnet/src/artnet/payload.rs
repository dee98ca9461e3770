//! Control payload placed on the 3-slot channel group
//!
//! Slot 1 carries the hand sign id, slots 2 and 3 the pointer x/y when
//! the pointer sign is active (zero otherwise).

use crate::bridge::LandmarkPoint;
use crate::classifier::HandSign;
use crate::error::{GestureLinkError, Result};

/// First DMX slot of the channel group (1-based)
pub const CHANNEL_GROUP_START: u16 = 1;

/// Slots used by the channel group
pub const CHANNEL_GROUP_WIDTH: usize = 3;

/// Offset added to scaled pointer coordinates before clamping
pub const POINTER_OFFSET: i32 = 25;

/// Bytes sent for one accepted update
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ControlPayload {
    pub gesture_id: u8,
    pub x: u8,
    pub y: u8,
}

impl ControlPayload {
    pub const fn new(gesture_id: u8, x: u8, y: u8) -> Self {
        Self { gesture_id, x, y }
    }

    /// Payload for `gesture_id`; pointer coordinates are only filled in
    /// for the pointer sign with a pointer present
    pub fn for_gesture(
        gesture_id: u8,
        pointer: Option<LandmarkPoint>,
        frame_width: u32,
        frame_height: u32,
    ) -> Self {
        let (x, y) =
            scaled_pointer(gesture_id, pointer, frame_width, frame_height).unwrap_or((0, 0));
        Self::new(gesture_id, x, y)
    }

    pub fn to_bytes(&self) -> [u8; CHANNEL_GROUP_WIDTH] {
        [self.gesture_id, self.x, self.y]
    }

    /// Read a payload back from channel-group bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes {
            [gesture_id, x, y, ..] => Ok(Self::new(*gesture_id, *x, *y)),
            _ => Err(GestureLinkError::Packet(format!(
                "channel group needs {} slots, got {}",
                CHANNEL_GROUP_WIDTH,
                bytes.len()
            ))),
        }
    }
}

/// DMX pointer channels for `gesture_id`
///
/// `Some` exactly when the pointer sign is active and a pointer was
/// supplied, even if both axes clamp to 0.
pub fn scaled_pointer(
    gesture_id: u8,
    pointer: Option<LandmarkPoint>,
    frame_width: u32,
    frame_height: u32,
) -> Option<(u8, u8)> {
    match pointer {
        Some(p) if HandSign::from_id(gesture_id).is_pointer() => Some((
            scale_axis(p.x, frame_width),
            scale_axis(p.y, frame_height),
        )),
        _ => None,
    }
}

/// Map a pixel coordinate to a DMX value: scale to 0-255, add the
/// offset, clamp. Never wraps.
pub fn scale_axis(value: i32, extent: u32) -> u8 {
    let extent = extent.max(1) as f64;
    let scaled = (value as f64 / extent * 255.0).round() as i32 + POINTER_OFFSET;
    scaled.clamp(0, u8::MAX as i32) as u8
}
