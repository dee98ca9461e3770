//! Classifier output categories
//!
//! Inference itself runs outside this crate. These enums give the raw ids
//! returned by the external models stable names so the aggregator, gate
//! and emitter agree on what "pointer" and "no-op" mean.

/// Hand sign labels (order matches the keypoint model's training labels)
pub const HAND_SIGNS: [&str; 4] = ["Open", "Close", "Pointer", "OK"];

/// Finger gesture labels (order matches the point-history model)
pub const FINGER_GESTURES: [&str; 4] = ["Stop", "Clockwise", "Counter Clockwise", "Move"];

/// Static hand pose reported by the keypoint classifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandSign {
    /// Open palm. Also the no-op id sent when no hand is visible.
    Open,
    Close,
    /// Index finger extended; carries continuous pointer coordinates.
    Pointer,
    Ok,
    /// Any id the model produces beyond the known labels
    Other(u8),
}

impl HandSign {
    /// Id transmitted when nothing is happening
    pub const NO_OP: HandSign = HandSign::Open;

    pub fn from_id(id: u8) -> Self {
        match id {
            0 => HandSign::Open,
            1 => HandSign::Close,
            2 => HandSign::Pointer,
            3 => HandSign::Ok,
            other => HandSign::Other(other),
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            HandSign::Open => 0,
            HandSign::Close => 1,
            HandSign::Pointer => 2,
            HandSign::Ok => 3,
            HandSign::Other(id) => *id,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HandSign::Open => "Open",
            HandSign::Close => "Close",
            HandSign::Pointer => "Pointer",
            HandSign::Ok => "OK",
            HandSign::Other(_) => "Other",
        }
    }

    pub fn is_pointer(&self) -> bool {
        matches!(self, HandSign::Pointer)
    }
}

impl From<u8> for HandSign {
    fn from(id: u8) -> Self {
        HandSign::from_id(id)
    }
}

/// Dynamic gesture reported by the point-history classifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FingerGesture {
    Stop,
    Clockwise,
    CounterClockwise,
    Move,
    Other(u8),
}

impl FingerGesture {
    pub fn from_id(id: u8) -> Self {
        match id {
            0 => FingerGesture::Stop,
            1 => FingerGesture::Clockwise,
            2 => FingerGesture::CounterClockwise,
            3 => FingerGesture::Move,
            other => FingerGesture::Other(other),
        }
    }

    pub fn id(&self) -> u8 {
        match self {
            FingerGesture::Stop => 0,
            FingerGesture::Clockwise => 1,
            FingerGesture::CounterClockwise => 2,
            FingerGesture::Move => 3,
            FingerGesture::Other(id) => *id,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FingerGesture::Stop => "Stop",
            FingerGesture::Clockwise => "Clockwise",
            FingerGesture::CounterClockwise => "Counter Clockwise",
            FingerGesture::Move => "Move",
            FingerGesture::Other(_) => "Other",
        }
    }
}

impl From<u8> for FingerGesture {
    fn from(id: u8) -> Self {
        FingerGesture::from_id(id)
    }
}
