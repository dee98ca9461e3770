//! Art-Net output - payload encoding, framing and asynchronous delivery
//!
//! Re-exports only. All logic in submodules.

mod emitter;
mod packet;
mod payload;
mod queue;
mod transport;

pub use emitter::{EmitterStats, ProtocolEmitter};
pub use packet::{
    ArtDmx, SequenceCounter, ARTNET_ID, DEFAULT_PORT, HEADER_LEN, MAX_CHANNELS, MAX_UNIVERSE,
    OP_DMX, PROTOCOL_VERSION,
};
pub use payload::{
    scale_axis, scaled_pointer, ControlPayload, CHANNEL_GROUP_START, CHANNEL_GROUP_WIDTH,
    POINTER_OFFSET,
};
pub use queue::OutboundQueue;
pub use transport::{DmxTransport, NullTransport, UdpTransport};
