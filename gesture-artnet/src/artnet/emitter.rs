//! Protocol emitter - owns the outbound Art-Net session
//!
//! `emit` runs on the frame loop: it builds the payload, queues it and
//! returns straight away. A single sender task drains the queue in
//! order, so frames reach the wire in the order `emit` was called.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, trace, warn};

use super::packet::{ArtDmx, SequenceCounter};
use super::payload::{scaled_pointer, ControlPayload};
use super::queue::OutboundQueue;
use super::transport::{DmxTransport, NullTransport, UdpTransport};
use crate::bridge::LandmarkPoint;
use crate::config::Config;
use crate::error::{GestureLinkError, Result};

/// Delivery counters for one emitter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EmitterStats {
    /// Payloads accepted by `emit`
    pub enqueued: u64,
    /// Frames handed to the transport
    pub sent: u64,
    /// Frames the transport rejected
    pub failed: u64,
    /// Payloads discarded because the queue was full or closed
    pub dropped: u64,
}

#[derive(Default)]
struct Counters {
    enqueued: AtomicU64,
    sent: AtomicU64,
    failed: AtomicU64,
    dropped: AtomicU64,
}

impl Counters {
    fn snapshot(&self) -> EmitterStats {
        EmitterStats {
            enqueued: self.enqueued.load(Ordering::Relaxed),
            sent: self.sent.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

/// Outbound session for one universe and one 3-slot channel group
pub struct ProtocolEmitter {
    universe: u16,
    queue: Arc<OutboundQueue<ControlPayload>>,
    counters: Arc<Counters>,
    worker: Option<JoinHandle<()>>,
    destination: String,
}

impl ProtocolEmitter {
    /// Start the sender task on the current tokio runtime
    pub fn spawn(transport: Box<dyn DmxTransport>, universe: u16, queue_depth: usize) -> Self {
        let queue = Arc::new(OutboundQueue::new(queue_depth));
        let counters = Arc::new(Counters::default());
        let destination = transport.describe();

        let worker = tokio::spawn(run_sender(
            transport,
            queue.clone(),
            counters.clone(),
            universe,
        ));

        info!(%destination, universe, queue_depth, "protocol emitter started");
        Self {
            universe,
            queue,
            counters,
            worker: Some(worker),
            destination,
        }
    }

    /// Emitter for the destination in `config` (or a dry-run sink)
    pub async fn connect(config: &Config, dry_run: bool) -> Result<Self> {
        let transport: Box<dyn DmxTransport> = if dry_run {
            Box::new(NullTransport)
        } else {
            Box::new(UdpTransport::connect(&config.ip, config.port).await?)
        };
        Ok(Self::spawn(transport, config.universe, config.queue_depth))
    }

    /// Queue an update for `gesture_id`
    ///
    /// Returns the scaled pointer coordinates for the pointer sign with a
    /// pointer present. Never blocks; delivery happens on the sender task.
    pub fn emit(
        &self,
        gesture_id: u8,
        pointer: Option<LandmarkPoint>,
        frame_width: u32,
        frame_height: u32,
    ) -> Option<(u8, u8)> {
        self.enqueue(ControlPayload::for_gesture(
            gesture_id,
            pointer,
            frame_width,
            frame_height,
        ));
        scaled_pointer(gesture_id, pointer, frame_width, frame_height)
    }

    /// Queue a pre-built payload
    pub fn enqueue(&self, payload: ControlPayload) {
        match self.queue.push(payload) {
            Ok(evicted) => {
                self.counters.enqueued.fetch_add(1, Ordering::Relaxed);
                if let Some(stale) = evicted {
                    self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                    warn!(?stale, "outbound queue full, dropped oldest payload");
                }
                debug!(?payload, "payload queued");
            }
            Err(err) => {
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                warn!(%err, ?payload, "payload not queued");
            }
        }
    }

    pub fn universe(&self) -> u16 {
        self.universe
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn stats(&self) -> EmitterStats {
        self.counters.snapshot()
    }

    /// Deliver everything still queued, then stop the sender task
    pub async fn shutdown(mut self) -> EmitterStats {
        self.queue.close();
        if let Some(worker) = self.worker.take() {
            if let Err(err) = worker.await {
                warn!(%err, "sender task ended abnormally");
            }
        }
        let stats = self.counters.snapshot();
        info!(
            destination = %self.destination,
            sent = stats.sent,
            failed = stats.failed,
            dropped = stats.dropped,
            "protocol emitter stopped"
        );
        stats
    }
}

impl Drop for ProtocolEmitter {
    fn drop(&mut self) {
        // Lets a detached sender task finish the backlog and exit
        self.queue.close();
    }
}

async fn run_sender(
    transport: Box<dyn DmxTransport>,
    queue: Arc<OutboundQueue<ControlPayload>>,
    counters: Arc<Counters>,
    universe: u16,
) {
    let mut sequence = SequenceCounter::new();

    while let Some(payload) = queue.pop().await {
        let frame = match ArtDmx::channel_group(sequence.next(), universe, payload).encode() {
            Ok(frame) => frame,
            Err(err) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                warn!(%err, ?payload, "payload could not be encoded");
                continue;
            }
        };

        match transport.send_frame(&frame).await {
            Ok(()) => {
                counters.sent.fetch_add(1, Ordering::Relaxed);
                trace!(?payload, "frame sent");
            }
            Err(err) => {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                if err.kind() == std::io::ErrorKind::NetworkUnreachable {
                    warn!(
                        destination = %transport.describe(),
                        "network error: the specified address is unreachable"
                    );
                } else {
                    warn!(
                        destination = %transport.describe(),
                        error = %GestureLinkError::from(err),
                        "frame send failed"
                    );
                }
            }
        }
    }

    debug!("sender task drained");
}
