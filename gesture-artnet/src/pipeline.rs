//! Gesture pipeline - one frame in, at most one control update out
//!
//! Owns every piece of per-session state: the temporal histories, the
//! transmission gate and the outbound emitter. Nothing here is global;
//! the frame loop holds the pipeline and calls `process_frame` once
//! per camera frame.

use tracing::debug;

use crate::artnet::{EmitterStats, ProtocolEmitter};
use crate::bridge::{HandFrame, PoseClassifier, TrajectoryClassifier};
use crate::classifier::{normalize_pose, normalize_trajectory, HandSign};
use crate::config::Config;
use crate::stability::{TemporalAggregator, TransmissionGate};

/// What happened to one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Raw keypoint classifier id (0 without a hand)
    pub hand_sign: u8,
    /// Majority-voted hand sign over the history window
    pub smoothed_hand_sign: u8,
    /// Raw point-history classifier id, when the trajectory was full
    pub finger_gesture: Option<u8>,
    /// Majority-voted point-history id
    pub smoothed_finger_gesture: u8,
    /// Update passed the gate and was queued for sending
    pub emitted: bool,
    /// Scaled pointer channels, only for an emitted pointer update
    pub pointer: Option<(u8, u8)>,
}

pub struct GesturePipeline {
    config: Config,
    aggregator: TemporalAggregator,
    gate: TransmissionGate,
    emitter: ProtocolEmitter,
    frames: u64,
}

impl GesturePipeline {
    pub fn new(config: Config, emitter: ProtocolEmitter) -> Self {
        Self {
            config,
            aggregator: TemporalAggregator::new(),
            gate: TransmissionGate::new(),
            emitter,
            frames: 0,
        }
    }

    // ========================================================================
    // FRAME LOOP
    // ========================================================================

    /// Run one frame through normalization, smoothing, gating and output
    pub fn process_frame<P, T>(
        &mut self,
        hand: Option<&HandFrame>,
        pose_classifier: &mut P,
        trajectory_classifier: &mut T,
    ) -> FrameReport
    where
        P: PoseClassifier + ?Sized,
        T: TrajectoryClassifier + ?Sized,
    {
        self.frames += 1;

        let Some(hand) = hand else {
            return self.process_empty_frame();
        };

        let pose = normalize_pose(&hand.landmarks);
        let hand_sign = pose_classifier.classify_pose(&pose);
        let pointer = hand.pointer();

        self.aggregator.on_frame(true, hand_sign, Some(pointer));

        let finger_gesture = self.aggregator.trajectory().map(|history| {
            let features = normalize_trajectory(
                &history,
                self.config.capture_width,
                self.config.capture_height,
            );
            trajectory_classifier.classify_trajectory(&features)
        });
        self.aggregator
            .record_finger_gesture(finger_gesture.unwrap_or(0));

        let mut report = FrameReport {
            hand_sign,
            smoothed_hand_sign: self.aggregator.smoothed_gesture_id(),
            finger_gesture,
            smoothed_finger_gesture: self.aggregator.smoothed_finger_gesture(),
            ..FrameReport::default()
        };

        if self.gate.should_emit(hand_sign) {
            report.emitted = true;
            report.pointer = self.emitter.emit(
                hand_sign,
                Some(pointer),
                self.config.pointer_width,
                self.config.pointer_height,
            );
        }

        debug!(
            frame = self.frames,
            handedness = hand.handedness.as_str(),
            hand_sign,
            smoothed = report.smoothed_hand_sign,
            emitted = report.emitted,
            "frame processed"
        );
        report
    }

    /// No hand: the histories advance with the no-op id and the origin,
    /// and the no-op id goes through the gate like any other
    fn process_empty_frame(&mut self) -> FrameReport {
        let no_op = HandSign::NO_OP.id();
        self.aggregator.on_frame(false, no_op, None);

        let mut report = FrameReport {
            hand_sign: no_op,
            smoothed_hand_sign: self.aggregator.smoothed_gesture_id(),
            finger_gesture: None,
            smoothed_finger_gesture: self.aggregator.smoothed_finger_gesture(),
            ..FrameReport::default()
        };

        if self.gate.should_emit(no_op) {
            report.emitted = true;
            report.pointer = self.emitter.emit(
                no_op,
                None,
                self.config.pointer_width,
                self.config.pointer_height,
            );
        }

        debug!(frame = self.frames, emitted = report.emitted, "frame without hand");
        report
    }

    // ========================================================================
    // STATE ACCESS
    // ========================================================================

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn aggregator(&self) -> &TemporalAggregator {
        &self.aggregator
    }

    pub fn gate(&self) -> &TransmissionGate {
        &self.gate
    }

    pub fn emitter(&self) -> &ProtocolEmitter {
        &self.emitter
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Clear histories and the gate window; the session stays open
    pub fn reset(&mut self) {
        self.aggregator.reset();
        self.gate.reset();
    }

    /// Flush queued updates and close the session
    pub async fn shutdown(self) -> EmitterStats {
        self.emitter.shutdown().await
    }
}
