//! Transmission gate - debounce for outbound control updates
//!
//! Only state changes go out on the wire. A new id passes once it has
//! been seen on two consecutive frames after something else; a steady id
//! is suppressed. The pointer sign bypasses the debounce so the cursor
//! keeps streaming.

use tracing::debug;

use crate::classifier::HandSign;

/// Raw ids remembered by the gate
pub const GATE_WINDOW: usize = 3;

/// Debounce state for one output channel group
#[derive(Clone, Debug)]
pub struct TransmissionGate {
    /// Last three raw ids, oldest first. `None` until an id has been seen.
    window: [Option<u8>; GATE_WINDOW],

    /// Last id that passed the gate
    last_emitted: Option<u8>,
}

impl TransmissionGate {
    pub fn new() -> Self {
        Self {
            window: [None; GATE_WINDOW],
            last_emitted: None,
        }
    }

    /// Record `raw_id` and decide whether it should be transmitted
    ///
    /// The window always advances, whatever the verdict.
    pub fn should_emit(&mut self, raw_id: u8) -> bool {
        self.window.rotate_left(1);
        self.window[GATE_WINDOW - 1] = Some(raw_id);

        let verdict = HandSign::from_id(raw_id).is_pointer() || self.confirmed_transition();
        if verdict {
            self.last_emitted = Some(raw_id);
        }

        debug!(raw_id, verdict, window = ?self.window, "gate verdict");
        verdict
    }

    /// Two newest entries agree and differ from the one before
    ///
    /// An unseen slot stands for the no-op id: before anything has been
    /// sent the channel group is at zero, so a leading no-op is not news.
    fn confirmed_transition(&self) -> bool {
        let resolve = |slot: Option<u8>| slot.unwrap_or(HandSign::NO_OP.id());
        let [older, previous, current] = self.window.map(resolve);
        previous == current && older != previous
    }

    pub fn last_emitted(&self) -> Option<u8> {
        self.last_emitted
    }

    /// Forget everything, as if no id had been seen
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for TransmissionGate {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(gate: &mut TransmissionGate, ids: &[u8]) -> Vec<bool> {
        ids.iter().map(|id| gate.should_emit(*id)).collect()
    }

    #[test]
    fn test_emits_once_on_confirmed_change() {
        let mut gate = TransmissionGate::new();
        assert_eq!(
            run(&mut gate, &[0, 0, 1, 1, 1, 0]),
            vec![false, false, false, true, false, false]
        );
        assert_eq!(gate.last_emitted(), Some(1));
    }

    #[test]
    fn test_pointer_bypasses_debounce() {
        let mut gate = TransmissionGate::new();
        run(&mut gate, &[0, 0, 1, 1, 1, 0]);
        gate.reset();
        assert_eq!(run(&mut gate, &[2, 2, 2, 2]), vec![true; 4]);
    }

    #[test]
    fn test_return_to_no_op_is_confirmed() {
        let mut gate = TransmissionGate::new();
        assert_eq!(
            run(&mut gate, &[3, 3, 3, 0, 0, 0]),
            vec![false, true, false, false, true, false]
        );
    }

    #[test]
    fn test_single_frame_glitch_is_not_sent() {
        let mut gate = TransmissionGate::new();
        run(&mut gate, &[1, 1, 1]);
        // The glitch itself never goes out; the steady id is re-confirmed after it
        assert_eq!(run(&mut gate, &[3, 1, 1, 1]), vec![false, false, true, false]);
        assert_eq!(gate.last_emitted(), Some(1));
    }

    #[test]
    fn test_window_advances_on_suppressed_ids() {
        let mut gate = TransmissionGate::new();
        assert!(!gate.should_emit(1));
        assert!(gate.should_emit(1));
        assert!(!gate.should_emit(1));
        assert!(!gate.should_emit(1));
        assert_eq!(gate.last_emitted(), Some(1));
    }
}
