use crate::candidate::{RTCIceCandidate, RTCIceCandidateInit};
use crate::media::{MediaStreamId, RTCRtpReceiverId};
use crate::state::{RTCIceConnectionState, RTCIceGatheringState, RTCSignalingState};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    SignalingStateChange,
    IceConnectionStateChange,
    IceGatheringStateChange,
    AddStream,
    RemoveStream,
    RenegotiationNeeded,
    DataChannel,
    IceCandidate,
    IceCandidatesRemoved,
    IceConnectionReceivingChange,
    AddTrack,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            EventKind::SignalingStateChange => "signaling-state-change",
            EventKind::IceConnectionStateChange => "ice-connection-state-change",
            EventKind::IceGatheringStateChange => "ice-gathering-state-change",
            EventKind::AddStream => "add-stream",
            EventKind::RemoveStream => "remove-stream",
            EventKind::RenegotiationNeeded => "renegotiation-needed",
            EventKind::DataChannel => "data-channel",
            EventKind::IceCandidate => "ice-candidate",
            EventKind::IceCandidatesRemoved => "ice-candidates-removed",
            EventKind::IceConnectionReceivingChange => "ice-connection-receiving-change",
            EventKind::AddTrack => "add-track",
        };
        write!(f, "{s}")
    }
}

/// Content of a recorded event. Handles are never kept here, only copies of
/// the primitive values they expose.
#[derive(Debug, Clone, PartialEq)]
pub enum EventPayload {
    SignalingStateChange(RTCSignalingState),
    IceConnectionStateChange(RTCIceConnectionState),
    IceGatheringStateChange(RTCIceGatheringState),
    AddStream(MediaStreamId),
    RemoveStream(MediaStreamId),
    RenegotiationNeeded,
    DataChannel(String),
    IceCandidate(RTCIceCandidateInit),
    IceCandidatesRemoved(Vec<RTCIceCandidate>),
    IceConnectionReceivingChange(bool),
    AddTrack {
        receiver_id: RTCRtpReceiverId,
        stream_ids: Vec<MediaStreamId>,
    },
}

impl EventPayload {
    pub fn kind(&self) -> EventKind {
        match self {
            EventPayload::SignalingStateChange(_) => EventKind::SignalingStateChange,
            EventPayload::IceConnectionStateChange(_) => EventKind::IceConnectionStateChange,
            EventPayload::IceGatheringStateChange(_) => EventKind::IceGatheringStateChange,
            EventPayload::AddStream(_) => EventKind::AddStream,
            EventPayload::RemoveStream(_) => EventKind::RemoveStream,
            EventPayload::RenegotiationNeeded => EventKind::RenegotiationNeeded,
            EventPayload::DataChannel(_) => EventKind::DataChannel,
            EventPayload::IceCandidate(_) => EventKind::IceCandidate,
            EventPayload::IceCandidatesRemoved(_) => EventKind::IceCandidatesRemoved,
            EventPayload::IceConnectionReceivingChange(_) => {
                EventKind::IceConnectionReceivingChange
            }
            EventPayload::AddTrack { .. } => EventKind::AddTrack,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedEvent {
    pub sequence_number: u64,
    pub kind: EventKind,
    pub payload: EventPayload,
}

/// EventRecorder appends events in arrival order and keeps summary fields
/// derived from them.
///
/// Sequence numbers start at 0 and advance on every recorded event, even when
/// the ordered log is disabled.
#[derive(Debug, Clone)]
pub struct EventRecorder {
    record_events: bool,
    next_sequence_number: u64,
    events: Vec<RecordedEvent>,
    counts: HashMap<EventKind, usize>,

    signaling_state: RTCSignalingState,
    ice_connection_state: RTCIceConnectionState,
    ice_gathering_state: RTCIceGatheringState,
    ice_complete: bool,
    renegotiation_needed: bool,
    callback_triggered: bool,
}

impl Default for EventRecorder {
    fn default() -> Self {
        Self::new(true)
    }
}

impl EventRecorder {
    pub fn new(record_events: bool) -> Self {
        Self {
            record_events,
            next_sequence_number: 0,
            events: vec![],
            counts: HashMap::new(),
            signaling_state: RTCSignalingState::default(),
            ice_connection_state: RTCIceConnectionState::default(),
            ice_gathering_state: RTCIceGatheringState::default(),
            ice_complete: false,
            renegotiation_needed: false,
            callback_triggered: false,
        }
    }

    /// Records `payload` and returns the sequence number assigned to it.
    pub fn record(&mut self, payload: EventPayload) -> u64 {
        let sequence_number = self.next_sequence_number;
        self.next_sequence_number += 1;

        let kind = payload.kind();
        *self.counts.entry(kind).or_insert(0) += 1;
        self.apply(&payload);

        log::trace!("recorded #{sequence_number} {kind}");
        if self.record_events {
            self.events.push(RecordedEvent {
                sequence_number,
                kind,
                payload,
            });
        }

        sequence_number
    }

    fn apply(&mut self, payload: &EventPayload) {
        match payload {
            EventPayload::SignalingStateChange(state) => self.signaling_state = *state,
            EventPayload::IceConnectionStateChange(state) => {
                self.ice_connection_state = *state;
                self.callback_triggered = true;
            }
            EventPayload::IceGatheringStateChange(state) => {
                self.ice_gathering_state = *state;
                self.ice_complete = *state == RTCIceGatheringState::Complete;
                self.callback_triggered = true;
            }
            EventPayload::RenegotiationNeeded => {
                self.renegotiation_needed = true;
                self.callback_triggered = true;
            }
            EventPayload::IceCandidate(_)
            | EventPayload::IceCandidatesRemoved(_)
            | EventPayload::IceConnectionReceivingChange(_) => self.callback_triggered = true,
            EventPayload::AddStream(_)
            | EventPayload::RemoveStream(_)
            | EventPayload::DataChannel(_)
            | EventPayload::AddTrack { .. } => {}
        }
    }

    /// Seeds the latest signaling state without recording an event.
    pub(crate) fn reset_signaling_state(&mut self, state: RTCSignalingState) {
        self.signaling_state = state;
    }

    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    pub fn events_of(&self, kind: EventKind) -> impl Iterator<Item = &RecordedEvent> {
        self.events.iter().filter(move |e| e.kind == kind)
    }

    pub fn last_event(&self) -> Option<&RecordedEvent> {
        self.events.last()
    }

    /// Number of events of `kind` seen so far, whether logged or not.
    pub fn event_count(&self, kind: EventKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn total_event_count(&self) -> u64 {
        self.next_sequence_number
    }

    pub fn signaling_state(&self) -> RTCSignalingState {
        self.signaling_state
    }

    pub fn ice_connection_state(&self) -> RTCIceConnectionState {
        self.ice_connection_state
    }

    pub fn ice_gathering_state(&self) -> RTCIceGatheringState {
        self.ice_gathering_state
    }

    pub fn ice_complete(&self) -> bool {
        self.ice_complete
    }

    pub fn renegotiation_needed(&self) -> bool {
        self.renegotiation_needed
    }

    pub fn callback_triggered(&self) -> bool {
        self.callback_triggered
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_sequence_numbers_follow_arrival_order() {
        let mut recorder = EventRecorder::default();
        let payloads = vec![
            EventPayload::SignalingStateChange(RTCSignalingState::HaveLocalOffer),
            EventPayload::RenegotiationNeeded,
            EventPayload::SignalingStateChange(RTCSignalingState::Stable),
        ];

        for (i, payload) in payloads.into_iter().enumerate() {
            assert_eq!(recorder.record(payload), i as u64);
        }

        let sequence_numbers: Vec<u64> =
            recorder.events().iter().map(|e| e.sequence_number).collect();
        assert_eq!(sequence_numbers, vec![0, 1, 2]);
        assert_eq!(recorder.event_count(EventKind::SignalingStateChange), 2);
        assert_eq!(recorder.events_of(EventKind::RenegotiationNeeded).count(), 1);
        assert_eq!(
            recorder.last_event().map(|e| &e.payload),
            Some(&EventPayload::SignalingStateChange(RTCSignalingState::Stable))
        );
    }

    #[test]
    fn test_summary_fields() {
        let mut recorder = EventRecorder::default();
        assert!(!recorder.callback_triggered());

        recorder.record(EventPayload::SignalingStateChange(
            RTCSignalingState::HaveRemoteOffer,
        ));
        assert_eq!(recorder.signaling_state(), RTCSignalingState::HaveRemoteOffer);
        assert!(!recorder.callback_triggered());

        recorder.record(EventPayload::IceGatheringStateChange(
            RTCIceGatheringState::Complete,
        ));
        assert!(recorder.ice_complete());
        assert!(recorder.callback_triggered());

        recorder.record(EventPayload::IceGatheringStateChange(
            RTCIceGatheringState::Gathering,
        ));
        assert!(!recorder.ice_complete());

        recorder.record(EventPayload::RenegotiationNeeded);
        assert!(recorder.renegotiation_needed());
    }

    #[test]
    fn test_disabled_log_keeps_summary() {
        let mut recorder = EventRecorder::new(false);
        recorder.record(EventPayload::IceConnectionStateChange(
            RTCIceConnectionState::Connected,
        ));
        assert_eq!(recorder.record(EventPayload::RenegotiationNeeded), 1);

        assert!(recorder.events().is_empty());
        assert_eq!(recorder.total_event_count(), 2);
        assert_eq!(
            recorder.ice_connection_state(),
            RTCIceConnectionState::Connected
        );
        assert_eq!(recorder.event_count(EventKind::RenegotiationNeeded), 1);
    }

    #[test]
    fn test_callback_flag_per_event_kind() {
        let tests = vec![
            (
                EventPayload::SignalingStateChange(RTCSignalingState::HaveLocalOffer),
                false,
            ),
            (
                EventPayload::IceConnectionStateChange(RTCIceConnectionState::Checking),
                true,
            ),
            (
                EventPayload::IceGatheringStateChange(RTCIceGatheringState::Gathering),
                true,
            ),
            (EventPayload::AddStream("s1".to_owned()), false),
            (EventPayload::RemoveStream("s1".to_owned()), false),
            (EventPayload::RenegotiationNeeded, true),
            (EventPayload::DataChannel("chat".to_owned()), false),
            (EventPayload::IceCandidate(RTCIceCandidateInit::default()), true),
            (EventPayload::IceCandidatesRemoved(vec![]), true),
            (EventPayload::IceConnectionReceivingChange(false), true),
            (
                EventPayload::AddTrack {
                    receiver_id: "r1".to_owned(),
                    stream_ids: vec![],
                },
                false,
            ),
        ];

        for (payload, triggers) in tests {
            let kind = payload.kind();
            let mut recorder = EventRecorder::default();
            recorder.record(payload);
            assert_eq!(recorder.callback_triggered(), triggers, "{kind}");
        }
    }
}
