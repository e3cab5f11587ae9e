//! Event surfaces between a peer connection and its observers.
//!
//! Each observer in this crate implements exactly one of the handler traits.
//! Every method returns a [`Result`] so a contract violation can be reported
//! instead of aborting when the observer runs under
//! [`ViolationPolicy::Report`](crate::config::ViolationPolicy::Report).
//!
//! The `*Source` traits are the read-only views observers take of objects
//! owned by the peer connection.

use crate::candidate::{RTCIceCandidate, RTCPeerConnectionIceEvent};
use crate::data_channel_observer::RTCDataChannelMessage;
use crate::error::Result;
use crate::media::{RTCMediaStream, RTCRtpReceiver};
use crate::state::{
    RTCDataChannelState, RTCIceConnectionState, RTCIceGatheringState, RTCSignalingState,
};
use crate::stats::RawStatsReport;
use std::cell::RefCell;
use std::rc::{Rc, Weak};

/// Authoritative state snapshot of the observed peer connection.
pub trait PeerConnectionStateSource {
    fn signaling_state(&self) -> RTCSignalingState;
    fn ice_connection_state(&self) -> RTCIceConnectionState;
    fn ice_gathering_state(&self) -> RTCIceGatheringState;
}

/// A data channel owned by the peer connection.
///
/// The channel keeps at most one registered observer and holds it weakly, so
/// a dropped observer is never called back.
pub trait DataChannelSource {
    fn label(&self) -> String;
    fn ready_state(&self) -> RTCDataChannelState;
    fn register_observer(&self, observer: Weak<RefCell<dyn DataChannelEventHandler>>);
    /// Removes `observer` if it is still the registered one. Any other
    /// registration is left untouched.
    fn unregister_observer(&self, observer: &Weak<RefCell<dyn DataChannelEventHandler>>);
}

/// Full set of peer connection callbacks. There are no default methods: an
/// observer has to take a position on every event.
pub trait PeerConnectionEventHandler {
    fn on_signaling_state_change(&mut self, state: RTCSignalingState) -> Result<()>;
    fn on_ice_connection_state_change(&mut self, state: RTCIceConnectionState) -> Result<()>;
    fn on_ice_gathering_state_change(&mut self, state: RTCIceGatheringState) -> Result<()>;
    fn on_add_stream(&mut self, stream: Rc<RTCMediaStream>) -> Result<()>;
    fn on_remove_stream(&mut self, stream: Rc<RTCMediaStream>) -> Result<()>;
    fn on_renegotiation_needed(&mut self) -> Result<()>;
    fn on_data_channel(&mut self, data_channel: Rc<dyn DataChannelSource>) -> Result<()>;
    fn on_ice_candidate(&mut self, event: &RTCPeerConnectionIceEvent) -> Result<()>;
    fn on_ice_candidates_removed(&mut self, candidates: &[RTCIceCandidate]) -> Result<()>;
    fn on_ice_connection_receiving_change(&mut self, receiving: bool) -> Result<()>;
    fn on_add_track(
        &mut self,
        receiver: Rc<RTCRtpReceiver>,
        streams: &[Rc<RTCMediaStream>],
    ) -> Result<()>;
}

/// Completion of a one-shot asynchronous operation producing `T` on success.
pub trait CompletionHandler<T> {
    fn on_success(&mut self, value: T) -> Result<()>;
    fn on_failure(&mut self, error: &str) -> Result<()>;
}

pub trait DataChannelEventHandler {
    fn on_state_change(&mut self) -> Result<()>;
    fn on_message(&mut self, message: &RTCDataChannelMessage) -> Result<()>;
    fn on_buffered_amount_change(&mut self, previous_amount: u64) -> Result<()>;
}

/// Legacy stats delivery: a flat list of category-tagged reports.
pub trait StatsHandler {
    fn on_complete(&mut self, reports: &[RawStatsReport]) -> Result<()>;
}

/// Standard stats delivery: a shared, immutable report snapshot.
pub trait StatsCollectorHandler {
    fn on_stats_delivered(&mut self, report: Rc<[RawStatsReport]>) -> Result<()>;
}
