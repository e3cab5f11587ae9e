use crate::candidate::{RTCIceCandidate, RTCIceCandidateInit, RTCPeerConnectionIceEvent};
use crate::checker;
use crate::config::HarnessConfiguration;
use crate::contract::ContractGuard;
use crate::error::{Error, Result};
use crate::handler::{DataChannelSource, PeerConnectionEventHandler, PeerConnectionStateSource};
use crate::media::{MediaStreamId, RTCMediaStream, RTCRtpReceiver, RemoteStreamSet};
use crate::recorder::{EventPayload, EventRecorder, RecordedEvent};
use crate::state::{RTCIceConnectionState, RTCIceGatheringState, RTCSignalingState};
use log::debug;
use std::rc::{Rc, Weak};

/// PeerConnectionObserverHarness observes one peer connection, records every
/// event it emits and cross-checks each state change against the peer
/// connection's own snapshot.
///
/// ```
/// use rtc_harness::config::{HarnessConfigurationBuilder, ViolationPolicy};
/// use rtc_harness::handler::{PeerConnectionEventHandler, PeerConnectionStateSource};
/// use rtc_harness::peer_connection_observer::PeerConnectionObserverHarness;
/// use rtc_harness::state::*;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// #[derive(Default)]
/// struct Snapshot(Cell<RTCSignalingState>);
///
/// impl PeerConnectionStateSource for Snapshot {
///     fn signaling_state(&self) -> RTCSignalingState { self.0.get() }
///     fn ice_connection_state(&self) -> RTCIceConnectionState { RTCIceConnectionState::New }
///     fn ice_gathering_state(&self) -> RTCIceGatheringState { RTCIceGatheringState::New }
/// }
///
/// let pc = Rc::new(Snapshot::default());
/// let config = HarnessConfigurationBuilder::new()
///     .with_violation_policy(ViolationPolicy::Report)
///     .build();
/// let mut harness = PeerConnectionObserverHarness::new(&config);
/// harness.attach(pc.clone());
///
/// pc.0.set(RTCSignalingState::HaveLocalOffer);
/// harness.on_signaling_state_change(RTCSignalingState::HaveLocalOffer).unwrap();
/// assert_eq!(harness.signaling_state(), RTCSignalingState::HaveLocalOffer);
///
/// // the event disagrees with the peer connection
/// assert!(harness.on_signaling_state_change(RTCSignalingState::Stable).is_err());
/// assert!(harness.violation().is_some());
/// ```
pub struct PeerConnectionObserverHarness {
    guard: ContractGuard,
    peer_connection: Option<Rc<dyn PeerConnectionStateSource>>,
    recorder: EventRecorder,

    remote_streams: RemoteStreamSet,
    last_added_stream: Weak<RTCMediaStream>,
    last_removed_stream: Weak<RTCMediaStream>,

    last_candidate: Option<RTCIceCandidateInit>,
    last_data_channel: Option<Weak<dyn DataChannelSource>>,

    num_added_tracks: usize,
    last_added_track_label: String,
    last_added_track_streams: Vec<MediaStreamId>,
}

impl PeerConnectionObserverHarness {
    /// Creates a harness that is not attached to any peer connection yet.
    pub fn new(config: &HarnessConfiguration) -> Self {
        Self {
            guard: ContractGuard::new("peer connection observer", config.violation_policy()),
            peer_connection: None,
            recorder: EventRecorder::new(config.record_events()),
            remote_streams: RemoteStreamSet::new(),
            last_added_stream: Weak::new(),
            last_removed_stream: Weak::new(),
            last_candidate: None,
            last_data_channel: None,
            num_added_tracks: 0,
            last_added_track_label: String::new(),
            last_added_track_streams: vec![],
        }
    }

    /// Creates a harness attached to `peer_connection`.
    pub fn with_peer_connection(
        config: &HarnessConfiguration,
        peer_connection: Rc<dyn PeerConnectionStateSource>,
    ) -> Self {
        let mut harness = Self::new(config);
        harness.attach(peer_connection);
        harness
    }

    /// Attaches the harness to `peer_connection` and adopts its current
    /// signaling state as the latest observed one.
    pub fn attach(&mut self, peer_connection: Rc<dyn PeerConnectionStateSource>) {
        let state = peer_connection.signaling_state();
        debug!("attached to peer connection in signaling state {state}");
        self.recorder.reset_signaling_state(state);
        self.peer_connection = Some(peer_connection);
    }

    pub fn detach(&mut self) {
        self.peer_connection = None;
    }

    pub fn is_attached(&self) -> bool {
        self.peer_connection.is_some()
    }

    fn peer_connection(&self) -> Result<&Rc<dyn PeerConnectionStateSource>> {
        self.peer_connection.as_ref().ok_or(Error::ErrHarnessDetached)
    }

    /// Latest signaling state seen through an event, or captured on attach.
    pub fn signaling_state(&self) -> RTCSignalingState {
        self.recorder.signaling_state()
    }

    pub fn ice_connection_state(&self) -> RTCIceConnectionState {
        self.recorder.ice_connection_state()
    }

    pub fn ice_gathering_state(&self) -> RTCIceGatheringState {
        self.recorder.ice_gathering_state()
    }

    pub fn ice_complete(&self) -> bool {
        self.recorder.ice_complete()
    }

    pub fn renegotiation_needed(&self) -> bool {
        self.recorder.renegotiation_needed()
    }

    /// True once any ICE related callback or renegotiation request fired.
    pub fn callback_triggered(&self) -> bool {
        self.recorder.callback_triggered()
    }

    pub fn remote_streams(&self) -> &RemoteStreamSet {
        &self.remote_streams
    }

    pub fn remote_stream(&self, label: &str) -> Option<Rc<RTCMediaStream>> {
        self.remote_streams.find(label).cloned()
    }

    /// Returns the label of the last added stream.
    /// Empty string if no stream has been added or it no longer exists.
    pub fn last_added_stream_label(&self) -> String {
        self.last_added_stream
            .upgrade()
            .map(|stream| stream.label().to_owned())
            .unwrap_or_default()
    }

    /// Returns the label of the last removed stream.
    /// Empty string if no stream has been removed or it no longer exists.
    pub fn last_removed_stream_label(&self) -> String {
        self.last_removed_stream
            .upgrade()
            .map(|stream| stream.label().to_owned())
            .unwrap_or_default()
    }

    pub fn last_candidate(&self) -> Option<&RTCIceCandidateInit> {
        self.last_candidate.as_ref()
    }

    /// The most recent data channel announced by the peer connection, while
    /// the peer connection keeps it alive.
    pub fn last_data_channel(&self) -> Option<Rc<dyn DataChannelSource>> {
        self.last_data_channel.as_ref().and_then(Weak::upgrade)
    }

    pub fn num_added_tracks(&self) -> usize {
        self.num_added_tracks
    }

    pub fn last_added_track_label(&self) -> &str {
        &self.last_added_track_label
    }

    pub fn last_added_track_streams(&self) -> &[MediaStreamId] {
        &self.last_added_track_streams
    }

    pub fn recorder(&self) -> &EventRecorder {
        &self.recorder
    }

    pub fn events(&self) -> &[RecordedEvent] {
        self.recorder.events()
    }

    /// The first contract violation reported by this harness, if any.
    pub fn violation(&self) -> Option<&Error> {
        self.guard.violation()
    }
}

impl PeerConnectionEventHandler for PeerConnectionObserverHarness {
    fn on_signaling_state_change(&mut self, state: RTCSignalingState) -> Result<()> {
        let check = self
            .peer_connection()
            .and_then(|pc| checker::check_signaling_state(state, pc.signaling_state()));
        self.guard.enforce(check)?;

        debug!("signaling state changed to {state}");
        self.recorder
            .record(EventPayload::SignalingStateChange(state));
        Ok(())
    }

    fn on_ice_connection_state_change(&mut self, state: RTCIceConnectionState) -> Result<()> {
        let check = self
            .peer_connection()
            .and_then(|pc| checker::check_ice_connection_state(state, pc.ice_connection_state()));
        self.guard.enforce(check)?;

        debug!("ice connection state changed to {state}");
        self.recorder
            .record(EventPayload::IceConnectionStateChange(state));
        Ok(())
    }

    fn on_ice_gathering_state_change(&mut self, state: RTCIceGatheringState) -> Result<()> {
        let check = self
            .peer_connection()
            .and_then(|pc| checker::check_ice_gathering_state(state, pc.ice_gathering_state()));
        self.guard.enforce(check)?;

        debug!("ice gathering state changed to {state}");
        self.recorder
            .record(EventPayload::IceGatheringStateChange(state));
        Ok(())
    }

    fn on_add_stream(&mut self, stream: Rc<RTCMediaStream>) -> Result<()> {
        self.guard.enforce(Ok(()))?;

        let label = stream.label().to_owned();
        self.last_added_stream = Rc::downgrade(&stream);
        if !self.remote_streams.add(stream) {
            debug!("remote stream {label} was already present");
        }
        self.recorder.record(EventPayload::AddStream(label));
        Ok(())
    }

    fn on_remove_stream(&mut self, stream: Rc<RTCMediaStream>) -> Result<()> {
        self.guard.enforce(Ok(()))?;

        self.last_removed_stream = Rc::downgrade(&stream);
        if !self.remote_streams.remove(&stream) {
            debug!("remote stream {} was not present", stream.label());
        }
        self.recorder
            .record(EventPayload::RemoveStream(stream.label().to_owned()));
        Ok(())
    }

    fn on_renegotiation_needed(&mut self) -> Result<()> {
        self.guard.enforce(Ok(()))?;

        self.recorder.record(EventPayload::RenegotiationNeeded);
        Ok(())
    }

    fn on_data_channel(&mut self, data_channel: Rc<dyn DataChannelSource>) -> Result<()> {
        self.guard.enforce(Ok(()))?;

        let label = data_channel.label();
        debug!("remote data channel {label} announced");
        self.last_data_channel = Some(Rc::downgrade(&data_channel));
        self.recorder.record(EventPayload::DataChannel(label));
        Ok(())
    }

    fn on_ice_candidate(&mut self, event: &RTCPeerConnectionIceEvent) -> Result<()> {
        let check = self
            .peer_connection()
            .and_then(|pc| checker::check_candidate_gathering(pc.ice_gathering_state()))
            .and_then(|_| checker::reserialize_candidate(event));
        let init = self.guard.enforce(check)?;

        debug!(
            "ice candidate {} for mid {:?} mline {:?}",
            init.candidate, init.sdp_mid, init.sdp_mline_index
        );
        self.last_candidate = Some(init.clone());
        self.recorder.record(EventPayload::IceCandidate(init));
        Ok(())
    }

    fn on_ice_candidates_removed(&mut self, candidates: &[RTCIceCandidate]) -> Result<()> {
        self.guard.enforce(Ok(()))?;

        self.recorder
            .record(EventPayload::IceCandidatesRemoved(candidates.to_vec()));
        Ok(())
    }

    fn on_ice_connection_receiving_change(&mut self, receiving: bool) -> Result<()> {
        self.guard.enforce(Ok(()))?;

        self.recorder
            .record(EventPayload::IceConnectionReceivingChange(receiving));
        Ok(())
    }

    fn on_add_track(
        &mut self,
        receiver: Rc<RTCRtpReceiver>,
        streams: &[Rc<RTCMediaStream>],
    ) -> Result<()> {
        self.guard.enforce(Ok(()))?;

        self.num_added_tracks += 1;
        self.last_added_track_label = receiver.id().to_owned();
        self.last_added_track_streams = streams.iter().map(|s| s.label().to_owned()).collect();
        debug!(
            "track {} added by receiver {} ({} total)",
            receiver.track_id(),
            receiver.id(),
            self.num_added_tracks
        );

        self.recorder.record(EventPayload::AddTrack {
            receiver_id: receiver.id().to_owned(),
            stream_ids: self.last_added_track_streams.clone(),
        });
        Ok(())
    }
}
