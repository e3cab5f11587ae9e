//! Media stream and receiver handles shared with the peer connection.

use std::rc::Rc;

pub type MediaStreamId = String;
pub type MediaStreamTrackId = String;
pub type RTCRtpReceiverId = String;

/// A remote media stream as announced by the peer connection. The harness
/// only reads it.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCMediaStream {
    label: MediaStreamId,
    track_ids: Vec<MediaStreamTrackId>,
}

impl RTCMediaStream {
    pub fn new(label: impl Into<MediaStreamId>, track_ids: Vec<MediaStreamTrackId>) -> Self {
        Self {
            label: label.into(),
            track_ids,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn track_ids(&self) -> &[MediaStreamTrackId] {
        &self.track_ids
    }
}

/// RTCRtpReceiver identifies the receiver that produced a remote track.
#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct RTCRtpReceiver {
    id: RTCRtpReceiverId,
    track_id: MediaStreamTrackId,
}

impl RTCRtpReceiver {
    pub fn new(id: impl Into<RTCRtpReceiverId>, track_id: impl Into<MediaStreamTrackId>) -> Self {
        Self {
            id: id.into(),
            track_id: track_id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn track_id(&self) -> &str {
        &self.track_id
    }
}

/// RemoteStreamSet mirrors the set of remote streams announced through
/// add/remove events. Labels are unique; insertion order is kept.
#[derive(Default, Debug, Clone)]
pub struct RemoteStreamSet {
    streams: Vec<Rc<RTCMediaStream>>,
}

impl RemoteStreamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `stream` unless a stream with the same label is already present.
    /// Returns whether the set changed.
    pub fn add(&mut self, stream: Rc<RTCMediaStream>) -> bool {
        if self.find(stream.label()).is_some() {
            return false;
        }
        self.streams.push(stream);
        true
    }

    /// Removes the stream carrying the label of `stream`. Returns whether the
    /// set changed.
    pub fn remove(&mut self, stream: &RTCMediaStream) -> bool {
        let before = self.streams.len();
        self.streams.retain(|s| s.label() != stream.label());
        self.streams.len() != before
    }

    pub fn find(&self, label: &str) -> Option<&Rc<RTCMediaStream>> {
        self.streams.iter().find(|s| s.label() == label)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.find(label).is_some()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.streams.iter().map(|s| s.label())
    }

    pub fn len(&self) -> usize {
        self.streams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_remote_stream_set() {
        let a = Rc::new(RTCMediaStream::new("a", vec!["audio".to_owned()]));
        let b = Rc::new(RTCMediaStream::new("b", vec![]));
        let mut set = RemoteStreamSet::new();
        assert!(set.is_empty());

        assert!(set.add(Rc::clone(&a)));
        assert!(set.add(Rc::clone(&b)));
        assert!(!set.add(Rc::new(RTCMediaStream::new("a", vec![]))));
        assert_eq!(set.len(), 2);
        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["a", "b"]);

        let found = set.find("a").expect("stream a");
        assert!(Rc::ptr_eq(found, &a));
        assert_eq!(found.track_ids(), ["audio".to_owned()]);

        assert!(set.remove(&a));
        assert!(!set.remove(&a));
        assert!(!set.contains("a"));
        assert!(set.contains("b"));
    }
}
