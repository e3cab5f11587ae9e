use crate::error::{Error, Result};
use crate::state::UNSPECIFIED_STR;
use serde::{Deserialize, Serialize};
use std::fmt;

const CANDIDATE_PREFIX: &str = "candidate:";

/// RTCIceProtocol indicates the transport protocol type that is used in the
/// ice.URL structure.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RTCIceProtocol {
    #[default]
    Unspecified,

    #[serde(rename = "udp")]
    Udp,

    #[serde(rename = "tcp")]
    Tcp,
}

const ICE_PROTOCOL_UDP_STR: &str = "udp";
const ICE_PROTOCOL_TCP_STR: &str = "tcp";

impl From<&str> for RTCIceProtocol {
    fn from(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case(ICE_PROTOCOL_UDP_STR) {
            RTCIceProtocol::Udp
        } else if raw.eq_ignore_ascii_case(ICE_PROTOCOL_TCP_STR) {
            RTCIceProtocol::Tcp
        } else {
            RTCIceProtocol::Unspecified
        }
    }
}

impl fmt::Display for RTCIceProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RTCIceProtocol::Udp => write!(f, "{ICE_PROTOCOL_UDP_STR}"),
            RTCIceProtocol::Tcp => write!(f, "{ICE_PROTOCOL_TCP_STR}"),
            _ => write!(f, "{UNSPECIFIED_STR}"),
        }
    }
}

/// ICECandidateType represents the type of the ICE candidate used.
#[derive(Default, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RTCIceCandidateType {
    #[default]
    Unspecified,

    /// A candidate obtained from a local interface.
    #[serde(rename = "host")]
    Host,

    /// A candidate learned from a STUN server.
    #[serde(rename = "srflx")]
    Srflx,

    /// A candidate learned from a connectivity check.
    #[serde(rename = "prflx")]
    Prflx,

    /// A candidate obtained from a TURN relay.
    #[serde(rename = "relay")]
    Relay,
}

const ICE_CANDIDATE_TYPE_HOST_STR: &str = "host";
const ICE_CANDIDATE_TYPE_SRFLX_STR: &str = "srflx";
const ICE_CANDIDATE_TYPE_PRFLX_STR: &str = "prflx";
const ICE_CANDIDATE_TYPE_RELAY_STR: &str = "relay";

impl From<&str> for RTCIceCandidateType {
    fn from(raw: &str) -> Self {
        match raw {
            ICE_CANDIDATE_TYPE_HOST_STR => RTCIceCandidateType::Host,
            ICE_CANDIDATE_TYPE_SRFLX_STR => RTCIceCandidateType::Srflx,
            ICE_CANDIDATE_TYPE_PRFLX_STR => RTCIceCandidateType::Prflx,
            ICE_CANDIDATE_TYPE_RELAY_STR => RTCIceCandidateType::Relay,
            _ => RTCIceCandidateType::Unspecified,
        }
    }
}

impl fmt::Display for RTCIceCandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RTCIceCandidateType::Host => write!(f, "{ICE_CANDIDATE_TYPE_HOST_STR}"),
            RTCIceCandidateType::Srflx => write!(f, "{ICE_CANDIDATE_TYPE_SRFLX_STR}"),
            RTCIceCandidateType::Prflx => write!(f, "{ICE_CANDIDATE_TYPE_PRFLX_STR}"),
            RTCIceCandidateType::Relay => write!(f, "{ICE_CANDIDATE_TYPE_RELAY_STR}"),
            _ => write!(f, "{UNSPECIFIED_STR}"),
        }
    }
}

#[derive(Default, PartialEq, Eq, Debug, Copy, Clone, Serialize, Deserialize)]
pub enum RTCIceTcpCandidateType {
    #[default]
    Unspecified,

    #[serde(rename = "active")]
    Active,

    #[serde(rename = "passive")]
    Passive,

    #[serde(rename = "so")]
    SimultaneousOpen,
}

const TCP_TYPE_ACTIVE_STR: &str = "active";
const TCP_TYPE_PASSIVE_STR: &str = "passive";
const TCP_TYPE_SIMULTANEOUS_OPEN_STR: &str = "so";

impl From<&str> for RTCIceTcpCandidateType {
    fn from(raw: &str) -> Self {
        match raw {
            TCP_TYPE_ACTIVE_STR => RTCIceTcpCandidateType::Active,
            TCP_TYPE_PASSIVE_STR => RTCIceTcpCandidateType::Passive,
            TCP_TYPE_SIMULTANEOUS_OPEN_STR => RTCIceTcpCandidateType::SimultaneousOpen,
            _ => RTCIceTcpCandidateType::Unspecified,
        }
    }
}

impl fmt::Display for RTCIceTcpCandidateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RTCIceTcpCandidateType::Active => write!(f, "{TCP_TYPE_ACTIVE_STR}"),
            RTCIceTcpCandidateType::Passive => write!(f, "{TCP_TYPE_PASSIVE_STR}"),
            RTCIceTcpCandidateType::SimultaneousOpen => {
                write!(f, "{TCP_TYPE_SIMULTANEOUS_OPEN_STR}")
            }
            _ => write!(f, "{UNSPECIFIED_STR}"),
        }
    }
}

/// ICECandidate represents a ice candidate
///
/// ## Specifications
///
/// * [MDN]
/// * [W3C]
///
/// [MDN]: https://developer.mozilla.org/en-US/docs/Web/API/RTCIceCandidate
/// [W3C]: https://w3c.github.io/webrtc-pc/#rtcicecandidate-interface
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RTCIceCandidate {
    pub foundation: String,
    pub priority: u32,
    pub address: String,
    pub protocol: RTCIceProtocol,
    pub port: u16,
    pub typ: RTCIceCandidateType,
    pub component: u16,
    pub related_address: String,
    pub related_port: u16,
    pub tcp_type: RTCIceTcpCandidateType,
}

impl RTCIceCandidate {
    /// marshal returns the candidate-attribute value of this candidate, without
    /// the `candidate:` prefix.
    pub fn marshal(&self) -> String {
        let mut val = format!(
            "{} {} {} {} {} {} typ {}",
            self.foundation,
            self.component,
            self.protocol,
            self.priority,
            self.address,
            self.port,
            self.typ
        );

        if self.tcp_type != RTCIceTcpCandidateType::Unspecified {
            val += format!(" tcptype {}", self.tcp_type).as_str();
        }

        if !self.related_address.is_empty() {
            val += format!(
                " raddr {} rport {}",
                self.related_address, self.related_port
            )
            .as_str();
        }

        val
    }

    /// to_json returns an ICECandidateInit bound to the given media section
    /// as indicated by the spec <https://w3c.github.io/webrtc-pc/#dom-rtcicecandidate-tojson>
    pub fn to_json(&self, sdp_mid: &str, sdp_mline_index: u16) -> RTCIceCandidateInit {
        RTCIceCandidateInit {
            candidate: format!("{CANDIDATE_PREFIX}{}", self.marshal()),
            sdp_mid: Some(sdp_mid.to_owned()),
            sdp_mline_index: Some(sdp_mline_index),
            username_fragment: None,
        }
    }
}

impl fmt::Display for RTCIceCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}:{}{}",
            self.protocol, self.typ, self.address, self.port, self.related_address,
        )
    }
}

/// unmarshal_candidate parses a candidate-attribute value, with or without the
/// `candidate:` prefix.
pub fn unmarshal_candidate(raw: &str) -> Result<RTCIceCandidate> {
    let raw = raw.strip_prefix(CANDIDATE_PREFIX).unwrap_or(raw);
    let split: Vec<&str> = raw.split_whitespace().collect();
    if split.len() < 8 {
        return Err(Error::Other(format!(
            "{} ({})",
            Error::ErrAttributeTooShortIceCandidate,
            split.len()
        )));
    }
    if split[6] != "typ" {
        return Err(Error::ErrParseType);
    }

    let typ = RTCIceCandidateType::from(split[7]);
    if typ == RTCIceCandidateType::Unspecified {
        return Err(Error::ErrUnknownCandidateType);
    }

    let mut candidate = RTCIceCandidate {
        foundation: split[0].to_owned(),
        component: split[1].parse()?,
        protocol: RTCIceProtocol::from(split[2]),
        priority: split[3].parse()?,
        address: split[4].to_owned(),
        port: split[5].parse()?,
        typ,
        ..Default::default()
    };

    let mut rest = &split[8..];
    while let Some((&key, tail)) = rest.split_first() {
        match key {
            "raddr" => {
                if tail.len() < 3 || tail[1] != "rport" {
                    return Err(Error::Other(format!(
                        "{}: incorrect length",
                        Error::ErrParseRelatedAddr
                    )));
                }
                tail[0].clone_into(&mut candidate.related_address);
                candidate.related_port = tail[2].parse()?;
                rest = &tail[3..];
            }
            "tcptype" => {
                let Some(&tcp_type) = tail.first() else {
                    return Err(Error::Other(format!(
                        "{}: incorrect length",
                        Error::ErrParseType
                    )));
                };
                candidate.tcp_type = RTCIceTcpCandidateType::from(tcp_type);
                rest = &tail[1..];
            }
            // extension attributes come in name/value pairs
            _ => rest = tail.get(1..).unwrap_or_default(),
        }
    }

    Ok(candidate)
}

/// ICECandidateInit is used to serialize ice candidates
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RTCIceCandidateInit {
    pub candidate: String,
    pub sdp_mid: Option<String>,
    #[serde(rename = "sdpMLineIndex")]
    pub sdp_mline_index: Option<u16>,
    pub username_fragment: Option<String>,
}

impl RTCIceCandidateInit {
    /// Parses the candidate attribute carried by this init.
    pub fn to_candidate(&self) -> Result<RTCIceCandidate> {
        if !self.candidate.starts_with(CANDIDATE_PREFIX) {
            return Err(Error::ErrCandidateMissingPrefix);
        }
        unmarshal_candidate(&self.candidate)
    }
}

/// RTCPeerConnectionIceEvent carries a newly gathered local candidate together
/// with the media section it belongs to.
#[derive(Default, Clone, Debug, PartialEq, Eq)]
pub struct RTCPeerConnectionIceEvent {
    pub candidate: RTCIceCandidate,
    pub sdp_mid: String,
    pub sdp_mline_index: u16,
}

#[cfg(test)]
mod test {
    use super::*;

    fn host_candidate() -> RTCIceCandidate {
        RTCIceCandidate {
            foundation: "1".to_owned(),
            priority: 2130706431,
            address: "192.168.1.100".to_owned(),
            protocol: RTCIceProtocol::Udp,
            port: 54321,
            typ: RTCIceCandidateType::Host,
            component: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_ice_candidate_marshal() {
        let tests = vec![
            (
                host_candidate(),
                "1 1 udp 2130706431 192.168.1.100 54321 typ host",
            ),
            (
                RTCIceCandidate {
                    foundation: "2".to_owned(),
                    priority: 1694498815,
                    address: "203.0.113.1".to_owned(),
                    protocol: RTCIceProtocol::Udp,
                    port: 12345,
                    typ: RTCIceCandidateType::Srflx,
                    component: 1,
                    related_address: "192.168.1.100".to_owned(),
                    related_port: 54321,
                    ..Default::default()
                },
                "2 1 udp 1694498815 203.0.113.1 12345 typ srflx raddr 192.168.1.100 rport 54321",
            ),
            (
                RTCIceCandidate {
                    foundation: "3".to_owned(),
                    priority: 1518280447,
                    address: "10.0.0.1".to_owned(),
                    protocol: RTCIceProtocol::Tcp,
                    port: 9,
                    typ: RTCIceCandidateType::Host,
                    component: 1,
                    tcp_type: RTCIceTcpCandidateType::Active,
                    ..Default::default()
                },
                "3 1 tcp 1518280447 10.0.0.1 9 typ host tcptype active",
            ),
        ];

        for (candidate, expected) in tests {
            assert_eq!(candidate.marshal(), expected);
            assert_eq!(unmarshal_candidate(expected), Ok(candidate));
        }
    }

    #[test]
    fn test_unmarshal_candidate_errors() {
        let tests = vec![
            "1 1 udp 2130706431 192.168.1.100 54321",
            "1 1 udp 2130706431 192.168.1.100 54321 kind host",
            "1 1 udp 2130706431 192.168.1.100 54321 typ bogus",
            "1 x udp 2130706431 192.168.1.100 54321 typ host",
            "1 1 udp 2130706431 192.168.1.100 54321 typ srflx raddr 10.0.0.1",
        ];

        for raw in tests {
            assert!(unmarshal_candidate(raw).is_err(), "{raw} should not parse");
        }
    }

    #[test]
    fn test_unmarshal_candidate_skips_extensions() {
        let candidate = unmarshal_candidate(
            "candidate:1 1 udp 2130706431 192.168.1.100 54321 typ host generation 0 ufrag abcd",
        )
        .expect("valid candidate");
        assert_eq!(candidate, host_candidate());
    }

    #[test]
    fn test_ice_candidate_to_json() {
        let init = host_candidate().to_json("audio", 1);
        assert_eq!(
            init.candidate,
            "candidate:1 1 udp 2130706431 192.168.1.100 54321 typ host"
        );
        assert_eq!(init.sdp_mid.as_deref(), Some("audio"));
        assert_eq!(init.sdp_mline_index, Some(1));
        assert_eq!(init.to_candidate(), Ok(host_candidate()));

        let json = serde_json::to_string(&init).expect("serializable");
        assert!(json.contains("\"sdpMLineIndex\":1"));
        assert!(json.contains("\"sdpMid\":\"audio\""));
    }

    #[test]
    fn test_candidate_init_requires_prefix() {
        let init = RTCIceCandidateInit {
            candidate: "1 1 udp 2130706431 192.168.1.100 54321 typ host".to_owned(),
            ..Default::default()
        };
        assert_eq!(init.to_candidate(), Err(Error::ErrCandidateMissingPrefix));
    }
}
