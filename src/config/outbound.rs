use super::protocol::{blackhole, freedom, trojan, vnext, List as ProtocolList};
use super::transport::StreamSettings;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum OutboundConfiguration {
    Blackhole(blackhole::OutboundConfiguration),
    Freedom(freedom::OutboundConfiguration),
    /// VLESS and VMess.
    Vnext(vnext::OutboundConfiguration),
    Trojan(trojan::OutboundConfiguration),
}

/// Multiplexing, or Mux, is to use one physical TCP connections for multiple virtual
/// TCP connections.
///
/// ```json
/// {
///     "enabled": false,
///     "concurrency": -1
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Mux {
    /// Whether or not to enable Mux on an outbound.
    pub enabled: bool,
    /// `-1` disables mux entirely, including for UDP.
    pub concurrency: i16,
}

impl Mux {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            concurrency: -1,
        }
    }
}

/// An `OutboundObject` defines an outbound proxy for handling out-going connections.
///
/// ```json
/// {
///     "tag": "proxy",
///     "protocol": "vless",
///     "settings": {},
///     "streamSettings": {},
///     "mux": {}
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Outbound {
    /// The tag of this outbound. It must be unique among all outbounds.
    pub tag: String,
    pub protocol: ProtocolList,
    /// Protocol-specific settings.
    pub settings: OutboundConfiguration,
    /// Low-level transport settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_settings: Option<StreamSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mux: Option<Mux>,
}

impl Outbound {
    /// `{"tag": "direct", "protocol": "freedom", "settings": {}}`
    pub fn direct() -> Self {
        Self {
            tag: "direct".to_owned(),
            protocol: ProtocolList::Freedom,
            settings: OutboundConfiguration::Freedom(freedom::OutboundConfiguration::default()),
            stream_settings: None,
            mux: None,
        }
    }

    /// Blackhole answering with an HTTP 403.
    pub fn block() -> Self {
        Self {
            tag: "block".to_owned(),
            protocol: ProtocolList::Blackhole,
            settings: OutboundConfiguration::Blackhole(blackhole::OutboundConfiguration {
                response: blackhole::Response {
                    r#type: blackhole::ResponseType::Http,
                },
            }),
            stream_settings: None,
            mux: None,
        }
    }
}
