use super::protocol::{dokodemo_door, local, List as ProtocolList};
use super::transport::StreamSettings;
use serde::Serialize;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SniffingProtocol {
    /// `"http"`
    Http,
    /// `"tls"`
    Tls,
}

/// ```json
/// {
///     "enabled": true,
///     "destOverride": ["http", "tls"],
///     "routeOnly": false
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Sniffing {
    /// Whether or not to enable content sniffing.
    pub enabled: bool,
    /// If the content type of incoming traffic is in the list, the destination of the
    /// connection will be overwritten by sniffed value.
    pub dest_override: Vec<SniffingProtocol>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_only: Option<bool>,
}

impl Sniffing {
    pub fn http_tls(route_only: Option<bool>) -> Self {
        Self {
            enabled: true,
            dest_override: vec![SniffingProtocol::Http, SniffingProtocol::Tls],
            route_only,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum InboundConfiguration {
    DokodemoDoor(dokodemo_door::InboundConfiguration),
    /// `socks` and `http` listeners.
    Local(local::InboundConfiguration),
}

/// `InboundObject`, an element of the top level `inbounds` array.
///
/// ```json
/// {
///     "tag": "socks",
///     "port": 10808,
///     "listen": "127.0.0.1",
///     "protocol": "socks",
///     "settings": {},
///     "sniffing": {},
///     "streamSettings": {}
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Inbound {
    /// The tag of the inbound. It can be used for routing decisions.
    pub tag: String,
    /// Port that the listener binds.
    pub port: u16,
    /// Address to listen on. Omitted means all interfaces.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub listen: Option<String>,
    pub protocol: ProtocolList,
    /// Protocol-specific settings.
    pub settings: InboundConfiguration,
    pub sniffing: Sniffing,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream_settings: Option<StreamSettings>,
}
