//! Transport and security fragments of the proxy outbound's `streamSettings`.
//!
//! Every builder is a pure function of the link fields. Which of them run is
//! decided once by [`Profile`].

use crate::config::transport::{
    Grpc, HttpHeader, HttpRequest, HttpRequestHeaders, Reality, StreamSettings, Tcp, Tls,
    WebSocket, WebSocketHeaders,
};
use crate::link::{Dialect, LinkFields, Protocol};
use log::debug;

/// ALPN tokens kept in the TLS fragment, in output order.
const ALPN_TOKENS: [&str; 3] = ["http/1.1", "h2", "h3"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Tcp,
    Ws,
    Grpc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Security {
    None,
    Tls,
    Reality,
}

/// The orthogonal capabilities of one recognized link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Profile {
    pub protocol: Protocol,
    pub transport: Transport,
    pub security: Security,
}

impl Profile {
    /// `None` for [`Dialect::Unrecognized`].
    pub fn new(dialect: Dialect, fields: &LinkFields) -> Option<Self> {
        let protocol = dialect.protocol()?;
        let transport = if dialect.is_ws() {
            Transport::Ws
        } else if fields.network == "grpc" {
            Transport::Grpc
        } else {
            Transport::Tcp
        };
        let security = if dialect.is_reality() || fields.security == "reality" {
            Security::Reality
        } else if !fields.security.is_empty() && fields.security != "none" {
            Security::Tls
        } else {
            Security::None
        };
        Some(Profile {
            protocol,
            transport,
            security,
        })
    }
}

/// HTTP disguise header, only when the link names a `host`.
pub fn tcp_header(fields: &LinkFields) -> Option<Tcp> {
    if fields.host.is_empty() {
        return None;
    }
    let r#type = non_empty_or(&fields.header_type, "http");
    let path = non_empty_or(&fields.path, "/");
    Some(Tcp {
        header: HttpHeader {
            r#type,
            request: HttpRequest {
                version: "1.1".to_owned(),
                method: "GET".to_owned(),
                path: vec![path],
                headers: HttpRequestHeaders::with_host(&fields.host),
            },
        },
    })
}

pub fn websocket(fields: &LinkFields) -> WebSocket {
    WebSocket {
        path: non_empty_or(&fields.path, "/"),
        headers: WebSocketHeaders {
            host: Some(fields.host.clone()).filter(|h| !h.is_empty()),
        },
    }
}

pub fn grpc(fields: &LinkFields) -> Grpc {
    Grpc::new(&fields.service_name)
}

pub fn tls(fields: &LinkFields) -> Tls {
    Tls {
        allow_insecure: true,
        server_name: fields.sni.clone(),
        alpn: filter_alpn(&fields.alpn),
        show: false,
        fingerprint: Some(fields.fp.clone()).filter(|fp| !fp.is_empty() && fp != "none"),
    }
}

pub fn reality(fields: &LinkFields) -> Reality {
    Reality {
        server_name: fields.sni.clone(),
        fingerprint: fields.fp.clone(),
        show: false,
        public_key: fields.pbk.clone(),
        short_id: fields.sid.clone(),
        spider_x: fields.spx.clone(),
    }
}

/// Known tokens found anywhere in `raw`, in the fixed `http/1.1`, `h2`, `h3`
/// order. Matching is by substring, so `h2c` also yields `h2`.
pub fn filter_alpn(raw: &str) -> Vec<String> {
    ALPN_TOKENS
        .iter()
        .copied()
        .filter(|token| raw.contains(token))
        .map(str::to_owned)
        .collect()
}

/// Compose the fragments selected by `profile`.
pub fn stream_settings(profile: &Profile, fields: &LinkFields) -> StreamSettings {
    let mut settings = StreamSettings {
        network: Some(fields.network.clone()),
        ..Default::default()
    };
    match profile.security {
        Security::Reality => {
            settings.security = Some("reality".to_owned());
            settings.reality_settings = Some(reality(fields));
        }
        Security::Tls => {
            settings.security = Some(fields.security.clone());
            settings.tls_settings = Some(tls(fields));
        }
        Security::None => {}
    }
    match profile.transport {
        Transport::Ws => settings.ws_settings = Some(websocket(fields)),
        Transport::Grpc => {
            settings.tcp_settings = tcp_header(fields);
            settings.grpc_settings = Some(grpc(fields));
        }
        Transport::Tcp => settings.tcp_settings = tcp_header(fields),
    }
    debug!(
        "stream settings for {:?}: tcp header {}, security {:?}",
        profile,
        settings.tcp_settings.is_some(),
        profile.security
    );
    settings
}

fn non_empty_or(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_owned()
    } else {
        value.to_owned()
    }
}
