use serde::Serialize;

/// ```json
/// {
///     "version": "1.1",
///     "method": "GET",
///     "path": ["/"],
///     "headers": {
///         "Host": ["www.baidu.com"],
///         "User-Agent": [""],
///         "Accept-Encoding": ["gzip, deflate"],
///         "Connection": ["keep-alive"],
///         "Pragma": "no-cache"
///     }
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP version. Always `"1.1"`.
    pub version: String,
    /// HTTP method. Always `"GET"`.
    pub method: String,
    /// HTTP path. The engine picks one at random for every connection.
    pub path: Vec<String>,
    pub headers: HttpRequestHeaders,
}

/// Fixed header set of the HTTP disguise. Only `Host` comes from the link.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HttpRequestHeaders {
    #[serde(rename = "Host")]
    pub host: Vec<String>,
    #[serde(rename = "User-Agent")]
    pub user_agent: Vec<String>,
    #[serde(rename = "Accept-Encoding")]
    pub accept_encoding: Vec<String>,
    #[serde(rename = "Connection")]
    pub connection: Vec<String>,
    #[serde(rename = "Pragma")]
    pub pragma: String,
}

impl HttpRequestHeaders {
    pub fn with_host(host: &str) -> Self {
        Self {
            host: vec![host.to_owned()],
            user_agent: vec![String::new()],
            accept_encoding: vec!["gzip, deflate".to_owned()],
            connection: vec!["keep-alive".to_owned()],
            pragma: "no-cache".to_owned(),
        }
    }
}

/// HTTP header obfuscation. The configuration must be the same between
/// connecting inbound and outbound.
///
/// ```json
/// {
///     "type": "http",
///     "request": {}
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct HttpHeader {
    /// Usually `"http"`, overridable from the link.
    pub r#type: String,
    /// HTTP request template.
    pub request: HttpRequest,
}

/// `TcpObject` Corresponding to the transmission configuration `tcpSettings` items.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Tcp {
    pub header: HttpHeader,
}

/// `WebSocketObject` Corresponding to the transmission configuration `wsSettings` items.
///
/// ```json
/// {
///     "path": "/",
///     "headers": {
///         "Host": "v2ray.com"
///     }
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct WebSocket {
    /// The HTTP protocol path used by WebSocket, the default value is `"/"`.
    pub path: String,
    pub headers: WebSocketHeaders,
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct WebSocketHeaders {
    #[serde(rename = "Host", skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
}

/// `grpcSettings`. Everything except `serviceName` is fixed tuning.
///
/// ```json
/// {
///     "serviceName": "name",
///     "multiMode": false,
///     "idle_timeout": 60,
///     "health_check_timeout": 20,
///     "permit_without_stream": false,
///     "initial_windows_size": 0
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Grpc {
    #[serde(rename = "serviceName")]
    pub service_name: String,
    #[serde(rename = "multiMode")]
    pub multi_mode: bool,
    pub idle_timeout: u32,
    pub health_check_timeout: u32,
    pub permit_without_stream: bool,
    pub initial_windows_size: u32,
}

impl Grpc {
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_owned(),
            multi_mode: false,
            idle_timeout: 60,
            health_check_timeout: 20,
            permit_without_stream: false,
            initial_windows_size: 0,
        }
    }
}

/// ```json
/// {
///     "allowInsecure": true,
///     "serverName": "v2ray.com",
///     "alpn": ["http/1.1"],
///     "show": false,
///     "fingerprint": "chrome"
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Tls {
    /// Always `true`: links in the wild routinely point at self-signed certificates.
    pub allow_insecure: bool,
    /// Server name used for TLS authentication.
    pub server_name: String,
    /// ALPN values offered in the TLS handshake.
    pub alpn: Vec<String>,
    pub show: bool,
    /// uTLS client fingerprint. Omitted when the link has none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// `realitySettings`. Unlike [`Tls`] every field is always present, possibly empty.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reality {
    pub server_name: String,
    pub fingerprint: String,
    pub show: bool,
    pub public_key: String,
    pub short_id: String,
    #[serde(rename = "spiderX")]
    pub spider_x: String,
}

/// Transparent proxy mode on Linux. The intercept listener only uses TProxy.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SockoptTproxy {
    /// `"tproxy"` : Enable TProxy with TProxy mode. Supports TCP and UDP traffic.
    Tproxy,
}

/// ```json
/// {
///     "tproxy": "tproxy",
///     "mark": 255
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Sockopt {
    pub tproxy: SockoptTproxy,
    /// If non-zero, the value will be set to connections via socket option SO_MARK.
    pub mark: u32,
}

/// Each inbound and outbound proxy may has its own transport settings, as specified in
/// streamSettings field in top level configuration.
///
/// ```json
/// {
///     "network": "tcp",
///     "security": "none",
///     "tlsSettings": {},
///     "realitySettings": {},
///     "tcpSettings": {},
///     "wsSettings": {},
///     "grpcSettings": {},
///     "sockopt": {}
/// }
/// ```
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StreamSettings {
    /// Network type of the stream transport, copied verbatim from the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    /// Type of security, copied verbatim from the link (`"tls"`, `"reality"`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tls_settings: Option<Tls>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reality_settings: Option<Reality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_settings: Option<Tcp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ws_settings: Option<WebSocket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grpc_settings: Option<Grpc>,
    /// Socket options for incoming and out-going connections.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sockopt: Option<Sockopt>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_empty_stream_settings_is_empty_object() {
        assert_eq!(to_value(StreamSettings::default()).unwrap(), json!({}));
    }

    #[test]
    fn test_grpc_tuning_keys() {
        assert_eq!(
            to_value(Grpc::new("svc")).unwrap(),
            json!({
                "serviceName": "svc",
                "multiMode": false,
                "idle_timeout": 60,
                "health_check_timeout": 20,
                "permit_without_stream": false,
                "initial_windows_size": 0
            })
        );
    }

    #[test]
    fn test_tls_fingerprint_omitted_when_absent() {
        let tls = Tls {
            allow_insecure: true,
            server_name: "a.com".to_string(),
            alpn: vec![],
            show: false,
            fingerprint: None,
        };
        let v = to_value(tls).unwrap();
        assert!(v.get("fingerprint").is_none());
        assert_eq!(v["allowInsecure"], json!(true));
        assert_eq!(v["serverName"], json!("a.com"));
    }

    #[test]
    fn test_ws_host_header_optional() {
        let ws = WebSocket {
            path: "/".to_string(),
            headers: WebSocketHeaders::default(),
        };
        assert_eq!(
            to_value(ws).unwrap(),
            json!({"path": "/", "headers": {}})
        );
    }
}
