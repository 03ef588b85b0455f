use serde::Serialize;

/// Protocols that appear in a compiled document.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum List {
    /// `"blackhole"`
    #[serde(rename = "blackhole")]
    Blackhole,
    /// `"dokodemo-door"`
    #[serde(rename = "dokodemo-door")]
    DokodemoDoor,
    /// `"freedom"`
    #[serde(rename = "freedom")]
    Freedom,
    /// `"http"`
    #[serde(rename = "http")]
    Http,
    /// `"socks"`
    #[serde(rename = "socks")]
    Socks,
    /// `"vless"`
    #[serde(rename = "vless")]
    Vless,
    /// `"vmess"`
    #[serde(rename = "vmess")]
    Vmess,
    /// `"trojan"`
    #[serde(rename = "trojan")]
    Trojan,
}

pub mod blackhole {
    use serde::Serialize;

    #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum ResponseType {
        /// `"http"` : Blackhole will send back a simple HTTP 403 packet, and then closes the
        /// connection.
        Http,
    }

    /// ```json
    /// {
    ///     "type": "http"
    /// }
    /// ```
    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    pub struct Response {
        pub r#type: ResponseType,
    }

    /// ```json
    /// {
    ///     "response": {
    ///         "type": "http"
    ///     }
    /// }
    /// ```
    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    pub struct OutboundConfiguration {
        pub response: Response,
    }
}

pub mod freedom {
    use serde::Serialize;

    /// Serialized as `{}`.
    #[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
    pub struct OutboundConfiguration {}
}

pub mod dokodemo_door {
    use serde::Serialize;

    /// ```json
    /// {
    ///     "network": "tcp,udp",
    ///     "followRedirect": true
    /// }
    /// ```
    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct InboundConfiguration {
        /// Comma separated network types that can be received.
        pub network: String,
        /// When `true`, dokodemo-door recognizes the original destination of traffic
        /// redirected by iptables.
        pub follow_redirect: bool,
    }
}

/// Settings shared by the `socks` and `http` listeners.
pub mod local {
    use serde::Serialize;

    #[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum Auth {
        /// `"noauth"`
        NoAuth,
    }

    /// ```json
    /// {
    ///     "auth": "noauth",
    ///     "udp": true,
    ///     "allowTransparent": false
    /// }
    /// ```
    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct InboundConfiguration {
        pub auth: Auth,
        pub udp: bool,
        pub allow_transparent: bool,
    }
}

/// VLESS and VMess outbounds share the `vnext` shape.
pub mod vnext {
    use serde::Serialize;

    /// ```json
    /// {
    ///     "id": "27848739-7e62-4138-9fd3-098a63964b6b",
    ///     "alterId": 0,
    ///     "email": "t@t.tt",
    ///     "security": "auto",
    ///     "encryption": "none",
    ///     "flow": ""
    /// }
    /// ```
    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    #[serde(rename_all = "camelCase")]
    pub struct User {
        pub id: String,
        pub alter_id: u16,
        pub email: String,
        pub security: String,
        pub encryption: String,
        /// Flow control. Always empty for VMess.
        pub flow: String,
    }

    impl User {
        pub fn new(id: &str, flow: &str) -> Self {
            Self {
                id: id.to_owned(),
                alter_id: 0,
                email: "t@t.tt".to_owned(),
                security: "auto".to_owned(),
                encryption: "none".to_owned(),
                flow: flow.to_owned(),
            }
        }
    }

    /// ```json
    /// {
    ///     "address": "example.com",
    ///     "port": 443,
    ///     "users": []
    /// }
    /// ```
    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    pub struct Server {
        /// Address, point to the server, support domain name, IPv4, IPv6.
        pub address: String,
        pub port: u16,
        pub users: Vec<User>,
    }

    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    pub struct OutboundConfiguration {
        /// An array containing a series of configurations pointing to the server.
        pub vnext: Vec<Server>,
    }
}

pub mod trojan {
    use serde::Serialize;

    /// ```json
    /// {
    ///     "address": "127.0.0.1",
    ///     "method": "chacha20",
    ///     "ota": false,
    ///     "password": "password",
    ///     "port": 1234,
    ///     "level": 1,
    ///     "flow": ""
    /// }
    /// ```
    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    pub struct Server {
        /// Server address, supports IPv4, IPv6 and domain name.
        pub address: String,
        pub method: String,
        pub ota: bool,
        pub password: String,
        pub port: u16,
        pub level: u8,
        pub flow: String,
    }

    impl Server {
        pub fn new(address: &str, port: u16, password: &str, flow: &str) -> Self {
            Self {
                address: address.to_owned(),
                method: "chacha20".to_owned(),
                ota: false,
                password: password.to_owned(),
                port,
                level: 1,
                flow: flow.to_owned(),
            }
        }
    }

    #[derive(Serialize, Debug, Clone, PartialEq, Eq)]
    pub struct OutboundConfiguration {
        /// An array, each of which is a [Server](struct.Server.html).
        pub servers: Vec<Server>,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_protocol_names() {
        assert_eq!(to_value(List::DokodemoDoor).unwrap(), json!("dokodemo-door"));
        assert_eq!(to_value(List::Trojan).unwrap(), json!("trojan"));
    }

    #[test]
    fn test_trojan_server_defaults() {
        let server = trojan::Server::new("example.com", 443, "secret", "");
        assert_eq!(
            to_value(server).unwrap(),
            json!({
                "address": "example.com",
                "method": "chacha20",
                "ota": false,
                "password": "secret",
                "port": 443,
                "level": 1,
                "flow": ""
            })
        );
    }

    #[test]
    fn test_vnext_user_defaults() {
        let user = to_value(vnext::User::new("id-1", "xtls-rprx-vision")).unwrap();
        assert_eq!(user["alterId"], json!(0));
        assert_eq!(user["email"], json!("t@t.tt"));
        assert_eq!(user["flow"], json!("xtls-rprx-vision"));
    }
}
