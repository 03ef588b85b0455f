use crate::config::inbound::{InboundConfiguration, Sniffing};
use crate::config::protocol::{dokodemo_door, local, List as ProtocolList};
use crate::config::transport::{Sockopt, SockoptTproxy, StreamSettings};
use crate::config::Inbound;

/// SO_MARK set on intercepted sockets.
const TPROXY_MARK: u32 = 255;

/// The three local listeners. Nothing here depends on the link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListenerSpec {
    pub transparent: Inbound,
    pub socks: Inbound,
    pub http: Inbound,
}

impl ListenerSpec {
    /// Transparent, SOCKS, HTTP.
    pub fn into_inbounds(self) -> Vec<Inbound> {
        vec![self.transparent, self.socks, self.http]
    }
}

pub fn listeners(host: &str, http_port: u16, socks_port: u16, transparent_port: u16) -> ListenerSpec {
    ListenerSpec {
        transparent: Inbound {
            tag: "transparent".to_owned(),
            port: transparent_port,
            listen: None,
            protocol: ProtocolList::DokodemoDoor,
            settings: InboundConfiguration::DokodemoDoor(dokodemo_door::InboundConfiguration {
                network: "tcp,udp".to_owned(),
                follow_redirect: true,
            }),
            sniffing: Sniffing::http_tls(None),
            stream_settings: Some(StreamSettings {
                sockopt: Some(Sockopt {
                    tproxy: SockoptTproxy::Tproxy,
                    mark: TPROXY_MARK,
                }),
                ..Default::default()
            }),
        },
        socks: local_listener("socks", ProtocolList::Socks, host, socks_port),
        http: local_listener("http", ProtocolList::Http, host, http_port),
    }
}

fn local_listener(tag: &str, protocol: ProtocolList, host: &str, port: u16) -> Inbound {
    Inbound {
        tag: tag.to_owned(),
        port,
        listen: Some(host.to_owned()),
        protocol,
        settings: InboundConfiguration::Local(local::InboundConfiguration {
            auth: local::Auth::NoAuth,
            udp: true,
            allow_transparent: false,
        }),
        sniffing: Sniffing::http_tls(Some(false)),
        stream_settings: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn test_listener_document() {
        let inbounds = listeners("127.0.0.1", 10809, 10808, 1234).into_inbounds();
        assert_eq!(
            to_value(inbounds).unwrap(),
            json!([
                {
                    "tag": "transparent",
                    "port": 1234,
                    "protocol": "dokodemo-door",
                    "settings": {"network": "tcp,udp", "followRedirect": true},
                    "sniffing": {"enabled": true, "destOverride": ["http", "tls"]},
                    "streamSettings": {"sockopt": {"tproxy": "tproxy", "mark": 255}}
                },
                {
                    "tag": "socks",
                    "port": 10808,
                    "listen": "127.0.0.1",
                    "protocol": "socks",
                    "settings": {"auth": "noauth", "udp": true, "allowTransparent": false},
                    "sniffing": {"enabled": true, "destOverride": ["http", "tls"], "routeOnly": false}
                },
                {
                    "tag": "http",
                    "port": 10809,
                    "listen": "127.0.0.1",
                    "protocol": "http",
                    "settings": {"auth": "noauth", "udp": true, "allowTransparent": false},
                    "sniffing": {"enabled": true, "destOverride": ["http", "tls"], "routeOnly": false}
                }
            ])
        );
    }

    #[test]
    fn test_listeners_depend_only_on_arguments() {
        assert_eq!(
            listeners("0.0.0.0", 1, 2, 3),
            listeners("0.0.0.0", 1, 2, 3)
        );
        let set = listeners("::1", 8080, 1080, 12345);
        assert_eq!(set.socks.listen.as_deref(), Some("::1"));
        assert_eq!(set.http.port, 8080);
        assert_eq!(set.transparent.port, 12345);
    }
}
