use super::stream::{stream_settings, Profile};
use crate::config::outbound::{Mux, OutboundConfiguration};
use crate::config::protocol::{trojan, vnext};
use crate::config::Outbound;
use crate::link::{LinkFields, Protocol};

/// The proxy outbound plus the static `direct` and `block` ones, and the
/// credential the artifact is named after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assembled {
    pub outbounds: Vec<Outbound>,
    pub credential_id: String,
}

pub fn assemble(profile: &Profile, fields: &LinkFields) -> Assembled {
    let proxy = Outbound {
        tag: "proxy".to_owned(),
        protocol: profile.protocol.into(),
        settings: settings(profile.protocol, fields),
        stream_settings: Some(stream_settings(profile, fields)),
        mux: Some(Mux::disabled()),
    };
    Assembled {
        outbounds: vec![proxy, Outbound::direct(), Outbound::block()],
        credential_id: fields.credential_id.clone(),
    }
}

fn settings(protocol: Protocol, fields: &LinkFields) -> OutboundConfiguration {
    match protocol {
        Protocol::Vless | Protocol::Vmess => {
            let flow = match protocol {
                Protocol::Vmess => "",
                _ => fields.flow.as_str(),
            };
            OutboundConfiguration::Vnext(vnext::OutboundConfiguration {
                vnext: vec![vnext::Server {
                    address: fields.address.clone(),
                    port: fields.port,
                    users: vec![vnext::User::new(&fields.credential_id, flow)],
                }],
            })
        }
        Protocol::Trojan => OutboundConfiguration::Trojan(trojan::OutboundConfiguration {
            servers: vec![trojan::Server::new(
                &fields.address,
                fields.port,
                &fields.credential_id,
                &fields.flow,
            )],
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::{classify, normalize};
    use serde_json::{json, to_value};

    fn assemble_link(link: &str) -> Assembled {
        let link = normalize(link);
        let dialect = classify(&link);
        let protocol = dialect.protocol().unwrap();
        let fields = LinkFields::parse(&link, protocol).unwrap();
        let profile = Profile::new(dialect, &fields).unwrap();
        assemble(&profile, &fields)
    }

    #[test]
    fn test_trojan_servers_shape() {
        let a = assemble_link(
            "trojan://p4ss@t.example.com:443?security=tls&sni=t.example.com&type=tcp&flow=xtls-rprx-direct#x",
        );
        assert_eq!(a.credential_id, "p4ss");
        let v = to_value(&a.outbounds[0]).unwrap();
        assert_eq!(v["protocol"], json!("trojan"));
        assert_eq!(
            v["settings"],
            json!({
                "servers": [{
                    "address": "t.example.com",
                    "method": "chacha20",
                    "ota": false,
                    "password": "p4ss",
                    "port": 443,
                    "level": 1,
                    "flow": "xtls-rprx-direct"
                }]
            })
        );
        assert_eq!(v["streamSettings"]["security"], json!("tls"));
        assert_eq!(v["mux"], json!({"enabled": false, "concurrency": -1}));
    }

    #[test]
    fn test_outbound_order_and_static_entries() {
        let a = assemble_link("vless://id@a.com:443?type=ws&path=/ws#x");
        let tags: Vec<_> = a.outbounds.iter().map(|o| o.tag.as_str()).collect();
        assert_eq!(tags, ["proxy", "direct", "block"]);
        assert_eq!(a.outbounds[1], Outbound::direct());
        assert_eq!(a.outbounds[2], Outbound::block());
    }

    #[test]
    fn test_vless_reality_flow() {
        let a = assemble_link(
            "vless://uid@1.2.3.4:443?security=reality&pbk=K&sid=S&fp=chrome&sni=s.com&type=tcp&flow=xtls-rprx-vision#x",
        );
        let v = to_value(&a.outbounds[0]).unwrap();
        assert_eq!(
            v["settings"]["vnext"][0]["users"][0]["flow"],
            json!("xtls-rprx-vision")
        );
        assert_eq!(v["streamSettings"]["realitySettings"]["shortId"], json!("S"));
    }

    #[test]
    fn test_vmess_user_has_empty_flow() {
        let link = crate::link::vmess::encode_link(&json!({
            "id": "vm-id", "add": "v.example.com", "port": 8080, "net": "tcp"
        }));
        let a = assemble_link(&link);
        let v = to_value(&a.outbounds[0]).unwrap();
        assert_eq!(v["protocol"], json!("vmess"));
        assert_eq!(v["settings"]["vnext"][0]["users"][0]["flow"], json!(""));
        assert_eq!(v["settings"]["vnext"][0]["port"], json!(8080));
        assert_eq!(a.credential_id, "vm-id");
    }
}
