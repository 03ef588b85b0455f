use super::{normalize, vmess, Protocol};
use log::debug;

/// Which compiler a link goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    VlessReality,
    VlessWs,
    VlessTcpOrGrpc,
    VmessWs,
    VmessTcpOrGrpc,
    TrojanReality,
    TrojanWs,
    TrojanTcpOrGrpc,
    Unrecognized,
}

impl Dialect {
    pub fn protocol(&self) -> Option<Protocol> {
        match self {
            Dialect::VlessReality | Dialect::VlessWs | Dialect::VlessTcpOrGrpc => {
                Some(Protocol::Vless)
            }
            Dialect::VmessWs | Dialect::VmessTcpOrGrpc => Some(Protocol::Vmess),
            Dialect::TrojanReality | Dialect::TrojanWs | Dialect::TrojanTcpOrGrpc => {
                Some(Protocol::Trojan)
            }
            Dialect::Unrecognized => None,
        }
    }

    pub fn is_reality(&self) -> bool {
        matches!(self, Dialect::VlessReality | Dialect::TrojanReality)
    }

    pub fn is_ws(&self) -> bool {
        matches!(self, Dialect::VlessWs | Dialect::VmessWs | Dialect::TrojanWs)
    }
}

/// Decide the dialect of a link. Total: anything not matched is `Unrecognized`.
///
/// Per protocol the checks run Reality, then WS, then TCP/gRPC, so a link
/// carrying both `security=reality` and `type=ws` is a Reality link.
pub fn classify(link: &str) -> Dialect {
    let link = normalize(link);
    let dialect = if link.starts_with(Protocol::Vless.scheme()) {
        classify_query(&link, Dialect::VlessReality, Dialect::VlessWs, Dialect::VlessTcpOrGrpc)
    } else if link.starts_with(Protocol::Vmess.scheme()) {
        match vmess::network(&link).as_deref() {
            Some("ws") => Dialect::VmessWs,
            Some("tcp") | Some("grpc") => Dialect::VmessTcpOrGrpc,
            _ => Dialect::Unrecognized,
        }
    } else if link.starts_with(Protocol::Trojan.scheme()) {
        classify_query(
            &link,
            Dialect::TrojanReality,
            Dialect::TrojanWs,
            Dialect::TrojanTcpOrGrpc,
        )
    } else {
        Dialect::Unrecognized
    };
    debug!("classified link as {:?}", dialect);
    dialect
}

fn classify_query(link: &str, reality: Dialect, ws: Dialect, tcp_or_grpc: Dialect) -> Dialect {
    if link.contains("security=reality") {
        reality
    } else if link.contains("type=ws") {
        ws
    } else if link.contains("type=tcp") || link.contains("type=grpc") {
        tcp_or_grpc
    } else {
        Dialect::Unrecognized
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::link::vmess::encode_link;
    use serde_json::json;

    #[test]
    fn test_classify_vless() {
        assert_eq!(
            classify("vless://id@a.com:443?security=reality&type=tcp#x"),
            Dialect::VlessReality
        );
        assert_eq!(
            classify("vless://id@a.com:443?type=ws&security=tls#x"),
            Dialect::VlessWs
        );
        assert_eq!(
            classify("vless://id@a.com:443?type=grpc&security=tls#x"),
            Dialect::VlessTcpOrGrpc
        );
        assert_eq!(
            classify("vless://id@a.com:443?type=tcp#x"),
            Dialect::VlessTcpOrGrpc
        );
    }

    #[test]
    fn test_reality_wins_over_ws() {
        assert_eq!(
            classify("vless://id@a.com:443?type=ws&security=reality&pbk=k#x"),
            Dialect::VlessReality
        );
        assert_eq!(
            classify("trojan://pw@a.com:443?type=ws&security=reality#x"),
            Dialect::TrojanReality
        );
    }

    #[test]
    fn test_classify_trojan() {
        assert_eq!(
            classify("trojan://pw@a.com:443?type=ws#x"),
            Dialect::TrojanWs
        );
        assert_eq!(
            classify("trojan://pw@a.com:443?security=tls&type=tcp#x"),
            Dialect::TrojanTcpOrGrpc
        );
    }

    #[test]
    fn test_classify_vmess() {
        let ws = encode_link(&json!({"id": "x", "add": "a", "port": 1, "net": "ws"}));
        assert_eq!(classify(&ws), Dialect::VmessWs);
        let grpc = encode_link(&json!({"id": "x", "add": "a", "port": 1, "net": "grpc"}));
        assert_eq!(classify(&grpc), Dialect::VmessTcpOrGrpc);
        let kcp = encode_link(&json!({"id": "x", "add": "a", "port": 1, "net": "kcp"}));
        assert_eq!(classify(&kcp), Dialect::Unrecognized);
        assert_eq!(classify("vmess://not base64 at all"), Dialect::Unrecognized);
    }

    #[test]
    fn test_classify_unrecognized() {
        assert_eq!(classify(""), Dialect::Unrecognized);
        assert_eq!(classify("ss://YWVzOnBhc3M@a.com:8388#x"), Dialect::Unrecognized);
        assert_eq!(classify("vless://id@a.com:443?type=h2#x"), Dialect::Unrecognized);
        assert_eq!(classify("https://type=ws"), Dialect::Unrecognized);
    }

    #[test]
    fn test_dialect_protocol() {
        assert_eq!(Dialect::TrojanWs.protocol(), Some(Protocol::Trojan));
        assert_eq!(Dialect::Unrecognized.protocol(), None);
        assert!(Dialect::VlessReality.is_reality());
        assert!(!Dialect::VlessWs.is_reality());
    }

    proptest::proptest! {
        #[test]
        fn prop_classify_total_and_deterministic(s in ".*") {
            let first = classify(&s);
            proptest::prop_assert_eq!(first, classify(&s));
        }

        #[test]
        fn prop_reality_beats_ws(query in "[a-z=&]{0,24}") {
            let link = format!("vless://id@a.com:443?type=ws&{}&security=reality#x", query);
            proptest::prop_assert_eq!(classify(&link), Dialect::VlessReality);
        }
    }
}
