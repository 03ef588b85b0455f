//! Everything that reads a raw share link: field extraction, dialect
//! classification and VMess payload decoding.

use crate::config::protocol::List as ProtocolList;
use crate::error::CompileError;

pub mod classify;
mod deserialize;
pub mod extract;
pub mod vmess;

pub use classify::{classify, Dialect};
pub use extract::{extract, normalize, Endpoint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Vless,
    Vmess,
    Trojan,
}

impl Protocol {
    /// Scheme prefix including `://`.
    pub fn scheme(&self) -> &'static str {
        match self {
            Protocol::Vless => "vless://",
            Protocol::Vmess => "vmess://",
            Protocol::Trojan => "trojan://",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Protocol::Vless => "vless",
            Protocol::Vmess => "vmess",
            Protocol::Trojan => "trojan",
        }
    }
}

impl From<Protocol> for ProtocolList {
    fn from(p: Protocol) -> Self {
        match p {
            Protocol::Vless => ProtocolList::Vless,
            Protocol::Vmess => ProtocolList::Vmess,
            Protocol::Trojan => ProtocolList::Trojan,
        }
    }
}

/// Parameters pulled out of one link. Optional parameters the link does not
/// carry are empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFields {
    pub protocol: Protocol,
    /// User id (VLESS, VMess) or password (Trojan). Names the output file.
    pub credential_id: String,
    pub address: String,
    pub port: u16,
    /// `type=` or the VMess `net`.
    pub network: String,
    /// `security=` or the VMess `tls`.
    pub security: String,
    pub sni: String,
    pub fp: String,
    pub pbk: String,
    pub sid: String,
    pub spx: String,
    pub flow: String,
    pub host: String,
    /// `headertype=` or the VMess `type`.
    pub header_type: String,
    pub path: String,
    /// `serviceName=` or, for VMess, the payload `path`.
    pub service_name: String,
    pub alpn: String,
}

impl LinkFields {
    /// Fields of an already normalized link of the given protocol.
    pub fn parse(link: &str, protocol: Protocol) -> Result<Self, CompileError> {
        match protocol {
            Protocol::Vmess => Ok(vmess::decode(link)?),
            Protocol::Vless | Protocol::Trojan => Self::from_query(link, protocol),
        }
    }

    fn from_query(link: &str, protocol: Protocol) -> Result<Self, CompileError> {
        let endpoint = Endpoint::parse(link, protocol)?;
        let field = |key: &str| extract(link, key).to_owned();
        Ok(LinkFields {
            protocol,
            credential_id: endpoint.credential.to_owned(),
            address: endpoint.address.to_owned(),
            port: endpoint.port,
            network: field("type"),
            security: field("security"),
            sni: field("sni"),
            fp: field("fp"),
            pbk: field("pbk"),
            sid: field("sid"),
            spx: field("spx"),
            flow: field("flow"),
            host: field("host"),
            header_type: field("headertype"),
            path: field("path"),
            service_name: field("serviceName"),
            alpn: field("alpn"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reality_query() {
        let link = "vless://uuid@1.2.3.4:443?security=reality&encryption=none&pbk=PUB&fp=chrome&type=grpc&serviceName=svc&sni=www.speedtest.net&sid=ab12&spx=/&flow=xtls-rprx-vision#name";
        let fields = LinkFields::parse(link, Protocol::Vless).unwrap();
        assert_eq!(fields.credential_id, "uuid");
        assert_eq!(fields.address, "1.2.3.4");
        assert_eq!(fields.port, 443);
        assert_eq!(fields.network, "grpc");
        assert_eq!(fields.security, "reality");
        assert_eq!(fields.pbk, "PUB");
        assert_eq!(fields.sid, "ab12");
        assert_eq!(fields.spx, "/");
        assert_eq!(fields.service_name, "svc");
        assert_eq!(fields.flow, "xtls-rprx-vision");
        assert_eq!(fields.host, "");
    }

    #[test]
    fn test_parse_trojan_password() {
        let link = "trojan://s3cret@t.example.org:8443?type=ws&host=cdn.example.org#x";
        let fields = LinkFields::parse(link, Protocol::Trojan).unwrap();
        assert_eq!(fields.credential_id, "s3cret");
        assert_eq!(fields.port, 8443);
        assert_eq!(fields.host, "cdn.example.org");
    }

    #[test]
    fn test_parse_vmess_decode_error_is_compile_error() {
        let err = LinkFields::parse("vmess://???", Protocol::Vmess).unwrap_err();
        assert!(matches!(err, CompileError::Decode(_)));
    }
}
