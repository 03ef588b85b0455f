//! `vmess://` links carry a base64 JSON object instead of a query string.

use super::deserialize::from_any_to_option_string;
use super::{LinkFields, Protocol};
use crate::error::DecodeError;
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, PAD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Standard alphabet. Payloads are shared both with and without padding.
const PAYLOAD_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    PAD.with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

const REQUIRED_FIELDS: [&str; 4] = ["id", "add", "port", "net"];

#[derive(Deserialize, Debug)]
struct Payload {
    id: String,
    add: String,
    port: u16,
    net: String,
    #[serde(default, deserialize_with = "from_any_to_option_string")]
    host: Option<String>,
    #[serde(default, deserialize_with = "from_any_to_option_string")]
    path: Option<String>,
    #[serde(default, deserialize_with = "from_any_to_option_string")]
    tls: Option<String>,
    #[serde(default, deserialize_with = "from_any_to_option_string")]
    sni: Option<String>,
    #[serde(default, deserialize_with = "from_any_to_option_string")]
    alpn: Option<String>,
    #[serde(default, deserialize_with = "from_any_to_option_string")]
    fp: Option<String>,
    /// TCP header disguise type.
    #[serde(default, deserialize_with = "from_any_to_option_string")]
    r#type: Option<String>,
}

/// Base64-decode the text after `://` and parse it as a JSON object.
pub(crate) fn decode_object(link: &str) -> Result<Map<String, Value>, DecodeError> {
    let (_, payload) = link.split_once("://").ok_or(DecodeError::NoScheme)?;
    let raw = PAYLOAD_ENGINE.decode(payload.trim())?;
    match serde_json::from_slice::<Value>(&raw)? {
        Value::Object(map) => Ok(map),
        _ => Err(DecodeError::NotAnObject),
    }
}

/// The payload's `net` value, when the payload decodes at all.
pub(crate) fn network(link: &str) -> Option<String> {
    let mut object = decode_object(link).ok()?;
    match object.remove("net") {
        Some(Value::String(net)) => Some(net),
        _ => None,
    }
}

/// Decode a `vmess://` link into link fields.
///
/// `id`, `add`, `port` (a JSON number) and `net` are required. The gRPC service
/// name is carried in `path`, and VMess never has a flow.
pub fn decode(link: &str) -> Result<LinkFields, DecodeError> {
    let object = decode_object(link)?;
    if let Some(missing) = REQUIRED_FIELDS
        .iter()
        .copied()
        .find(|f| !object.contains_key(*f))
    {
        return Err(DecodeError::MissingField(missing));
    }
    let payload: Payload = serde_json::from_value(Value::Object(object))?;
    let path = payload.path.unwrap_or_default();
    Ok(LinkFields {
        protocol: Protocol::Vmess,
        credential_id: payload.id,
        address: payload.add,
        port: payload.port,
        network: payload.net,
        security: payload.tls.unwrap_or_default(),
        sni: payload.sni.unwrap_or_default(),
        fp: payload.fp.unwrap_or_default(),
        host: payload.host.unwrap_or_default(),
        header_type: payload.r#type.unwrap_or_default(),
        service_name: path.clone(),
        path,
        alpn: payload.alpn.unwrap_or_default(),
        pbk: String::new(),
        sid: String::new(),
        spx: String::new(),
        flow: String::new(),
    })
}

#[cfg(test)]
pub(crate) fn encode_link(payload: &Value) -> String {
    format!("vmess://{}", PAYLOAD_ENGINE.encode(payload.to_string()))
}
