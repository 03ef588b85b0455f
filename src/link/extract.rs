//! Literal-delimiter field extraction.
//!
//! Links in the wild are not well-formed URIs, so nothing here percent-decodes.
//! The only rewrite ever applied is `%2F` -> `/` over the whole link.

use crate::error::CompileError;
use crate::link::Protocol;
use std::borrow::Cow;

/// Replace every literal `%2F` with `/`. No other escape is touched.
pub fn normalize(link: &str) -> Cow<'_, str> {
    if link.contains("%2F") {
        Cow::Owned(link.replace("%2F", "/"))
    } else {
        Cow::Borrowed(link)
    }
}

/// Value of the first `key=` in `link`.
///
/// The value ends at the next `&`; when no `&` follows, at the next `#`; when
/// neither follows, at the end of the link. An absent key yields `""`. Keys
/// are case-sensitive and the first occurrence wins, even inside another key:
/// `host=` matches in `xhost=`, and `type=` matches in `headertype=`, so
/// `?headertype=none&type=tcp` reads `type` as `none`.
pub fn extract<'a>(link: &'a str, key: &str) -> &'a str {
    let mut needle = String::with_capacity(key.len() + 1);
    needle.push_str(key);
    needle.push('=');
    let start = match link.find(needle.as_str()) {
        Some(idx) => idx + needle.len(),
        None => return "",
    };
    let rest = &link[start..];
    let end = rest
        .find('&')
        .or_else(|| rest.find('#'))
        .unwrap_or(rest.len());
    &rest[..end]
}

/// `scheme://credential@address:port?query#name` split on literal delimiters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub credential: &'a str,
    pub address: &'a str,
    pub port: u16,
}

impl<'a> Endpoint<'a> {
    /// Used by VLESS and Trojan, where the credential is the text before the first `@`.
    pub fn parse(link: &'a str, protocol: Protocol) -> Result<Self, CompileError> {
        let (_, rest) = link
            .split_once("://")
            .ok_or_else(|| CompileError::malformed("missing `://`"))?;
        let (credential, after) = rest.split_once('@').ok_or_else(|| {
            CompileError::malformed(format!("{} link has no `@`", protocol.name()))
        })?;
        if credential.is_empty() {
            return Err(CompileError::malformed(format!(
                "{} link has an empty credential",
                protocol.name()
            )));
        }
        let (address, after) = split_address(after)?;
        let port_str = after
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default();
        let port_str = port_str.strip_suffix('/').unwrap_or(port_str);
        let port = port_str
            .parse::<u16>()
            .map_err(|_| CompileError::malformed(format!("invalid port `{}`", port_str)))?;
        Ok(Endpoint {
            credential,
            address,
            port,
        })
    }
}

/// Address ends at the next `:`. A bracketed IPv6 literal is returned without
/// its brackets.
fn split_address(s: &str) -> Result<(&str, &str), CompileError> {
    if let Some(v6) = s.strip_prefix('[') {
        let (address, after) = v6
            .split_once(']')
            .ok_or_else(|| CompileError::malformed("unterminated `[` in address"))?;
        let after = after
            .strip_prefix(':')
            .ok_or_else(|| CompileError::malformed("missing port after address"))?;
        return Ok((address, after));
    }
    s.split_once(':')
        .ok_or_else(|| CompileError::malformed("missing port after address"))
}
