//! Object model of the document the proxy engine loads. Every type only
//! serializes; field order is the order keys appear in the written file.

use serde::Serialize;

pub mod inbound;
pub mod log;
pub mod outbound;
pub mod protocol;
pub mod transport;

pub use inbound::Inbound;
pub use outbound::Outbound;

/// Top level configuration.
///
/// ```json
/// {
///     "log": {},
///     "inbounds": [],
///     "outbounds": []
/// }
/// ```
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Log configuration indicates how the engine outputs logs.
    pub log: log::Log,
    /// Transparent, SOCKS and HTTP listeners, in that order.
    pub inbounds: Vec<Inbound>,
    /// `proxy`, `direct` and `block`, in that order. The first element is the
    /// primary outbound: traffic no rule matches leaves through it.
    pub outbounds: Vec<Outbound>,
}
