//! Compile `vless://`, `vmess://` and `trojan://` share links into
//! configuration documents an xray-compatible engine can load.

pub mod compile;
pub mod config;
pub mod error;
pub mod link;

pub use compile::{build_document, compile, compile_with, CompileOptions, Compiled};
pub use error::{CompileError, DecodeError, OptionsError};
pub use link::{classify, extract, Dialect, LinkFields, Protocol};
