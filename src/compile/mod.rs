//! Link to document compilation.
//!
//! ```text
//! raw link -> normalize -> classify -> LinkFields -> Profile
//!          -> assemble (proxy, direct, block) -> merge listeners -> persist
//! ```

use crate::config::{log::Log, Config};
use crate::error::CompileError;
use crate::link::{classify, normalize, Dialect, LinkFields};
use log::debug;
use std::path::PathBuf;

pub mod assemble;
pub mod listener;
pub mod options;
pub mod persist;
pub mod stream;

pub use assemble::{assemble, Assembled};
pub use listener::{listeners, ListenerSpec};
pub use options::CompileOptions;
pub use persist::persist;
pub use stream::{Profile, Security, Transport};

/// Outcome of one compilation that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    /// Path of the artifact that was written.
    Written(PathBuf),
    /// Empty or unrecognized link. Nothing was written.
    Skipped,
}

/// A document ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledDocument {
    pub dialect: Dialect,
    pub credential_id: String,
    pub config: Config,
}

/// Put the listeners and the assembled outbounds into one document.
pub fn merge(listeners: ListenerSpec, assembled: Assembled) -> Config {
    Config {
        log: Log::default(),
        inbounds: listeners.into_inbounds(),
        outbounds: assembled.outbounds,
    }
}

/// Build the document for `raw_link` without touching the filesystem.
/// `Ok(None)` when the link is empty or unrecognized.
pub fn build_document(
    options: &CompileOptions,
    raw_link: &str,
) -> Result<Option<CompiledDocument>, CompileError> {
    if raw_link.is_empty() {
        return Ok(None);
    }
    let link = normalize(raw_link);
    let dialect = classify(&link);
    let protocol = match dialect.protocol() {
        Some(protocol) => protocol,
        None => {
            debug!("skipping unrecognized link");
            return Ok(None);
        }
    };
    let fields = LinkFields::parse(&link, protocol)?;
    let profile = match Profile::new(dialect, &fields) {
        Some(profile) => profile,
        None => return Ok(None),
    };
    debug!("{:?} compiles as {:?}", dialect, profile);
    let assembled = assemble(&profile, &fields);
    let credential_id = assembled.credential_id.clone();
    let inbounds = listeners(
        &options.listen,
        options.http_port,
        options.socks_port,
        options.transparent_port,
    );
    Ok(Some(CompiledDocument {
        dialect,
        credential_id,
        config: merge(inbounds, assembled),
    }))
}

/// Compile `raw_link` and write it under `options.output_dir`.
pub fn compile_with(options: &CompileOptions, raw_link: &str) -> Result<Compiled, CompileError> {
    match build_document(options, raw_link)? {
        Some(doc) => {
            let path = persist(&options.output_dir, &doc.credential_id, &doc.config)?;
            Ok(Compiled::Written(path))
        }
        None => Ok(Compiled::Skipped),
    }
}

/// Compile `raw_link` into `configs/<credential>.json`.
pub fn compile(
    host: &str,
    http_port: u16,
    socks_port: u16,
    transparent_port: u16,
    raw_link: &str,
) -> Result<Compiled, CompileError> {
    let options = CompileOptions {
        listen: host.to_owned(),
        http_port,
        socks_port,
        transparent_port,
        ..Default::default()
    };
    compile_with(&options, raw_link)
}
