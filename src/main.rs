use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{debug, warn};
use std::io::{self, BufRead};
use std::path::PathBuf;
use xray_uri_compiler::{compile_with, CompileOptions, Compiled};

#[derive(Parser, Debug)]
#[command(name = "xray-uri-compiler")]
#[command(about = "Compile proxy share links into xray config files", long_about = None)]
struct Args {
    /// Links to compile. Read from stdin, one per line, when omitted.
    links: Vec<String>,
    /// JSON file with compile options
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,
    /// Address the SOCKS and HTTP listeners bind
    #[arg(long)]
    listen: Option<String>,
    #[arg(long)]
    http_port: Option<u16>,
    #[arg(long)]
    socks_port: Option<u16>,
    #[arg(long)]
    transparent_port: Option<u16>,
    /// Directory compiled documents are written to
    #[arg(short = 'o', long = "out-dir")]
    out_dir: Option<PathBuf>,
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn options(&self) -> Result<CompileOptions> {
        let mut options = match &self.config {
            Some(path) => CompileOptions::load(path).context("load compile options")?,
            None => CompileOptions::default(),
        };
        if let Some(listen) = &self.listen {
            options.listen = listen.clone();
        }
        if let Some(port) = self.http_port {
            options.http_port = port;
        }
        if let Some(port) = self.socks_port {
            options.socks_port = port;
        }
        if let Some(port) = self.transparent_port {
            options.transparent_port = port;
        }
        if let Some(dir) = &self.out_dir {
            options.output_dir = dir.clone();
        }
        Ok(options)
    }
}

/// One link per line, trimmed, blank lines dropped.
fn read_links<R: BufRead>(reader: R) -> io::Result<Vec<String>> {
    let mut links = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if !line.is_empty() {
            links.push(line.to_owned());
        }
    }
    Ok(links)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "info" };
    env_logger::init_from_env(env_logger::Env::new().default_filter_or(default_filter));

    let options = args.options()?;
    debug!("compile options: {:?}", options);
    let links = if args.links.is_empty() {
        read_links(io::stdin().lock()).context("read links from stdin")?
    } else {
        args.links.clone()
    };

    let mut failed = 0usize;
    for link in &links {
        match compile_with(&options, link.trim()) {
            Ok(Compiled::Written(path)) => println!("{}", path.display()),
            Ok(Compiled::Skipped) => debug!("skipped unrecognized link"),
            Err(e) => {
                warn!("failed to compile link: {}", e);
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{} of {} links failed to compile", failed, links.len());
    }
    Ok(())
}
