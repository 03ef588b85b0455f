use crate::config::Config;
use crate::error::CompileError;
use log::info;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

static TMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// `<dir>/<id>.json`, or `MalformedLink` when `id` cannot be a file name.
pub fn artifact_path(dir: &Path, id: &str) -> Result<PathBuf, CompileError> {
    if id.is_empty() || id == "." || id == ".." || id.contains('/') || id.contains('\\') {
        return Err(CompileError::malformed(format!(
            "credential `{}` is not usable as a file name",
            id
        )));
    }
    Ok(dir.join(format!("{}.json", id)))
}

/// Write `config` as pretty JSON to `<dir>/<id>.json`, creating `dir` first.
///
/// The bytes go to a temporary sibling which is renamed over the target, so a
/// reader never sees a partial file and the last writer wins.
pub fn persist(dir: &Path, id: &str, config: &Config) -> Result<PathBuf, CompileError> {
    let path = artifact_path(dir, id)?;
    let mut data = serde_json::to_vec_pretty(config).map_err(CompileError::Encode)?;
    data.push(b'\n');
    fs::create_dir_all(dir).map_err(|e| CompileError::io(dir, e))?;
    write_atomic(&path, &data)?;
    info!("wrote {}", path.display());
    Ok(path)
}

fn write_atomic(path: &Path, data: &[u8]) -> Result<(), CompileError> {
    let tmp = path.with_extension(format!(
        "json.{}-{}.tmp",
        std::process::id(),
        TMP_COUNTER.fetch_add(1, Ordering::Relaxed)
    ));
    let written = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&tmp)
        .and_then(|mut f| {
            f.write_all(data)?;
            f.sync_all()
        });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(CompileError::io(&tmp, e));
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        CompileError::io(path, e)
    })
}
