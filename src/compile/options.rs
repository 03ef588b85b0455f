use crate::error::OptionsError;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Caller supplied compile parameters.
///
/// ```json
/// {
///     "listen": "127.0.0.1",
///     "httpPort": 10809,
///     "socksPort": 10808,
///     "transparentPort": 1234,
///     "outputDir": "configs"
/// }
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileOptions {
    /// Address the SOCKS and HTTP listeners bind.
    pub listen: String,
    pub http_port: u16,
    pub socks_port: u16,
    pub transparent_port: u16,
    /// Directory artifacts are written to. Created when missing.
    pub output_dir: PathBuf,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            listen: "127.0.0.1".to_owned(),
            http_port: 10809,
            socks_port: 10808,
            transparent_port: 1234,
            output_dir: PathBuf::from("configs"),
        }
    }
}

impl CompileOptions {
    /// Read options from a JSON file. Missing keys keep their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, OptionsError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| OptionsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_reader(BufReader::new(file)).map_err(|source| OptionsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::from_str;
    use std::io::Write;

    #[test]
    fn test_partial_options_keep_defaults() {
        let o: CompileOptions = from_str(r#"{"socksPort": 2080, "outputDir": "out"}"#).unwrap();
        assert_eq!(o.socks_port, 2080);
        assert_eq!(o.output_dir, PathBuf::from("out"));
        assert_eq!(o.listen, "127.0.0.1");
        assert_eq!(o.http_port, 10809);
        assert_eq!(o.transparent_port, 1234);
        let o: CompileOptions = from_str("{}").unwrap();
        assert_eq!(o, CompileOptions::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"listen": "0.0.0.0", "httpPort": 8118}}"#).unwrap();
        let o = CompileOptions::load(file.path()).unwrap();
        assert_eq!(o.listen, "0.0.0.0");
        assert_eq!(o.http_port, 8118);
    }

    #[test]
    fn test_load_errors_carry_path() {
        let err = CompileOptions::load("/nonexistent/options.json").unwrap_err();
        assert!(matches!(err, OptionsError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/options.json"));
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"httpPort": "x"}}"#).unwrap();
        assert!(matches!(
            CompileOptions::load(file.path()),
            Err(OptionsError::Parse { .. })
        ));
    }
}
