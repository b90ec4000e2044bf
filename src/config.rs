use std::path::PathBuf;

/// Default schema directory, relative to the working directory.
const DEFAULT_SCHEMA_DIR: &str = "schemas";

/// Checker configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub schema_dir: PathBuf,
}

impl CheckerConfig {
    /// Load configuration from environment.
    ///
    /// - `NOTECARD_SCHEMA_DIR` (optional, default `schemas`): directory
    ///   holding the `*.notecard.api.json` corpus
    pub fn from_env() -> Result<Self, String> {
        let schema_dir = match std::env::var("NOTECARD_SCHEMA_DIR") {
            Ok(val) if val.is_empty() => {
                return Err("NOTECARD_SCHEMA_DIR must not be empty".to_string())
            }
            Ok(val) => PathBuf::from(val),
            Err(_) => PathBuf::from(DEFAULT_SCHEMA_DIR),
        };

        Ok(Self { schema_dir })
    }
}
