use std::fmt;
use std::io;
use std::path::PathBuf;
use crate::drosera::TrapSettings;
use crate::error::ConfigError;
use crate::output::OutputPaths;

pub const DEFAULT_ARTIFACTS_DIR: &str = "out";
pub const DEFAULT_RECORD_PATH: &str = "deployed-addresses.json";
pub const DEFAULT_DROSERA_CONFIG_PATH: &str = "drosera.toml";

#[derive(Clone)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
    pub artifacts_dir: PathBuf,
    pub outputs: OutputPaths,
    pub trap: TrapSettings,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("rpc_url", &self.rpc_url)
            .field("private_key", &"<redacted>")
            .field("artifacts_dir", &self.artifacts_dir)
            .field("outputs", &self.outputs)
            .field("trap", &self.trap)
            .finish()
    }
}

/// Reads the configuration from the process environment, after loading `.env`
/// if one exists.
pub fn config() -> Result<Config, ConfigError> {
    env_file(dotenvy::dotenv())?;
    config_from(|name| std::env::var(name).ok())
}

/// A missing `.env` is fine; one that exists but cannot be read or parsed is not.
fn env_file(loaded: dotenvy::Result<PathBuf>) -> Result<(), ConfigError> {
    match loaded {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded environment file");
            Ok(())
        }
        Err(dotenvy::Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

pub fn config_from<F>(var: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |name: &'static str| {
        var(name)
            .filter(|value| !value.trim().is_empty())
            .ok_or(ConfigError::Missing(name))
    };
    let path_or = |name: &str, default: &str| PathBuf::from(var(name).unwrap_or_else(|| default.to_string()));
    Ok(Config {
        rpc_url: required("RPC_URL")?,
        private_key: required("PRIVATE_KEY")?,
        artifacts_dir: path_or("ARTIFACTS_DIR", DEFAULT_ARTIFACTS_DIR),
        outputs: OutputPaths {
            record: path_or("RECORD_PATH", DEFAULT_RECORD_PATH),
            drosera_config: path_or("DROSERA_CONFIG_PATH", DEFAULT_DROSERA_CONFIG_PATH),
        },
        trap: TrapSettings::default(),
    })
}

/// Installs the fmt subscriber; `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
