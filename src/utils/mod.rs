pub mod build_info;

use dirs::home_dir;
use std::{
    env,
    fs,
    io,
    path::{Path, PathBuf},
    sync::Once,
};

const HOME_ENV: &str = "FINANCE_CORE_HOME";
const DEFAULT_DIR_NAME: &str = ".finance_core";
const STORAGE_DIR: &str = "data";
const CONFIG_FILE: &str = "config.json";
const DEFAULT_DIRECTIVE: &str = "finance_core=info";

static TRACING_INIT: Once = Once::new();

/// Installs the global fmt subscriber. `RUST_LOG` overrides the default
/// `finance_core=info` filter.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}

/// Application data directory, `$FINANCE_CORE_HOME` or `~/.finance_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

pub fn storage_dir_in(base: &Path) -> PathBuf {
    base.join(STORAGE_DIR)
}

pub fn config_file_in(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE)
}

pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_is_rooted_at_base() {
        let base = Path::new("/tmp/finance");
        assert_eq!(storage_dir_in(base), base.join("data"));
        assert_eq!(config_file_in(base), base.join("config.json"));
    }

    #[test]
    fn init_tracing_is_idempotent() {
        init_tracing();
        init_tracing();
    }
}
