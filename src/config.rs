use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Database file used when neither the CLI nor the config file names one
pub const DEFAULT_DATABASE: &str = "inventory.db";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StockpileConfig {
    pub database: Option<String>,
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("stockpile.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<StockpileConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: StockpileConfig = toml::from_str(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &StockpileConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

/// CLI flag wins over the config file, which wins over `DEFAULT_DATABASE`
pub fn resolve_database(flag: Option<&Path>, config: Option<&StockpileConfig>) -> PathBuf {
    if let Some(path) = flag {
        return path.to_path_buf();
    }
    config
        .and_then(|c| c.database.as_deref())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE))
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
