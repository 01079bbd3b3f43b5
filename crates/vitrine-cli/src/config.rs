//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use vitrine_core::ranking::RankingConfig;
use vitrine_core::rating::{DEFAULT_K_FACTOR, INITIAL_RATING, MAX_K_FACTOR};

/// Top-level vitrine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitrineConfig {
    /// Directory holding the JSON data files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Comparisons per duel session.
    #[serde(default = "default_max_rounds")]
    pub max_rounds: u32,
    /// Elo K-factor for duels.
    #[serde(default = "default_k_factor")]
    pub k_factor: f64,
    /// Where the language preference is stored.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./datasets")
}
fn default_max_rounds() -> u32 {
    10
}
fn default_k_factor() -> f64 {
    DEFAULT_K_FACTOR
}

impl Default for VitrineConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            max_rounds: default_max_rounds(),
            k_factor: default_k_factor(),
            preferences_path: None,
        }
    }
}

impl VitrineConfig {
    pub fn ranking_config(&self) -> RankingConfig {
        RankingConfig {
            max_rounds: self.max_rounds,
            k_factor: self.k_factor,
            initial_rating: INITIAL_RATING,
        }
    }

    /// The preference file, defaulting to `~/.config/vitrine/preferences.toml`.
    pub fn preferences_file(&self) -> PathBuf {
        match &self.preferences_path {
            Some(path) => path.clone(),
            None => dirs_path()
                .map(|dir| dir.join("preferences.toml"))
                .unwrap_or_else(|| PathBuf::from("vitrine-preferences.toml")),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `vitrine.toml` in the current directory
/// 2. `~/.config/vitrine/config.toml`
///
/// `VITRINE_DATA_DIR` overrides the data directory.
pub fn load_config_from(path: Option<&Path>) -> Result<VitrineConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("vitrine.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!(path = %path.display(), "loaded config");
            toml::from_str::<VitrineConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => VitrineConfig::default(),
    };

    if let Ok(dir) = std::env::var("VITRINE_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    config.data_dir = resolve_path(&config.data_dir);
    config.preferences_path = config.preferences_path.as_deref().map(resolve_path);

    if config.max_rounds == 0 {
        anyhow::bail!("max_rounds must be at least 1");
    }
    if !(config.k_factor > 0.0 && config.k_factor <= MAX_K_FACTOR) {
        anyhow::bail!("k_factor must be in (0, {MAX_K_FACTOR}], got {}", config.k_factor);
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("vitrine"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_env_vars_basic() {
        std::env::set_var("_VITRINE_TEST_VAR", "hello");
        assert_eq!(resolve_env_vars("${_VITRINE_TEST_VAR}"), "hello");
        assert_eq!(
            resolve_env_vars("prefix_${_VITRINE_TEST_VAR}_suffix"),
            "prefix_hello_suffix"
        );
        assert_eq!(resolve_env_vars("no_close_${"), "no_close_${");
        std::env::remove_var("_VITRINE_TEST_VAR");
    }

    #[test]
    fn default_config() {
        let config = VitrineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("./datasets"));
        assert_eq!(config.max_rounds, 10);
        assert_eq!(config.ranking_config().initial_rating, 1500);
    }

    #[test]
    fn parse_partial_config() {
        let config: VitrineConfig = toml::from_str("max_rounds = 4\nk_factor = 16.0\n").unwrap();
        assert_eq!(config.max_rounds, 4);
        assert_eq!(config.ranking_config().k_factor, 16.0);
        assert_eq!(config.data_dir, PathBuf::from("./datasets"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/vitrine.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn load_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "data_dir = \"/srv/vitrine\"\nmax_rounds = 3\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.max_rounds, 3);
    }

    #[test]
    fn zero_rounds_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "max_rounds = 0\n").unwrap();
        assert!(load_config_from(Some(&path)).is_err());
    }

    #[test]
    fn out_of_range_k_factor_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        for bad in ["k_factor = 1e10\n", "k_factor = 0.0\n", "k_factor = -8.0\n"] {
            std::fs::write(&path, bad).unwrap();
            let err = load_config_from(Some(&path)).unwrap_err();
            assert!(err.to_string().contains("k_factor"), "{bad}");
        }

        std::fs::write(&path, "k_factor = 400.0\n").unwrap();
        assert_eq!(load_config_from(Some(&path)).unwrap().k_factor, 400.0);
    }
}
