use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub autosave: Option<AutosaveConfig>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub base_url: Option<String>,
    pub csv_path: Option<String>,
    pub save_path: Option<String>,
    pub images_path: Option<String>,
    pub placeholder_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AutosaveConfig {
    pub debounce_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub theme: Option<String>,
    pub sidebar: Option<bool>,
}

/// Platform config directory path: `<config_dir>/evidence-review/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("evidence-review").join("config.toml"))
}

/// Load config by cascading CWD `.evidence-review.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".evidence-review.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparsable config file");
            None
        }
    }
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bs = base.server.unwrap_or_default();
    let os = overlay.server.unwrap_or_default();
    let ba = base.autosave.unwrap_or_default();
    let oa = overlay.autosave.unwrap_or_default();
    let bd = base.display.unwrap_or_default();
    let od = overlay.display.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            base_url: os.base_url.or(bs.base_url),
            csv_path: os.csv_path.or(bs.csv_path),
            save_path: os.save_path.or(bs.save_path),
            images_path: os.images_path.or(bs.images_path),
            placeholder_url: os.placeholder_url.or(bs.placeholder_url),
            timeout_secs: os.timeout_secs.or(bs.timeout_secs),
        }),
        autosave: Some(AutosaveConfig {
            debounce_ms: oa.debounce_ms.or(ba.debounce_ms),
        }),
        display: Some(DisplayConfig {
            theme: od.theme.or(bd.theme),
            sidebar: od.sidebar.or(bd.sidebar),
        }),
    }
}
