use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub model: Option<ModelFileConfig>,
    pub summary: Option<SummaryFileConfig>,
    pub server: Option<ServerFileConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelFileConfig {
    pub provider: Option<String>,
    pub model_id: Option<String>,
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummaryFileConfig {
    pub mode: Option<String>,
    pub max_chunk_size: Option<usize>,
    pub max_length: Option<u32>,
    pub min_length: Option<u32>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerFileConfig {
    pub port: Option<u16>,
    pub body_limit_mb: Option<usize>,
}

/// Platform config directory path: `<config_dir>/papergist/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("papergist").join("config.toml"))
}

/// Load config by cascading CWD `.papergist.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".papergist.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        model: Some(ModelFileConfig {
            provider: overlay
                .model
                .as_ref()
                .and_then(|m| m.provider.clone())
                .or_else(|| base.model.as_ref().and_then(|m| m.provider.clone())),
            model_id: overlay
                .model
                .as_ref()
                .and_then(|m| m.model_id.clone())
                .or_else(|| base.model.as_ref().and_then(|m| m.model_id.clone())),
            endpoint: overlay
                .model
                .as_ref()
                .and_then(|m| m.endpoint.clone())
                .or_else(|| base.model.as_ref().and_then(|m| m.endpoint.clone())),
            api_key: overlay
                .model
                .as_ref()
                .and_then(|m| m.api_key.clone())
                .or_else(|| base.model.as_ref().and_then(|m| m.api_key.clone())),
        }),
        summary: Some(SummaryFileConfig {
            mode: overlay
                .summary
                .as_ref()
                .and_then(|s| s.mode.clone())
                .or_else(|| base.summary.as_ref().and_then(|s| s.mode.clone())),
            max_chunk_size: overlay
                .summary
                .as_ref()
                .and_then(|s| s.max_chunk_size)
                .or_else(|| base.summary.as_ref().and_then(|s| s.max_chunk_size)),
            max_length: overlay
                .summary
                .as_ref()
                .and_then(|s| s.max_length)
                .or_else(|| base.summary.as_ref().and_then(|s| s.max_length)),
            min_length: overlay
                .summary
                .as_ref()
                .and_then(|s| s.min_length)
                .or_else(|| base.summary.as_ref().and_then(|s| s.min_length)),
            timeout_secs: overlay
                .summary
                .as_ref()
                .and_then(|s| s.timeout_secs)
                .or_else(|| base.summary.as_ref().and_then(|s| s.timeout_secs)),
        }),
        server: Some(ServerFileConfig {
            port: overlay
                .server
                .as_ref()
                .and_then(|s| s.port)
                .or_else(|| base.server.as_ref().and_then(|s| s.port)),
            body_limit_mb: overlay
                .server
                .as_ref()
                .and_then(|s| s.body_limit_mb)
                .or_else(|| base.server.as_ref().and_then(|s| s.body_limit_mb)),
        }),
    }
}
