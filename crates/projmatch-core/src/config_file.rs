use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub paths: Option<PathsConfig>,
    pub extract: Option<ExtractConfig>,
    pub recommend: Option<RecommendConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub data_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub title_label: Option<String>,
    pub theme_label: Option<String>,
    pub supervisors_label: Option<String>,
    pub description_label: Option<String>,
    pub description_stop_labels: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub top_n: Option<usize>,
    pub min_query_words: Option<usize>,
}

/// Platform config directory path: `<config_dir>/projmatch/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("projmatch").join("config.toml"))
}

/// Load config by cascading CWD `.projmatch.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".projmatch.toml"));

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
        paths: Some(PathsConfig {
            data_dir: overlay
                .paths
                .as_ref()
                .and_then(|p| p.data_dir.clone())
                .or_else(|| base.paths.as_ref().and_then(|p| p.data_dir.clone())),
        }),
        extract: Some(ExtractConfig {
            title_label: overlay
                .extract
                .as_ref()
                .and_then(|e| e.title_label.clone())
                .or_else(|| base.extract.as_ref().and_then(|e| e.title_label.clone())),
            theme_label: overlay
                .extract
                .as_ref()
                .and_then(|e| e.theme_label.clone())
                .or_else(|| base.extract.as_ref().and_then(|e| e.theme_label.clone())),
            supervisors_label: overlay
                .extract
                .as_ref()
                .and_then(|e| e.supervisors_label.clone())
                .or_else(|| {
                    base.extract
                        .as_ref()
                        .and_then(|e| e.supervisors_label.clone())
                }),
            description_label: overlay
                .extract
                .as_ref()
                .and_then(|e| e.description_label.clone())
                .or_else(|| {
                    base.extract
                        .as_ref()
                        .and_then(|e| e.description_label.clone())
                }),
            description_stop_labels: overlay
                .extract
                .as_ref()
                .and_then(|e| e.description_stop_labels.clone())
                .or_else(|| {
                    base.extract
                        .as_ref()
                        .and_then(|e| e.description_stop_labels.clone())
                }),
        }),
        recommend: Some(RecommendConfig {
            top_n: overlay
                .recommend
                .as_ref()
                .and_then(|r| r.top_n)
                .or_else(|| base.recommend.as_ref().and_then(|r| r.top_n)),
            min_query_words: overlay
                .recommend
                .as_ref()
                .and_then(|r| r.min_query_words)
                .or_else(|| base.recommend.as_ref().and_then(|r| r.min_query_words)),
        }),
    }
}
