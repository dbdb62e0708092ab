use crate::domain::resource::ResourceLayout;
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DashboardConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub resources: ResourceSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub viewport: ViewportSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ResourceSettings {
    /// Directory holding the CSV series, served under `url_prefix`
    pub dir: PathBuf,
    pub url_prefix: String,
    pub suffix: String,
    pub percentile_marker: String,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        let layout = ResourceLayout::default();
        Self {
            dir: PathBuf::from("static/data"),
            url_prefix: layout.prefix,
            suffix: layout.suffix,
            percentile_marker: layout.percentile_marker,
        }
    }
}

impl ResourceSettings {
    pub fn layout(&self) -> ResourceLayout {
        ResourceLayout {
            prefix: self.url_prefix.clone(),
            suffix: self.suffix.clone(),
            percentile_marker: self.percentile_marker.clone(),
        }
    }

    /// Route the CSV files are served from, e.g. `/resources`
    pub fn mount_path(&self) -> String {
        format!("/{}", self.url_prefix.trim_matches('/'))
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogSettings {
    pub timeseries_header: String,
    pub percentiles_header: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            timeseries_header: "Select time series".to_string(),
            percentiles_header: "Select percentiles".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: u32,
    pub height: u32,
    pub color_set: usize,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 405,
            color_set: 0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AnalysisSettings {
    pub base_url: String,
    pub path: String,
    /// Multipart field repeated once per file
    pub field_name: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            path: "/analyze".to_string(),
            field_name: "file[]".to_string(),
        }
    }
}

/// `config/dashboard.{toml,yaml,json}` if present, then `DASHBOARD__*`
/// environment variables (e.g. `DASHBOARD__SERVER__BIND`).
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/dashboard").required(false))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
