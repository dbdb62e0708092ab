// Catalog service - Builds the two series catalogs offered to the user
use crate::application::series_repository::SeriesRepository;
use crate::domain::catalog::{FilterQuery, SeriesCatalog, SeriesCatalogs, SeriesSelectors};
use crate::domain::resource::ResourceLayout;
use crate::infrastructure::config::CatalogSettings;
use std::sync::Arc;

#[derive(Clone)]
pub struct CatalogService {
    repository: Arc<dyn SeriesRepository>,
    layout: ResourceLayout,
    headers: CatalogSettings,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn SeriesRepository>, layout: ResourceLayout, headers: CatalogSettings) -> Self {
        Self {
            repository,
            layout,
            headers,
        }
    }

    pub async fn list_series_files(&self) -> anyhow::Result<Vec<String>> {
        self.repository.list_series_files().await
    }

    /// Split the available files into timeseries and percentile catalogs,
    /// keyed by series name.
    pub async fn load_catalogs(&self) -> anyhow::Result<SeriesCatalogs> {
        let files = self.repository.list_series_files().await?;

        let mut timeseries = Vec::new();
        let mut percentiles = Vec::new();
        for file in files {
            let Some(name) = file.strip_suffix(self.layout.suffix.as_str()) else {
                tracing::debug!("Skipping {}: not a {} file", file, self.layout.suffix);
                continue;
            };
            if self.layout.is_percentile_file(&file) {
                percentiles.push(name.to_string());
            } else {
                timeseries.push(name.to_string());
            }
        }

        tracing::info!(
            "Catalog holds {} time series and {} percentile series",
            timeseries.len(),
            percentiles.len()
        );
        Ok(SeriesCatalogs {
            timeseries: SeriesCatalog::new(self.headers.timeseries_header.clone(), timeseries),
            percentiles: SeriesCatalog::new(self.headers.percentiles_header.clone(), percentiles),
        })
    }
}

/// Selector contents for a page applying `text` as keyword filter.
pub fn filtered_selectors(catalogs: &SeriesCatalogs, text: &str) -> SeriesSelectors {
    let mut selectors = catalogs.selectors();
    if let Some(query) = FilterQuery::parse(text) {
        selectors.apply_filter(&query, &catalogs.timeseries, &catalogs.percentiles);
    }
    selectors
}
