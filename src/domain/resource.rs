// Mapping between catalog names and data source locators
use crate::domain::panel::{DataSourceRef, PanelKind};

/// Fixed locator layout: `<prefix><series name><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceLayout {
    pub prefix: String,
    pub suffix: String,
    /// Locators ending with this marker are percentile (CDF) series.
    pub percentile_marker: String,
}

impl Default for ResourceLayout {
    fn default() -> Self {
        Self {
            prefix: "resources/".to_string(),
            suffix: ".csv".to_string(),
            percentile_marker: "percentiles.csv".to_string(),
        }
    }
}

impl ResourceLayout {
    pub fn resolve(&self, series_name: &str) -> DataSourceRef {
        DataSourceRef::new(format!("{}{}{}", self.prefix, series_name, self.suffix))
    }

    /// Catalog name of a locator, if it follows the layout.
    pub fn series_name<'a>(&self, source: &'a DataSourceRef) -> Option<&'a str> {
        source
            .as_str()
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.suffix.as_str())
    }

    pub fn classify(&self, source: &DataSourceRef) -> PanelKind {
        if source.as_str().ends_with(self.percentile_marker.as_str()) {
            PanelKind::Cdf
        } else {
            PanelKind::Timeseries
        }
    }

    /// Classification of a bare file name found in the resources directory.
    pub fn is_percentile_file(&self, file_name: &str) -> bool {
        file_name.ends_with(self.percentile_marker.as_str())
    }
}
