// Panel identity and kind
use serde::Serialize;
use std::fmt;

/// Stable panel identity. Index 0 is the template panel present from startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PanelIndex(pub u32);

impl PanelIndex {
    pub const TEMPLATE: PanelIndex = PanelIndex(0);

    pub fn next(self) -> PanelIndex {
        PanelIndex(self.0 + 1)
    }

    pub fn is_template(self) -> bool {
        self == Self::TEMPLATE
    }

    /// Container element the renderer draws into, e.g. `charting-div-3`
    pub fn container(self) -> ContainerId {
        ContainerId(format!("charting-div-{}", self.0))
    }
}

impl fmt::Display for PanelIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerId(pub String);

impl ContainerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    Timeseries,
    Cdf,
    /// Nothing drawn yet
    Empty,
}

impl PanelKind {
    pub fn is_timeseries(self) -> bool {
        matches!(self, PanelKind::Timeseries)
    }
}

/// Resource locator of one CSV series, e.g. `resources/disk.iops.csv`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct DataSourceRef(String);

impl DataSourceRef {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataSourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
