// Series catalog domain model and keyword filtering
use serde::Serialize;

/// Ordered list of selectable series names. Element 0 is the header
/// placeholder shown at the top of the selector and is never filtered out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesCatalog {
    entries: Vec<String>,
}

impl SeriesCatalog {
    pub fn new(header: impl Into<String>, series: impl IntoIterator<Item = String>) -> Self {
        let mut entries = vec![header.into()];
        entries.extend(series);
        Self { entries }
    }

    /// Series names after the header.
    pub fn series(&self) -> &[String] {
        &self.entries[1..]
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// True when the catalog holds more than just the header.
    pub fn has_matches(&self) -> bool {
        self.entries.len() > 1
    }

    /// Keep the header plus every entry containing any keyword, in source order.
    pub fn filter(&self, query: &FilterQuery) -> SeriesCatalog {
        let mut entries = Vec::with_capacity(self.entries.len());
        entries.push(self.entries[0].clone());
        entries.extend(
            self.series()
                .iter()
                .filter(|entry| query.matches(entry))
                .cloned(),
        );
        SeriesCatalog { entries }
    }
}

/// Both catalogs as read at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesCatalogs {
    pub timeseries: SeriesCatalog,
    pub percentiles: SeriesCatalog,
}

impl SeriesCatalogs {
    /// Unfiltered selectors, as offered by a fresh page.
    pub fn selectors(&self) -> SeriesSelectors {
        SeriesSelectors::new(self.timeseries.clone(), self.percentiles.clone())
    }
}

/// Whitespace separated keywords, OR-combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterQuery {
    keywords: Vec<String>,
}

impl FilterQuery {
    /// Returns `None` for blank input, which leaves every selector untouched.
    pub fn parse(text: &str) -> Option<Self> {
        let keywords: Vec<String> = text.split_whitespace().map(str::to_string).collect();
        if keywords.is_empty() {
            None
        } else {
            Some(Self { keywords })
        }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn matches(&self, entry: &str) -> bool {
        self.keywords.iter().any(|k| entry.contains(k.as_str()))
    }
}

/// A panel's own pair of option lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeriesSelectors {
    pub timeseries: SeriesCatalog,
    pub percentiles: SeriesCatalog,
}

/// Which selector lists a filter pass actually replaced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub timeseries_replaced: bool,
    pub percentiles_replaced: bool,
}

impl SeriesSelectors {
    pub fn new(timeseries: SeriesCatalog, percentiles: SeriesCatalog) -> Self {
        Self {
            timeseries,
            percentiles,
        }
    }

    /// Narrow both lists from the full catalogs. A list is only replaced when
    /// the filter leaves at least one real entry, so a miss never blanks it.
    pub fn apply_filter(
        &mut self,
        query: &FilterQuery,
        timeseries_catalog: &SeriesCatalog,
        percentiles_catalog: &SeriesCatalog,
    ) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        let timeseries = timeseries_catalog.filter(query);
        if timeseries.has_matches() {
            self.timeseries = timeseries;
            outcome.timeseries_replaced = true;
        }

        let percentiles = percentiles_catalog.filter(query);
        if percentiles.has_matches() {
            self.percentiles = percentiles;
            outcome.percentiles_replaced = true;
        }

        outcome
    }
}
