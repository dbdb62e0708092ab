// Share URL codec - Dashboard state to and from a query string
use crate::domain::panel::{DataSourceRef, PanelKind};
use crate::domain::range::TimeRange;
use crate::domain::resource::ResourceLayout;
use serde::Serialize;

const CHARTS_KEY: &str = "charts";
const RANGE_KEY: &str = "range";

/// One panel to restore, in share URL order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlannedPanel {
    pub kind: PanelKind,
    pub data_source: DataSourceRef,
}

/// Structured result of parsing a share URL.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SharePlan {
    pub entries: Vec<PlannedPanel>,
    pub range: Option<TimeRange>,
}

#[derive(Debug, Clone, Default)]
pub struct ShareStateCodec {
    layout: ResourceLayout,
}

impl ShareStateCodec {
    pub fn new(layout: ResourceLayout) -> Self {
        Self { layout }
    }

    pub fn layout(&self) -> &ResourceLayout {
        &self.layout
    }

    /// `base?charts=a,b&range=start,end`, or the bare base URL when no panel
    /// is active. The range segment is left out until a range was shared.
    /// Each reference is percent-encoded per path segment, so `/` stays
    /// literal while `,` `&` `#` `%` in series names survive the trip.
    pub fn serialize<'a>(
        &self,
        base_url: &str,
        sources: impl IntoIterator<Item = &'a DataSourceRef>,
        shared_range: Option<TimeRange>,
    ) -> String {
        let base = strip_query(base_url);
        let charts: Vec<String> = sources
            .into_iter()
            .map(|source| encode_reference(source.as_str()))
            .collect();
        if charts.is_empty() {
            return base.to_string();
        }

        let mut url = format!("{}?{}={}", base, CHARTS_KEY, charts.join(","));
        if let Some(range) = shared_range {
            url.push_str(&format!("&{}={}", RANGE_KEY, range));
        }
        url
    }

    /// Parse a full URL or a bare query string. Unknown or malformed segments
    /// are skipped so the rest of the link still restores.
    pub fn parse(&self, url: &str) -> SharePlan {
        let mut plan = SharePlan::default();

        for segment in query_segments(url) {
            let Some((key, value)) = segment.split_once('=') else {
                tracing::debug!("Skipping share segment without value: {:?}", segment);
                continue;
            };
            match key {
                CHARTS_KEY => {
                    // Split before decoding: an encoded comma belongs to the name
                    plan.entries = value
                        .split(',')
                        .map(str::trim)
                        .filter(|item| !item.is_empty())
                        .map(|item| {
                            let data_source = DataSourceRef::new(decode(item));
                            PlannedPanel {
                                kind: self.layout.classify(&data_source),
                                data_source,
                            }
                        })
                        .collect();
                }
                RANGE_KEY => match parse_range(&decode(value)) {
                    Some(range) => plan.range = Some(range),
                    None => tracing::debug!("Ignoring malformed range segment: {:?}", value),
                },
                _ => tracing::debug!("Ignoring unknown share segment: {}", key),
            }
        }

        plan
    }
}

/// Everything before the query string or fragment.
pub fn strip_query(url: &str) -> &str {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    &url[..end]
}

// url := base ['?' segment ('&' segment)*] ['#' fragment]
fn query_segments(url: &str) -> impl Iterator<Item = &str> {
    let without_fragment = url.split('#').next().unwrap_or("");
    let query = match without_fragment.split_once('?') {
        Some((_, query)) => query,
        // A bare "charts=..." string is accepted as a query on its own
        None if without_fragment.contains('=') => without_fragment,
        None => "",
    };
    query.split('&').filter(|segment| !segment.is_empty())
}

fn encode_reference(reference: &str) -> String {
    reference
        .split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

fn decode(value: &str) -> String {
    match urlencoding::decode(value) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => value.to_string(),
    }
}

/// Exactly two finite comma separated numbers.
fn parse_range(value: &str) -> Option<TimeRange> {
    let mut parts = value.split(',');
    let start = parts.next()?.trim().parse::<f64>().ok()?;
    let end = parts.next()?.trim().parse::<f64>().ok()?;
    if parts.next().is_some() {
        return None;
    }
    TimeRange::from_finite(start, end)
}
