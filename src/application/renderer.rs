// Capability interface of the external chart widget
use crate::domain::panel::{ContainerId, DataSourceRef, PanelIndex};
use crate::domain::range::TimeRange;
use tokio::sync::mpsc::UnboundedSender;

const TIME_AXIS_LABEL: &str = "Time";
const PERCENTILE_AXIS_LABEL: &str = "Percentiles";

/// Palettes offered to the widget, picked per panel by color set id.
pub const COLOR_SETS: [&[&str]; 2] = [
    &["#1F78B4", "#B2DF8A", "#A6CEE3"],
    &["#993399", "#B3CDE3", "#CCEBC5"],
];

/// Draws charts. Implemented by the charting widget binding.
pub trait ChartRenderer {
    fn render(
        &self,
        container: &ContainerId,
        source: &DataSourceRef,
        options: &RenderOptions,
    ) -> Box<dyn RenderHandle>;
}

/// A drawn chart. Dropping the handle releases it.
pub trait RenderHandle {
    fn current_range(&self) -> Option<TimeRange>;

    /// Set the visible window. Widgets may report this change back through
    /// the registered notifier before returning.
    fn impose_range(&mut self, range: TimeRange);

    fn resize(&mut self, width: u32, height: u32);

    fn on_range_changed(&mut self, notifier: RangeNotifier);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeEvent {
    pub panel: PanelIndex,
    pub range: TimeRange,
}

/// Callback handed to a render handle; each notification is queued for the
/// range synchronizer.
#[derive(Debug, Clone)]
pub struct RangeNotifier {
    panel: PanelIndex,
    tx: UnboundedSender<RangeEvent>,
}

impl RangeNotifier {
    pub(crate) fn new(panel: PanelIndex, tx: UnboundedSender<RangeEvent>) -> Self {
        Self { panel, tx }
    }

    pub fn panel(&self) -> PanelIndex {
        self.panel
    }

    pub fn notify(&self, range: TimeRange) {
        let event = RangeEvent {
            panel: self.panel,
            range,
        };
        if self.tx.send(event).is_err() {
            tracing::debug!("Dropping range change of panel {}: dashboard is gone", self.panel);
        }
    }
}

/// Widget options for one draw.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub x_label: &'static str,
    /// Legend labels: x axis then series title
    pub labels: [String; 2],
    pub colors: Vec<String>,
    pub date_axis: bool,
    pub legend_always: bool,
    /// Initial visible window
    pub date_window: Option<TimeRange>,
}

impl RenderOptions {
    pub fn timeseries(title: &str, color_set: usize, date_window: Option<TimeRange>) -> Self {
        Self {
            x_label: TIME_AXIS_LABEL,
            labels: [TIME_AXIS_LABEL.to_string(), title.to_string()],
            colors: palette(color_set),
            date_axis: true,
            legend_always: true,
            date_window,
        }
    }

    /// Percentile charts have no time axis and never take a date window.
    pub fn percentiles(title: &str, color_set: usize) -> Self {
        Self {
            x_label: PERCENTILE_AXIS_LABEL,
            labels: [PERCENTILE_AXIS_LABEL.to_string(), title.to_string()],
            colors: palette(color_set),
            date_axis: false,
            legend_always: true,
            date_window: None,
        }
    }
}

// Out of range ids fall back to the widget's default colors
fn palette(color_set: usize) -> Vec<String> {
    COLOR_SETS
        .get(color_set)
        .map(|set| set.iter().map(|c| c.to_string()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    #[test]
    fn test_notifier_tags_panel() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let notifier = RangeNotifier::new(PanelIndex(4), tx);
        notifier.notify(TimeRange::new(1.0, 2.0));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.panel, PanelIndex(4));
        assert_eq!(event.range, TimeRange::new(1.0, 2.0));
    }

    #[test]
    fn test_notifier_survives_closed_channel() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        RangeNotifier::new(PanelIndex(1), tx).notify(TimeRange::new(1.0, 2.0));
    }

    #[test]
    fn test_options_by_kind() {
        let window = Some(TimeRange::new(1000.0, 2000.0));
        let ts = RenderOptions::timeseries("disk.iops", 0, window);
        assert_eq!(ts.x_label, "Time");
        assert_eq!(ts.labels, ["Time".to_string(), "disk.iops".to_string()]);
        assert_eq!(ts.date_window, window);
        assert_eq!(ts.colors.len(), 3);

        let cdf = RenderOptions::percentiles("lat_percentiles", 7);
        assert_eq!(cdf.x_label, "Percentiles");
        assert!(cdf.date_window.is_none());
        assert!(cdf.colors.is_empty());
    }
}
