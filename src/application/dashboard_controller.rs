// Dashboard controller - Orchestrates user actions over the dashboard state
use crate::application::analysis_service::{submit_upload, AnalysisService, UploadFile, UploadStatus};
use crate::application::panel_registry::{Panel, PanelRegistry};
use crate::application::range_sync::RangeSynchronizer;
use crate::application::renderer::{ChartRenderer, RenderOptions};
use crate::application::share_codec::{strip_query, SharePlan, ShareStateCodec};
use crate::domain::catalog::{FilterOutcome, FilterQuery, SeriesCatalogs};
use crate::domain::error::DashboardError;
use crate::domain::panel::{DataSourceRef, PanelIndex, PanelKind};
use crate::domain::range::TimeRange;
use crate::infrastructure::config::{DashboardConfig, ViewportSettings};
use std::sync::Arc;

/// Sole owner and mutator of the dashboard state. Every method is a
/// synchronous handler for one user action.
pub struct DashboardController<R: ChartRenderer> {
    renderer: R,
    codec: ShareStateCodec,
    registry: PanelRegistry,
    sync: RangeSynchronizer,
    catalogs: SeriesCatalogs,
    viewport: ViewportSettings,
    base_url: String,
    share_url: String,
    analysis: Option<Arc<dyn AnalysisService>>,
    upload_status: Option<UploadStatus>,
}

impl<R: ChartRenderer> DashboardController<R> {
    pub fn new(config: &DashboardConfig, catalogs: SeriesCatalogs, renderer: R, base_url: &str) -> Self {
        let codec = ShareStateCodec::new(config.resources.layout());
        let registry = PanelRegistry::new(catalogs.selectors());
        let base_url = strip_query(base_url).to_string();
        Self {
            renderer,
            codec,
            registry,
            sync: RangeSynchronizer::new(),
            catalogs,
            viewport: config.viewport.clone(),
            share_url: base_url.clone(),
            base_url,
            analysis: None,
            upload_status: None,
        }
    }

    pub fn with_analysis(mut self, service: Arc<dyn AnalysisService>) -> Self {
        self.analysis = Some(service);
        self
    }

    /// Draw `series_name` from the catalog in `index`.
    pub fn on_series_selected(
        &mut self,
        index: PanelIndex,
        kind: PanelKind,
        series_name: &str,
    ) -> Result<(), DashboardError> {
        let source = self.codec.layout().resolve(series_name);
        self.draw(index, kind, source, series_name)?;
        self.refresh_share_url();
        Ok(())
    }

    /// New empty panel with a copy of the template's selectors.
    pub fn on_add_panel(&mut self) -> PanelIndex {
        let selectors = self.registry.template().selectors.clone();
        self.registry.create_panel(PanelKind::Empty, None, selectors)
    }

    pub fn on_remove_panel(&mut self, index: PanelIndex) {
        self.registry.remove_panel(index);
        self.refresh_share_url();
    }

    /// Synchronize panels on every range change reported since the last
    /// call. Returns true when the shared range moved.
    pub fn dispatch_range_events(&mut self) -> bool {
        let changed = self.sync.dispatch_pending(&mut self.registry);
        if changed {
            self.refresh_share_url();
        }
        changed
    }

    /// Narrow the option lists of one panel. Blank text is a no-op.
    pub fn on_filter(&mut self, index: PanelIndex, text: &str) -> Result<FilterOutcome, DashboardError> {
        let panel = self.registry.panel_mut(index)?;
        let Some(query) = FilterQuery::parse(text) else {
            return Ok(FilterOutcome::default());
        };
        let outcome = panel.selectors.apply_filter(
            &query,
            &self.catalogs.timeseries,
            &self.catalogs.percentiles,
        );
        tracing::debug!("Filter {:?} on panel {}: {:?}", query.keywords(), index, outcome);
        Ok(outcome)
    }

    /// Restore panels and shared range from a share URL. The first entry
    /// goes to the template panel, each further entry to a new panel.
    pub fn on_load_from_url(&mut self, url: &str) -> Result<SharePlan, DashboardError> {
        // Settle earlier user changes so they cannot override the loaded range
        self.dispatch_range_events();

        let plan = self.codec.parse(url);
        tracing::info!(
            "Restoring {} panels from share URL (range: {})",
            plan.entries.len(),
            plan.range.map(|r| r.describe()).unwrap_or_else(|| "none".to_string())
        );

        for (position, entry) in plan.entries.iter().enumerate() {
            let index = if position == 0 {
                PanelIndex::TEMPLATE
            } else {
                self.on_add_panel()
            };
            let title = self
                .codec
                .layout()
                .series_name(&entry.data_source)
                .unwrap_or(entry.data_source.as_str())
                .to_string();
            self.draw(index, entry.kind, entry.data_source.clone(), &title)?;
        }

        if let Some(range) = plan.range {
            self.sync.apply_shared_range(&mut self.registry, range);
        }
        self.refresh_share_url();
        Ok(plan)
    }

    /// Queue local files for analysis. Needs a tokio runtime.
    pub fn on_upload(&mut self, files: Vec<UploadFile>) -> Option<&UploadStatus> {
        let Some(service) = self.analysis.clone() else {
            tracing::warn!("Upload requested but no analysis service is configured");
            return None;
        };
        self.upload_status = Some(submit_upload(service, files));
        self.upload_status.as_ref()
    }

    pub fn share_url(&self) -> &str {
        &self.share_url
    }

    pub fn shared_range(&self) -> Option<TimeRange> {
        self.sync.shared_range()
    }

    pub fn registry(&self) -> &PanelRegistry {
        &self.registry
    }

    pub fn panel(&self, index: PanelIndex) -> Result<&Panel, DashboardError> {
        self.registry.panel(index)
    }

    pub fn upload_status(&self) -> Option<&UploadStatus> {
        self.upload_status.as_ref()
    }

    fn draw(
        &mut self,
        index: PanelIndex,
        kind: PanelKind,
        source: DataSourceRef,
        title: &str,
    ) -> Result<(), DashboardError> {
        let options = match kind {
            PanelKind::Timeseries => {
                RenderOptions::timeseries(title, self.viewport.color_set, self.sync.shared_range())
            }
            PanelKind::Cdf => RenderOptions::percentiles(title, self.viewport.color_set),
            PanelKind::Empty => return Err(DashboardError::EmptyKindSelected(index)),
        };

        let panel = self.registry.panel_mut(index)?;
        // Release the previous chart before drawing into the same container
        panel.renderer = None;

        let mut handle = self.renderer.render(&index.container(), &source, &options);
        handle.resize(self.viewport.width, self.viewport.height);
        if kind.is_timeseries() {
            handle.on_range_changed(self.sync.subscribe(index));
        }

        tracing::debug!("Panel {} now draws {} as {:?}", index, source, kind);
        panel.kind = kind;
        panel.data_source = Some(source);
        panel.selection = Some(title.to_string());
        panel.renderer = Some(handle);
        Ok(())
    }

    fn refresh_share_url(&mut self) {
        let sources = self
            .registry
            .active_panels()
            .filter_map(|(_, panel)| panel.data_source.as_ref());
        self.share_url = self
            .codec
            .serialize(&self.base_url, sources, self.sync.shared_range());
        tracing::debug!("Share URL: {}", self.share_url);
    }
}
