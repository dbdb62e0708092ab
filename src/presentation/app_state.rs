// Application state for HTTP handlers
use crate::application::analysis_service::AnalysisService;
use crate::application::catalog_service::CatalogService;
use crate::application::share_codec::ShareStateCodec;
use crate::domain::catalog::SeriesCatalogs;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub catalog_service: CatalogService,
    /// Read once at startup
    pub catalogs: SeriesCatalogs,
    pub codec: ShareStateCodec,
    pub analysis: Arc<dyn AnalysisService>,
}
