// Application layer - Dashboard use cases and the seams to external collaborators
pub mod analysis_service;
pub mod catalog_service;
pub mod dashboard_controller;
pub mod panel_registry;
pub mod range_sync;
pub mod renderer;
pub mod series_repository;
pub mod share_codec;

#[cfg(test)]
pub(crate) mod test_support;
