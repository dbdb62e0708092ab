// Infrastructure layer - External dependencies and adapters
pub mod analysis_client;
pub mod config;
pub mod directory_repository;
