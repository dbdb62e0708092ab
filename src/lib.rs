// Dashboard state model: panels, range synchronization, share URLs, catalogs
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
