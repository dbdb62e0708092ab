// Domain layer - Pure dashboard types
pub mod catalog;
pub mod error;
pub mod panel;
pub mod range;
pub mod resource;
