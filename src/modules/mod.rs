//! Modules layer - Infrastructure components for external integrations
//!
//! Contains adapters for the photo store shared with the upload pipeline.

pub mod photo_store;
