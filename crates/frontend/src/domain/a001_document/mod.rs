//! Documents: what exists (registry), what is in scope (active sources),
//! and how new ones arrive (upload).

pub mod active_sources;
pub mod registry;
pub mod ui;
pub mod upload;
