//! HTTP handlers, grouped by resource.

pub mod jobs;
pub mod scripts;
pub mod workers;
