//! Domain types for the discovery pipeline.

pub mod config;
pub mod context;
pub mod evidence;
pub mod field;
pub mod result;
