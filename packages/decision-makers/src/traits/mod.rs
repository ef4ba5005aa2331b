//! Collaborator abstractions.
//!
//! These traits define the interfaces the host system implements to
//! provide search, page fetching and structured extraction.

pub mod extractor;
pub mod fetcher;
pub mod searcher;
