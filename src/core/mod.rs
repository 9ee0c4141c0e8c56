//! core
//!
//! Core domain types and configuration for quarterlog.
//!
//! # Modules
//!
//! - [`types`] - Strong types: RepoSlug
//! - [`window`] - Calendar quarters and the half-open reporting window
//! - [`config`] - Configuration schema and loading

pub mod config;
pub mod types;
pub mod window;
