//! quarterlog - Draft a quarterly changelog from a GitHub repository
//!
//! quarterlog lists every pull request merged during the previous calendar
//! quarter, plus every commit from the same period that no pull request
//! accounts for, and writes them as a date-ordered markdown list.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to changelog)
//! - [`changelog`] - The two collection passes, aggregation and output
//! - [`core`] - Domain types, the reporting window and configuration
//! - [`forge`] - Paginated access to the hosting API (GitHub v1)
//! - [`secrets`] - Bearer token loading
//! - [`ui`] - Output and logging utilities
//!
//! # Guarantees
//!
//! 1. A pull request appears at most once, keyed by its merge commit
//! 2. A commit already covered by a pull request in the window is never listed
//! 3. The output file is written only after both passes succeed

pub mod changelog;
pub mod cli;
pub mod core;
pub mod forge;
pub mod secrets;
pub mod ui;
