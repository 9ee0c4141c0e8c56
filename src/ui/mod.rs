//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`output`] - Output formatting, display, and log setup
//!
//! # Design
//!
//! All user-facing output goes through this module so the quiet flag is
//! honored consistently.

pub mod output;
