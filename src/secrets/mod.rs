//! secrets
//!
//! Credential loading.
//!
//! # Security
//!
//! - Tokens are **never** logged or included in error messages
//! - A missing credential is not an error; requests proceed unauthenticated
//!
//! # Example
//!
//! ```ignore
//! use quarterlog::secrets::TokenFile;
//!
//! let token = TokenFile::new("access_token.txt").read()?;
//! if token.is_none() {
//!     // Anonymous requests, lower rate limit
//! }
//! ```

mod token_file;

pub use token_file::{TokenFile, TokenFileError};
