//! Typed errors for linguistic data packages.
//!
//! Everything else in the crate propagates through [`anyhow::Error`]; a
//! [`ResourceError`] rides inside it and can be recovered with
//! `err.downcast_ref::<ResourceError>()`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResourceError {
    /// No search root contains the package, as a directory or as a zip.
    #[error("Resource '{resource}' not found. Searched: {searched:?}")]
    NotFound {
        resource: String,
        searched: Vec<PathBuf>,
    },

    /// The package exists but one of its files cannot be interpreted.
    #[error("Malformed resource '{resource}': {reason}")]
    Malformed { resource: String, reason: String },
}
