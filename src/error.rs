use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the findcfg library.
///
/// Searching never fails on its own. These errors exist for callers that
/// treat a missing configuration file as fatal.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("no config file found, expected at `{}`", expected.display())]
    NotFound { expected: PathBuf },

    #[error("no config file found and no search locations configured")]
    NoCandidates,
}
