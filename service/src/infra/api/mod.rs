//! Remote [`Api`]-related implementations.

#[cfg(test)]
pub(crate) mod fake;
#[cfg(feature = "http")]
pub mod http;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "http")]
pub use self::http::Http;

/// Operation performed against the remote social API.
pub use common::Handler as Api;

/// [`Api`] error.
///
/// An empty page is never an [`Error`]: it signals the end of a list.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Remote API responded with an unsuccessful status.
    #[display("remote API responded with `{_0}`")]
    Status(#[error(not(source))] ::http::StatusCode),

    #[cfg(feature = "http")]
    /// [`Http`] transport error.
    #[display("HTTP request failed: {_0}")]
    Http(http::Error),
}
