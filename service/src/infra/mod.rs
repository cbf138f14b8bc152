//! Infrastructure layer.

pub mod api;

pub use self::api::Api;
#[cfg(feature = "http")]
pub use self::api::{http, Http};
