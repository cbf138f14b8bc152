//! Service contains the client-side logic of the social feed: paginated
//! loaders, hosting views and access to the remote API.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod infra;
pub mod loader;
pub mod query;
pub mod read;
pub mod view;

use std::time::Duration;

use common::pagination::{Size, SortKey};
use derive_more::Debug;
use smart_default::SmartDefault;

use self::domain::user::Session;

pub use self::{command::Command, query::Query};

#[cfg(test)]
use axum as _;
#[cfg(test)]
use futures as _;

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// [`Size`] of pages requested by loaders.
    #[default(Config::PAGE_SIZE)]
    pub page_size: Size,

    /// [`SortKey`] of pages requested by loaders.
    #[default(SortKey::date())]
    pub sort: SortKey,

    /// Delay between a scroll reaching the bottom of a list and loading its
    /// next page.
    #[default(Duration::from_secs(1))]
    pub scroll_debounce: Duration,
}

impl Config {
    /// Default [`Size`] of pages requested by loaders.
    pub const PAGE_SIZE: Size = match Size::new(9) {
        Some(size) => size,
        None => panic!("page size must be positive"),
    };
}

/// Domain service of the social feed client.
#[derive(Clone, Debug)]
pub struct Service<A> {
    /// Configuration of this [`Service`].
    config: Config,

    /// Remote [`Api`] of this [`Service`].
    ///
    /// [`Api`]: infra::Api
    api: A,

    /// [`Session`] of the signed-in user, if any.
    session: Option<Session>,
}

impl<A> Service<A> {
    /// Creates a new anonymous [`Service`] with the provided parameters.
    pub fn new(config: Config, api: A) -> Self {
        Self {
            config,
            api,
            session: None,
        }
    }

    /// Attaches the provided [`Session`] to this [`Service`].
    #[must_use]
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    /// Returns [`Config`] of this [`Service`].
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns remote [`Api`] of this [`Service`].
    ///
    /// [`Api`]: infra::Api
    #[must_use]
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Returns [`Session`] of the signed-in user, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }
}
