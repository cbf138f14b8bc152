//! [`Feed`] of a profile page.

use std::ops::Deref;

use common::{operations::By, pagination::Page};
use tracerr::Traced;

use crate::{
    domain::{user, Post},
    infra::api,
    query::{ApiQuery, Query},
    read, Service,
};

use super::{Error, Loader, Merge, Outcome};

/// [`Loader`] of the posts grid shown on a profile page.
///
/// Pages are appended in fetch order, while freshly created items are
/// inserted at the head of the list.
#[derive(Debug)]
pub struct Feed<A, T = Post>(Loader<A, T>);

impl<A, T> Feed<A, T> {
    /// Creates a new [`Feed`] of the items owned by the provided
    /// [`user::Username`].
    #[must_use]
    pub fn new(service: Service<A>, owner: user::Username) -> Self {
        Self(Loader::new(service, owner))
    }
}

impl<A, T> Deref for Feed<A, T> {
    type Target = Loader<A, T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A, T> Feed<A, T>
where
    Service<A>: Query<
        ApiQuery<By<Page<T>, read::Request>>,
        Ok = Page<T>,
        Err = Traced<api::Error>,
    >,
{
    /// Allows loading and appends the first [`Page`].
    ///
    /// Does nothing if this [`Feed`] has been initialized already.
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    pub async fn initialize(&self) -> Result<Outcome, Traced<Error>> {
        self.0.initialize(Merge::Append).await.map_err(tracerr::wrap!())
    }

    /// Appends the next [`Page`], unless the list is exhausted or a fetch is
    /// in flight already.
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    pub async fn load_more(&self) -> Result<Outcome, Traced<Error>> {
        self.0.load(Merge::Append).await.map_err(tracerr::wrap!())
    }

    /// Inserts the most recent item at the head of this [`Feed`].
    ///
    /// Skipped while a fetch is in flight.
    ///
    /// # Errors
    ///
    /// If the item cannot be fetched.
    pub async fn prepend_newest(&self) -> Result<Outcome, Traced<Error>> {
        self.0.load_newest().await.map_err(tracerr::wrap!())
    }
}
