//! [`Relationship`] list of a following dialog.

use std::ops::Deref;

use common::{operations::By, pagination::Page};
use tracerr::Traced;

use crate::{
    domain::{user, Follower},
    infra::api,
    query::{ApiQuery, Query},
    read, Service,
};

use super::{Error, Loader, Merge, Outcome};

/// [`Loader`] of the accounts a user follows, shown in a dialog.
///
/// The first [`Page`] replaces whatever the list holds, while the following
/// ones are appended.
#[derive(Debug)]
pub struct Relationship<A, T = Follower>(Loader<A, T>);

impl<A, T> Relationship<A, T> {
    /// Creates a new [`Relationship`] list of the provided
    /// [`user::Username`].
    #[must_use]
    pub fn new(service: Service<A>, owner: user::Username) -> Self {
        Self(Loader::new(service, owner))
    }
}

impl<A, T> Deref for Relationship<A, T> {
    type Target = Loader<A, T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<A, T> Relationship<A, T>
where
    Service<A>: Query<
        ApiQuery<By<Page<T>, read::Request>>,
        Ok = Page<T>,
        Err = Traced<api::Error>,
    >,
{
    /// Allows loading and replaces the list with the first [`Page`].
    ///
    /// Does nothing if this [`Relationship`] has been initialized already.
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    pub async fn initialize(&self) -> Result<Outcome, Traced<Error>> {
        self.0.initialize(Merge::Replace).await.map_err(tracerr::wrap!())
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
}
