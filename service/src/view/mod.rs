//! Views hosting [`Loader`]s and translating UI events into loads.
//!
//! [`Loader`]: crate::loader::Loader

pub mod favorites;
pub mod following;
pub mod profile;

use std::{cell::Cell, time::Duration};

use common::{operations::By, pagination::Page};
use derive_more::{Display, Error as StdError, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{follow_user, unfollow_user},
    domain::user,
    infra::api,
    loader::{self, Feed, Outcome},
    query::{ApiQuery, Query},
    read, Service,
};

pub use self::{
    favorites::Favorites, following::FollowingDialog, profile::Profile,
};

/// View error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Api`] error.
    ///
    /// [`Api`]: crate::infra::Api
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// List loading error.
    #[display("Failed to load a list: {_0}")]
    Load(loader::Error),

    /// Operation requires a signed-in user.
    #[display("Login required")]
    LoginRequired,

    /// [`User`] doesn't exist.
    ///
    /// [`User`]: crate::domain::User
    #[display("`User(username: {_0})` does not exist")]
    #[from(ignore)]
    UserNotExists(#[error(not(source))] user::Username),

    /// [`User`] cannot follow itself.
    ///
    /// [`User`]: crate::domain::User
    #[display("`User(username: {_0})` cannot follow itself")]
    #[from(ignore)]
    SelfSubscription(#[error(not(source))] user::Username),
}

impl From<follow_user::ExecutionError> for Error {
    fn from(err: follow_user::ExecutionError) -> Self {
        use follow_user::ExecutionError as E;

        match err {
            E::Api(e) => Self::Api(e),
            E::AuthorizationRequired => Self::LoginRequired,
            E::SelfSubscription(u) => Self::SelfSubscription(u),
        }
    }
}

impl From<unfollow_user::ExecutionError> for Error {
    fn from(err: unfollow_user::ExecutionError) -> Self {
        use unfollow_user::ExecutionError as E;

        match err {
            E::Api(e) => Self::Api(e),
            E::AuthorizationRequired => Self::LoginRequired,
            E::SelfSubscription(u) => Self::SelfSubscription(u),
        }
    }
}

/// Loads the next [`Page`] of the provided [`Feed`] once the scroll has
/// settled for the `debounce` duration.
///
/// Nothing is scheduled if the [`Feed`] is exhausted, loading already, or a
/// load is `scheduled` already, so scrolls during the `debounce` window are
/// dropped.
async fn load_on_scroll<A, T>(
    feed: &Feed<A, T>,
    scheduled: &Cell<bool>,
    debounce: Duration,
) -> Result<Outcome, Traced<Error>>
where
    Service<A>: Query<
        ApiQuery<By<Page<T>, read::Request>>,
        Ok = Page<T>,
        Err = Traced<api::Error>,
    >,
{
    if scheduled.get()
        || !feed.can_load_more()
        || feed.is_loading()
        || feed.is_closed()
    {
        return Ok(Outcome::Skipped);
    }
    scheduled.set(true);

    log::debug!("scrolled to the bottom of `{}` list", feed.owner());
    tokio::time::sleep(debounce).await;

    let loaded = feed.load_more().await;
    scheduled.set(false);

    loaded.map_err(tracerr::map_from_and_wrap!(=> Error))
}
