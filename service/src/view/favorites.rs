//! [`Favorites`] view.

use std::cell::Cell;

use tracerr::Traced;

use crate::{
    domain::Favorite,
    infra::api,
    loader::{Feed, Outcome},
    query::{self, Query},
    read, Service,
};

use super::{load_on_scroll, Error};

/// Page listing the [`Favorite`]s of the signed-in user.
#[derive(Debug)]
pub struct Favorites<A> {
    /// [`Service`] this [`Favorites`] acts through.
    service: Service<A>,

    /// [`Feed`] of the signed-in user's [`Favorite`]s.
    feed: Feed<A, Favorite>,

    /// Indicator whether a scroll-triggered load awaits its debounce.
    scroll_scheduled: Cell<bool>,
}

impl<A> Favorites<A> {
    /// Returns the [`Feed`] of the signed-in user's [`Favorite`]s.
    #[must_use]
    pub fn feed(&self) -> &Feed<A, Favorite> {
        &self.feed
    }

    /// Tears this [`Favorites`] down, so loads completing afterwards are
    /// discarded.
    pub fn close(&self) {
        self.feed.close();
    }
}

impl<A> Favorites<A>
where
    A: Clone,
    Service<A>: Query<
        query::favorites::Page,
        Ok = read::favorite::list::Page,
        Err = Traced<api::Error>,
    >,
{
    /// Opens the [`Favorites`] of the signed-in user and loads their first
    /// [`Page`].
    ///
    /// # Errors
    ///
    /// - [`Error::LoginRequired`] if nobody is signed in.
    /// - If the [`Page`] cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn open(service: Service<A>) -> Result<Self, Traced<Error>> {
        let owner = service
            .session()
            .map(|s| s.username.clone())
            .ok_or_else(|| tracerr::new!(Error::LoginRequired))?;

        let favorites = Self {
            feed: Feed::new(service.clone(), owner),
            scroll_scheduled: Cell::new(false),
            service,
        };
        _ = favorites
            .feed
            .initialize()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        Ok(favorites)
    }

    /// Loads the next [`Page`] of [`Favorite`]s once the scroll has settled.
    ///
    /// Scrolls arriving while a load is scheduled or in flight are dropped.
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn on_scroll_near_bottom(&self) -> Result<Outcome, Traced<Error>> {
        load_on_scroll(
            &self.feed,
            &self.scroll_scheduled,
            self.service.config().scroll_debounce,
        )
        .await
        .map_err(tracerr::wrap!())
    }
}
