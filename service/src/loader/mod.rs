//! Loaders accumulating pages of remote lists.
//!
//! A [`Loader`] owns the [`State`] of a single list shown by a view. It fetches
//! at most one [`Page`] at a time, appends fetched items in fetch order and
//! detects the end of the list by a short or empty [`Page`].
//!
//! Loaders are driven from a single thread: their methods take `&self` and
//! keep the [`State`] behind a [`RefCell`], so a second load requested while
//! another one is in flight is skipped rather than issued.

mod feed;
mod relationship;
mod state;

use std::cell::{Cell, Ref, RefCell};

use common::{
    operations::By,
    pagination::{Index, Page, Size},
};
use derive_more::{Debug, Display, Error as StdError, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::user,
    infra::api,
    query::{ApiQuery, Query},
    read, Service,
};

use self::state::Merge;

pub use self::{feed::Feed, relationship::Relationship, state::State};

/// Result of a load requested from a [`Loader`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    /// Fetched items were merged into the [`State`].
    Loaded {
        /// Number of merged items.
        count: usize,
    },

    /// Fetched [`Page`] was empty, so the list has no more items.
    Exhausted,

    /// Nothing was fetched, since the list has no more items or a fetch is in
    /// flight already.
    Skipped,

    /// Fetched items were dropped, since the [`Loader`] has been closed while
    /// fetching them.
    Discarded,
}

/// [`Loader`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// Failed to fetch a [`Page`] from the remote [`Api`].
    ///
    /// [`Api`]: crate::infra::Api
    #[display("failed to fetch a page: {_0}")]
    Fetch(api::Error),
}

/// Loader of a paginated list of `T` items owned by a single user.
#[derive(Debug)]
pub struct Loader<A, T> {
    /// [`Service`] to fetch [`Page`]s with.
    #[debug(skip)]
    service: Service<A>,

    /// [`user::Username`] owning the loaded list.
    owner: user::Username,

    /// Accumulated [`State`] of this [`Loader`].
    #[debug(skip)]
    state: RefCell<State<T>>,

    /// Indicator whether this [`Loader`] has been closed.
    closed: Cell<bool>,
}

impl<A, T> Loader<A, T> {
    /// Creates a new [`Loader`] of the list owned by the provided
    /// [`user::Username`].
    #[must_use]
    pub fn new(service: Service<A>, owner: user::Username) -> Self {
        Self {
            service,
            owner,
            state: RefCell::new(State::default()),
            closed: Cell::new(false),
        }
    }

    /// Returns the [`user::Username`] owning the loaded list.
    #[must_use]
    pub fn owner(&self) -> &user::Username {
        &self.owner
    }

    /// Returns the current [`State`] of this [`Loader`].
    ///
    /// # Panics
    ///
    /// If the returned [`Ref`] is held while this [`Loader`] completes a
    /// fetch.
    #[must_use]
    pub fn state(&self) -> Ref<'_, State<T>> {
        self.state.borrow()
    }

    /// Returns the accumulated items.
    ///
    /// # Panics
    ///
    /// If the returned [`Ref`] is held while this [`Loader`] completes a
    /// fetch.
    #[must_use]
    pub fn items(&self) -> Ref<'_, [T]> {
        Ref::map(self.state.borrow(), State::items)
    }

    /// Indicates whether a fetch is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    /// Indicates whether more items may be loaded.
    #[must_use]
    pub fn can_load_more(&self) -> bool {
        self.state.borrow().can_load_more()
    }

    /// Returns the [`Index`] of the next [`Page`] to fetch.
    #[must_use]
    pub fn page(&self) -> Index {
        self.state.borrow().page()
    }

    /// Closes this [`Loader`], so fetches completing afterwards are
    /// discarded.
    pub fn close(&self) {
        self.closed.set(true);
    }

    /// Indicates whether this [`Loader`] has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.closed.get()
    }
}

impl<A, T> Loader<A, T>
where
    Service<A>: Query<
        ApiQuery<By<Page<T>, read::Request>>,
        Ok = Page<T>,
        Err = Traced<api::Error>,
    >,
{
    /// Allows loading and fetches the first [`Page`].
    async fn initialize(&self, merge: Merge) -> Result<Outcome, Traced<Error>> {
        if self.closed.get() || !self.state.borrow_mut().initialize() {
            log::debug!("`{}` list is initialized already", self.owner);
            return Ok(Outcome::Skipped);
        }
        self.load(merge).await
    }

    /// Fetches the next [`Page`] merging it into the [`State`].
    async fn load(&self, merge: Merge) -> Result<Outcome, Traced<Error>> {
        if self.closed.get() {
            return Ok(Outcome::Skipped);
        }
        let Some(index) = self.state.borrow_mut().begin() else {
            log::debug!(
                "skipping `{}` list page: exhausted or loading already",
                self.owner,
            );
            return Ok(Outcome::Skipped);
        };

        let size = self.service.config().page_size;
        log::debug!("loading page {index} of `{}` list", self.owner);

        let fetched = self.fetch(index, size).await;
        self.settle(fetched, |state, page| state.complete(page, size, merge))
    }

    /// Fetches the most recent item inserting it at the head of the
    /// [`State`].
    async fn load_newest(&self) -> Result<Outcome, Traced<Error>> {
        if self.closed.get() {
            return Ok(Outcome::Skipped);
        }
        if !self.state.borrow_mut().begin_detached() {
            log::debug!(
                "skipping newest item of `{}` list: loading already",
                self.owner,
            );
            return Ok(Outcome::Skipped);
        }

        log::debug!("loading newest item of `{}` list", self.owner);

        let fetched = self.fetch(Index::FIRST, Size::ONE).await;
        self.settle(fetched, State::prepend)
    }

    /// Fetches a single [`Page`] from the remote [`Api`].
    ///
    /// [`Api`]: crate::infra::Api
    async fn fetch(
        &self,
        index: Index,
        size: Size,
    ) -> Result<Page<T>, Traced<api::Error>> {
        self.service
            .execute(ApiQuery::by(read::Request {
                owner: self.owner.clone(),
                index,
                size,
                sort: self.service.config().sort.clone(),
            }))
            .await
    }

    /// Applies the result of the in-flight fetch to the [`State`].
    fn settle(
        &self,
        fetched: Result<Page<T>, Traced<api::Error>>,
        apply: impl FnOnce(&mut State<T>, Page<T>) -> Outcome,
    ) -> Result<Outcome, Traced<Error>> {
        let mut state = self.state.borrow_mut();

        if self.closed.get() {
            state.fail();
            log::debug!("discarding late page of closed `{}` list", self.owner);
            return Ok(Outcome::Discarded);
        }

        match fetched.map_err(tracerr::map_from_and_wrap!(=> Error)) {
            Ok(page) => {
                let outcome = apply(&mut state, page);
                log::debug!("`{}` list page settled: {outcome:?}", self.owner);
                Ok(outcome)
            }
            Err(e) => {
                state.fail();
                log::warn!("failed to load `{}` list: {e}", self.owner);
                Err(e)
            }
        }
    }
}
