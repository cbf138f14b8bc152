//! [`FollowingDialog`] view.

use std::{cell::RefCell, rc::Rc};

use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, Follower},
    infra::api,
    loader::{Outcome, Relationship},
    query::{self, Query},
    read, Service,
};

use super::Error;

/// Dialog listing the accounts a user follows.
///
/// The dialog is either closed or open with the [`Relationship`] list of a
/// single owner. Closing it drops the list, discarding loads still in flight.
#[derive(Debug)]
pub struct FollowingDialog<A> {
    /// [`Service`] to load [`Relationship`] lists with.
    service: Service<A>,

    /// [`Relationship`] list of the open dialog, if any.
    open: RefCell<Option<Rc<Relationship<A, Follower>>>>,
}

impl<A> FollowingDialog<A> {
    /// Creates a new closed [`FollowingDialog`].
    #[must_use]
    pub fn new(service: Service<A>) -> Self {
        Self {
            service,
            open: RefCell::new(None),
        }
    }

    /// Indicates whether this [`FollowingDialog`] is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.borrow().is_some()
    }

    /// Returns the [`Relationship`] list of the open dialog, if any.
    #[must_use]
    pub fn list(&self) -> Option<Rc<Relationship<A, Follower>>> {
        self.open.borrow().clone()
    }

    /// Closes this [`FollowingDialog`], dropping its list.
    pub fn close(&self) {
        if let Some(list) = self.open.borrow_mut().take() {
            log::debug!("closing following dialog of `{}`", list.owner());
            list.close();
        }
    }
}

impl<A> FollowingDialog<A>
where
    A: Clone,
    Service<A>: Query<
        query::followers::Page,
        Ok = read::follower::list::Page,
        Err = Traced<api::Error>,
    >,
{
    /// Opens this [`FollowingDialog`] for the provided owner, replacing the
    /// list of any previously open one, and loads its first [`Page`].
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn on_dialog_open(
        &self,
        owner: user::Username,
    ) -> Result<Outcome, Traced<Error>> {
        self.close();

        log::debug!("opening following dialog of `{owner}`");
        let list = Rc::new(Relationship::new(self.service.clone(), owner));
        *self.open.borrow_mut() = Some(Rc::clone(&list));

        list.initialize()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))
    }

    /// Loads the next [`Page`] of the open list.
    ///
    /// Does nothing if this [`FollowingDialog`] is closed.
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn load_more(&self) -> Result<Outcome, Traced<Error>> {
        let Some(list) = self.list() else {
            return Ok(Outcome::Skipped);
        };
        list.load_more()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        infra::api::fake::{self, Fake},
        loader::Outcome,
        Config, Service,
    };

    use super::FollowingDialog;

    fn dialog(api: &Fake) -> FollowingDialog<Fake> {
        FollowingDialog::new(Service::new(Config::default(), api.clone()))
    }

    #[tokio::test]
    async fn closed_dialog_loads_nothing() {
        let api = Fake::default();
        let dialog = dialog(&api);

        assert!(!dialog.is_open());
        assert_eq!(dialog.load_more().await.unwrap(), Outcome::Skipped);
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn reopening_replaces_list() {
        let api = Fake::default();
        api.script().followers.extend([
            Ok(vec![fake::follower(1, "bob")]),
            Ok(vec![fake::follower(2, "carol"), fake::follower(3, "dave")]),
        ]);
        let dialog = dialog(&api);

        _ = dialog.on_dialog_open(fake::username("alice")).await.unwrap();
        let first = dialog.list().unwrap();

        _ = dialog.on_dialog_open(fake::username("bob")).await.unwrap();
        let second = dialog.list().unwrap();

        assert!(first.is_closed());
        assert_eq!(second.owner(), &fake::username("bob"));
        assert_eq!(second.items().len(), 2);
        assert_eq!(
            api.requests()
                .into_iter()
                .map(|r| r.owner.to_string())
                .collect::<Vec<_>>(),
            ["alice", "bob"],
        );
    }

    #[tokio::test]
    async fn closing_discards_in_flight_page() {
        let api = Fake::default();
        api.script()
            .followers
            .push_back(Ok(vec![fake::follower(1, "bob")]));
        let dialog = dialog(&api);

        let (outcome, ()) = futures::join!(
            dialog.on_dialog_open(fake::username("alice")),
            async { dialog.close() },
        );

        assert_eq!(outcome.unwrap(), Outcome::Discarded);
        assert!(!dialog.is_open());
    }
}
