//! In-memory [`Fake`] of the remote [`Api`] replaying scripted responses.

use std::{
    cell::{RefCell, RefMut},
    collections::VecDeque,
    rc::Rc,
};

use common::{
    operations::{By, Delete, Insert, Select},
    pagination::Page,
    DateTimeOf,
};
use http::StatusCode;
use tracerr::Traced;

use crate::{
    domain::{favorite, follower, post, user, Favorite, Follower, Post, User},
    infra::api::{self, Api},
    read,
};

/// Scripted response to a single page fetch.
pub(crate) type Scripted<T> = Result<Vec<T>, StatusCode>;

/// [`Api`] replaying [`Script`]ed responses in order.
///
/// Every fetch yields once before completing, so concurrently polled fetches
/// overlap. Unscripted fetches return an empty page.
#[derive(Clone, Debug, Default)]
pub(crate) struct Fake(Rc<RefCell<Script>>);

/// Responses and recorded calls of a [`Fake`].
#[derive(Debug, Default)]
pub(crate) struct Script {
    /// Responses to [`Post`] page fetches.
    pub(crate) posts: VecDeque<Scripted<Post>>,

    /// Responses to [`Follower`] page fetches.
    pub(crate) followers: VecDeque<Scripted<Follower>>,

    /// Responses to [`Favorite`] page fetches.
    pub(crate) favorites: VecDeque<Scripted<Favorite>>,

    /// Known [`User`]s.
    pub(crate) users: Vec<User>,

    /// Status to fail subscription changes with, if any.
    pub(crate) subscription_failure: Option<StatusCode>,

    /// Recorded page requests.
    pub(crate) requests: Vec<read::Request>,

    /// Recorded subscription changes: `true` for follow, `false` for
    /// unfollow.
    pub(crate) subscriptions: Vec<(bool, user::Username)>,
}

impl Fake {
    /// Returns the mutable [`Script`] of this [`Fake`].
    pub(crate) fn script(&self) -> RefMut<'_, Script> {
        self.0.borrow_mut()
    }

    /// Returns the page requests recorded so far.
    pub(crate) fn requests(&self) -> Vec<read::Request> {
        self.0.borrow().requests.clone()
    }

    /// Records the `request` and replays the response `pick`ed for it.
    async fn page<T>(
        &self,
        request: read::Request,
        pick: impl FnOnce(&mut Script) -> Option<Scripted<T>>,
    ) -> Result<Page<T>, Traced<api::Error>> {
        let scripted = {
            let mut script = self.0.borrow_mut();
            script.requests.push(request);
            pick(&mut script)
        };

        tokio::task::yield_now().await;

        match scripted.unwrap_or_else(|| Ok(Vec::new())) {
            Ok(items) => Ok(Page::new(items)),
            Err(status) => Err(tracerr::new!(api::Error::Status(status))),
        }
    }

    /// Records the subscription change and replays its scripted result.
    async fn subscribe(
        &self,
        follow: bool,
        target: user::Username,
    ) -> Result<(), Traced<api::Error>> {
        let failure = {
            let mut script = self.0.borrow_mut();
            script.subscriptions.push((follow, target));
            script.subscription_failure
        };

        tokio::task::yield_now().await;

        match failure {
            Some(status) => Err(tracerr::new!(api::Error::Status(status))),
            None => Ok(()),
        }
    }
}

impl Api<Select<By<read::post::list::Page, read::Request>>> for Fake {
    type Ok = read::post::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::post::list::Page, read::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.page(by.into_inner(), |s| s.posts.pop_front()).await
    }
}

impl Api<Select<By<read::follower::list::Page, read::Request>>> for Fake {
    type Ok = read::follower::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::follower::list::Page, read::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.page(by.into_inner(), |s| s.followers.pop_front()).await
    }
}

impl Api<Select<By<read::favorite::list::Page, read::Request>>> for Fake {
    type Ok = read::favorite::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::favorite::list::Page, read::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.page(by.into_inner(), |s| s.favorites.pop_front()).await
    }
}

impl Api<Select<By<Option<User>, user::Username>>> for Fake {
    type Ok = Option<User>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Username>>,
    ) -> Result<Self::Ok, Self::Err> {
        let username = by.into_inner();
        tokio::task::yield_now().await;
        Ok(self
            .0
            .borrow()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}

impl Api<Insert<follower::Subscription>> for Fake {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(sub): Insert<follower::Subscription>,
    ) -> Result<Self::Ok, Self::Err> {
        self.subscribe(true, sub.target).await
    }
}

impl Api<Delete<follower::Subscription>> for Fake {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Delete(sub): Delete<follower::Subscription>,
    ) -> Result<Self::Ok, Self::Err> {
        self.subscribe(false, sub.target).await
    }
}

/// Returns a [`user::Username`] out of the provided valid one.
pub(crate) fn username(name: &str) -> user::Username {
    user::Username::new(name).expect("valid `Username`")
}

/// Returns a [`Post`] with the provided ID.
pub(crate) fn post(id: u64) -> Post {
    Post {
        id: post::Id::from(id),
        author: None,
        description: format!("post #{id}"),
        photo: format!("http://localhost:8081/api/post/view/{id}.jpg"),
        date: DateTimeOf::UNIX_EPOCH,
        likes: 0,
        liked: false,
    }
}

/// Returns [`Post`]s with IDs in the provided range.
pub(crate) fn posts(ids: impl IntoIterator<Item = u64>) -> Vec<Post> {
    ids.into_iter().map(post).collect()
}

/// Returns a [`Follower`] of the provided account.
pub(crate) fn follower(id: u64, name: &str) -> Follower {
    Follower {
        id: follower::Id::from(id),
        username: username(name),
    }
}

/// Returns a [`Favorite`] of the [`Post`] with the provided ID.
pub(crate) fn favorite(id: u64) -> Favorite {
    Favorite {
        id: favorite::Id::from(id),
        post: post(id),
    }
}

/// Returns a [`User`] profile with the provided name.
pub(crate) fn user(name: &str) -> User {
    User {
        username: username(name),
        followers: 0,
        following: 0,
        posts: 0,
        followed: false,
    }
}

/// Returns a [`user::Session`] of the provided signed-in user.
pub(crate) fn session(name: &str) -> user::Session {
    user::Session {
        username: username(name),
        expires_at: DateTimeOf::UNIX_EPOCH,
    }
}
