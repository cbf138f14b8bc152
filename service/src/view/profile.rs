//! [`Profile`] view.

use std::cell::{Cell, Ref, RefCell};

use tracerr::Traced;
use tracing as log;

use crate::{
    command::{follow_user, unfollow_user, Command, FollowUser, UnfollowUser},
    domain::{user, Post, User},
    infra::api,
    loader::{Feed, Outcome},
    query::{self, Query},
    read, Service,
};

use super::{load_on_scroll, Error, FollowingDialog};

/// Profile page of a [`User`] showing the grid of its [`Post`]s.
#[derive(Debug)]
pub struct Profile<A> {
    /// [`Service`] this [`Profile`] acts through.
    service: Service<A>,

    /// Browsed [`User`].
    user: RefCell<User>,

    /// [`Feed`] of the browsed [`User`]'s [`Post`]s.
    feed: Feed<A, Post>,

    /// [`FollowingDialog`] of the browsed [`User`].
    following: FollowingDialog<A>,

    /// Indicator whether a created [`Post`] awaits being inserted into the
    /// [`Feed`] once its in-flight load completes.
    pending_newest: Cell<bool>,

    /// Indicator whether a scroll-triggered load awaits its debounce.
    scroll_scheduled: Cell<bool>,
}

impl<A> Profile<A> {
    /// Returns the browsed [`User`].
    ///
    /// # Panics
    ///
    /// If the returned [`Ref`] is held while following or unfollowing the
    /// browsed [`User`].
    #[must_use]
    pub fn user(&self) -> Ref<'_, User> {
        self.user.borrow()
    }

    /// Returns the [`Feed`] of the browsed [`User`]'s [`Post`]s.
    ///
    /// Loads issued on the returned [`Feed`] directly don't insert postponed
    /// [`Post`]s: use [`Profile::load_more()`] instead.
    #[must_use]
    pub fn feed(&self) -> &Feed<A, Post> {
        &self.feed
    }

    /// Returns the [`FollowingDialog`] of the browsed [`User`].
    #[must_use]
    pub fn following(&self) -> &FollowingDialog<A> {
        &self.following
    }

    /// Indicates whether the browsed [`User`] is the signed-in one.
    #[must_use]
    pub fn is_own(&self) -> bool {
        self.service
            .session()
            .is_some_and(|s| s.username == *self.feed.owner())
    }

    /// Closes the following dialog, dropping its list.
    pub fn close_following(&self) {
        self.following.close();
    }

    /// Tears this [`Profile`] down, so loads completing afterwards are
    /// discarded.
    pub fn close(&self) {
        self.feed.close();
        self.following.close();
    }
}

impl<A> Profile<A>
where
    A: Clone,
    Service<A>: Query<
            query::user::ByUsername,
            Ok = Option<User>,
            Err = Traced<api::Error>,
        > + Query<
            query::posts::Page,
            Ok = read::post::list::Page,
            Err = Traced<api::Error>,
        >,
{
    /// Opens the [`Profile`] of the [`User`] with the provided
    /// [`user::Username`] and loads the first [`Page`] of its [`Post`]s.
    ///
    /// # Errors
    ///
    /// - If the [`User`] doesn't exist.
    /// - If the [`User`] or its [`Post`]s cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn open(
        service: Service<A>,
        username: user::Username,
    ) -> Result<Self, Traced<Error>> {
        let user = service
            .execute(query::user::ByUsername::by(username.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?
            .ok_or_else(|| tracerr::new!(Error::UserNotExists(username)))?;

        log::debug!("opening profile of `{}`", user.username);

        let profile = Self {
            feed: Feed::new(service.clone(), user.username.clone()),
            following: FollowingDialog::new(service.clone()),
            user: RefCell::new(user),
            pending_newest: Cell::new(false),
            scroll_scheduled: Cell::new(false),
            service,
        };
        _ = profile
            .feed
            .initialize()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        Ok(profile)
    }

    /// Loads the next [`Page`] of [`Post`]s once the scroll has settled.
    ///
    /// Scrolls arriving while a load is scheduled or in flight are dropped.
    /// A [`Post`] created during the load is inserted afterwards, whether the
    /// load succeeds or not.
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn on_scroll_near_bottom(&self) -> Result<Outcome, Traced<Error>> {
        let loaded = load_on_scroll(
            &self.feed,
            &self.scroll_scheduled,
            self.service.config().scroll_debounce,
        )
        .await;
        self.insert_postponed().await;

        loaded.map_err(tracerr::wrap!())
    }

    /// Loads the next [`Page`] of [`Post`]s right away.
    ///
    /// A [`Post`] created during the load is inserted afterwards, whether the
    /// load succeeds or not.
    ///
    /// # Errors
    ///
    /// If the [`Page`] cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn load_more(&self) -> Result<Outcome, Traced<Error>> {
        let loaded = self.feed.load_more().await;
        self.insert_postponed().await;

        loaded.map_err(tracerr::map_from_and_wrap!(=> Error))
    }

    /// Inserts the [`Post`] postponed by [`Profile::on_item_created()`], if
    /// any.
    async fn insert_postponed(&self) {
        if self.feed.is_loading() || !self.pending_newest.replace(false) {
            return;
        }
        if let Err(e) = self.feed.prepend_newest().await {
            log::warn!(
                "failed to insert the newest post of `{}`: {e}",
                self.feed.owner(),
            );
        }
    }

    /// Inserts the freshly created [`Post`] at the head of the [`Feed`].
    ///
    /// If a load is in flight, the insertion is postponed until that load
    /// completes.
    ///
    /// # Errors
    ///
    /// If the [`Post`] cannot be fetched.
    pub async fn on_item_created(&self) -> Result<Outcome, Traced<Error>> {
        let outcome = self
            .feed
            .prepend_newest()
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        if outcome == Outcome::Skipped && self.feed.is_loading() {
            log::debug!(
                "postponing newest post of `{}` until the load completes",
                self.feed.owner(),
            );
            self.pending_newest.set(true);
        }
        Ok(outcome)
    }
}

impl<A> Profile<A>
where
    Service<A>: Command<
            FollowUser,
            Ok = (),
            Err = Traced<follow_user::ExecutionError>,
        > + Command<
            UnfollowUser,
            Ok = (),
            Err = Traced<unfollow_user::ExecutionError>,
        >,
{
    /// Follows the browsed [`User`] on behalf of the signed-in one.
    ///
    /// # Errors
    ///
    /// - [`Error::LoginRequired`] if nobody is signed in.
    /// - If the remote API rejects the subscription.
    pub async fn follow(&self) -> Result<(), Traced<Error>> {
        let username = self.user.borrow().username.clone();
        self.service
            .execute(FollowUser { username })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        let mut user = self.user.borrow_mut();
        if !user.followed {
            user.followed = true;
            user.followers = user.followers.saturating_add(1);
        }
        Ok(())
    }

    /// Unfollows the browsed [`User`] on behalf of the signed-in one.
    ///
    /// # Errors
    ///
    /// - [`Error::LoginRequired`] if nobody is signed in.
    /// - If the remote API rejects the unsubscription.
    pub async fn unfollow(&self) -> Result<(), Traced<Error>> {
        let username = self.user.borrow().username.clone();
        self.service
            .execute(UnfollowUser { username })
            .await
            .map_err(tracerr::map_from_and_wrap!(=> Error))?;

        let mut user = self.user.borrow_mut();
        if user.followed {
            user.followed = false;
            user.followers = user.followers.saturating_sub(1);
        }
        Ok(())
    }
}

impl<A> Profile<A>
where
    A: Clone,
    Service<A>: Query<
        query::followers::Page,
        Ok = read::follower::list::Page,
        Err = Traced<api::Error>,
    >,
{
    /// Opens the dialog listing the accounts the browsed [`User`] follows.
    ///
    /// # Errors
    ///
    /// If the first [`Page`] of the list cannot be fetched.
    ///
    /// [`Page`]: common::pagination::Page
    pub async fn open_following(&self) -> Result<Outcome, Traced<Error>> {
        let owner = self.feed.owner().clone();
        self.following
            .on_dialog_open(owner)
            .await
            .map_err(tracerr::wrap!())
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::pagination::Index;
    use http::StatusCode;

    use crate::{
        infra::api::fake::{self, Fake},
        loader::Outcome,
        view, Config, Service,
    };

    use super::Profile;

    fn service(api: &Fake) -> Service<Fake> {
        api.script().users.extend([fake::user("alice"), fake::user("bob")]);
        Service::new(
            Config {
                scroll_debounce: Duration::ZERO,
                ..Config::default()
            },
            api.clone(),
        )
    }

    #[tokio::test]
    async fn opens_with_first_page() {
        let api = Fake::default();
        api.script().posts.push_back(Ok(fake::posts(1..=9)));

        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        assert_eq!(profile.user().username, fake::username("alice"));
        assert_eq!(profile.feed().items().len(), 9);
        assert!(profile.feed().can_load_more());
        assert!(!profile.is_own());
    }

    #[tokio::test]
    async fn missing_user() {
        let api = Fake::default();

        let err = Profile::open(service(&api), fake::username("nobody"))
            .await
            .unwrap_err();

        assert!(matches!(err.as_ref(), view::Error::UserNotExists(_)));
        assert!(api.requests().is_empty());
    }

    #[tokio::test]
    async fn own_profile() {
        let api = Fake::default();
        let service = service(&api).with_session(fake::session("alice"));

        let profile =
            Profile::open(service, fake::username("alice")).await.unwrap();

        assert!(profile.is_own());
    }

    #[tokio::test]
    async fn scrolling_loads_next_page() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(1..=9)),
            Ok(fake::posts(10..=13)),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        assert_eq!(
            profile.on_scroll_near_bottom().await.unwrap(),
            Outcome::Loaded { count: 4 },
        );
        assert_eq!(profile.feed().items().len(), 13);
        assert_eq!(profile.feed().page(), Index::from(2));

        assert_eq!(
            profile.on_scroll_near_bottom().await.unwrap(),
            Outcome::Skipped,
        );
        assert_eq!(api.requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn scroll_is_debounced() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(1..=9)),
            Ok(fake::posts(10..=11)),
        ]);
        let service = Service::new(Config::default(), api.clone());
        api.script().users.push(fake::user("alice"));
        let profile =
            Profile::open(service, fake::username("alice")).await.unwrap();

        let started = tokio::time::Instant::now();
        _ = profile.on_scroll_near_bottom().await.unwrap();

        assert!(started.elapsed() >= Duration::from_secs(1));
        assert_eq!(profile.feed().items().len(), 11);
    }

    #[tokio::test]
    async fn scroll_failure_keeps_feed_loadable() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(1..=9)),
            Err(StatusCode::BAD_GATEWAY),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        let err = profile.on_scroll_near_bottom().await.unwrap_err();

        assert!(matches!(err.as_ref(), view::Error::Load(_)));
        assert!(profile.feed().can_load_more());
        assert!(!profile.feed().is_loading());
    }

    #[tokio::test]
    async fn created_post_is_prepended() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(1..=3)),
            Ok(fake::posts([4])),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        assert_eq!(
            profile.on_item_created().await.unwrap(),
            Outcome::Loaded { count: 1 },
        );
        assert_eq!(u64::from(profile.feed().items()[0].id), 4);
        assert_eq!(profile.feed().items().len(), 4);
    }

    #[tokio::test]
    async fn created_post_waits_for_in_flight_load() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(2..=10)),
            Ok(fake::posts(11..=12)),
            Ok(fake::posts([1])),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        let (scrolled, created) =
            futures::join!(profile.on_scroll_near_bottom(), async {
                while !profile.feed().is_loading() {
                    tokio::task::yield_now().await;
                }
                profile.on_item_created().await
            });

        assert_eq!(scrolled.unwrap(), Outcome::Loaded { count: 2 });
        assert_eq!(created.unwrap(), Outcome::Skipped);
        assert_eq!(profile.feed().items().len(), 12);
        assert_eq!(u64::from(profile.feed().items()[0].id), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn scrolls_within_debounce_load_once() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(1..=9)),
            Ok(fake::posts(10..=18)),
            Ok(fake::posts(19..=27)),
        ]);
        let service = Service::new(Config::default(), api.clone());
        api.script().users.push(fake::user("alice"));
        let profile =
            Profile::open(service, fake::username("alice")).await.unwrap();

        let (first, second) =
            futures::join!(profile.on_scroll_near_bottom(), async {
                tokio::time::sleep(Duration::from_millis(500)).await;
                profile.on_scroll_near_bottom().await
            });

        assert_eq!(first.unwrap(), Outcome::Loaded { count: 9 });
        assert_eq!(second.unwrap(), Outcome::Skipped);
        assert_eq!(api.requests().len(), 2);
        assert_eq!(profile.feed().items().len(), 18);
    }

    #[tokio::test]
    async fn scroll_after_failure_loads_again() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(1..=9)),
            Err(StatusCode::BAD_GATEWAY),
            Ok(fake::posts(10..=11)),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        _ = profile.on_scroll_near_bottom().await.unwrap_err();

        assert_eq!(
            profile.on_scroll_near_bottom().await.unwrap(),
            Outcome::Loaded { count: 2 },
        );
        assert_eq!(profile.feed().items().len(), 11);
    }

    #[tokio::test]
    async fn created_post_survives_failed_load() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(2..=10)),
            Err(StatusCode::BAD_GATEWAY),
            Ok(fake::posts([1])),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        let (scrolled, created) =
            futures::join!(profile.on_scroll_near_bottom(), async {
                while !profile.feed().is_loading() {
                    tokio::task::yield_now().await;
                }
                profile.on_item_created().await
            });

        assert!(matches!(
            scrolled.unwrap_err().as_ref(),
            view::Error::Load(_),
        ));
        assert_eq!(created.unwrap(), Outcome::Skipped);
        assert_eq!(profile.feed().items().len(), 10);
        assert_eq!(u64::from(profile.feed().items()[0].id), 1);
    }

    #[tokio::test]
    async fn load_more_inserts_postponed_post() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(2..=10)),
            Ok(fake::posts(11..=12)),
            Ok(fake::posts([1])),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        let (loaded, created) = futures::join!(profile.load_more(), async {
            while !profile.feed().is_loading() {
                tokio::task::yield_now().await;
            }
            profile.on_item_created().await
        });

        assert_eq!(loaded.unwrap(), Outcome::Loaded { count: 2 });
        assert_eq!(created.unwrap(), Outcome::Skipped);
        assert_eq!(profile.feed().items().len(), 12);
        assert_eq!(u64::from(profile.feed().items()[0].id), 1);
    }

    #[tokio::test]
    async fn follow_requires_login() {
        let api = Fake::default();
        api.script().posts.push_back(Ok(fake::posts(1..=2)));
        let profile = Profile::open(service(&api), fake::username("bob"))
            .await
            .unwrap();

        let err = profile.follow().await.unwrap_err();

        assert!(matches!(err.as_ref(), view::Error::LoginRequired));
        assert!(!profile.user().followed);
        assert!(api.script().subscriptions.is_empty());
    }

    #[tokio::test]
    async fn follow_and_unfollow() {
        let api = Fake::default();
        let service = service(&api).with_session(fake::session("alice"));
        let profile =
            Profile::open(service, fake::username("bob")).await.unwrap();

        profile.follow().await.unwrap();
        assert!(profile.user().followed);
        assert_eq!(profile.user().followers, 1);

        profile.unfollow().await.unwrap();
        assert!(!profile.user().followed);
        assert_eq!(profile.user().followers, 0);

        assert_eq!(
            api.script().subscriptions,
            [
                (true, fake::username("bob")),
                (false, fake::username("bob")),
            ],
        );
    }

    #[tokio::test]
    async fn following_dialog() {
        let api = Fake::default();
        api.script()
            .followers
            .push_back(Ok(vec![fake::follower(1, "bob")]));
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        assert_eq!(
            profile.open_following().await.unwrap(),
            Outcome::Loaded { count: 1 },
        );
        assert!(profile.following().is_open());

        profile.close_following();
        assert!(!profile.following().is_open());
    }

    #[tokio::test]
    async fn closed_profile_discards_late_page() {
        let api = Fake::default();
        api.script().posts.extend([
            Ok(fake::posts(1..=9)),
            Ok(fake::posts(10..=18)),
        ]);
        let profile = Profile::open(service(&api), fake::username("alice"))
            .await
            .unwrap();

        let (outcome, ()) =
            futures::join!(profile.on_scroll_near_bottom(), async {
                while !profile.feed().is_loading() {
                    tokio::task::yield_now().await;
                }
                profile.close();
            });

        assert_eq!(outcome.unwrap(), Outcome::Discarded);
        assert_eq!(profile.feed().items().len(), 9);
    }
}
