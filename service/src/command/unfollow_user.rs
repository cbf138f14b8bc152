//! [`Command`] for unfollowing a [`User`].

use common::operations::Delete;
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{user::Session, User};
use crate::{
    domain::{follower::Subscription, user},
    infra::{api, Api},
    Service,
};

use super::Command;

/// [`Command`] for unfollowing a [`User`] on behalf of the signed-in one.
#[derive(Clone, Debug, From)]
pub struct UnfollowUser {
    /// [`user::Username`] of the [`User`] to unfollow.
    pub username: user::Username,
}

impl<A> Command<UnfollowUser> for Service<A>
where
    A: Api<Delete<Subscription>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: UnfollowUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let UnfollowUser { username } = cmd;

        let session = self
            .session()
            .ok_or(E::AuthorizationRequired)
            .map_err(tracerr::wrap!())?;
        if session.username == username {
            return Err(tracerr::new!(E::SelfSubscription(username)));
        }

        self.api()
            .execute(Delete(Subscription { target: username }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`UnfollowUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// There is no signed-in [`Session`].
    #[display("Authorization required")]
    AuthorizationRequired,

    /// [`User`] cannot unfollow itself.
    #[display("`User(username: {_0})` cannot unfollow itself")]
    #[from(ignore)]
    SelfSubscription(#[error(not(source))] user::Username),
}

#[cfg(test)]
mod spec {
    use crate::{
        command::Command as _,
        infra::api::fake::{self, Fake},
        Config, Service,
    };

    use super::{ExecutionError, UnfollowUser};

    #[tokio::test]
    async fn unfollows_on_behalf_of_session() {
        let api = Fake::default();
        let service = Service::new(Config::default(), api.clone())
            .with_session(fake::session("alice"));

        service
            .execute(UnfollowUser::from(fake::username("bob")))
            .await
            .unwrap();

        assert_eq!(
            api.script().subscriptions,
            [(false, fake::username("bob"))],
        );
    }

    #[tokio::test]
    async fn requires_session() {
        let api = Fake::default();
        let service = Service::new(Config::default(), api.clone());

        let err = service
            .execute(UnfollowUser::from(fake::username("bob")))
            .await
            .unwrap_err();

        assert!(matches!(
            err.as_ref(),
            ExecutionError::AuthorizationRequired,
        ));
        assert!(api.script().subscriptions.is_empty());
    }
}
