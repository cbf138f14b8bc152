//! [`Command`] for following a [`User`].

use common::operations::Insert;
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

/// [`Command`] for following a [`User`] on behalf of the signed-in one.
#[derive(Clone, Debug, From)]
pub struct FollowUser {
    /// [`user::Username`] of the [`User`] to follow.
    pub username: user::Username,
}

impl<A> Command<FollowUser> for Service<A>
where
    A: Api<Insert<Subscription>, Ok = (), Err = Traced<api::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: FollowUser) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let FollowUser { username } = cmd;

        let session = self
            .session()
            .ok_or(E::AuthorizationRequired)
            .map_err(tracerr::wrap!())?;
        if session.username == username {
            return Err(tracerr::new!(E::SelfSubscription(username)));
        }

        self.api()
            .execute(Insert(Subscription { target: username }))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
    }
}

/// Error of [`FollowUser`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Api`] error.
    #[display("`Api` operation failed: {_0}")]
    Api(api::Error),

    /// There is no signed-in [`Session`].
    #[display("Authorization required")]
    AuthorizationRequired,

    /// [`User`] cannot follow itself.
    #[display("`User(username: {_0})` cannot follow itself")]
    #[from(ignore)]
    SelfSubscription(#[error(not(source))] user::Username),
}
