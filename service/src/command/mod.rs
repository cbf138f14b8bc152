//! [`Command`] definition.

pub mod authorize_user_session;
pub mod follow_user;
pub mod unfollow_user;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    authorize_user_session::AuthorizeUserSession, follow_user::FollowUser,
    unfollow_user::UnfollowUser,
};
