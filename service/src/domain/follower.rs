//! [`Follower`] definitions.

use derive_more::{Display, From, Into};
use serde::Deserialize;

use crate::domain::user;

/// Account followed by a user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Follower {
    /// ID of the following relationship.
    pub id: Id,

    /// [`user::Username`] of the followed account.
    pub username: user::Username,
}

/// ID of a [`Follower`] relationship.
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq,
)]
pub struct Id(u64);

/// Intent of the signed-in user to follow another user.
#[derive(Clone, Debug, Eq, From, PartialEq)]
pub struct Subscription {
    /// [`user::Username`] of the account to follow.
    pub target: user::Username,
}
