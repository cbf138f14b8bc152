//! [`Favorite`] definitions.

use derive_more::{Display, From, Into};
use serde::Deserialize;

use crate::domain::Post;

/// [`Post`] liked by the signed-in user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Favorite {
    /// ID of the like.
    pub id: Id,

    /// Liked [`Post`].
    pub post: Post,
}

/// ID of a [`Favorite`].
#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, From, Hash, Into, PartialEq,
)]
pub struct Id(u64);
