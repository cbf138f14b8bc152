//! Read entities definitions.

pub mod favorite;
pub mod follower;
pub mod post;

use common::pagination;

use crate::domain::user;

/// [`pagination::Request`] of a list owned by a [`user::Username`].
pub type Request = pagination::Request<user::Username>;
