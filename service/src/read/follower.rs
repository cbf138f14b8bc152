//! [`Follower`] read model definition.
//!
//! [`Follower`]: crate::domain::Follower

pub mod list {
    //! List of accounts a user follows.

    use common::define_pagination;

    use crate::domain::{user, Follower};

    define_pagination!(user::Username, Follower);
}
