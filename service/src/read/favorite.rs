//! [`Favorite`] read model definition.
//!
//! [`Favorite`]: crate::domain::Favorite

pub mod list {
    //! [`Favorite`]s list definitions.
    //!
    //! The owner of a [`Request`] is always the signed-in user.

    use common::define_pagination;

    use crate::domain::{user, Favorite};

    define_pagination!(user::Username, Favorite);
}
