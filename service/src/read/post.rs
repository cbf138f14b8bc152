//! [`Post`] read model definition.
//!
//! [`Post`]: crate::domain::Post

pub mod list {
    //! [`Post`]s list definitions.

    use common::define_pagination;

    use crate::domain::{user, Post};

    define_pagination!(user::Username, Post);
}
