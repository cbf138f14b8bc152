//! [`Query`] collection related to a single [`User`].

use common::operations::By;

use crate::domain::{user, User};
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries a [`User`] by its [`user::Username`].
pub type ByUsername = ApiQuery<By<Option<User>, user::Username>>;
