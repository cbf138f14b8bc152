//! [`Query`] collection related to [`Favorite`]s of the signed-in user.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Favorite, Query};
use crate::read;

use super::ApiQuery;

/// Queries a [`read::favorite::list::Page`] of [`Favorite`]s.
pub type Page = ApiQuery<By<read::favorite::list::Page, read::Request>>;
