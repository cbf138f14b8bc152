//! [`Query`] collection related to [`Post`]s of a user.

use common::operations::By;

#[cfg(doc)]
use crate::{domain::Post, Query};
use crate::read;

use super::ApiQuery;

/// Queries a [`read::post::list::Page`] of [`Post`]s.
pub type Page = ApiQuery<By<read::post::list::Page, read::Request>>;
