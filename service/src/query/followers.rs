//! [`Query`] collection related to accounts a user follows.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::Query;

use super::ApiQuery;

/// Queries a [`read::follower::list::Page`] of followed accounts.
pub type Page = ApiQuery<By<read::follower::list::Page, read::Request>>;
