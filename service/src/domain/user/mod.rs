//! [`User`] definitions.

pub mod session;

use std::{str::FromStr, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use self::session::Session;

/// Profile of a platform user.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// [`Username`] of this [`User`].
    pub username: Username,

    /// Number of accounts following this [`User`].
    #[serde(default, rename = "countFollowers")]
    pub followers: u64,

    /// Number of accounts this [`User`] follows.
    #[serde(default, rename = "countFollowing")]
    pub following: u64,

    /// Number of posts published by this [`User`].
    #[serde(default, rename = "countPosts")]
    pub posts: u64,

    /// Indicator whether the current [`Session`] follows this [`User`].
    #[serde(default)]
    pub followed: bool,
}

/// Unique public name of a [`User`].
///
/// Identifies the owner of listed posts and followed accounts.
#[derive(
    AsRef, Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str, String)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Creates a new [`Username`] if the given `username` is valid.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Option<Self> {
        let username = username.into();
        Self::check(&username).then_some(Self(username))
    }

    /// Checks whether the given `username` is a valid [`Username`].
    fn check(username: impl AsRef<str>) -> bool {
        /// Regular expression checking [`Username`] invariants:
        /// - Must not be empty;
        /// - Must contain only letters, digits, `_`, `.` or `-`;
        /// - Must be at most 64 characters long.
        ///
        /// Names made of dots only are rejected separately, since they are
        /// path segments of their own.
        static REGEX: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"^[\p{L}\p{N}_.\-]{1,64}$").expect("valid regex")
        });

        let username = username.as_ref();
        REGEX.is_match(username) && !username.chars().all(|c| c == '.')
    }
}

impl FromStr for Username {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Username`")
    }
}

impl TryFrom<String> for Username {
    type Error = &'static str;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value).ok_or("invalid `Username`")
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}
