//! [`Session`] definitions.

use common::DateTimeOf;
use derive_more::Debug;
use secrecy::{ExposeSecret as _, SecretString};
use serde::Deserialize;

#[cfg(doc)]
use crate::domain::User;
use crate::domain::user;

/// Session of the signed-in [`User`].
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Session {
    /// [`user::Username`] of the signed-in [`User`].
    #[serde(rename = "sub")]
    pub username: user::Username,

    /// [`DateTime`] when this [`Session`] expires.
    ///
    /// [`DateTime`]: common::DateTime
    #[serde(rename = "exp", with = "common::datetime::serde::unix_timestamp")]
    pub expires_at: ExpirationDateTime,
}

/// Access token of a [`Session`] issued by the remote API.
#[derive(Debug)]
#[debug("Token(***)")]
pub struct Token(SecretString);

impl Token {
    /// Creates a new [`Token`] out of the provided raw value.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(SecretString::from(token.into()))
    }

    /// Exposes the raw value of this [`Token`].
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<SecretString> for Token {
    fn from(secret: SecretString) -> Self {
        Self(secret)
    }
}

/// Marker type describing a [`Session`] expiration.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;

/// [`DateTime`] of a [`Session`] expiration.
///
/// [`DateTime`]: common::DateTime
pub type ExpirationDateTime = DateTimeOf<(Session, Expiration)>;
