//! [`Command`] for authorizing a [`Session`].

use derive_more::{Display, Error, From};
use jsonwebtoken::{DecodingKey, Validation};
use tracerr::Traced;

use crate::{
    domain::user::{session, Session},
    Service,
};

use super::Command;

/// [`Command`] for authorizing a [`Session`] out of its [`session::Token`].
///
/// The token is issued and signed by the remote API, so only its claims and
/// expiration are checked here.
#[derive(Clone, Copy, Debug, From)]
pub struct AuthorizeUserSession<'t> {
    /// [`Session`] token to authorize.
    pub token: &'t session::Token,
}

impl<'t, A> Command<AuthorizeUserSession<'t>> for Service<A> {
    type Ok = Session;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: AuthorizeUserSession<'t>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let AuthorizeUserSession { token } = cmd;

        let mut validation = Validation::default();
        validation.insecure_disable_signature_validation();

        Ok(jsonwebtoken::decode::<Session>(
            token.expose(),
            &DecodingKey::from_secret(&[]),
            &validation,
        )
        .map_err(tracerr::from_and_wrap!(=> E))?
        .claims)
    }
}

/// Error of [`AuthorizeUserSession`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`jsonwebtoken`] decoding error.
    #[display("Failed to decode a JSON Web Token: {_0}")]
    JsonWebTokenDecodeError(jsonwebtoken::errors::Error),
}
