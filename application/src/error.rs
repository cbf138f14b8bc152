//! [`Error`]-related definitions.

use std::fmt;

use config::ConfigError;
use derive_more::Error as StdError;
use itertools::Itertools as _;
use service::{
    command::{authorize_user_session, follow_user, unfollow_user},
    infra::api,
    loader, view,
};
use tracerr::{Trace, Traced};

/// Defines a new error type.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_error {
    (
        enum $name:ident {
            $(
                #[code = $code:literal]
                #[message = $message:literal]
                $variant:ident
            ),* $(,)?
        }
    ) => {
        /// Error type.
        #[derive(
            Clone,
            Copy,
            Debug,
            ::derive_more::Display,
            ::derive_more::Error
        )]
        #[repr(u16)]
        pub enum $name {
            $(
                #[display($message)]
                #[doc = $message]
                $variant,
            )*
        }

        impl From<$name> for $crate::Error {
            fn from(err: $name) -> Self {
                match err {
                    $(
                        $name::$variant => Self {
                            code: $code,
                            message: $message.to_string(),
                            backtrace: None,
                        },
                    )*
                }
            }
        }
    };
}

/// Application [`Error`] reported to the user.
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`Error`] code.
    pub code: Code,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,

    /// [`Error`] message.
    pub message: String,
}

impl Error {
    /// Create a new [`Error`] representing an unexpected failure.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            code: "INTERNAL_ERROR",
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            code,
            backtrace,
            message,
        } = self;

        write!(
            f,
            "[{code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("\n{trace}"))),
        )
    }
}

/// [`Error`] code.
pub type Code = &'static str;

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for ConfigError {
    fn try_as_error(&self) -> Option<Error> {
        Some(Error {
            code: "INVALID_CONFIG",
            message: self.to_string(),
            backtrace: None,
        })
    }
}

impl AsError for api::Error {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "UNAUTHORIZED"]
                #[message = "Remote API rejected the access token"]
                Unauthorized,

                #[code = "NOT_FOUND"]
                #[message = "Requested resource does not exist"]
                NotFound,

                #[code = "API_UNAVAILABLE"]
                #[message = "Remote API is unavailable"]
                Unavailable,
            }
        }

        match self {
            Self::Status(
                http::StatusCode::UNAUTHORIZED | http::StatusCode::FORBIDDEN,
            ) => Some(Error::Unauthorized.into()),
            Self::Status(http::StatusCode::NOT_FOUND) => {
                Some(Error::NotFound.into())
            }
            Self::Status(s) if s.is_server_error() => {
                Some(Error::Unavailable.into())
            }
            Self::Status(_) => None,
            Self::Http(e) => match e {
                api::http::Error::Request(_) => Some(Error::Unavailable.into()),
                api::http::Error::Client(_) | api::http::Error::Decode(_) => {
                    None
                }
            },
        }
    }
}

impl AsError for loader::Error {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Fetch(e) => e.try_as_error(),
        }
    }
}

impl AsError for authorize_user_session::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_TOKEN"]
                #[message = "Access token is malformed or expired"]
                InvalidToken,
            }
        }

        match self {
            Self::JsonWebTokenDecodeError(_) => Some(Error::InvalidToken.into()),
        }
    }
}

/// Errors shared by the commands changing subscriptions.
mod subscription {
    crate::define_error! {
        enum Error {
            #[code = "LOGIN_REQUIRED"]
            #[message = "Sign in by configuring `api.token`"]
            LoginRequired,

            #[code = "SELF_SUBSCRIPTION"]
            #[message = "`User` cannot follow itself"]
            SelfSubscription,

            #[code = "USER_NOT_EXISTS"]
            #[message = "`User` with the provided name does not exist"]
            UserNotExists,
        }
    }
}

impl AsError for follow_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use subscription::Error as E;

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::AuthorizationRequired => Some(E::LoginRequired.into()),
            Self::SelfSubscription(_) => Some(E::SelfSubscription.into()),
        }
    }
}

impl AsError for unfollow_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        use subscription::Error as E;

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::AuthorizationRequired => Some(E::LoginRequired.into()),
            Self::SelfSubscription(_) => Some(E::SelfSubscription.into()),
        }
    }
}

impl AsError for view::Error {
    fn try_as_error(&self) -> Option<Error> {
        use subscription::Error as E;

        match self {
            Self::Api(e) => e.try_as_error(),
            Self::Load(e) => e.try_as_error(),
            Self::LoginRequired => Some(E::LoginRequired.into()),
            Self::UserNotExists(_) => Some(E::UserNotExists.into()),
            Self::SelfSubscription(_) => Some(E::SelfSubscription.into()),
        }
    }
}
