//! [`Http`] client of the remote social API.

use std::{sync::Arc, time::Duration};

use common::{
    operations::{By, Delete, Insert, Select},
    pagination::Page,
};
use derive_more::{Debug, Display, Error as StdError};
use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        follower::Subscription,
        user::{self, session},
        User,
    },
    infra::api::{self, Api},
    read,
};

/// [`Http`] client configuration.
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL of the remote API (scheme, host and port).
    pub base_url: String,

    /// [`session::Token`] to authorize requests with, if any.
    pub token: Option<Arc<session::Token>>,

    /// Timeout of a single request.
    pub timeout: Duration,
}

/// HTTP client of the remote social API.
///
/// Attaches the configured [`session::Token`] as a bearer authorization to
/// every request.
#[derive(Clone, Debug)]
pub struct Http {
    /// Underlying [`reqwest::Client`].
    #[debug(skip)]
    client: reqwest::Client,

    /// Base URL of the remote API, without a trailing slash.
    base_url: Arc<str>,

    /// [`session::Token`] to authorize requests with.
    token: Option<Arc<session::Token>>,
}

impl Http {
    /// Creates a new [`Http`] client with the provided [`Config`].
    ///
    /// # Errors
    ///
    /// Errors if the underlying HTTP client cannot be initialized.
    pub fn new(config: Config) -> Result<Self, Traced<Error>> {
        let Config {
            base_url,
            token,
            timeout,
        } = config;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(Error::Client)
            .map_err(tracerr::wrap!())?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
            token,
        })
    }

    /// Builds a `GET` request to the provided `path`.
    fn get(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.get(format!("{}{path}", self.base_url)))
    }

    /// Builds a `POST` request to the provided `path`.
    fn post(&self, path: &str) -> RequestBuilder {
        self.authorized(self.client.post(format!("{}{path}", self.base_url)))
    }

    /// Attaches the [`session::Token`] (if any) to the provided request.
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token.expose()),
            None => request,
        }
    }

    /// Sends the provided request.
    async fn send(
        request: RequestBuilder,
    ) -> Result<Response, Traced<api::Error>> {
        request
            .send()
            .await
            .map_err(Error::Request)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }

    /// Ensures the provided [`Response`] has a successful status.
    fn ensure_success(
        response: Response,
    ) -> Result<Response, Traced<api::Error>> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(tracerr::new!(api::Error::Status(status)))
        }
    }

    /// Decodes the JSON body of the provided [`Response`].
    async fn decode<T: DeserializeOwned>(
        response: Response,
    ) -> Result<T, Traced<api::Error>> {
        response
            .json::<T>()
            .await
            .map_err(Error::Decode)
            .map_err(tracerr::from_and_wrap!(=> api::Error))
    }

    /// Fetches a single [`Page`] of items from the provided `path`.
    async fn page<T: DeserializeOwned>(
        &self,
        path: &str,
        request: &read::Request,
    ) -> Result<Page<T>, Traced<api::Error>> {
        let read::Request {
            owner: _,
            index,
            size,
            sort,
        } = request;

        log::debug!("GET `{path}` (page: {index}, size: {size}, sort: {sort})");

        let response = Self::send(self.get(path).query(&[
            ("page", index.to_string()),
            ("size", size.to_string()),
            ("sort", sort.to_string()),
        ]))
        .await?;

        Self::decode::<Vec<T>>(Self::ensure_success(response)?)
            .await
            .map(Page::from)
    }
}

impl Api<Select<By<read::post::list::Page, read::Request>>> for Http {
    type Ok = read::post::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::post::list::Page, read::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = by.into_inner();
        self.page(&format!("/api/user/posts/{}", request.owner), &request)
            .await
    }
}

impl Api<Select<By<read::follower::list::Page, read::Request>>> for Http {
    type Ok = read::follower::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::follower::list::Page, read::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        let request = by.into_inner();
        self.page(
            &format!("/api/user/subscriptions/{}", request.owner),
            &request,
        )
        .await
    }
}

impl Api<Select<By<read::favorite::list::Page, read::Request>>> for Http {
    type Ok = read::favorite::list::Page;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<read::favorite::list::Page, read::Request>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Favorites are always resolved against the authorized session.
        self.page("/api/user/favorites", by.as_inner()).await
    }
}

impl Api<Select<By<Option<User>, user::Username>>> for Http {
    type Ok = Option<User>;
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Username>>,
    ) -> Result<Self::Ok, Self::Err> {
        let path = format!("/api/user/getuser/{}", by.into_inner());
        log::debug!("GET `{path}`");

        let response = Self::send(self.get(&path)).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Self::decode(Self::ensure_success(response)?).await.map(Some)
    }
}

impl Api<Insert<Subscription>> for Http {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Insert(subscription): Insert<Subscription>,
    ) -> Result<Self::Ok, Self::Err> {
        self.subscription("/api/user/follow", subscription).await
    }
}

impl Api<Delete<Subscription>> for Http {
    type Ok = ();
    type Err = Traced<api::Error>;

    async fn execute(
        &self,
        Delete(subscription): Delete<Subscription>,
    ) -> Result<Self::Ok, Self::Err> {
        self.subscription("/api/user/unfollow", subscription).await
    }
}

impl Http {
    /// Posts the target of the provided [`Subscription`] to the `path`.
    async fn subscription(
        &self,
        path: &str,
        subscription: Subscription,
    ) -> Result<(), Traced<api::Error>> {
        let Subscription { target } = subscription;
        log::debug!("POST `{path}` (target: {target})");

        let request = self
            .post(path)
            .header(header::CONTENT_TYPE, "text/plain")
            .body(String::from(target));

        Self::ensure_success(Self::send(request).await?).map(drop)
    }
}

/// [`Http`] client error.
#[derive(Debug, Display, StdError)]
pub enum Error {
    /// Failed to initialize the HTTP client.
    #[display("failed to initialize HTTP client: {_0}")]
    Client(reqwest::Error),

    /// Failed to perform a request.
    #[display("failed to perform request: {_0}")]
    Request(reqwest::Error),

    /// Failed to decode a response body.
    #[display("failed to decode response body: {_0}")]
    Decode(reqwest::Error),
}
