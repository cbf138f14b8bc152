use std::{io, process::ExitCode, sync::OnceLock};

use application::{AsError as _, Args, Config, Service};
use service::{
    command::{AuthorizeUserSession, Command as _},
    infra::{http, Http},
};
use tracing as log;
use tracing_subscriber::{
    filter::filter_fn,
    layer::{Layer as _, SubscriberExt as _},
    util::SubscriberInitExt as _,
};

const STDERR_LEVELS: &[log::Level] = &[log::Level::WARN, log::Level::ERROR];

static LOG_LEVEL: OnceLock<log::Level> = OnceLock::new();

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stdout)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (!STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_ansi(true)
                .with_writer(io::stderr)
                .with_filter(filter_fn(|meta| {
                    meta.is_span()
                        || (STDERR_LEVELS.contains(meta.level()))
                            && LOG_LEVEL
                                .get()
                                .copied()
                                .unwrap_or(log::Level::INFO)
                                >= *meta.level()
                })),
        )
        .init();

    match start().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(()) => ExitCode::FAILURE,
    }
}

async fn start() -> Result<(), ()> {
    let Args { config, command } = Args::parse().unwrap_or_else(|e| e.exit());

    let Config { api, feed, log } = Config::new(config).map_err(|e| {
        log::error!("failed to load `Config`: {}", e.into_error());
    })?;

    LOG_LEVEL
        .set(log.level.into())
        .unwrap_or_else(|_| unreachable!("first initialization"));

    let token = api.token();
    let http = Http::new(http::Config::from(api)).map_err(|e| {
        log::error!("failed to initialize `Http` client: {e}");
    })?;

    let service_config = service::Config::try_from(feed).map_err(|e| {
        log::error!("invalid `feed` configuration: {}", e.into_error());
    })?;
    let mut service = Service::new(service_config, http);

    if let Some(token) = token {
        let session = service
            .execute(AuthorizeUserSession { token: &token })
            .await
            .map_err(|e| {
                log::error!("failed to authorize: {}", e.into_error());
            })?;
        log::debug!("signed in as `{}`", session.username);
        service = service.with_session(session);
    }

    application::run(service, command).await.map_err(|e| {
        log::error!("{e}");
    })
}
