mod cli;

use crate::cli::{RouterBackendArg, StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use jiff::SignedDuration;
use mailmask_assign::{DefaultStrategy, StrategyConfig, TemporaryStrategy};
use mailmask_core::{ExpirationPolicy, Router, Storage};
use mailmask_gateway::{App, AppState};
use mailmask_router::{MailgunRouter, MemoryRouter};
use mailmask_storage::{MemoryStorage, RedisStorage};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = CLI::parse();

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        router_backend = %config.router,
        "starting mailmask gateway"
    );

    let strategy_config = StrategyConfig::builder()
        .email_domain(config.email_domain.clone())
        .recipient(config.recipient.clone())
        .build();
    let ttl = SignedDuration::from_hours(config.temporary_ttl_hours);

    match (config.storage, config.router) {
        (StorageBackendArg::InMemory, RouterBackendArg::InMemory) => {
            run_server(
                config.listen_addr,
                strategy_config,
                ttl,
                Arc::new(MemoryStorage::new()),
                Arc::new(MemoryRouter::new()),
            )
            .await
        }
        (StorageBackendArg::InMemory, RouterBackendArg::Mailgun) => {
            run_server(
                config.listen_addr,
                strategy_config,
                ttl,
                Arc::new(MemoryStorage::new()),
                Arc::new(mailgun_router(&config)?),
            )
            .await
        }
        (StorageBackendArg::Redis, RouterBackendArg::InMemory) => {
            run_server(
                config.listen_addr,
                strategy_config,
                ttl,
                Arc::new(redis_storage(&config).await?),
                Arc::new(MemoryRouter::new()),
            )
            .await
        }
        (StorageBackendArg::Redis, RouterBackendArg::Mailgun) => {
            run_server(
                config.listen_addr,
                strategy_config,
                ttl,
                Arc::new(redis_storage(&config).await?),
                Arc::new(mailgun_router(&config)?),
            )
            .await
        }
    }
}

fn mailgun_router(config: &CLI) -> anyhow::Result<MailgunRouter> {
    let api_key = config
        .mailgun_api_key
        .as_deref()
        .context("mailgun api key is required when router backend is mailgun")?;
    Ok(MailgunRouter::new(api_key))
}

async fn redis_storage(config: &CLI) -> anyhow::Result<RedisStorage> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("redis url is required when storage backend is redis")?;
    RedisStorage::connect(redis_url)
        .await
        .context("failed to connect to Redis")
}

async fn run_server<S: Storage, R: Router>(
    listen_addr: SocketAddr,
    strategy_config: StrategyConfig,
    ttl: SignedDuration,
    store: Arc<S>,
    route: Arc<R>,
) -> anyhow::Result<()> {
    let default = Arc::new(DefaultStrategy::new(
        strategy_config.clone(),
        Arc::clone(&store),
        Arc::clone(&route),
    )?);
    let temporary = Arc::new(TemporaryStrategy::new(
        strategy_config,
        store,
        route,
        ExpirationPolicy::AfterDuration(ttl),
    )?);

    let state = AppState::new(default, temporary.clone(), temporary);
    let app = App::router(state);

    let listener = tokio::net::TcpListener::bind(listen_addr)
        .await
        .context("failed to bind listen address")?;
    axum::serve(listener, app).await?;

    Ok(())
}
