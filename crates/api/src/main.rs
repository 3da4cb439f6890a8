use std::sync::Arc;

use routeguard_api::{GateConfig, app};
use routeguard_infra::{
    AccessLogStore, InMemoryAccessLogStore, InMemoryUserStore, PostgresAccessLogStore,
    PostgresUserStore, UserStore, db,
};

/// Access log records kept by the fallback in-memory store.
const IN_MEMORY_ACCESS_LOG_CAPACITY: usize = 10_000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    routeguard_observability::init();

    let config = GateConfig::from_env()?;

    let (users, access_log): (Arc<dyn UserStore>, Arc<dyn AccessLogStore>) =
        match &config.database_url {
            Some(url) => {
                let pool = db::connect(url, 10).await?;
                (
                    Arc::new(PostgresUserStore::new(pool.clone())),
                    Arc::new(PostgresAccessLogStore::new(pool)),
                )
            }
            None => {
                tracing::warn!(
                    capacity = IN_MEMORY_ACCESS_LOG_CAPACITY,
                    "DATABASE_URL not set; using in-memory user and bounded access log stores"
                );
                (
                    Arc::new(InMemoryUserStore::new()),
                    Arc::new(InMemoryAccessLogStore::bounded(IN_MEMORY_ACCESS_LOG_CAPACITY)),
                )
            }
        };

    let gate = Arc::new(app::build_gate(&config, users, access_log)?);
    let router = app::build_app(gate, app::routes());

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;
    Ok(())
}
