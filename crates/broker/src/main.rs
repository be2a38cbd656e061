// Файл: crates/broker/src/main.rs
use std::net::SocketAddr;

use anyhow::Result;
use tracing_subscriber::{fmt, EnvFilter};

use broker::config::BrokerConfig;
use broker::http_api::{router, AppState};
use broker::session::SearchSession;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cfg = BrokerConfig::from_env();
    let addr: SocketAddr = cfg.addr.parse()?;

    let state = AppState {
        cfg,
        session: SearchSession::new(),
    };
    let app = router(state);

    tracing::info!(address = %addr, "wordmask broker listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt().with_env_filter(filter).with_target(false).try_init();
}
