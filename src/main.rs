use caltrack::off::{OffClient, DEFAULT_BASE};
use caltrack::{resolve_data_dir, router, AppState, Shim, Store};
use std::{env, net::SocketAddr, sync::Arc};
use tokio::fs;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let data_dir = resolve_data_dir();
    fs::create_dir_all(&data_dir).await?;
    let store = Store::load(Shim::new(data_dir)).await;

    let off_base = env::var("CALTRACK_OFF_BASE").unwrap_or_else(|_| DEFAULT_BASE.to_string());
    let state = AppState::new(Arc::new(store), OffClient::new(off_base));
    let app = router(state);

    let port = env::var("PORT")
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
