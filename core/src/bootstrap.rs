use airdrop_core::{
    config::{AppConfig, ServerConfig},
    http,
    service::CatalogService,
};
use env_logger::Env;
use log::info;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

fn load_config() -> anyhow::Result<AppConfig> {
    dotenv::dotenv()
        .map_err(|err| {
            eprintln!(".env file error: {err}");
            err
        })
        .ok();

    AppConfig::fetch()
}

pub async fn bootstrap() -> anyhow::Result<()> {
    let app_config = load_config()?;

    let ServerConfig {
        host,
        port,
        log_level,
    } = app_config.server_config.clone();

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level.as_str())).init();

    let cors_layer = CorsLayer::new()
        .allow_methods(Any)
        .allow_origin(Any)
        .allow_headers(Any);

    info!(
        "auth: {:?}, listing: {:?}",
        app_config.auth, app_config.listing
    );
    let service = CatalogService::new(app_config).await?;

    let app = http::router(service).layer(cors_layer);
    let addr = format!("{host}:{port}");
    let listener = TcpListener::bind(&addr).await?;
    let local_addr = listener.local_addr()?;
    info!("Running server on {}...", local_addr);
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
