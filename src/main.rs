use quill_core::application::{
    ports::{assets::AssetStore, security::TokenVerifier, time::Clock, util::SlugGenerator},
    services::ApplicationServices,
};
use quill_core::config::AppConfig;
use quill_core::domain::{
    post::{PostReadRepository, PostWriteRepository},
    user::UserRepository,
};
use quill_core::infrastructure::{
    assets::CloudinaryAssetStore,
    database,
    repositories::{
        PostgresPostReadRepository, PostgresPostWriteRepository, PostgresUserRepository,
    },
    security::HmacTokenVerifier,
    time::SystemClock,
    util::DefaultSlugGenerator,
};
use quill_core::presentation::http::{routes::build_router, state::HttpState};
use anyhow::Result;
use std::{net::SocketAddr, sync::Arc};
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(err) = bootstrap().await {
        tracing::error!(error = %err, "fatal error");
        eprintln!("fatal error: {err}");
        std::process::exit(1);
    }
}

async fn bootstrap() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = AppConfig::from_env()?;

    let pool = database::init_pool(config.database_url()).await?;
    database::run_migrations(&pool).await?;

    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepository::new(pool.clone()));
    let post_write_repo: Arc<dyn PostWriteRepository> =
        Arc::new(PostgresPostWriteRepository::new(pool.clone()));
    let post_read_repo: Arc<dyn PostReadRepository> =
        Arc::new(PostgresPostReadRepository::new(pool.clone()));

    let cloudinary = config.cloudinary();
    let asset_store: Arc<dyn AssetStore> = Arc::new(CloudinaryAssetStore::new(
        cloudinary.cloud_name.clone(),
        cloudinary.api_key.clone(),
        cloudinary.api_secret.clone(),
    ));

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let slugger: Arc<dyn SlugGenerator> = Arc::new(DefaultSlugGenerator);
    let token_verifier: Arc<dyn TokenVerifier> = Arc::new(HmacTokenVerifier::new(
        config.auth_token_secret().as_bytes(),
        Arc::clone(&user_repo),
        Arc::clone(&clock),
    ));

    let services = Arc::new(ApplicationServices::new(
        post_write_repo,
        post_read_repo,
        asset_store,
        token_verifier,
        clock,
        slugger,
    ));

    let state = HttpState { services };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
    let address: SocketAddr = listener.local_addr()?;
    tracing::info!("listening on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

fn init_tracing() {
    let env_filter = std::env::var("RUST_LOG")
        .ok()
        .unwrap_or_else(|| "info,tower_http=info,sqlx=warn".to_string());

    let subscriber = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(env_filter))
        .with(tracing_subscriber::fmt::layer());

    if subscriber.try_init().is_err() {
        tracing::warn!("tracing subscriber already initialised");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install CTRL+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install terminate handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
    tracing::info!("shutdown signal received");
}
