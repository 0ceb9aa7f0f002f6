mod config;
mod db;
mod error;
mod handlers;
mod models;
mod repo;
mod routes;
mod seed;
mod state;
mod utils;

use std::{net::SocketAddr, sync::Arc};

use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{config::Config, state::AppState, utils::files::FileStore, utils::mail::Mailer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(Config::load());

    let pool = db::init_db(&config.database_url).await;
    tracing::info!("✅ Conexión a Postgres exitosa");

    // Migraciones y cuenta de administrador; un fallo aquí no tumba el server
    if let Err(e) = sqlx::migrate!().run(&pool).await {
        tracing::error!("Error aplicando las migraciones: {:?}", e);
    }
    if let Err(e) = seed::seed_admin(&pool, &config).await {
        tracing::error!("Error creando la cuenta de administrador: {:?}", e);
    }

    let mailer = Mailer::new(&config).expect("Configuración SMTP inválida");
    let files = FileStore::new(&config.upload_dir);

    let state = AppState {
        pool,
        config: config.clone(),
        files,
        mailer,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::create_routes(state).layer(cors);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port)
        .parse()
        .expect("Dirección IP/Puerto inválida");

    tracing::info!("🚀 Servidor Turavia corriendo en http://{}", addr);

    let listener = TcpListener::bind(addr).await.expect("Fallo al enlazar el puerto");
    axum::serve(listener, app).await.unwrap();
}
