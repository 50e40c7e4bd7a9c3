use crate::config::Config;
use crate::startup::AppState;

#[macro_use]
extern crate tracing;

mod config;
mod db;
mod error;
mod lifecycle;
mod polls;
mod routes;
mod socket;
mod sse;
mod startup;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        unsafe {
            std::env::set_var("RUST_LOG", "INFO");
        }
    }
    // initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::load();
    let app_state = AppState::new(&config);
    let app = routes::create_routes(app_state);

    let addr = config.addr();
    info!("listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Unable to spawn tcp listener");

    if let Err(e) = axum::serve(listener, app).await {
        error!("server error: {e}");
    }
}
