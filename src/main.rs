use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{rt, web, App, HttpServer};
use dotenv::dotenv;
use log::{error, info};

mod api;
mod config;
mod errors;
mod models;
mod services;
mod state;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = config::Config::from_env().map_err(|e| {
        error!("{e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let state = state::AppState::from_config(&config).map_err(|e| {
        error!("{e}");
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let state = web::Data::new(state);

    let mut sessions = state.wallet.subscribe();
    rt::spawn(async move {
        while sessions.changed().await.is_ok() {
            info!("wallet session: {:?}", *sessions.borrow_and_update());
        }
    });

    if !config.is_production() {
        info!("{} mode, RPC override: {:?}", config.app_env, config.rpc_url);
    }
    info!(
        "listening on 127.0.0.1:{} ({}, default chain {})",
        config.port, config.app_env, config.default_chain_id
    );

    let allowed_origins = config.allowed_origins.clone();
    HttpServer::new(move || {
        let cors = allowed_origins
            .iter()
            .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
            .allowed_methods(vec!["GET", "POST", "PUT"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                header::ACCEPT,
            ])
            .supports_credentials();
        App::new()
            .app_data(state.clone())
            .configure(api::config)
            .wrap(cors)
    })
    .bind(("127.0.0.1", config.port))?
    .run()
    .await
}
