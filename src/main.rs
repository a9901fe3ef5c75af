use std::{
    io,
    sync::{Arc, RwLock},
};

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};

mod auth;
mod config;
mod database;
mod error;
mod logging;
mod models;
mod query;
mod routes;
mod state;
mod stats;
mod store;
#[cfg(test)]
mod testing;
mod view;

use crate::{
    auth::{session::SessionGuard, JwtIdentityProvider},
    config::AppConfig,
    error::StartupError,
    models::settings::Settings,
    state::{AppState, Clock},
    store::{
        memory::{FixtureStore, MemoryAccessStore},
        mongo::{MongoAccessStore, MongoRecordStore},
        AccessStore, RecordStore,
    },
};

async fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let (records, access): (Arc<dyn RecordStore>, Arc<dyn AccessStore>) =
        match &config.database.uri {
            Some(uri) => {
                let db = database::connect(uri, &config.database.name).await?;
                (
                    Arc::new(MongoRecordStore::new(db.clone())),
                    Arc::new(MongoAccessStore::new(db)),
                )
            }
            None => {
                tracing::warn!("no database configured, serving sample records");
                (
                    Arc::new(FixtureStore::seeded()),
                    Arc::new(MemoryAccessStore::new()),
                )
            }
        };

    let secret = config
        .auth
        .session_secret
        .as_deref()
        .ok_or_else(|| StartupError::Invalid("auth.session_secret is required".to_string()))?;

    Ok(AppState {
        records,
        access,
        identity: Arc::new(JwtIdentityProvider::from_config(&config.auth.identity)?),
        sessions: auth::session::SessionKeys::new(secret, config.auth.session_ttl_secs),
        settings: RwLock::new(Settings {
            system: config.system.clone(),
            ..Settings::default()
        }),
        clock: Clock::System,
    })
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = AppConfig::load().map_err(|error| {
        eprintln!("{error}");
        io::Error::new(io::ErrorKind::InvalidInput, error.to_string())
    })?;
    logging::init(&config.log);

    let state = build_state(&config).await.map_err(|error| {
        tracing::error!(%error, "unable to start");
        io::Error::new(io::ErrorKind::Other, error.to_string())
    })?;
    let state = web::Data::new(state);
    let allowed_origin = config.server.allowed_origin.clone();

    tracing::info!(
        host = %config.server.host,
        port = config.server.port,
        domain = %config.system.authorized_domain,
        "listening"
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin(&allowed_origin)
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .expose_headers(vec![header::LOCATION])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(SessionGuard)
            .wrap(Logger::default())
            .wrap(cors)
            .configure(routes::configure)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
