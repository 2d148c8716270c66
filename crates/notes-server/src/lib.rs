//! Notes Backend Server
//!
//! Accounts, bearer sessions, notes and folders behind one actix-web
//! server. Every request passes the session gate first; resource routes
//! then check ownership against the resolved identity.
//!
//! ## Submodules
//!
//! - [`notes`] — Notes and their handlers
//! - [`folders`] — Folders and their handlers
//! - [`Config`] — Command line and environment configuration
mod config;
mod error;
pub mod folders;
pub mod notes;
mod shelf;

pub use config::*;
pub use error::*;
pub use folders::Folder;
pub use folders::FolderStore;
pub use notes::Note;
pub use notes::NoteStore;
pub use shelf::*;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::Responder;
use actix_web::guard;
use actix_web::middleware::Logger;
use actix_web::middleware::from_fn;
use actix_web::web;
use notes_auth::*;
use notes_pg::Migrate;
use serde::Deserialize;
use serde::Deserializer;
use std::sync::Arc;
use tokio_postgres::Client;

/// Distinguishes an explicit `null` from an absent field in patches.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Backing stores for every route, either all PostgreSQL or all in memory.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStore>,
    pub sessions: Arc<dyn SessionStore>,
    pub notes: Arc<dyn NoteStore>,
    pub folders: Arc<dyn FolderStore>,
    client: Option<Arc<Client>>,
}

impl Stores {
    /// Connects and brings the schema up to date. Parents migrate first.
    pub async fn postgres(url: &str) -> Result<Self, notes_pg::PgErr> {
        let client = notes_pg::db(url).await;
        client.migrate::<Member>().await?;
        client.migrate::<Token>().await?;
        client.migrate::<Folder>().await?;
        client.migrate::<Note>().await?;
        Ok(Self {
            users: client.clone(),
            sessions: client.clone(),
            notes: client.clone(),
            folders: client.clone(),
            client: Some(client),
        })
    }
    pub fn memory() -> Self {
        let accounts = Arc::new(Memory::new());
        let shelf = Arc::new(Shelf::new());
        Self {
            users: accounts.clone(),
            sessions: accounts,
            notes: shelf.clone(),
            folders: shelf,
            client: None,
        }
    }
    /// Registers the stores and the gate as application data, then mounts
    /// the routes.
    pub fn mount(&self, gate: &web::Data<Gate>, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.clone()))
            .app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.notes.clone()))
            .app_data(web::Data::from(self.folders.clone()))
            .app_data(gate.clone())
            .app_data(web::JsonConfig::default().error_handler(|e, _| {
                ApiError::BadRequest(e.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|e, _| {
                ApiError::BadRequest(e.to_string()).into()
            }));
        routes(cfg);
    }
}

async fn health(stores: web::Data<Stores>) -> impl Responder {
    let Some(ref client) = stores.client else {
        return HttpResponse::Ok().body("ok");
    };
    match client
        .execute("SELECT 1", &[])
        .await
        .inspect_err(|e| log::error!("health check failed: {}", e))
    {
        Ok(_) => HttpResponse::Ok().body("ok"),
        Err(_) => HttpResponse::ServiceUnavailable().body("database unavailable"),
    }
}

#[rustfmt::skip]
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health))
        .service(
            web::resource("/users/register")
                .guard(guard::Post())
                .route(web::post().to(notes_auth::register)),
        )
        .service(
            web::resource("/tokens/authentication")
                .guard(guard::Post())
                .route(web::post().to(notes_auth::login)),
        )
        .service(
            web::scope("")
                .wrap(from_fn(authenticate))
                .route("/whoami", web::get().to(notes_auth::whoami))
                .service(
                    web::scope("")
                        .wrap(from_fn(require_user))
                        .route("/tokens/authentication",     web::delete().to(notes_auth::logout))
                        .route("/tokens/authentication/all", web::delete().to(notes_auth::logout_all))
                        .route("/users/me",                  web::get().to(notes_auth::me))
                        .route("/users/{id}",                web::get().to(notes_auth::get_user))
                        .route("/users/{id}",                web::patch().to(notes_auth::update_user))
                        .route("/users/{id}/password",       web::put().to(notes_auth::update_password))
                        .route("/notes",                     web::get().to(notes::handlers::list))
                        .route("/notes",                     web::post().to(notes::handlers::create))
                        .route("/notes/{id}",                web::get().to(notes::handlers::get))
                        .route("/notes/{id}",                web::patch().to(notes::handlers::update))
                        .route("/notes/{id}",                web::delete().to(notes::handlers::delete))
                        .route("/folders",                   web::get().to(folders::handlers::list))
                        .route("/folders",                   web::post().to(folders::handlers::create))
                        .route("/folders/{id}",              web::get().to(folders::handlers::get))
                        .route("/folders/{id}",              web::patch().to(folders::handlers::update))
                        .route("/folders/{id}",              web::delete().to(folders::handlers::delete)),
                ),
        );
}

pub async fn run(config: Config) -> Result<(), std::io::Error> {
    let stores = match config.database {
        Some(ref url) => Stores::postgres(url)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?,
        None => {
            log::warn!("no database configured, using in-memory stores");
            Stores::memory()
        }
    };
    let gate = web::Data::new(Gate::new(
        stores.sessions.clone(),
        Lurker::sentinel(),
        config.ttl(),
    ));
    log::info!("starting notes server on {}", config.bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .configure(|cfg| stores.mount(&gate, cfg))
    })
    .workers(config.workers)
    .bind(&config.bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests;
