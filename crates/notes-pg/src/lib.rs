//! PostgreSQL integration for the notes backend.
//!
//! Connectivity, table names, and idempotent DDL for every persistent
//! entity. Row mapping lives beside the domain types in the crates that
//! own them; this crate only knows how tables are named and created.
//!
//! ## Connectivity
//!
//! - [`db()`] — Establishes a database connection from a connection string
//!
//! ## Schema
//!
//! - [`Schema`] — Table metadata and DDL generation
//! - [`Migrate`] — Applies [`Schema`] DDL to a live connection
//!
//! ## Table Names
//!
//! Constants for all persistent entities: users, tokens, folders, notes.
mod migrate;
mod schema;

pub use migrate::*;
pub use schema::*;

use std::sync::Arc;
use tokio_postgres::Client;

/// Establishes a database connection.
///
/// Returns an `Arc<Client>` suitable for sharing across async tasks.
/// The connection driver is spawned onto the current runtime.
///
/// # Panics
///
/// Panics if the connection cannot be established.
pub async fn db(url: &str) -> Arc<Client> {
    log::info!("connecting to database");
    let tls = tokio_postgres::tls::NoTls;
    let (client, connection) = tokio_postgres::connect(url, tls)
        .await
        .expect("database connection failed");
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            log::error!("database connection closed: {}", e);
        }
    });
    client
        .execute("SET client_min_messages TO WARNING", &[])
        .await
        .expect("set client_min_messages");
    Arc::new(client)
}

/// PostgreSQL error type alias.
pub type PgErr = tokio_postgres::Error;

/// Table for registered user accounts.
#[rustfmt::skip]
pub const USERS:   &str = "users";
/// Table for hashed bearer tokens.
#[rustfmt::skip]
pub const TOKENS:  &str = "tokens";
/// Table for user folders.
#[rustfmt::skip]
pub const FOLDERS: &str = "folders";
/// Table for user notes.
#[rustfmt::skip]
pub const NOTES:   &str = "notes";
