//! Credentials, bearer sessions, and request identity.
//!
//! Opaque bearer tokens with Argon2id password hashing. Every request is
//! bound to exactly one identity: a registered member resolved from its
//! token, or the process-wide anonymous lurker.
//!
//! ## Identity Types
//!
//! - [`Member`] — Registered account
//! - [`Identity`] — Principal a request acts as
//! - [`Lurker`] — Anonymous sentinel, recognized by pointer identity
//!
//! ## Sessions
//!
//! - [`Token`] — Random plaintext for the client, SHA-256 hash for storage
//! - [`SessionStore`] — Hash to (owner, scope, expiry), with [`Memory`]
//!   and Postgres implementations
//! - [`Gate`] — Header parsing, token resolution, login and logout
//!
//! ## Security
//!
//! - [`password`] — Argon2id hashing and verification
//! - [`authorize`] — Ownership check for per-resource routes
mod dto;
mod error;
mod gate;
mod identity;
mod lurker;
mod member;
mod memory;
mod ownership;
pub mod password;
mod store;
mod token;

pub use dto::*;
pub use error::*;
pub use gate::*;
pub use identity::*;
pub use lurker::*;
pub use member::*;
pub use memory::*;
pub use ownership::*;
pub use password::Credential;
pub use store::*;
pub use token::*;

#[cfg(feature = "database")]
mod repository;

#[cfg(feature = "server")]
mod context;
#[cfg(feature = "server")]
mod handlers;
#[cfg(feature = "server")]
mod middleware;
#[cfg(feature = "server")]
pub use context::*;
#[cfg(feature = "server")]
pub use handlers::*;
#[cfg(feature = "server")]
pub use middleware::*;
