//! Core type aliases, traits, and constants for the notes backend.
//!
//! This crate provides the foundational identifier types and the tuning
//! parameters shared by the authentication core and the resource stores.

// ============================================================================
// TRAITS
// ============================================================================
/// Unique identifier trait for domain entities.
pub trait Unique<T = Self> {
    fn id(&self) -> ID<T>;
}

// ============================================================================
// IDENTITY TYPES
// ============================================================================
use std::cmp::Ordering;
use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::hash::Hash;
use std::hash::Hasher;
use std::marker::PhantomData;

/// Generic ID wrapper providing compile-time type safety over the
/// database-assigned `BIGSERIAL` key.
///
/// Keys are assigned by the store on insert; records that have not been
/// persisted yet carry [`ID::unassigned`].
pub struct ID<T> {
    inner: i64,
    marker: PhantomData<T>,
}

impl<T> ID<T> {
    pub fn inner(&self) -> i64 {
        self.inner
    }
    /// Placeholder key for records the store has not numbered yet.
    pub const fn unassigned() -> Self {
        Self {
            inner: 0,
            marker: PhantomData,
        }
    }
    /// Cast ID<T> to ID<U> while preserving the underlying key.
    /// Useful for converting between marker types.
    pub fn cast<U>(self) -> ID<U> {
        ID {
            inner: self.inner,
            marker: PhantomData,
        }
    }
}

impl<T> From<ID<T>> for i64 {
    fn from(id: ID<T>) -> Self {
        id.inner()
    }
}
impl<T> From<i64> for ID<T> {
    fn from(inner: i64) -> Self {
        Self {
            inner,
            marker: PhantomData,
        }
    }
}

impl<T> Copy for ID<T> {}
impl<T> Clone for ID<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Eq for ID<T> {}
impl<T> PartialEq for ID<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T> Ord for ID<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.inner.cmp(&other.inner)
    }
}
impl<T> PartialOrd for ID<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Hash for ID<T> {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        self.inner.hash(state);
    }
}

impl<T> Debug for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ID").field(&self.inner).finish()
    }
}
impl<T> Display for ID<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.inner, f)
    }
}

// ============================================================================
// SESSION TOKENS
// Opaque bearer tokens: random bytes, base32 on the wire, SHA-256 at rest.
// ============================================================================
/// Lifetime of an authentication token from the moment it is issued.
pub const TOKEN_TTL: std::time::Duration = std::time::Duration::from_secs(24 * 60 * 60);
/// Random bytes per token (128 bits).
pub const TOKEN_ENTROPY: usize = 16;

// ============================================================================
// PASSWORD HASHING
// Argon2id work factor. Embedded in every stored hash, so raising these only
// affects credentials written afterwards.
// ============================================================================
/// Memory cost in KiB.
pub const ARGON2_MEMORY: u32 = 19 * 1024;
/// Number of passes over memory.
pub const ARGON2_PASSES: u32 = 2;
/// Degree of parallelism.
pub const ARGON2_LANES: u32 = 1;
/// Random salt bytes per credential.
pub const SALT_BYTES: usize = 16;

// ============================================================================
// ACCOUNT VALIDATION
// ============================================================================
/// Shortest accepted password.
pub const PASSWORD_MIN: usize = 8;
/// Longest accepted username.
pub const USERNAME_MAX: usize = 50;
/// Longest accepted email address.
pub const EMAIL_MAX: usize = 100;

// ============================================================================
// RUNTIME UTILITIES
// ============================================================================
/// Initialize dual logging (terminal + file) with timestamped log files.
/// Creates `logs/` directory and writes DEBUG level to file, INFO to terminal.
#[cfg(feature = "server")]
pub fn log() {
    std::fs::create_dir_all("logs").expect("create logs directory");
    let config = simplelog::ConfigBuilder::new()
        .set_location_level(log::LevelFilter::Off)
        .set_target_level(log::LevelFilter::Off)
        .set_thread_level(log::LevelFilter::Off)
        .build();
    let time = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .expect("time moves slow")
        .as_secs();
    let file = simplelog::WriteLogger::new(
        log::LevelFilter::Debug,
        config.clone(),
        std::fs::File::create(format!("logs/{}.log", time)).expect("create log file"),
    );
    let term = simplelog::TermLogger::new(
        log::LevelFilter::Info,
        config.clone(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    );
    simplelog::CombinedLogger::init(vec![term, file]).expect("initialize logger");
}

/// Register Ctrl+C handler for immediate (non-graceful) termination.
#[cfg(feature = "server")]
pub fn kys() {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => log::warn!("interrupt received, exiting immediately"),
            Err(e) => log::error!("failed to listen for interrupt: {}", e),
        }
        std::process::exit(0);
    });
}
