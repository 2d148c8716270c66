//! Notes Backend Binary
//!
//! Serves accounts, sessions, notes and folders. Configure with flags or
//! BIND_ADDR, DB_URL, WORKERS and TOKEN_TTL_HOURS; without DB_URL all
//! state lives in memory.
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    notes_core::log();
    notes_core::kys();
    notes_server::run(notes_server::Config::parse()).await
}
