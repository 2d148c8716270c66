use super::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Applies table DDL to a live connection.
///
/// Every statement is `IF NOT EXISTS`, so migrating an up-to-date database
/// is a no-op and the call is safe on every startup. Callers migrate parents
/// before children so foreign keys resolve.
#[async_trait::async_trait]
pub trait Migrate: Send + Sync {
    async fn migrate<S>(&self) -> Result<(), PgErr>
    where
        S: Schema;
}

#[async_trait::async_trait]
impl Migrate for Client {
    async fn migrate<S>(&self) -> Result<(), PgErr>
    where
        S: Schema,
    {
        log::info!("creating table ({})", S::name());
        self.batch_execute(S::creates()).await?;
        log::info!("indexing table ({})", S::name());
        self.batch_execute(S::indices()).await
    }
}

#[async_trait::async_trait]
impl Migrate for Arc<Client> {
    async fn migrate<S>(&self) -> Result<(), PgErr>
    where
        S: Schema,
    {
        self.as_ref().migrate::<S>().await
    }
}
