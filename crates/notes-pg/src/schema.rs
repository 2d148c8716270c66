/// DDL for one table.
///
/// Statements are built at compile time with `const_format::concatcp!`
/// from the table-name constants and must be idempotent, so they can run
/// on every startup. Applying them is [`Migrate`](crate::Migrate)'s job.
pub trait Schema {
    fn name() -> &'static str;
    /// `CREATE TABLE IF NOT EXISTS ...`
    fn creates() -> &'static str;
    /// `CREATE INDEX IF NOT EXISTS ...`, possibly several statements.
    fn indices() -> &'static str;
}
