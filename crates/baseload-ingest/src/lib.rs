//! Baseload Ingest Library
//!
//! Loads a flat customer-base file into Postgres and re-validates the stored
//! tax documents, both in fixed-size bulk operations.
//!
//! # Pipelines
//!
//! - **Ingest**: parse each line into a client record, accumulate batches of
//!   up to the configured bulk size, insert each batch in one statement.
//! - **Normalize**: page through the stored records, run document validation
//!   on every record, write the validity flags back one page at a time.
//!
//! Both pipelines run sequentially and fail fast on the first error.
//!
//! # Example
//!
//! ```no_run
//! use baseload_ingest::{config::Config, ingest, normalize, source, store};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = store::connect(&config.database).await?;
//!     let client_store = store::PgClientStore::new(pool);
//!
//!     let lines = source::read_lines("base.txt").await?;
//!     ingest::ingest_lines(&client_store, &lines, config.pipeline.bulk_size).await?;
//!     normalize::normalize_clients(&client_store, config.pipeline.page_size).await?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod ingest;
pub mod normalize;
pub mod source;
pub mod store;
