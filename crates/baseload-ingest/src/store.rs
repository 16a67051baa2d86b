//! Postgres client store
//!
//! All three operations are single-statement bulk calls with strictly
//! positional binds per record. No transaction spans more than one call, so
//! there is no atomicity across a whole ingest or normalize run.

use std::time::Duration;

use async_trait::async_trait;
use baseload_common::Client;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::DatabaseConfig;

/// A bulk storage operation failed.
#[derive(Error, Debug)]
#[error("database error: {0}")]
pub struct StoreError(#[from] pub sqlx::Error);

/// Bulk persistence operations over client records.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Persist a batch of records in one multi-row insert.
    ///
    /// Ids are assigned server-side; absent optional fields bind as NULL.
    async fn insert_batch(&self, clients: &[Client]) -> Result<(), StoreError>;

    /// Fetch up to `limit` records ordered by id ascending, starting at
    /// `offset`. An empty page signals end-of-data.
    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<Client>, StoreError>;

    /// Write the validity flags of a whole page back in one statement,
    /// stamping the update time server-side.
    async fn update_validity_batch(&self, clients: &[Client]) -> Result<(), StoreError>;
}

/// Postgres-backed [`ClientStore`].
pub struct PgClientStore {
    pool: PgPool,
}

impl PgClientStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientStore for PgClientStore {
    async fn insert_batch(&self, clients: &[Client]) -> Result<(), StoreError> {
        if clients.is_empty() {
            return Ok(());
        }

        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "INSERT INTO clients (cpf, private, incomplete, last_order_date, \
             average_ticket, last_order_ticket, most_frequent_store, last_order_store, \
             valid_cpf, valid_most_frequent_store, valid_last_order_store) ",
        );

        query_builder.push_values(clients.iter(), |mut b, client| {
            b.push_bind(&client.cpf)
                .push_bind(client.private)
                .push_bind(client.incomplete)
                .push_bind(client.last_order_date)
                .push_bind(client.average_ticket)
                .push_bind(client.last_order_ticket)
                .push_bind(client.most_frequent_store.as_deref())
                .push_bind(client.last_order_store.as_deref())
                .push_bind(client.valid_cpf.unwrap_or(false))
                .push_bind(client.valid_most_frequent_store.unwrap_or(false))
                .push_bind(client.valid_last_order_store.unwrap_or(false));
        });

        query_builder.build().execute(&self.pool).await?;
        Ok(())
    }

    async fn fetch_page(&self, limit: i64, offset: i64) -> Result<Vec<Client>, StoreError> {
        let rows = sqlx::query(
            "SELECT id, cpf, private, incomplete, last_order_date, average_ticket, \
             last_order_ticket, most_frequent_store, last_order_store \
             FROM clients ORDER BY id ASC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| -> Result<Client, StoreError> {
                Ok(Client {
                    id: Some(row.try_get("id")?),
                    cpf: row.try_get("cpf")?,
                    private: row.try_get("private")?,
                    incomplete: row.try_get("incomplete")?,
                    last_order_date: row.try_get("last_order_date")?,
                    average_ticket: row.try_get("average_ticket")?,
                    last_order_ticket: row.try_get("last_order_ticket")?,
                    most_frequent_store: row.try_get("most_frequent_store")?,
                    last_order_store: row.try_get("last_order_store")?,
                    // unset until validate_documents runs for this fetch
                    valid_cpf: None,
                    valid_most_frequent_store: None,
                    valid_last_order_store: None,
                })
            })
            .collect()
    }

    async fn update_validity_batch(&self, clients: &[Client]) -> Result<(), StoreError> {
        if clients.is_empty() {
            return Ok(());
        }

        let mut query_builder: QueryBuilder<Postgres> = QueryBuilder::new(
            "UPDATE clients AS c SET \
             cpf = v.cpf, \
             valid_cpf = v.valid_cpf, \
             valid_most_frequent_store = v.valid_most_frequent_store, \
             valid_last_order_store = v.valid_last_order_store, \
             updated_at = CURRENT_TIMESTAMP \
             FROM (",
        );

        query_builder.push_values(clients.iter(), |mut b, client| {
            b.push_bind(client.id)
                .push_bind(&client.cpf)
                .push_bind(client.valid_cpf.unwrap_or(false))
                .push_bind(client.valid_most_frequent_store.unwrap_or(false))
                .push_bind(client.valid_last_order_store.unwrap_or(false));
        });

        query_builder.push(
            ") AS v (id, cpf, valid_cpf, valid_most_frequent_store, valid_last_order_store) \
             WHERE c.id = v.id",
        );

        query_builder.build().execute(&self.pool).await?;
        Ok(())
    }
}

/// Open a connection pool, retrying with a constant backoff until the
/// database accepts connections or the retry budget runs out.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
        .connect_lazy(&config.url)?;

    let mut attempt = 0;
    loop {
        attempt += 1;
        match pool.acquire().await {
            Ok(_) => break,
            Err(err) if attempt < config.connect_retries => {
                warn!(attempt, error = %err, "database not ready, retrying");
                tokio::time::sleep(Duration::from_secs(config.retry_interval_secs)).await;
            },
            Err(err) => return Err(err.into()),
        }
    }

    info!("connected to database");
    Ok(pool)
}
