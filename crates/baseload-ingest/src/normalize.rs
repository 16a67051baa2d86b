//! Document normalization pipeline
//!
//! Pages through the stored records in id order, re-validates the tax
//! documents of every record, and writes the validity flags back one page at
//! a time. An empty page ends the run; the first fetch or update failure
//! aborts it, leaving earlier pages updated.

use thiserror::Error;
use tracing::{debug, info};

use crate::store::{ClientStore, StoreError};

/// Why a normalize run stopped, and at which stage and offset.
#[derive(Error, Debug)]
pub enum NormalizeError {
    #[error("fetch at offset {offset} failed: {source}")]
    Fetch {
        offset: i64,
        #[source]
        source: StoreError,
    },

    #[error("validity update at offset {offset} failed: {source}")]
    Update {
        offset: i64,
        #[source]
        source: StoreError,
    },
}

/// Counts reported by a completed normalize run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeReport {
    pub records: usize,
    pub pages: usize,
}

/// Re-validate every stored record, `page_size` records at a time.
pub async fn normalize_clients<S: ClientStore + ?Sized>(
    store: &S,
    page_size: usize,
) -> Result<NormalizeReport, NormalizeError> {
    let limit = page_size.max(1) as i64;
    let mut offset: i64 = 0;
    let mut report = NormalizeReport::default();

    loop {
        let mut page = store
            .fetch_page(limit, offset)
            .await
            .map_err(|source| NormalizeError::Fetch { offset, source })?;

        if page.is_empty() {
            break;
        }

        for client in &mut page {
            client.validate_documents();
        }

        store
            .update_validity_batch(&page)
            .await
            .map_err(|source| NormalizeError::Update { offset, source })?;

        report.pages += 1;
        report.records += page.len();
        debug!(page = report.pages, size = page.len(), "page normalized");

        offset += limit;
    }

    info!(
        records = report.records,
        pages = report.pages,
        "normalization complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::RecordingStore;
    use baseload_common::Client;

    fn stored(id: i64, cpf: &str, store_doc: Option<&str>) -> Client {
        Client {
            id: Some(id),
            cpf: cpf.to_string(),
            most_frequent_store: store_doc.map(str::to_string),
            last_order_store: store_doc.map(str::to_string),
            ..Client::default()
        }
    }

    #[tokio::test]
    async fn test_stops_on_empty_page_after_two_updates() {
        let store = RecordingStore::default().with_pages(vec![
            vec![stored(1, "37078130022", Some("11444777000161"))],
            vec![stored(2, "37078130021", None)],
        ]);

        let report = normalize_clients(&store, 1000).await.unwrap();

        assert_eq!(report, NormalizeReport { records: 2, pages: 2 });
        assert_eq!(store.update_sizes(), vec![1, 1]);
        // two pages plus the empty fetch that ends the loop
        assert_eq!(store.fetch_calls(), 3);
    }

    #[tokio::test]
    async fn test_empty_store_updates_nothing() {
        let store = RecordingStore::default();
        let report = normalize_clients(&store, 1000).await.unwrap();

        assert_eq!(report, NormalizeReport::default());
        assert!(store.update_sizes().is_empty());
    }

    #[tokio::test]
    async fn test_validity_flags_written_back() {
        let store = RecordingStore::default().with_pages(vec![vec![
            stored(1, "37078130022", Some("11444777000161")),
            stored(2, "37078130021", Some("11444777000162")),
        ]]);

        normalize_clients(&store, 1000).await.unwrap();

        let updated = store.updated();
        assert_eq!(updated[0].valid_cpf, Some(true));
        assert_eq!(updated[0].valid_most_frequent_store, Some(true));
        assert_eq!(updated[1].valid_cpf, Some(false));
        assert_eq!(updated[1].valid_last_order_store, Some(false));
    }

    #[tokio::test]
    async fn test_absent_store_document_is_flagged_invalid() {
        let store = RecordingStore::default()
            .with_pages(vec![vec![stored(1, "37078130022", None)]]);

        normalize_clients(&store, 1000).await.unwrap();

        let updated = store.updated();
        assert_eq!(updated[0].valid_most_frequent_store, Some(false));
        assert_eq!(updated[0].valid_last_order_store, Some(false));
    }

    #[tokio::test]
    async fn test_fetch_failure_aborts_run() {
        let store = RecordingStore::default()
            .with_pages(vec![
                vec![stored(1, "37078130022", None)],
                vec![stored(2, "37078130022", None)],
            ])
            .fail_fetch_at(2);

        let err = normalize_clients(&store, 1000).await.unwrap_err();

        assert!(matches!(err, NormalizeError::Fetch { offset: 1000, .. }));
        // only the first page was updated before the abort
        assert_eq!(store.update_sizes(), vec![1]);
    }

    #[tokio::test]
    async fn test_update_failure_aborts_run() {
        let store = RecordingStore::default()
            .with_pages(vec![
                vec![stored(1, "37078130022", None)],
                vec![stored(2, "37078130022", None)],
            ])
            .fail_update_at(1);

        let err = normalize_clients(&store, 1000).await.unwrap_err();

        assert!(matches!(err, NormalizeError::Update { offset: 0, .. }));
        assert!(store.update_sizes().is_empty());
        // the loop never advanced past the failing page
        assert_eq!(store.fetch_calls(), 1);
    }
}
