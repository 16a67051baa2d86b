//! Batched ingest pipeline
//!
//! Parses raw input lines into client records and inserts them in fixed-size
//! batches, in input order. The first parse or storage error aborts the run;
//! batches already flushed stay persisted.

use baseload_common::{Client, ParseError};
use thiserror::Error;
use tracing::{debug, info};

use crate::store::{ClientStore, StoreError};

/// Why an ingest run stopped, and at which stage.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: ParseError,
    },

    #[error("bulk insert failed: {0}")]
    Store(#[from] StoreError),
}

/// Counts reported by a completed ingest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub records: usize,
    pub batches: usize,
}

/// Parse `lines` and insert them in batches of at most `bulk_size`.
///
/// The effective batch size is capped by the line count, so a short file
/// still flushes exactly once. Line numbers in errors are 1-based.
pub async fn ingest_lines<S: ClientStore + ?Sized>(
    store: &S,
    lines: &[String],
    bulk_size: usize,
) -> Result<IngestReport, IngestError> {
    if lines.is_empty() {
        return Ok(IngestReport::default());
    }

    let bulk_size = bulk_size.clamp(1, lines.len());
    let mut batch = Vec::with_capacity(bulk_size);
    let mut report = IngestReport::default();

    for (index, line) in lines.iter().enumerate() {
        let client = Client::parse_line(line).map_err(|source| IngestError::Parse {
            line: index + 1,
            source,
        })?;
        batch.push(client);

        if batch.len() >= bulk_size || index == lines.len() - 1 {
            store.insert_batch(&batch).await?;
            report.batches += 1;
            report.records += batch.len();
            debug!(batch = report.batches, size = batch.len(), "batch inserted");
            batch.clear();
        }
    }

    info!(
        records = report.records,
        batches = report.batches,
        "ingest complete"
    );
    Ok(report)
}
