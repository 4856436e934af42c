//! Fetch worker: answers numbered fetch requests with validated records.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::logic::normalize;
use crate::sources::RecordSource;
use crate::state::{FetchRequest, FetchResponse};

/// What: Spawn background worker for inventory fetches.
///
/// Inputs:
/// - `fetch_rx`: Channel receiver for fetch requests
/// - `fetch_res_tx`: Channel sender for fetch responses
/// - `source`: Record source to list rows from
///
/// Details:
/// - Every request runs in its own task, so overlapping fetches do not wait
///   on each other; responses carry the request id and may arrive out of order
/// - Rows are validated before the response leaves; malformed rows are dropped
/// - Source failures travel back as `Err(message)`
pub fn spawn_fetch_worker<S: RecordSource>(
    mut fetch_rx: mpsc::UnboundedReceiver<FetchRequest>,
    fetch_res_tx: mpsc::UnboundedSender<FetchResponse>,
    source: Arc<S>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(FetchRequest { id }) = fetch_rx.recv().await {
            let src = Arc::clone(&source);
            let tx = fetch_res_tx.clone();
            tokio::spawn(async move {
                let result = match src.list_inventory_records().await {
                    Ok(rows) => Ok(normalize(rows)),
                    Err(e) => Err(format!("Inventory refresh failed: {e}")),
                };
                if tx.send(FetchResponse { id, result }).is_err() {
                    tracing::debug!(id, "event loop gone; dropping fetch response");
                }
            });
        }
        tracing::debug!("fetch worker stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{RawFields, RawRecord};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Source returning a fixed row list and counting calls.
    struct Fixed {
        calls: AtomicUsize,
        fail: bool,
    }

    impl RecordSource for Fixed {
        async fn list_inventory_records(
            &self,
        ) -> crate::sources::Result<Vec<RawRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err("offline".into());
            }
            Ok(vec![
                RawRecord {
                    id: None,
                    fields: RawFields {
                        product_code: Some(serde_json::Value::String("A".into())),
                        posted: Some(serde_json::Value::String("2024-01-01".into())),
                        ..RawFields::default()
                    },
                },
                RawRecord::default(),
            ])
        }

        fn describe(&self) -> String {
            "fixed".into()
        }
    }

    #[tokio::test]
    /// What: The worker answers each request with validated records and its id.
    ///
    /// Inputs:
    /// - Request id 7 against a source with one good and one malformed row.
    ///
    /// Output:
    /// - Response id 7 carrying only record `A`.
    async fn worker_answers_with_validated_records() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (res_tx, mut res_rx) = mpsc::unbounded_channel();
        let src = Arc::new(Fixed {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        spawn_fetch_worker(req_rx, res_tx, Arc::clone(&src));
        req_tx.send(FetchRequest { id: 7 }).expect("send");
        let resp = tokio::time::timeout(Duration::from_secs(2), res_rx.recv())
            .await
            .ok()
            .flatten()
            .expect("response");
        assert_eq!(resp.id, 7);
        let records = resp.result.expect("ok");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].code, "A");
        assert_eq!(src.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    /// What: Source failures come back as `Err` with the cause.
    ///
    /// Inputs:
    /// - Failing source.
    ///
    /// Output:
    /// - `Err` mentioning `offline`.
    async fn worker_reports_failures() {
        let (req_tx, req_rx) = mpsc::unbounded_channel();
        let (res_tx, mut res_rx) = mpsc::unbounded_channel();
        spawn_fetch_worker(
            req_rx,
            res_tx,
            Arc::new(Fixed {
                calls: AtomicUsize::new(0),
                fail: true,
            }),
        );
        req_tx.send(FetchRequest { id: 1 }).expect("send");
        let resp = tokio::time::timeout(Duration::from_secs(2), res_rx.recv())
            .await
            .ok()
            .flatten()
            .expect("response");
        let err = resp.result.expect_err("failure");
        assert!(err.contains("offline"));
    }
}
