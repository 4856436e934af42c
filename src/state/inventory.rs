//! Inventory collection and fetch lifecycle.
//!
//! The store is owned by the event loop. Its only mutation entry points are
//! [`InventoryStore::fetch_inventory`] and [`InventoryStore::apply_response`];
//! renderers get read-only access.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;

use crate::state::{FetchRequest, FetchResponse, Record};

/// What happened when a fetch response reached the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Records were replaced with the response payload.
    Replaced {
        /// Number of records now held.
        count: usize,
    },
    /// The latest fetch failed; records were kept.
    Failed,
    /// The response belongs to a superseded request and was not applied.
    Stale,
}

/// Fetched inventory plus the in-flight flag.
#[derive(Debug, Default)]
pub struct InventoryStore {
    /// Records from the latest applied fetch, in source order.
    records: Vec<Record>,
    /// True between issuing the latest fetch and applying its response.
    fetching: bool,
    /// Identifier handed to the next fetch request.
    next_request_id: u64,
    /// Identifier of the most recently issued request.
    latest_request_id: u64,
    /// Message of the most recent failure of the latest request, cleared on success.
    last_error: Option<String>,
    /// When records were last replaced.
    last_synced: Option<DateTime<Utc>>,
}

impl InventoryStore {
    /// What: Start a fetch of the full inventory.
    ///
    /// Inputs:
    /// - `fetch_tx`: Channel to the fetch worker
    /// - `err_tx`: Error sink, used when the worker is gone
    ///
    /// Output:
    /// - Identifier assigned to the request
    ///
    /// Details:
    /// - Sets `fetching` before the request leaves, so any reader after this call
    ///   sees the refresh in progress.
    /// - Does not wait for the response; it arrives later through
    ///   [`Self::apply_response`].
    /// - A closed worker channel is reported as an immediate fetch failure.
    pub fn fetch_inventory(
        &mut self,
        fetch_tx: &mpsc::UnboundedSender<FetchRequest>,
        err_tx: &mpsc::UnboundedSender<String>,
    ) -> u64 {
        self.next_request_id += 1;
        let id = self.next_request_id;
        self.latest_request_id = id;
        self.fetching = true;
        tracing::debug!(id, "dispatching inventory fetch");
        if fetch_tx.send(FetchRequest { id }).is_err() {
            tracing::warn!(id, "fetch worker unavailable");
            self.apply_response(
                FetchResponse {
                    id,
                    result: Err("Inventory fetch worker is not running".to_string()),
                },
                err_tx,
            );
        }
        id
    }

    /// What: Apply a response from the fetch worker.
    ///
    /// Inputs:
    /// - `response`: Worker response tagged with its request id
    /// - `err_tx`: Error sink receiving failure messages
    ///
    /// Output:
    /// - What the store did with the response
    ///
    /// Details:
    /// - Only the latest issued request may change `records` or `fetching`;
    ///   older responses are reported as `Stale`.
    /// - Success replaces the collection wholesale and clears `fetching` in the
    ///   same step.
    /// - Failure clears `fetching` and keeps the last good collection.
    /// - Every failure, stale or not, is sent to `err_tx` exactly once.
    pub fn apply_response(
        &mut self,
        response: FetchResponse,
        err_tx: &mpsc::UnboundedSender<String>,
    ) -> FetchOutcome {
        let FetchResponse { id, result } = response;
        let current = id == self.latest_request_id;
        match result {
            Ok(records) if current => {
                let count = records.len();
                self.records = records;
                self.fetching = false;
                self.last_error = None;
                self.last_synced = Some(Utc::now());
                tracing::info!(id, count, "inventory replaced");
                FetchOutcome::Replaced { count }
            }
            Ok(records) => {
                tracing::debug!(
                    id,
                    latest = self.latest_request_id,
                    count = records.len(),
                    "discarding stale inventory response"
                );
                FetchOutcome::Stale
            }
            Err(msg) => {
                tracing::warn!(id, error = %msg, stale = !current, "inventory fetch failed");
                let _ = err_tx.send(msg.clone());
                if current {
                    self.fetching = false;
                    self.last_error = Some(msg);
                    FetchOutcome::Failed
                } else {
                    FetchOutcome::Stale
                }
            }
        }
    }

    /// Records from the latest applied fetch, in source order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Whether the latest fetch is still outstanding.
    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.fetching
    }

    /// Failure message of the latest fetch, if it failed.
    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// When the collection was last replaced.
    #[must_use]
    pub const fn last_synced(&self) -> Option<DateTime<Utc>> {
        self.last_synced
    }

    /// Identifier of the most recently issued request (0 before the first fetch).
    #[must_use]
    pub const fn latest_request_id(&self) -> u64 {
        self.latest_request_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(code: &str) -> Record {
        Record {
            code: code.into(),
            posted_at: Utc
                .with_ymd_and_hms(2024, 5, 1, 9, 0, 0)
                .single()
                .expect("valid")
                .fixed_offset(),
            name: format!("Item {code}"),
            image_uri: None,
            categories_raw: None,
        }
    }

    #[test]
    /// What: Starting a fetch raises the flag and sends a tagged request.
    ///
    /// Inputs:
    /// - Fresh store and open channels.
    ///
    /// Output:
    /// - `is_fetching()` true immediately; request id 1 on the channel.
    fn fetch_sets_flag_before_dispatch() {
        let mut store = InventoryStore::default();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (err_tx, _err_rx) = mpsc::unbounded_channel();
        let id = store.fetch_inventory(&tx, &err_tx);
        assert!(store.is_fetching());
        assert_eq!(id, 1);
        assert_eq!(rx.try_recv().expect("request sent"), FetchRequest { id: 1 });
    }

    #[test]
    /// What: A successful response replaces the records and clears the flag.
    ///
    /// Inputs:
    /// - Fetch, then response `[A]`.
    ///
    /// Output:
    /// - `records() == [A]`, not fetching, outcome `Replaced`.
    fn success_replaces_records() {
        let mut store = InventoryStore::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let (err_tx, mut err_rx) = mpsc::unbounded_channel();
        let id = store.fetch_inventory(&tx, &err_tx);
        let outcome = store.apply_response(
            FetchResponse {
                id,
                result: Ok(vec![record("A")]),
            },
            &err_tx,
        );
        assert_eq!(outcome, FetchOutcome::Replaced { count: 1 });
        assert_eq!(store.records(), &[record("A")]);
        assert!(!store.is_fetching());
        assert!(store.last_synced().is_some());
        assert!(err_rx.try_recv().is_err());
    }

    #[test]
    /// What: A failure keeps the old records and forwards the error once.
    ///
    /// Inputs:
    /// - Store holding `[A]`; second fetch fails.
    ///
    /// Output:
    /// - Records still `[A]`, not fetching, exactly one error message.
    fn failure_keeps_records_and_reports_once() {
        let mut store = InventoryStore::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let (err_tx, mut err_rx) = mpsc::unbounded_channel();
        let first = store.fetch_inventory(&tx, &err_tx);
        store.apply_response(
            FetchResponse {
                id: first,
                result: Ok(vec![record("A")]),
            },
            &err_tx,
        );
        let second = store.fetch_inventory(&tx, &err_tx);
        let outcome = store.apply_response(
            FetchResponse {
                id: second,
                result: Err("timeout".into()),
            },
            &err_tx,
        );
        assert_eq!(outcome, FetchOutcome::Failed);
        assert!(!store.is_fetching());
        assert_eq!(store.records(), &[record("A")]);
        assert_eq!(store.last_error(), Some("timeout"));
        assert_eq!(err_rx.try_recv().expect("one error"), "timeout");
        assert!(err_rx.try_recv().is_err());
    }

    #[test]
    /// What: With overlapping fetches only the latest response applies.
    ///
    /// Inputs:
    /// - Two fetches; the second response arrives first, then the first.
    ///
    /// Output:
    /// - Records from the second fetch; the late first response is `Stale`.
    fn late_response_from_superseded_fetch_is_ignored() {
        let mut store = InventoryStore::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let (err_tx, _err_rx) = mpsc::unbounded_channel();
        let first = store.fetch_inventory(&tx, &err_tx);
        let second = store.fetch_inventory(&tx, &err_tx);
        store.apply_response(
            FetchResponse {
                id: second,
                result: Ok(vec![record("NEW")]),
            },
            &err_tx,
        );
        let outcome = store.apply_response(
            FetchResponse {
                id: first,
                result: Ok(vec![record("OLD")]),
            },
            &err_tx,
        );
        assert_eq!(outcome, FetchOutcome::Stale);
        assert_eq!(store.records(), &[record("NEW")]);
        assert!(!store.is_fetching());
    }

    #[test]
    /// What: A superseded response does not end the refresh early.
    ///
    /// Inputs:
    /// - Two fetches; only the first response arrives.
    ///
    /// Output:
    /// - Still fetching, records untouched.
    fn stale_response_keeps_flag_raised() {
        let mut store = InventoryStore::default();
        let (tx, _rx) = mpsc::unbounded_channel();
        let (err_tx, mut err_rx) = mpsc::unbounded_channel();
        let first = store.fetch_inventory(&tx, &err_tx);
        let _second = store.fetch_inventory(&tx, &err_tx);
        let outcome = store.apply_response(
            FetchResponse {
                id: first,
                result: Err("boom".into()),
            },
            &err_tx,
        );
        assert_eq!(outcome, FetchOutcome::Stale);
        assert!(store.is_fetching());
        assert!(store.records().is_empty());
        assert!(store.last_error().is_none());
        assert_eq!(err_rx.try_recv().expect("stale failure reported"), "boom");
    }

    #[test]
    /// What: A closed worker channel fails the fetch immediately.
    ///
    /// Inputs:
    /// - Fetch channel whose receiver was dropped.
    ///
    /// Output:
    /// - Not fetching afterwards; one error on the sink.
    fn closed_worker_channel_fails_fetch() {
        let mut store = InventoryStore::default();
        let (tx, rx) = mpsc::unbounded_channel::<FetchRequest>();
        drop(rx);
        let (err_tx, mut err_rx) = mpsc::unbounded_channel();
        store.fetch_inventory(&tx, &err_tx);
        assert!(!store.is_fetching());
        assert!(err_rx.try_recv().is_ok());
        assert!(err_rx.try_recv().is_err());
    }
}
