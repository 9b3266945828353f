// ── Generic reactive entity store ──
//
// One store per entity family. Holds the current collection behind a
// `watch` channel so views re-render on change, and degrades to the
// built-in fallback dataset when the backend cannot serve a read.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, warn};

use freightdeck_api::{Gateway, UploadReceipt};

use super::fallback::Fallback;
use crate::error::CoreError;
use crate::model::Resource;

/// Outcome of a read that may fall back to the built-in dataset.
///
/// `Live` data came from the backend; `Degraded` data is the local
/// fallback, with the reason the backend could not serve the read.
/// Callers can always render `data()`, and can surface the degradation
/// separately instead of treating it as a hard failure.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<D> {
    Live(D),
    Degraded { data: D, reason: String },
}

impl<D> FetchOutcome<D> {
    pub fn data(&self) -> &D {
        match self {
            Self::Live(data) | Self::Degraded { data, .. } => data,
        }
    }

    pub fn into_data(self) -> D {
        match self {
            Self::Live(data) | Self::Degraded { data, .. } => data,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    /// The degradation reason, if any.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Live(_) => None,
            Self::Degraded { reason, .. } => Some(reason.as_str()),
        }
    }
}

/// Reactive store for one entity family.
///
/// The snapshot is an `Arc<Vec<T>>` rebuilt on every mutation; order is
/// preserved (creates append, updates patch in place, deletes keep the
/// remaining order), so subscribers can render it directly.
pub struct EntityStore<T: Resource + Fallback> {
    gateway: Arc<Gateway>,
    snapshot: watch::Sender<Arc<Vec<T>>>,
    /// Message of the most recent failed operation, cleared by the next
    /// successful refresh.
    last_error: watch::Sender<Option<String>>,
}

impl<T: Resource + Fallback> EntityStore<T> {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        let (last_error, _) = watch::channel(None);
        Self {
            gateway,
            snapshot,
            last_error,
        }
    }

    pub(crate) fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// Current collection (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        self.snapshot.borrow().clone()
    }

    /// Subscribe to collection changes.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<T>>> {
        self.snapshot.subscribe()
    }

    /// The most recent operation failure, if the store is in an error state.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.borrow().clone()
    }

    /// Subscribe to error-state changes.
    pub fn subscribe_errors(&self) -> watch::Receiver<Option<String>> {
        self.last_error.subscribe()
    }

    fn replace(&self, items: Vec<T>) {
        self.snapshot.send_replace(Arc::new(items));
    }

    fn record_failure(&self, err: &CoreError) {
        self.last_error.send_replace(Some(err.to_string()));
    }

    fn clear_failure(&self) {
        if self.last_error.borrow().is_some() {
            self.last_error.send_replace(None);
        }
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Fetch the full collection and replace the snapshot.
    ///
    /// Any backend failure degrades to the built-in fallback dataset
    /// instead of surfacing an error: the dashboard always has something
    /// to show. The failure is recorded in `last_error` and in the
    /// returned outcome's reason.
    pub async fn fetch_all(&self) -> FetchOutcome<Arc<Vec<T>>> {
        match self.gateway.list::<T>(T::KIND).await {
            Ok(items) => {
                debug!(kind = %T::KIND, count = items.len(), "collection refreshed");
                self.replace(items);
                self.clear_failure();
                FetchOutcome::Live(self.snapshot())
            }
            Err(err) => {
                let err = CoreError::from(err);
                warn!(kind = %T::KIND, error = %err, "fetch failed, serving fallback dataset");
                self.record_failure(&err);
                self.replace(T::fallback_dataset());
                FetchOutcome::Degraded {
                    data: self.snapshot(),
                    reason: err.to_string(),
                }
            }
        }
    }

    // ── Mutations ───────────────────────────────────────────────────
    //
    // Mutations never fall back. A failed write re-raises and leaves the
    // snapshot untouched, so the collection never contains records the
    // backend does not know about.

    /// Create a record and append the server-assigned result.
    pub async fn create(&self, draft: &T::Draft) -> Result<T, CoreError> {
        match self.gateway.create::<T, _>(T::KIND, draft).await {
            Ok(created) => {
                self.snapshot.send_modify(|snap| {
                    let mut items = snap.as_ref().clone();
                    items.push(created.clone());
                    *snap = Arc::new(items);
                });
                Ok(created)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Update a record in place, preserving its position.
    ///
    /// If the returned record's id is not in the snapshot (deleted by
    /// another session), the snapshot is left unchanged.
    pub async fn update(&self, id: u64, patch: &T::Patch) -> Result<T, CoreError> {
        match self.gateway.update::<T, _>(T::KIND, id, patch).await {
            Ok(updated) => {
                self.snapshot.send_modify(|snap| {
                    if let Some(pos) = snap.iter().position(|item| item.id() == id) {
                        let mut items = snap.as_ref().clone();
                        items[pos] = updated.clone();
                        *snap = Arc::new(items);
                    }
                });
                Ok(updated)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Delete a record and drop it from the snapshot.
    pub async fn delete(&self, id: u64) -> Result<(), CoreError> {
        match self.gateway.delete(T::KIND, id).await {
            Ok(()) => {
                self.snapshot.send_modify(|snap| {
                    if snap.iter().any(|item| item.id() == id) {
                        let mut items = snap.as_ref().clone();
                        items.retain(|item| item.id() != id);
                        *snap = Arc::new(items);
                    }
                });
                Ok(())
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Upload a CSV batch, then refetch the collection so the snapshot
    /// reflects whatever subset the backend accepted.
    pub async fn upload_batch(
        &self,
        filename: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadReceipt, CoreError> {
        match self.gateway.upload(T::KIND, bytes, filename).await {
            Ok(receipt) => {
                debug!(kind = %T::KIND, count = receipt.count, "batch accepted, refetching");
                self.fetch_all().await;
                Ok(receipt)
            }
            Err(err) => {
                let err = CoreError::from(err);
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    /// Look up a record in the current snapshot.
    pub fn find(&self, id: u64) -> Option<T> {
        self.snapshot
            .borrow()
            .iter()
            .find(|item| item.id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }
}
