//! Reactive data layer.
//!
//! [`DataHub`] owns one [`EntityStore`] per entity family and is the
//! single dependency a view needs; there is no global state. Reads
//! degrade to built-in fallback datasets, mutations never do.

mod entity_store;
mod fallback;

pub use entity_store::{EntityStore, FetchOutcome};
pub use fallback::Fallback;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use freightdeck_api::{EtaPrediction, EtaQuote, EtaRequest, Gateway};

use crate::error::CoreError;
use crate::model::{Client, Driver, Product, Shipment, Transporter};
use crate::pricing;

/// Request body for the backend's driver-matching endpoint. The backend
/// looks up the product's weight and filters available drivers by
/// capacity, so `product_id` is the one required field.
#[derive(Debug, Clone, Serialize)]
pub struct DriverMatchRequest {
    pub product_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transport_mode: Option<String>,
}

/// Owns the per-family stores and the shared gateway.
///
/// Construct one per application (or one per test) and hand out
/// references; everything a dashboard view reads or mutates flows
/// through it.
pub struct DataHub {
    pub clients: EntityStore<Client>,
    pub products: EntityStore<Product>,
    pub drivers: EntityStore<Driver>,
    pub transporters: EntityStore<Transporter>,
    pub shipments: EntityStore<Shipment>,
    last_refresh: watch::Sender<Option<DateTime<Utc>>>,
    gateway: Arc<Gateway>,
}

impl DataHub {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        let (last_refresh, _) = watch::channel(None);
        Self {
            clients: EntityStore::new(Arc::clone(&gateway)),
            products: EntityStore::new(Arc::clone(&gateway)),
            drivers: EntityStore::new(Arc::clone(&gateway)),
            transporters: EntityStore::new(Arc::clone(&gateway)),
            shipments: EntityStore::new(Arc::clone(&gateway)),
            last_refresh,
            gateway,
        }
    }

    /// Refresh every collection concurrently.
    ///
    /// Per-store degradation applies independently: one family can be
    /// live while another serves its fallback. Returns `true` if every
    /// collection came back live.
    pub async fn refresh_all(&self) -> bool {
        let (clients, products, drivers, transporters, shipments) = tokio::join!(
            self.clients.fetch_all(),
            self.products.fetch_all(),
            self.drivers.fetch_all(),
            self.transporters.fetch_all(),
            self.shipments.fetch_all(),
        );
        self.last_refresh.send_replace(Some(Utc::now()));

        let all_live = !clients.is_degraded()
            && !products.is_degraded()
            && !drivers.is_degraded()
            && !transporters.is_degraded()
            && !shipments.is_degraded();
        if all_live {
            info!("full refresh complete, all collections live");
        } else {
            warn!("full refresh complete with degraded collections");
        }
        all_live
    }

    /// When the last full refresh finished, if one has run.
    pub fn last_refresh(&self) -> Option<DateTime<Utc>> {
        *self.last_refresh.borrow()
    }

    pub fn subscribe_refresh(&self) -> watch::Receiver<Option<DateTime<Utc>>> {
        self.last_refresh.subscribe()
    }

    /// Probe the backend health endpoint.
    pub async fn is_backend_reachable(&self) -> bool {
        self.gateway.health().await.is_ok()
    }

    // ── Cross-store lookups ─────────────────────────────────────────
    //
    // Shipments carry foreign keys, not embedded records. These resolve
    // them against the current sibling snapshots; a dangling id simply
    // yields None.

    pub fn client_of(&self, shipment: &Shipment) -> Option<Client> {
        self.clients.find(shipment.client_id)
    }

    pub fn product_of(&self, shipment: &Shipment) -> Option<Product> {
        shipment.product_id.and_then(|id| self.products.find(id))
    }

    pub fn driver_of(&self, shipment: &Shipment) -> Option<Driver> {
        shipment.driver_id.and_then(|id| self.drivers.find(id))
    }

    pub fn transporter_of(&self, shipment: &Shipment) -> Option<Transporter> {
        shipment
            .transporter_id
            .and_then(|id| self.transporters.find(id))
    }
}

// ── Shipment-specific operations ────────────────────────────────────

impl EntityStore<Shipment> {
    /// Ask the backend for a route ETA. No fallback: a quote that was
    /// never computed should read as an error, not as data.
    pub async fn calculate_eta(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<EtaQuote, CoreError> {
        let request = EtaRequest {
            origin: origin.to_owned(),
            destination: destination.to_owned(),
        };
        Ok(self.gateway().calculate_eta(&request).await?)
    }

    /// Predict the ETA for a specific shipment.
    ///
    /// Prefers the backend's prediction; if the backend cannot serve it,
    /// degrades to a locally generated estimate so the panel still has
    /// content, flagged with the failure reason.
    pub async fn predict_eta(&self, shipment_id: u64) -> FetchOutcome<EtaPrediction> {
        match self.gateway().predict_eta(shipment_id).await {
            Ok(prediction) => {
                debug!(shipment_id, "prediction served by backend");
                FetchOutcome::Live(prediction)
            }
            Err(err) => {
                let err = CoreError::from(err);
                warn!(shipment_id, error = %err, "prediction failed, generating local estimate");
                FetchOutcome::Degraded {
                    data: pricing::mock_prediction(shipment_id),
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Download the PDF invoice for a shipment. Raw bytes; the caller
    /// decides whether to save or display them.
    pub async fn fetch_invoice(&self, shipment_id: u64) -> Result<Vec<u8>, CoreError> {
        Ok(self.gateway().invoice(shipment_id).await?)
    }

    /// Ask the backend for the best available driver for a planned
    /// shipment. The backend filters by availability and capacity and
    /// picks the highest-rated match.
    pub async fn optimal_driver(&self, request: &DriverMatchRequest) -> Result<Driver, CoreError> {
        Ok(self.gateway().optimal_driver(request).await?)
    }
}
