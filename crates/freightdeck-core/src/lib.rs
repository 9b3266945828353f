//! Reactive data layer between `freightdeck-api` and dashboard views.
//!
//! This crate owns the domain model, the reactive stores, and the pure
//! computation the logistics dashboard renders:
//!
//! - **[`DataHub`]** — One store per entity family behind a single
//!   handle. [`refresh_all()`](DataHub::refresh_all) pulls every
//!   collection concurrently; cross-store lookups resolve a shipment's
//!   foreign keys against the sibling snapshots.
//!
//! - **[`EntityStore<T>`]** — Reactive collection storage built on
//!   `tokio::sync::watch` snapshots. Reads degrade to built-in fallback
//!   datasets ([`FetchOutcome`] says which world you got); mutations
//!   never fall back and re-raise on failure.
//!
//! - **Domain model** ([`model`]) — Canonical records (`Client`,
//!   `Transporter`, `Shipment`, ...) with `New*` drafts and `*Patch`
//!   partial updates, tied together by the [`Resource`] trait.
//!
//! - **[`analytics`]** — Pure aggregation over snapshots: grouping,
//!   risk breakdowns, rankings, and declarative table queries.
//!
//! - **[`pricing`]** — The two cost models and the local ETA
//!   placeholder used when the prediction backend is down.
//!
//! - **[`export`]** — CSV report generation with real quoting.

pub mod analytics;
pub mod error;
pub mod export;
pub mod model;
pub mod pricing;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use error::CoreError;
pub use store::{DataHub, DriverMatchRequest, EntityStore, Fallback, FetchOutcome};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    AccountStatus, Client, ClientPatch, ClientTier, Dimensions, Driver, DriverPatch, NewClient,
    NewDriver, NewProduct, NewShipment, NewTransporter, Product, ProductPatch, Resource, RiskLevel,
    Shipment, ShipmentPatch, ShipmentStatus, Transporter, TransporterPatch,
};

// Protocol types consumers need without depending on the api crate
// directly.
pub use freightdeck_api::{EtaPrediction, EtaQuote, HealthStatus, UploadReceipt};
