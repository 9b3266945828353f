//! Domain model for the freight dashboard.
//!
//! Each entity family has three shapes: the canonical record, a `New*`
//! draft for creation, and a `*Patch` for partial updates. The
//! [`Resource`] trait ties the three together so the store layer can be
//! written once and instantiated per family.

mod client;
mod common;
mod driver;
mod product;
mod shipment;
mod transporter;

pub use client::{Client, ClientPatch, ClientTier, NewClient};
pub use common::{AccountStatus, Dimensions, LOW_RISK_MAX, MEDIUM_RISK_MAX, RiskLevel};
pub use driver::{Driver, DriverPatch, NewDriver};
pub use product::{NewProduct, Product, ProductPatch};
pub use shipment::{NewShipment, Shipment, ShipmentPatch, ShipmentStatus};
pub use transporter::{NewTransporter, Transporter, TransporterPatch};

use freightdeck_api::EntityKind;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// An entity family served by the backend's uniform CRUD surface.
///
/// `KIND` names the route segment; `Draft` and `Patch` are the request
/// bodies for create and update. Every record carries a server-assigned
/// numeric id.
pub trait Resource:
    Serialize + DeserializeOwned + Clone + Send + Sync + 'static
{
    const KIND: EntityKind;
    type Draft: Serialize + Send + Sync;
    type Patch: Serialize + Send + Sync;

    fn id(&self) -> u64;
}

impl Resource for Client {
    const KIND: EntityKind = EntityKind::Clients;
    type Draft = NewClient;
    type Patch = ClientPatch;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Product {
    const KIND: EntityKind = EntityKind::Products;
    type Draft = NewProduct;
    type Patch = ProductPatch;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Driver {
    const KIND: EntityKind = EntityKind::Drivers;
    type Draft = NewDriver;
    type Patch = DriverPatch;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Transporter {
    const KIND: EntityKind = EntityKind::Transporters;
    type Draft = NewTransporter;
    type Patch = TransporterPatch;

    fn id(&self) -> u64 {
        self.id
    }
}

impl Resource for Shipment {
    const KIND: EntityKind = EntityKind::Shipments;
    type Draft = NewShipment;
    type Patch = ShipmentPatch;

    fn id(&self) -> u64 {
        self.id
    }
}
