// freightdeck-api: Async Rust client for the Freightdeck logistics backend

pub mod auth;
pub mod error;
pub mod gateway;
pub mod transport;
pub mod types;

pub use auth::CredentialStore;
pub use error::Error;
pub use gateway::Gateway;
pub use transport::GatewayConfig;
pub use types::{EntityKind, EtaPrediction, EtaQuote, EtaRequest, HealthStatus, UploadReceipt};
