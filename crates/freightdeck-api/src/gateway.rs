// Hand-crafted async HTTP client for the Freightdeck backend.
//
// One reqwest::Client, one base URL, 10s timeout. The bearer credential
// is read from the shared CredentialStore before every request, and every
// response passes through a single status-code policy.

use std::sync::Arc;

use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use crate::auth::CredentialStore;
use crate::error::Error;
use crate::transport::GatewayConfig;
use crate::types::{EntityKind, EtaPrediction, EtaQuote, EtaRequest, HealthStatus, UploadReceipt};

// ── Error response shape from the backend ────────────────────────────

#[derive(serde::Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    detail: Option<String>,
}

// ── Gateway ──────────────────────────────────────────────────────────

/// Async client for the Freightdeck REST backend.
///
/// Communicates via JSON under a uniform per-collection pattern, plus a
/// handful of shipment-specific operations. Status-code handling is
/// centralized in [`fail`](Gateway::fail): a 401 revokes the stored
/// credential, 403 and 5xx are logged, and every branch re-raises so the
/// calling store applies its own success/failure policy.
pub struct Gateway {
    http: reqwest::Client,
    base_url: Url,
    credentials: Arc<CredentialStore>,
}

impl Gateway {
    // ── Constructors ─────────────────────────────────────────────────

    pub fn new(config: &GatewayConfig, credentials: Arc<CredentialStore>) -> Result<Self, Error> {
        let http = config.build_client()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            credentials,
        })
    }

    /// Wrap an existing `reqwest::Client` (tests inject one here).
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        credentials: Arc<CredentialStore>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
        }
    }

    pub fn credentials(&self) -> &Arc<CredentialStore> {
        &self.credentials
    }

    // ── URL / request builders ───────────────────────────────────────

    /// Join a relative path (e.g. `"clients/7"`) onto the base URL.
    fn url(&self, path: &str) -> Result<Url, Error> {
        // base_url always ends with `/`, so joining a relative path works.
        Ok(self.base_url.join(path)?)
    }

    /// Start a request and attach the bearer credential if one is held.
    fn request(&self, method: reqwest::Method, url: Url) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, url);
        match self.credentials.bearer() {
            Some(bearer) => builder.header(AUTHORIZATION, bearer),
            None => builder,
        }
    }

    // ── HTTP verbs ───────────────────────────────────────────────────

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("GET {url}");

        let resp = self.request(reqwest::Method::GET, url).send().await?;
        self.handle_response(resp).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("POST {url}");

        let resp = self
            .request(reqwest::Method::POST, url)
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn put_json<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let url = self.url(path)?;
        debug!("PUT {url}");

        let resp = self
            .request(reqwest::Method::PUT, url)
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn delete_empty(&self, path: &str) -> Result<(), Error> {
        let url = self.url(path)?;
        debug!("DELETE {url}");

        let resp = self.request(reqwest::Method::DELETE, url).send().await?;
        self.handle_empty(resp).await
    }

    async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, Error> {
        let url = self.url(path)?;
        debug!("GET {url} (binary)");

        let resp = self.request(reqwest::Method::GET, url).send().await?;
        let status = resp.status();
        if status.is_success() {
            Ok(resp.bytes().await?.to_vec())
        } else {
            Err(self.fail(status, resp).await)
        }
    }

    // ── Response handling ────────────────────────────────────────────

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                // Truncate on a char boundary; a fixed byte offset would
                // panic on multibyte content.
                let mut cut = body.len().min(200);
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                let preview = &body[..cut];
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            Err(self.fail(status, resp).await)
        }
    }

    async fn handle_empty(&self, resp: reqwest::Response) -> Result<(), Error> {
        let status = resp.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(self.fail(status, resp).await)
        }
    }

    /// Central status-code policy. Every branch re-raises after its side
    /// effect so callers always see the failure.
    async fn fail(&self, status: reqwest::StatusCode, resp: reqwest::Response) -> Error {
        let path = resp.url().path().to_owned();
        let raw = resp.text().await.unwrap_or_default();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            // The session is over: drop the credential and tell the outer
            // layer to steer the user back to sign-in.
            warn!("401 from {path} -- revoking stored credential");
            self.credentials.revoke();
            return Error::Unauthorized;
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            error!("access forbidden: {path}");
            return Error::Forbidden;
        }

        if status.is_server_error() {
            error!("server fault {status} at {path}: {raw}");
            return Error::ServerFault {
                status: status.as_u16(),
                body: raw,
            };
        }

        let detail = serde_json::from_str::<ErrorResponse>(&raw)
            .ok()
            .and_then(|e| e.detail)
            .unwrap_or_else(|| {
                if raw.is_empty() {
                    status.to_string()
                } else {
                    raw
                }
            });
        Error::Rejected {
            status: status.as_u16(),
            detail,
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    // ── Uniform per-collection endpoints ─────────────────────────────

    /// `GET /{kind}` -- the full collection.
    pub async fn list<T: DeserializeOwned>(&self, kind: EntityKind) -> Result<Vec<T>, Error> {
        self.get_json(kind.as_path()).await
    }

    /// `GET /{kind}/{id}`.
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        kind: EntityKind,
        id: u64,
    ) -> Result<T, Error> {
        self.get_json(&format!("{kind}/{id}")).await
    }

    /// `POST /{kind}` -- create from a draft (entity minus id/created_at).
    /// Returns the record with its server-assigned id.
    pub async fn create<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        kind: EntityKind,
        draft: &B,
    ) -> Result<T, Error> {
        self.post_json(kind.as_path(), draft).await
    }

    /// `PUT /{kind}/{id}` -- partial patch, returns the updated record.
    pub async fn update<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        kind: EntityKind,
        id: u64,
        patch: &B,
    ) -> Result<T, Error> {
        self.put_json(&format!("{kind}/{id}"), patch).await
    }

    /// `DELETE /{kind}/{id}`.
    pub async fn delete(&self, kind: EntityKind, id: u64) -> Result<(), Error> {
        self.delete_empty(&format!("{kind}/{id}")).await
    }

    /// `POST /upload/{kind}` -- bulk CSV import as a multipart `file` part.
    pub async fn upload(
        &self,
        kind: EntityKind,
        content: Vec<u8>,
        filename: &str,
    ) -> Result<UploadReceipt, Error> {
        let url = self.url(&format!("upload/{kind}"))?;
        debug!("POST {url} (multipart, {} bytes)", content.len());

        let part = reqwest::multipart::Part::bytes(content)
            .file_name(filename.to_owned())
            .mime_str("text/csv")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .request(reqwest::Method::POST, url)
            .multipart(form)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    // ── Shipment-specific operations ─────────────────────────────────

    /// `POST /shipments/calculate-eta`.
    pub async fn calculate_eta(&self, request: &EtaRequest) -> Result<EtaQuote, Error> {
        self.post_json("shipments/calculate-eta", request).await
    }

    /// `POST /shipments/{id}/predict-eta` -- the AI prediction path.
    pub async fn predict_eta(&self, shipment_id: u64) -> Result<EtaPrediction, Error> {
        self.post_json(
            &format!("shipments/{shipment_id}/predict-eta"),
            &serde_json::json!({ "shipment_id": shipment_id }),
        )
        .await
    }

    /// `GET /shipments/{id}/invoice` -- binary invoice document.
    pub async fn invoice(&self, shipment_id: u64) -> Result<Vec<u8>, Error> {
        self.get_bytes(&format!("shipments/{shipment_id}/invoice"))
            .await
    }

    /// `POST /shipments/optimal-driver` -- shipment attributes in, the
    /// best-matching driver out.
    pub async fn optimal_driver<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        shipment: &B,
    ) -> Result<T, Error> {
        self.post_json("shipments/optimal-driver", shipment).await
    }

    // ── Health ───────────────────────────────────────────────────────

    /// `GET /health` -- reachability probe only, never data.
    pub async fn health(&self) -> Result<HealthStatus, Error> {
        self.get_json("health").await
    }
}
