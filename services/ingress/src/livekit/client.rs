//! LiveKit Ingress Client
//!
//! `IngressClient` is the seam the gateway talks through. The LiveKit
//! implementation speaks the Twirp JSON protocol of the server API.

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::token::AccessToken;
use super::types::{CreateIngressOptions, IngressInfo, IngressInput};
use crate::error::ServiceError;

const INGRESS_SERVICE: &str = "twirp/livekit.Ingress";

/// Ingress management operations offered by the media platform
#[async_trait]
pub trait IngressClient: Send + Sync {
    /// Create an ingress for the given input protocol
    async fn create_ingress(
        &self,
        input: IngressInput,
        options: CreateIngressOptions,
    ) -> Result<IngressInfo, ServiceError>;

    /// List every ingress visible to the configured credentials
    async fn list_ingress(&self) -> Result<Vec<IngressInfo>, ServiceError>;

    /// Delete one ingress by ID
    async fn delete_ingress(&self, ingress_id: &str) -> Result<(), ServiceError>;
}

// ============================================================
// Twirp Request/Response Types
// ============================================================

#[derive(Debug, Serialize)]
struct CreateIngressBody<'a> {
    input_type: IngressInput,
    #[serde(flatten)]
    options: &'a CreateIngressOptions,
}

#[derive(Debug, Serialize)]
struct ListIngressBody {}

#[derive(Debug, Serialize)]
struct DeleteIngressBody<'a> {
    ingress_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct ListIngressResponse {
    #[serde(default)]
    items: Vec<IngressInfo>,
}

#[derive(Debug, Deserialize)]
struct TwirpError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    msg: String,
}

// ============================================================
// Client Implementation
// ============================================================

/// LiveKit server API client for the `livekit.Ingress` service
#[derive(Debug, Clone)]
pub struct LiveKitIngressClient {
    http_client: Client,
    base_url: String,
    token: AccessToken,
}

impl LiveKitIngressClient {
    /// Create a client for a LiveKit host (`https://`, `http://`, `wss://` or `ws://`)
    pub fn new(
        host: &str,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Result<Self, ServiceError> {
        let http_client = Client::builder()
            .user_agent(concat!("lornu-ingress/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http_client,
            base_url: http_base_url(host),
            token: AccessToken::new(api_key, api_secret),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn call<B, T>(&self, method: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.base_url, INGRESS_SERVICE, method);
        let jwt = self.token.ingress_admin_jwt()?;

        debug!(%url, "Calling LiveKit");

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(jwt)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let error = serde_json::from_slice::<TwirpError>(&bytes).unwrap_or_else(|_| TwirpError {
                code: "unknown".to_string(),
                msg: String::from_utf8_lossy(&bytes).into_owned(),
            });
            return Err(ServiceError::Twirp {
                status: status.as_u16(),
                code: error.code,
                msg: error.msg,
            });
        }

        let payload: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
        serde_json::from_slice(payload)
            .map_err(|e| ServiceError::Decode(format!("{}: {}", method, e)))
    }
}

#[async_trait]
impl IngressClient for LiveKitIngressClient {
    async fn create_ingress(
        &self,
        input: IngressInput,
        options: CreateIngressOptions,
    ) -> Result<IngressInfo, ServiceError> {
        let body = CreateIngressBody {
            input_type: input,
            options: &options,
        };
        self.call("CreateIngress", &body).await
    }

    async fn list_ingress(&self) -> Result<Vec<IngressInfo>, ServiceError> {
        let response: ListIngressResponse = self.call("ListIngress", &ListIngressBody {}).await?;
        Ok(response.items)
    }

    async fn delete_ingress(&self, ingress_id: &str) -> Result<(), ServiceError> {
        let _: serde_json::Value = self
            .call("DeleteIngress", &DeleteIngressBody { ingress_id })
            .await?;
        Ok(())
    }
}

/// Normalise a LiveKit host into an HTTP base URL
fn http_base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if let Some(rest) = host.strip_prefix("wss://") {
        format!("https://{}", rest)
    } else if let Some(rest) = host.strip_prefix("ws://") {
        format!("http://{}", rest)
    } else {
        host.to_string()
    }
}
