//! Google Secret Manager Integration
//!
//! Resolves the LiveKit API secret at startup using Application Default
//! Credentials (ADC):
//! - Local: `gcloud auth application-default login`
//! - GKE: Workload Identity
//! - Cloud Run: Service account

use anyhow::{Context, Result};
use gcloud_sdk::google::cloud::secretmanager::v1::secret_manager_service_client::SecretManagerServiceClient;
use gcloud_sdk::google::cloud::secretmanager::v1::AccessSecretVersionRequest;
use gcloud_sdk::{GoogleApi, GoogleAuthMiddleware};
use tracing::{debug, info};

/// Secret Manager client scoped to one GCP project
pub struct SecretManager {
    client: GoogleApi<SecretManagerServiceClient<GoogleAuthMiddleware>>,
    project_id: String,
}

impl SecretManager {
    pub async fn new(project_id: &str) -> Result<Self> {
        debug!(project = project_id, "Initializing GSM client");

        let client = GoogleApi::from_function(
            SecretManagerServiceClient::new,
            "https://secretmanager.googleapis.com",
            None,
        )
        .await
        .context("Failed to initialize GSM client")?;

        Ok(Self {
            client,
            project_id: project_id.to_string(),
        })
    }

    /// Latest version of `secret_name`, with surrounding whitespace trimmed
    pub async fn latest(&self, secret_name: &str) -> Result<String> {
        let name = secret_version_name(&self.project_id, secret_name);
        debug!(secret = %name, "Fetching secret");

        let response = self
            .client
            .get()
            .access_secret_version(AccessSecretVersionRequest { name })
            .await
            .context("Failed to access secret version")?;

        let payload = response
            .into_inner()
            .payload
            .context("Secret has no payload")?;

        let value = payload.data.as_sensitive_str().trim().to_string();
        if value.is_empty() {
            anyhow::bail!("Secret {} is empty", secret_name);
        }

        info!(secret = secret_name, "LiveKit API secret loaded from GSM");
        Ok(value)
    }
}

fn secret_version_name(project_id: &str, secret_name: &str) -> String {
    format!(
        "projects/{}/secrets/{}/versions/latest",
        project_id, secret_name
    )
}
