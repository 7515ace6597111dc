//! LiveKit Access Tokens
//!
//! Server API calls are authorised with a short-lived HS256 JWT signed by
//! the API secret and carrying a video grant.

use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Lifetime of a server API token (10 minutes)
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 600;

/// Video grant permissions
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoGrant {
    #[serde(default)]
    pub ingress_admin: bool,
}

/// JWT claims understood by the LiveKit server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Issuer (LiveKit API key)
    pub iss: String,
    /// Not before (Unix timestamp)
    pub nbf: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    pub video: VideoGrant,
}

/// Signs server API tokens for one API key/secret pair
#[derive(Clone)]
pub struct AccessToken {
    api_key: String,
    api_secret: String,
    ttl_secs: i64,
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("api_key", &self.api_key)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

impl AccessToken {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }

    pub fn with_ttl_secs(mut self, ttl_secs: i64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    /// Build claims granting ingress administration, valid from now
    pub fn ingress_admin_claims(&self) -> AccessClaims {
        let now = Utc::now().timestamp();
        AccessClaims {
            iss: self.api_key.clone(),
            nbf: now,
            exp: now + self.ttl_secs,
            video: VideoGrant {
                ingress_admin: true,
            },
        }
    }

    /// Sign a fresh ingress-admin token
    pub fn ingress_admin_jwt(&self) -> Result<String, ServiceError> {
        let claims = self.ingress_admin_claims();
        let key = EncodingKey::from_secret(self.api_secret.as_bytes());
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
    }
}
