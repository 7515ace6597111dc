//! Lornu AI Ingress Gateway Library
//!
//! Opens and tears down LiveKit ingress sessions for streaming rooms.
//!
//! ## Binaries
//!
//! - `ingress-api`: tRPC-style HTTP endpoint (`ingress.create`, `ingress.deleteAll`, `ingress.list`)
//! - `ingress-admin`: operator CLI over the same gateway

pub mod config;
pub mod error;
pub mod ingress;
pub mod livekit;
pub mod routes;
#[cfg(feature = "gsm")]
pub mod secrets;

#[cfg(test)]
mod testing;

pub use error::{IngressError, IngressResult, ServiceError, ValidationErrors};
pub use ingress::{CreateIngressRequest, IngressGateway};
pub use livekit::{IngressClient, IngressInfo, LiveKitIngressClient};
pub use routes::build_router;
