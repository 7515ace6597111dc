//! LiveKit Server API
//!
//! Typed access to the `livekit.Ingress` Twirp service.
//!
//! ## Authentication
//!
//! Every call carries a freshly signed HS256 token with the `ingressAdmin`
//! video grant. The API secret never leaves this module.

mod client;
mod token;
mod types;

pub use client::{IngressClient, LiveKitIngressClient};
pub use token::{AccessClaims, AccessToken, VideoGrant, DEFAULT_TOKEN_TTL_SECS};
pub use types::{
    CreateIngressOptions, IngressAudioEncodingPreset, IngressAudioOptions, IngressInfo,
    IngressInput, IngressVideoEncodingPreset, IngressVideoOptions, TrackSource,
};
