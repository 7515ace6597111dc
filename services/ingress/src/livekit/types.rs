//! LiveKit Ingress Types
//!
//! Wire types for the `livekit.Ingress` Twirp service. Enum variants
//! serialise to their protobuf names, which the server accepts in JSON.

use serde::{Deserialize, Serialize};

/// Ingress input protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IngressInput {
    #[serde(rename = "RTMP_INPUT")]
    Rtmp,
    #[serde(rename = "WHIP_INPUT")]
    Whip,
    #[serde(rename = "URL_INPUT")]
    Url,
}

impl std::fmt::Display for IngressInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IngressInput::Rtmp => write!(f, "RTMP_INPUT"),
            IngressInput::Whip => write!(f, "WHIP_INPUT"),
            IngressInput::Url => write!(f, "URL_INPUT"),
        }
    }
}

/// Source of a published track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrackSource {
    Unknown,
    Camera,
    Microphone,
    ScreenShare,
    ScreenShareAudio,
}

/// Server-side video transcoding presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum IngressVideoEncodingPreset {
    H264_720P_30FPS_3_LAYERS,
    H264_1080P_30FPS_3_LAYERS,
    H264_540P_25FPS_2_LAYERS,
    H264_720P_30FPS_1_LAYER,
    H264_1080P_30FPS_1_LAYER,
    H264_720P_30FPS_3_LAYERS_HIGH_MOTION,
    H264_1080P_30FPS_3_LAYERS_HIGH_MOTION,
    H264_540P_25FPS_2_LAYERS_HIGH_MOTION,
    H264_720P_30FPS_1_LAYER_HIGH_MOTION,
    H264_1080P_30FPS_1_LAYER_HIGH_MOTION,
}

/// Server-side audio transcoding presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum IngressAudioEncodingPreset {
    OPUS_STEREO_96KBPS,
    // Spelling matches the LiveKit protocol definition.
    OPUS_MONO_64KBS,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressVideoOptions {
    pub source: TrackSource,
    pub preset: IngressVideoEncodingPreset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngressAudioOptions {
    pub source: TrackSource,
    pub preset: IngressAudioEncodingPreset,
}

/// Options for `CreateIngress`, serialised with protobuf field names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIngressOptions {
    pub name: String,
    pub room_name: String,
    pub participant_identity: String,
    pub participant_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub bypass_transcoding: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<IngressVideoOptions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<IngressAudioOptions>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// An ingress as described by LiveKit.
///
/// Only the fields this service reads are typed; everything else is kept in
/// `extra` so responses can be relayed unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IngressInfo {
    #[serde(default, alias = "ingress_id", skip_serializing_if = "Option::is_none")]
    pub ingress_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "room_name", skip_serializing_if = "Option::is_none")]
    pub room_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, alias = "stream_key", skip_serializing_if = "Option::is_none")]
    pub stream_key: Option<String>,
    #[serde(default, alias = "input_type", skip_serializing_if = "Option::is_none")]
    pub input_type: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl IngressInfo {
    /// Ingress ID, treating an empty string as absent
    pub fn id(&self) -> Option<&str> {
        self.ingress_id.as_deref().filter(|id| !id.is_empty())
    }

    /// Input type as a protobuf name; the server may send names or numbers
    pub fn input_type_label(&self) -> String {
        match &self.input_type {
            Some(serde_json::Value::String(name)) => name.clone(),
            Some(serde_json::Value::Number(n)) => match n.as_u64() {
                Some(0) => IngressInput::Rtmp.to_string(),
                Some(1) => IngressInput::Whip.to_string(),
                Some(2) => IngressInput::Url.to_string(),
                _ => n.to_string(),
            },
            // Protobuf JSON omits zero-valued enums.
            None => IngressInput::Rtmp.to_string(),
            Some(other) => other.to_string(),
        }
    }
}
