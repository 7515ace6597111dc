//! Ingress Gateway
//!
//! Turns a validated streaming request into a LiveKit ingress and tears
//! ingresses down again.
//!
//! The room slug doubles as ingress name, room name and participant
//! identity. Callers cannot set these independently.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::{IngressResult, ValidationErrors};
use crate::livekit::{
    CreateIngressOptions, IngressAudioEncodingPreset, IngressAudioOptions, IngressClient,
    IngressInfo, IngressInput, IngressVideoEncodingPreset, IngressVideoOptions, TrackSource,
};

/// Lowercase alphanumeric segments joined by single hyphens, starting with a letter
pub const ROOM_SLUG_PATTERN: &str = r"^([a-z][a-z0-9]*)(-[a-z0-9]+)*$";

/// Minimum length for both the room slug and the streamer name
pub const MIN_FIELD_LEN: usize = 3;

static ROOM_SLUG: Lazy<Regex> =
    Lazy::new(|| Regex::new(ROOM_SLUG_PATTERN).expect("room slug pattern is valid"));

/// Length in UTF-16 code units, matching how browser clients measure input
fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Video profile for transcoded (RTMP) ingress
pub const RTMP_VIDEO: IngressVideoOptions = IngressVideoOptions {
    source: TrackSource::Camera,
    preset: IngressVideoEncodingPreset::H264_1080P_30FPS_3_LAYERS,
};

/// Audio profile for transcoded (RTMP) ingress
pub const RTMP_AUDIO: IngressAudioOptions = IngressAudioOptions {
    source: TrackSource::Microphone,
    preset: IngressAudioEncodingPreset::OPUS_STEREO_96KBPS,
};

/// Request to open an ingress for a streaming room
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIngressRequest {
    pub room_slug: String,
    pub streamer_name: String,
    pub is_whip: bool,
}

impl CreateIngressRequest {
    pub fn new(room_slug: impl Into<String>, streamer_name: impl Into<String>, is_whip: bool) -> Self {
        Self {
            room_slug: room_slug.into(),
            streamer_name: streamer_name.into(),
            is_whip,
        }
    }

    /// Check field shapes, collecting every failure
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();

        if !ROOM_SLUG.is_match(&self.room_slug) {
            errors.push(
                "roomSlug",
                "Must be lowercase letters and digits in hyphen-separated segments, starting with a letter",
            );
        }
        if utf16_len(&self.room_slug) < MIN_FIELD_LEN {
            errors.push(
                "roomSlug",
                format!("Must contain at least {} characters", MIN_FIELD_LEN),
            );
        }
        if utf16_len(&self.streamer_name) < MIN_FIELD_LEN {
            errors.push(
                "streamerName",
                format!("Must contain at least {} characters", MIN_FIELD_LEN),
            );
        }

        errors.into_result()
    }

    pub fn input_type(&self) -> IngressInput {
        if self.is_whip {
            IngressInput::Whip
        } else {
            IngressInput::Rtmp
        }
    }

    /// Build the `CreateIngress` options for this request.
    ///
    /// WHIP publishers push a stream LiveKit can forward as-is, so
    /// transcoding is bypassed and no presets are attached. RTMP gets the
    /// fixed camera/microphone profiles.
    pub fn to_options(&self) -> CreateIngressOptions {
        let mut options = CreateIngressOptions {
            name: self.room_slug.clone(),
            room_name: self.room_slug.clone(),
            participant_identity: self.room_slug.clone(),
            participant_name: self.streamer_name.clone(),
            ..Default::default()
        };

        if self.is_whip {
            options.bypass_transcoding = true;
        } else {
            options.video = Some(RTMP_VIDEO);
            options.audio = Some(RTMP_AUDIO);
        }

        options
    }
}

/// Create/list/delete facade over an [`IngressClient`]
#[derive(Clone)]
pub struct IngressGateway {
    client: Arc<dyn IngressClient>,
}

impl IngressGateway {
    pub fn new(client: Arc<dyn IngressClient>) -> Self {
        Self { client }
    }

    /// Validate the request and create the ingress, returning LiveKit's
    /// description unchanged. Nothing is sent when validation fails.
    pub async fn create(&self, request: &CreateIngressRequest) -> IngressResult<IngressInfo> {
        if let Err(errors) = request.validate() {
            warn!(room = %request.room_slug, %errors, "Rejected ingress request");
            return Err(errors.into());
        }

        let input = request.input_type();
        info!(room = %request.room_slug, input = %input, "Creating ingress");

        let ingress = self
            .client
            .create_ingress(input, request.to_options())
            .await?;

        info!(
            room = %request.room_slug,
            ingress_id = ingress.id().unwrap_or("-"),
            "Ingress created"
        );
        Ok(ingress)
    }

    pub async fn list(&self) -> IngressResult<Vec<IngressInfo>> {
        Ok(self.client.list_ingress().await?)
    }

    /// Delete every listed ingress, one at a time, in listing order.
    ///
    /// Entries without an ID are skipped. The first failed delete stops the
    /// loop and is returned; later entries are left untouched. Returns the
    /// number of ingresses deleted.
    pub async fn delete_all(&self) -> IngressResult<usize> {
        let ingresses = self.client.list_ingress().await?;
        let mut deleted = 0;

        for ingress in &ingresses {
            let Some(ingress_id) = ingress.id() else {
                debug!(name = ?ingress.name, "Skipping ingress without an ID");
                continue;
            };

            info!(ingress_id, "Deleting ingress");
            self.client.delete_ingress(ingress_id).await?;
            deleted += 1;
        }

        info!(deleted, listed = ingresses.len(), "Deleted all ingresses");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngressError;
    use crate::testing::{Call, RecordingClient};

    fn gateway(client: &Arc<RecordingClient>) -> IngressGateway {
        IngressGateway::new(client.clone())
    }

    #[test]
    fn test_valid_room_slugs() {
        for slug in ["abc", "studio-a", "a1-b2-c3", "room42", "x-1"] {
            let request = CreateIngressRequest::new(slug, "Alex", false);
            assert!(request.validate().is_ok(), "{slug} should be valid");
        }
    }

    #[test]
    fn test_invalid_room_slugs() {
        for slug in ["", "ab", "Studio", "1abc", "studio--a", "studio-", "-studio", "stu dio", "stü-a"] {
            let request = CreateIngressRequest::new(slug, "Alex", false);
            let errors = request.validate().unwrap_err();
            assert!(
                errors.issues().iter().all(|i| i.path == "roomSlug"),
                "{slug} should only fail roomSlug"
            );
        }
    }

    #[test]
    fn test_short_streamer_name_is_rejected() {
        let errors = CreateIngressRequest::new("studio-a", "Al", true)
            .validate()
            .unwrap_err();
        assert_eq!(errors.issues().len(), 1);
        assert_eq!(errors.issues()[0].path, "streamerName");

        // Length counts UTF-16 code units, not bytes or chars.
        assert!(CreateIngressRequest::new("studio-a", "Zoë", true).validate().is_ok());
        assert!(CreateIngressRequest::new("studio-a", "😀a", false).validate().is_ok());
        assert!(CreateIngressRequest::new("studio-a", "😀", false).validate().is_err());
    }

    #[test]
    fn test_short_and_malformed_slug_reports_every_issue() {
        let errors = CreateIngressRequest::new("A", "", false).validate().unwrap_err();
        let paths: Vec<&str> = errors.issues().iter().map(|i| i.path).collect();
        assert_eq!(paths, vec!["roomSlug", "roomSlug", "streamerName"]);
    }

    #[test]
    fn test_room_slug_fills_all_identity_roles() {
        let options = CreateIngressRequest::new("studio-a", "Alex", true).to_options();
        assert_eq!(options.name, "studio-a");
        assert_eq!(options.room_name, "studio-a");
        assert_eq!(options.participant_identity, "studio-a");
        assert_eq!(options.participant_name, "Alex");
    }

    #[tokio::test]
    async fn test_create_rtmp_attaches_fixed_presets() {
        let client = Arc::new(RecordingClient::default());
        let request = CreateIngressRequest::new("studio-a", "Alex", false);

        let info = gateway(&client).create(&request).await.unwrap();
        assert_eq!(info.id(), Some("IN_studio-a"));

        let expected = CreateIngressOptions {
            name: "studio-a".to_string(),
            room_name: "studio-a".to_string(),
            participant_identity: "studio-a".to_string(),
            participant_name: "Alex".to_string(),
            bypass_transcoding: false,
            video: Some(IngressVideoOptions {
                source: TrackSource::Camera,
                preset: IngressVideoEncodingPreset::H264_1080P_30FPS_3_LAYERS,
            }),
            audio: Some(IngressAudioOptions {
                source: TrackSource::Microphone,
                preset: IngressAudioEncodingPreset::OPUS_STEREO_96KBPS,
            }),
        };
        assert_eq!(client.calls(), vec![Call::Create(IngressInput::Rtmp, expected)]);
    }

    #[tokio::test]
    async fn test_create_whip_bypasses_transcoding() {
        let client = Arc::new(RecordingClient::default());
        let request = CreateIngressRequest::new("late-night-show", "Sam Host", true);

        gateway(&client).create(&request).await.unwrap();

        match client.calls().as_slice() {
            [Call::Create(input, options)] => {
                assert_eq!(*input, IngressInput::Whip);
                assert!(options.bypass_transcoding);
                assert!(options.video.is_none());
                assert!(options.audio.is_none());
                assert_eq!(options.participant_identity, "late-night-show");
            }
            other => panic!("unexpected calls: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_request_never_reaches_client() {
        let client = Arc::new(RecordingClient::default());
        let request = CreateIngressRequest::new("Bad_Slug", "Alex", false);

        let err = gateway(&client).create(&request).await.unwrap_err();
        assert!(err.is_validation());
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_propagates_without_retry() {
        let client = Arc::new(RecordingClient::default().failing_create());
        let request = CreateIngressRequest::new("studio-a", "Alex", false);

        let err = gateway(&client).create(&request).await.unwrap_err();
        assert!(matches!(err, IngressError::Service(_)));
        assert_eq!(client.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_all_skips_entries_without_id() {
        let client = Arc::new(RecordingClient::with_listing(&[Some("a"), None, Some("c"), Some("")]));

        let deleted = gateway(&client).delete_all().await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(
            client.calls(),
            vec![
                Call::List,
                Call::Delete("a".to_string()),
                Call::Delete("c".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_all_stops_at_first_failure() {
        let client = Arc::new(
            RecordingClient::with_listing(&[Some("a"), Some("b"), Some("c")]).failing_delete("b"),
        );

        let err = gateway(&client).delete_all().await.unwrap_err();
        assert!(matches!(err, IngressError::Service(_)));
        assert_eq!(
            client.calls(),
            vec![
                Call::List,
                Call::Delete("a".to_string()),
                Call::Delete("b".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_delete_all_on_empty_listing() {
        let client = Arc::new(RecordingClient::default());
        assert_eq!(gateway(&client).delete_all().await.unwrap(), 0);
        assert_eq!(client.calls(), vec![Call::List]);
    }

    #[tokio::test]
    async fn test_delete_all_listing_failure_deletes_nothing() {
        let client = Arc::new(RecordingClient::with_listing(&[Some("a")]).failing_list());
        assert!(gateway(&client).delete_all().await.is_err());
        assert_eq!(client.calls(), vec![Call::List]);
    }
}
