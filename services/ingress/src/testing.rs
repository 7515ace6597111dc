//! In-memory `IngressClient` that records every call.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::error::ServiceError;
use crate::livekit::{CreateIngressOptions, IngressClient, IngressInfo, IngressInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Create(IngressInput, CreateIngressOptions),
    List,
    Delete(String),
}

#[derive(Default)]
pub struct RecordingClient {
    calls: Mutex<Vec<Call>>,
    listing: Vec<IngressInfo>,
    fail_create: bool,
    fail_list: bool,
    fail_delete: Option<String>,
}

impl RecordingClient {
    pub fn with_listing(ids: &[Option<&str>]) -> Self {
        let listing = ids
            .iter()
            .enumerate()
            .map(|(i, id)| IngressInfo {
                ingress_id: id.map(str::to_string),
                name: Some(format!("ingress-{}", i)),
                ..Default::default()
            })
            .collect();
        Self {
            listing,
            ..Default::default()
        }
    }

    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    pub fn failing_list(mut self) -> Self {
        self.fail_list = true;
        self
    }

    pub fn failing_delete(mut self, ingress_id: &str) -> Self {
        self.fail_delete = Some(ingress_id.to_string());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn unavailable() -> ServiceError {
    ServiceError::Twirp {
        status: 503,
        code: "unavailable".to_string(),
        msg: "livekit unavailable".to_string(),
    }
}

#[async_trait]
impl IngressClient for RecordingClient {
    async fn create_ingress(
        &self,
        input: IngressInput,
        options: CreateIngressOptions,
    ) -> Result<IngressInfo, ServiceError> {
        let info = IngressInfo {
            ingress_id: Some(format!("IN_{}", options.name)),
            name: Some(options.name.clone()),
            room_name: Some(options.room_name.clone()),
            input_type: Some(serde_json::Value::String(input.to_string())),
            ..Default::default()
        };
        self.record(Call::Create(input, options));

        if self.fail_create {
            return Err(unavailable());
        }
        Ok(info)
    }

    async fn list_ingress(&self) -> Result<Vec<IngressInfo>, ServiceError> {
        self.record(Call::List);
        if self.fail_list {
            return Err(unavailable());
        }
        Ok(self.listing.clone())
    }

    async fn delete_ingress(&self, ingress_id: &str) -> Result<(), ServiceError> {
        self.record(Call::Delete(ingress_id.to_string()));
        if self.fail_delete.as_deref() == Some(ingress_id) {
            return Err(ServiceError::Twirp {
                status: 404,
                code: "not_found".to_string(),
                msg: format!("ingress {} not found", ingress_id),
            });
        }
        Ok(())
    }
}
