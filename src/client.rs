// Kubernetes side of `create`: the client factory and the create call.

use async_trait::async_trait;
use kube::api::{Api, PostParams};
use kube::{Client, ResourceExt};
use tracing::debug;

use crate::error::{BoxError, TriggerError};
use crate::types::NATSTrigger;

/// Write boundary for NATS triggers.
#[async_trait]
pub trait TriggerApi: Send + Sync {
    /// Creates `trigger` in its own namespace and returns the stored object.
    async fn create(&self, trigger: &NATSTrigger) -> Result<NATSTrigger, BoxError>;
}

pub struct KubeTriggerApi {
    client: Client,
}

impl KubeTriggerApi {
    /// Builds a client from the local kubeconfig or the in-cluster environment.
    pub async fn connect() -> Result<Self, TriggerError> {
        let client = Client::try_default().await.map_err(TriggerError::Client)?;
        debug!(default_namespace = %client.default_namespace(), "connected to cluster");
        Ok(Self { client })
    }
}

#[async_trait]
impl TriggerApi for KubeTriggerApi {
    async fn create(&self, trigger: &NATSTrigger) -> Result<NATSTrigger, BoxError> {
        let namespace = trigger.namespace().unwrap_or_else(|| self.client.default_namespace().to_string());
        let api: Api<NATSTrigger> = Api::namespaced(self.client.clone(), &namespace);
        let created = api.create(&PostParams::default(), trigger).await?;
        Ok(created)
    }
}
