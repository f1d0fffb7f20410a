// NATSTrigger custom resource and the constants stamped onto every trigger.

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const TRIGGER_API_VERSION: &str = "kubeless.io/v1beta1";
pub const TRIGGER_KIND: &str = "NATSTrigger";
pub const CREATED_BY_LABEL: &str = "created-by";
pub const CREATED_BY_VALUE: &str = "kubeless";

/// Binds a NATS topic to the functions matched by `function_selector`.
#[derive(CustomResource, Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
#[kube(
    group = "kubeless.io",
    version = "v1beta1",
    kind = "NATSTrigger",
    plural = "natstriggers",
    namespaced
)]
pub struct NATSTriggerSpec {
    /// NATS subject the trigger subscribes to
    pub topic: String,
    /// Functions whose labels match are invoked for every message on `topic`
    pub function_selector: LabelSelector,
}
