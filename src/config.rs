// Process-wide settings resolved once per invocation and passed down explicitly.

use tracing::debug;

pub const FALLBACK_NAMESPACE: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Namespace used when `--namespace` is not given.
    pub default_namespace: String,
}

impl Config {
    pub fn new(default_namespace: impl Into<String>) -> Self {
        Self {
            default_namespace: default_namespace.into(),
        }
    }

    /// Takes the namespace of the current kubeconfig context (or the pod's
    /// namespace when running in-cluster). Never fails: without any cluster
    /// configuration the namespace is `default`.
    pub async fn infer() -> Self {
        match kube::Config::infer().await {
            Ok(config) if !config.default_namespace.is_empty() => Self::new(config.default_namespace),
            Ok(_) => Self::default(),
            Err(e) => {
                debug!(error = %e, "no cluster configuration found, using namespace {}", FALLBACK_NAMESPACE);
                Self::default()
            }
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(FALLBACK_NAMESPACE)
    }
}
