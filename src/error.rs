// Errors surfaced by `nats-trigger create`. Every variant ends the invocation.

/// Opaque cause returned by the resource API collaborator.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum TriggerError {
    /// Missing or malformed command-line arguments.
    #[error("{0}")]
    Usage(String),

    #[error("invalid label selector {expression:?}: {reason}")]
    Validation { expression: String, reason: String },

    #[error("can not create out-of-cluster client: {0}")]
    Client(kube::Error),

    #[error("failed to render NATS trigger: {0}")]
    Render(String),

    #[error("failed to create NATS trigger object {name} in namespace {namespace}. Error: {cause}")]
    Submission {
        name: String,
        namespace: String,
        cause: BoxError,
    },
}

impl TriggerError {
    pub fn usage(message: impl Into<String>) -> Self {
        TriggerError::Usage(message.into())
    }

    pub fn invalid_selector(expression: &str, reason: impl Into<String>) -> Self {
        TriggerError::Validation {
            expression: expression.to_string(),
            reason: reason.into(),
        }
    }
}
