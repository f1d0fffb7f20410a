// Resolve command-line inputs into a validated TriggerSpec.

use tracing::debug;

use super::selector::LabelSelector;
use crate::error::TriggerError;

/// Validated inputs for one NATS trigger. `(namespace, name)` identifies it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerSpec {
    pub name: String,
    pub namespace: String,
    pub topic: String,
    pub function_selector: LabelSelector,
}

/// Validates the raw arguments of `create`.
///
/// `names` are the positional arguments and must hold exactly one trigger name.
/// An empty `namespace` falls back to `default_namespace`; any other value is
/// used as-is and left for the API server to check.
pub fn resolve(
    names: &[String],
    namespace: &str,
    topic: Option<&str>,
    function_selector: Option<&str>,
    default_namespace: &str,
) -> Result<TriggerSpec, TriggerError> {
    let name = match names {
        [name] if !name.trim().is_empty() => name.clone(),
        [_] => return Err(TriggerError::usage("NATS trigger name must not be empty")),
        _ => {
            return Err(TriggerError::usage(
                "Need exactly one argument - NATS trigger name",
            ))
        }
    };

    let topic = match topic {
        Some(t) if !t.trim().is_empty() => t.to_string(),
        _ => return Err(TriggerError::usage("required flag \"trigger-topic\" not set")),
    };

    let expr = function_selector
        .ok_or_else(|| TriggerError::usage("required flag \"function-selector\" not set"))?;

    let namespace = if namespace.is_empty() {
        default_namespace.to_string()
    } else {
        namespace.to_string()
    };

    let function_selector = LabelSelector::parse(expr)?;
    if function_selector.is_empty() {
        debug!(trigger = %name, "empty function selector: functionSelector will carry no matchLabels");
    }

    debug!(
        trigger = %name,
        namespace = %namespace,
        topic = %topic,
        selector = %function_selector,
        "resolved NATS trigger"
    );
    Ok(TriggerSpec {
        name,
        namespace,
        topic,
        function_selector,
    })
}
