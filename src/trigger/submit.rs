// Build the NATSTrigger resource and either render it or create it.

use std::collections::BTreeMap;
use std::future::Future;

use kube::ResourceExt;
use tracing::debug;

use super::render::{render, OutputFormat};
use super::resolve::TriggerSpec;
use crate::client::TriggerApi;
use crate::error::TriggerError;
use crate::types::{NATSTrigger, NATSTriggerSpec, CREATED_BY_LABEL, CREATED_BY_VALUE, TRIGGER_API_VERSION, TRIGGER_KIND};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionResult {
    /// Dry run: the manifest that would have been created.
    Rendered(String),
    Created { name: String, namespace: String },
}

/// Same spec in, same resource out.
pub fn build_trigger(spec: &TriggerSpec) -> NATSTrigger {
    let mut trigger = NATSTrigger::new(
        &spec.name,
        NATSTriggerSpec {
            topic: spec.topic.clone(),
            function_selector: (&spec.function_selector).into(),
        },
    );
    trigger.metadata.namespace = Some(spec.namespace.clone());
    trigger.metadata.labels = Some(BTreeMap::from([(
        CREATED_BY_LABEL.to_string(),
        CREATED_BY_VALUE.to_string(),
    )]));
    trigger
}

/// Renders the trigger when `dry_run` is set, otherwise creates it through the
/// API returned by `connect`. `connect` is only called on the create path and
/// the create call is attempted once.
pub async fn submit<C, Fut, A>(
    spec: &TriggerSpec,
    dry_run: bool,
    output: &str,
    connect: C,
) -> Result<SubmissionResult, TriggerError>
where
    C: FnOnce() -> Fut,
    Fut: Future<Output = Result<A, TriggerError>>,
    A: TriggerApi,
{
    let trigger = build_trigger(spec);

    if dry_run {
        let format: OutputFormat = output.parse()?;
        debug!(trigger = %spec.name, format = %format, "rendering {} {}", TRIGGER_API_VERSION, TRIGGER_KIND);
        return render(format, &trigger).map(SubmissionResult::Rendered);
    }

    let api = connect().await?;
    debug!(trigger = %spec.name, namespace = %spec.namespace, "creating {} {}", TRIGGER_API_VERSION, TRIGGER_KIND);
    let created = api
        .create(&trigger)
        .await
        .map_err(|cause| TriggerError::Submission {
            name: spec.name.clone(),
            namespace: spec.namespace.clone(),
            cause,
        })?;
    let uid = created.uid().unwrap_or_default();
    debug!(trigger = %spec.name, namespace = %spec.namespace, uid = %uid, "NATS trigger stored");

    Ok(SubmissionResult::Created {
        name: spec.name.clone(),
        namespace: spec.namespace.clone(),
    })
}
