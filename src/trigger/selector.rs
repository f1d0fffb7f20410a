// Equality-based label selector expressions: `key1=value1,key2=value2`.

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector as MetaLabelSelector;

use crate::error::TriggerError;

const MAX_NAME_LEN: usize = 63;
const MAX_PREFIX_LEN: usize = 253;

/// Conjunction of `key=value` requirements a function must satisfy to be selected.
///
/// An expression with no pairs parses into an empty selector, which
/// `matches` treats as selecting no function. The submitted resource then
/// carries `functionSelector: {}`, and Kubernetes reads an empty selector as
/// matching everything, so what the trigger controller selects is up to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSelector {
    match_labels: BTreeMap<String, String>,
}

impl LabelSelector {
    /// Parses `expr`, trimming whitespace around pairs, keys and values.
    /// `key==value` is read as `key=value`; a repeated key keeps its last value.
    pub fn parse(expr: &str) -> Result<Self, TriggerError> {
        let mut match_labels = BTreeMap::new();
        if expr.trim().is_empty() {
            return Ok(Self { match_labels });
        }
        for segment in expr.split(',') {
            let (key, value) = split_requirement(expr, segment.trim())?;
            validate_key(expr, key)?;
            validate_value(expr, key, value)?;
            match_labels.insert(key.to_string(), value.to_string());
        }
        Ok(Self { match_labels })
    }

    pub fn is_empty(&self) -> bool {
        self.match_labels.is_empty()
    }

    #[cfg(test)]
    pub fn match_labels(&self) -> &BTreeMap<String, String> {
        &self.match_labels
    }

    /// True when every required pair is present in `labels`.
    #[cfg(test)]
    pub fn matches(&self, labels: &BTreeMap<String, String>) -> bool {
        !self.is_empty()
            && self
                .match_labels
                .iter()
                .all(|(k, v)| labels.get(k) == Some(v))
    }
}

/// Canonical form: pairs sorted by key, joined by `,`.
impl fmt::Display for LabelSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pairs: Vec<String> = self
            .match_labels
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        f.write_str(&pairs.join(","))
    }
}

impl From<&LabelSelector> for MetaLabelSelector {
    fn from(selector: &LabelSelector) -> Self {
        MetaLabelSelector {
            match_labels: (!selector.is_empty()).then(|| selector.match_labels.clone()),
            match_expressions: None,
        }
    }
}

fn split_requirement<'a>(expr: &str, segment: &'a str) -> Result<(&'a str, &'a str), TriggerError> {
    let (key, value) = segment.split_once('=').ok_or_else(|| {
        TriggerError::invalid_selector(expr, format!("missing '=' in {:?}", segment))
    })?;
    if key.ends_with('!') {
        return Err(TriggerError::invalid_selector(
            expr,
            format!("only equality requirements are supported, got {:?}", segment),
        ));
    }
    let value = value.strip_prefix('=').unwrap_or(value);
    Ok((key.trim(), value.trim()))
}

/// Qualified name: optional DNS subdomain prefix and `/`, then a 1-63 char name.
fn validate_key(expr: &str, key: &str) -> Result<(), TriggerError> {
    if key.is_empty() {
        return Err(TriggerError::invalid_selector(expr, "empty label key"));
    }
    let name = match key.split_once('/') {
        Some((prefix, name)) => {
            if !is_dns_subdomain(prefix) {
                return Err(TriggerError::invalid_selector(
                    expr,
                    format!("label key prefix {:?} must be a DNS subdomain", prefix),
                ));
            }
            name
        }
        None => key,
    };
    if name.is_empty() || !is_label_token(name) {
        return Err(TriggerError::invalid_selector(
            expr,
            format!(
                "label key {:?} must be at most {} alphanumeric, '-', '_' or '.' characters, starting and ending with an alphanumeric",
                key, MAX_NAME_LEN
            ),
        ));
    }
    Ok(())
}

fn validate_value(expr: &str, key: &str, value: &str) -> Result<(), TriggerError> {
    if value.is_empty() || is_label_token(value) {
        return Ok(());
    }
    Err(TriggerError::invalid_selector(
        expr,
        format!(
            "value {:?} for label {:?} must be empty or at most {} alphanumeric, '-', '_' or '.' characters, starting and ending with an alphanumeric",
            value, key, MAX_NAME_LEN
        ),
    ))
}

fn is_label_token(s: &str) -> bool {
    let bytes = s.as_bytes();
    match (bytes.first(), bytes.last()) {
        (Some(first), Some(last)) => {
            s.len() <= MAX_NAME_LEN
                && first.is_ascii_alphanumeric()
                && last.is_ascii_alphanumeric()
                && bytes
                    .iter()
                    .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
        }
        _ => false,
    }
}

fn is_dns_subdomain(s: &str) -> bool {
    !s.is_empty()
        && s.len() <= MAX_PREFIX_LEN
        && s.split('.').all(|part| {
            let bytes = part.as_bytes();
            match (bytes.first(), bytes.last()) {
                (Some(first), Some(last)) => {
                    part.len() <= MAX_NAME_LEN
                        && (first.is_ascii_lowercase() || first.is_ascii_digit())
                        && (last.is_ascii_lowercase() || last.is_ascii_digit())
                        && bytes
                            .iter()
                            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || *b == b'-')
                }
                _ => false,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn labels(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_pairs() {
        let selector = LabelSelector::parse("app=billing,tier=backend").unwrap();
        assert_eq!(
            selector.match_labels(),
            &labels(&[("app", "billing"), ("tier", "backend")])
        );
    }

    #[test]
    fn test_display_reproduces_pair_set() {
        let selector = LabelSelector::parse(" tier = backend , app=billing,kubeless.io/fn=orders").unwrap();
        let reparsed = LabelSelector::parse(&selector.to_string()).unwrap();
        assert_eq!(selector, reparsed);
        assert_eq!(selector.to_string(), "app=billing,kubeless.io/fn=orders,tier=backend");
    }

    fn label_key() -> impl Strategy<Value = String> {
        let name = "[a-zA-Z0-9]([a-zA-Z0-9_.-]{0,20}[a-zA-Z0-9])?";
        prop_oneof![
            name.prop_map(|n| n.to_string()),
            ("[a-z0-9]([a-z0-9-]{0,10}[a-z0-9])?(\\.[a-z0-9]{1,8}){0,2}", name)
                .prop_map(|(prefix, n)| format!("{}/{}", prefix, n)),
        ]
    }

    fn label_value() -> impl Strategy<Value = String> {
        prop_oneof![
            Just(String::new()),
            "[a-zA-Z0-9]([a-zA-Z0-9_.-]{0,20}[a-zA-Z0-9])?".prop_map(|v| v.to_string()),
        ]
    }

    proptest! {
        #[test]
        fn canonical_form_round_trips(pairs in prop::collection::btree_map(label_key(), label_value(), 1..6)) {
            let expr = pairs
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join(",");
            let selector = LabelSelector::parse(&expr).unwrap();
            prop_assert_eq!(selector.match_labels(), &pairs);
            let reparsed = LabelSelector::parse(&selector.to_string()).unwrap();
            prop_assert_eq!(reparsed.match_labels(), &pairs);
        }
    }

    #[test]
    fn test_double_equals_is_equality() {
        let selector = LabelSelector::parse("app==billing").unwrap();
        assert_eq!(selector.match_labels(), &labels(&[("app", "billing")]));
    }

    #[test]
    fn test_empty_value_allowed() {
        let selector = LabelSelector::parse("canary=").unwrap();
        assert_eq!(selector.match_labels(), &labels(&[("canary", "")]));
    }

    #[test]
    fn test_repeated_key_keeps_last_value() {
        let selector = LabelSelector::parse("app=a,app=b").unwrap();
        assert_eq!(selector.match_labels(), &labels(&[("app", "b")]));
    }

    #[test]
    fn test_missing_equals_rejected() {
        for expr in ["app", "app=billing,tier", "app=billing,", ",app=billing"] {
            let err = LabelSelector::parse(expr).unwrap_err();
            assert!(
                matches!(err, TriggerError::Validation { .. }),
                "{} should be rejected, got {:?}",
                expr,
                err
            );
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = LabelSelector::parse("=billing").unwrap_err();
        assert!(err.to_string().contains("empty label key"));
    }

    #[test]
    fn test_inequality_rejected() {
        let err = LabelSelector::parse("app!=billing").unwrap_err();
        assert!(matches!(err, TriggerError::Validation { .. }));
    }

    #[test]
    fn test_invalid_characters_rejected() {
        assert!(LabelSelector::parse("app=bill ing").is_err());
        assert!(LabelSelector::parse("-app=billing").is_err());
        assert!(LabelSelector::parse("Bad_Prefix/app=billing").is_err());
        assert!(LabelSelector::parse(&format!("app={}", "a".repeat(64))).is_err());
    }

    #[test]
    fn test_empty_expression_matches_nothing() {
        let selector = LabelSelector::parse("  ").unwrap();
        assert!(selector.is_empty());
        assert!(!selector.matches(&labels(&[("app", "billing")])));
        assert!(!selector.matches(&BTreeMap::new()));
    }

    #[test]
    fn test_matches_is_conjunction() {
        let selector = LabelSelector::parse("app=billing,tier=backend").unwrap();
        assert!(selector.matches(&labels(&[("app", "billing"), ("tier", "backend"), ("x", "y")])));
        assert!(!selector.matches(&labels(&[("app", "billing")])));
        assert!(!selector.matches(&labels(&[("app", "billing"), ("tier", "frontend")])));
    }

    #[test]
    fn test_into_meta_selector() {
        let selector = LabelSelector::parse("app=billing").unwrap();
        let meta = MetaLabelSelector::from(&selector);
        assert_eq!(meta.match_labels, Some(labels(&[("app", "billing")])));
        assert!(meta.match_expressions.is_none());

        let empty = MetaLabelSelector::from(&LabelSelector::default());
        assert!(empty.match_labels.is_none());
    }
}
